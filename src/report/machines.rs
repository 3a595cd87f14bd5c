//! # Machine Resolver
//!
//! Resolves the machines belonging to an account into the machine id set and
//! the machine-to-cluster mapping the rest of the report joins against.
use log::{debug, info};
use std::collections::{BTreeSet, HashMap};

use super::TimeWindow;
use crate::VigilError;
use crate::client::entities::MachineEntity;
use crate::client::{Filter, SearchRequest, VigilClient};

/// Machine tag carrying the Kubernetes cluster name
pub const CLUSTER_TAG: &str = "aws:eks:cluster-name";
/// Machine tag field the account filter targets
pub const ACCOUNT_TAG_FIELD: &str = "machineTags.Account";

/// Machines seen in the time window for one account
#[derive(Debug, Default, Clone)]
pub struct MachineInventory {
    /// Machine id to cluster name, only machines carrying [`CLUSTER_TAG`]
    clusters: HashMap<u64, String>,
    /// Every distinct machine id seen, cluster-tagged or not
    mids: BTreeSet<u64>,
}

impl MachineInventory {
    /// Query machines tagged with the account and build the inventory
    pub async fn resolve(
        client: &VigilClient,
        window: &TimeWindow,
        account: &str,
    ) -> Result<Self, VigilError> {
        debug!("Resolving machines for account: {}", account);
        let request = SearchRequest::new(window.time_filter())
            .filter(Filter::eq(ACCOUNT_TAG_FIELD, account));

        let machines = MachineEntity::search(client, &request).await?;
        let inventory = Self::from_entities(machines);
        info!(
            "Machines: {} total, {} cluster-tagged",
            inventory.len(),
            inventory.clusters.len()
        );
        Ok(inventory)
    }

    /// Build the inventory from raw machine records
    pub fn from_entities(machines: Vec<MachineEntity>) -> Self {
        let mut inventory = Self::default();
        for machine in machines {
            if let Some(cluster) = machine.tag(CLUSTER_TAG) {
                inventory.clusters.insert(machine.mid, cluster.to_string());
            }
            inventory.mids.insert(machine.mid);
        }
        inventory
    }

    /// Cluster name for a machine, if it carries the cluster tag
    pub fn cluster(&self, mid: u64) -> Option<&str> {
        self.clusters.get(&mid).map(|cluster| cluster.as_str())
    }

    /// Distinct machine ids seen in the window
    pub fn mids(&self) -> &BTreeSet<u64> {
        &self.mids
    }

    /// Number of distinct machines
    pub fn len(&self) -> usize {
        self.mids.len()
    }

    /// True when no machines matched the account filter
    pub fn is_empty(&self) -> bool {
        self.mids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine(mid: u64, cluster: Option<&str>) -> MachineEntity {
        let mut tags = HashMap::new();
        tags.insert("Account".to_string(), serde_json::json!("838515539440"));
        if let Some(cluster) = cluster {
            tags.insert(CLUSTER_TAG.to_string(), serde_json::json!(cluster));
        }
        MachineEntity {
            mid,
            machine_tags: tags,
        }
    }

    #[test]
    fn test_cluster_map_only_holds_tagged_machines() {
        let inventory = MachineInventory::from_entities(vec![
            machine(1, Some("prod")),
            machine(2, None),
            machine(3, Some("staging")),
        ]);

        assert_eq!(inventory.cluster(1), Some("prod"));
        assert_eq!(inventory.cluster(2), None);
        assert_eq!(inventory.cluster(3), Some("staging"));
    }

    #[test]
    fn test_mid_set_holds_all_machines() {
        let inventory = MachineInventory::from_entities(vec![
            machine(1, Some("prod")),
            machine(2, None),
            machine(2, None),
        ]);

        assert_eq!(inventory.len(), 2);
        assert_eq!(
            inventory.mids().iter().copied().collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn test_empty_inventory() {
        let inventory = MachineInventory::from_entities(Vec::new());
        assert!(inventory.is_empty());
        assert_eq!(inventory.cluster(1), None);
    }
}
