//! # Image Resolver
//!
//! Resolves the container images active on a set of machines into the
//! distinct image records, per-image active instance counts, and the image
//! id set the vulnerability lookup is batched over.
use log::{debug, info};
use std::collections::{BTreeSet, HashMap};

use super::TimeWindow;
use crate::VigilError;
use crate::client::entities::ImageEntity;
use crate::client::{Filter, SearchRequest, VigilClient};

/// Fields the image search asks the platform to return
pub const IMAGE_FIELDS: [&str; 6] = ["imageCreatedTime", "imageId", "repo", "size", "tag", "mid"];

/// Container images active on the resolved machines
#[derive(Debug, Default, Clone)]
pub struct ImageInventory {
    /// Distinct image records, full-tuple deduplicated and sorted
    records: Vec<ImageEntity>,
    /// Image id to number of machine instances running it
    active_counts: HashMap<String, u32>,
    /// Distinct image ids
    image_ids: BTreeSet<String>,
}

impl ImageInventory {
    /// Query images active on the given machines and build the inventory
    ///
    /// An empty machine set short-circuits to an empty inventory instead of
    /// issuing an unbounded search.
    pub async fn resolve(
        client: &VigilClient,
        window: &TimeWindow,
        mids: &BTreeSet<u64>,
    ) -> Result<Self, VigilError> {
        if mids.is_empty() {
            debug!("No machines to resolve images for");
            return Ok(Self::default());
        }

        let request = SearchRequest::new(window.time_filter())
            .filter(Filter::is_in(
                "mid",
                mids.iter().map(|mid| serde_json::Value::from(*mid)).collect(),
            ))
            .returns(&IMAGE_FIELDS);

        let images = ImageEntity::search(client, &request).await?;
        let inventory = Self::from_entities(images);
        info!(
            "Images: {} distinct records, {} distinct image ids",
            inventory.records.len(),
            inventory.image_ids.len()
        );
        Ok(inventory)
    }

    /// Build the inventory from raw image records
    ///
    /// Records are deduplicated by full-field equality (paginated responses
    /// can repeat records), so the same image id on two machines stays as two
    /// records. Active counts are taken over the deduplicated set: one count
    /// per machine instance running the image.
    pub fn from_entities(images: Vec<ImageEntity>) -> Self {
        let distinct: BTreeSet<ImageEntity> = images.into_iter().collect();

        let mut active_counts: HashMap<String, u32> = HashMap::new();
        let mut image_ids = BTreeSet::new();
        for image in &distinct {
            *active_counts.entry(image.image_id.clone()).or_insert(0) += 1;
            image_ids.insert(image.image_id.clone());
        }

        Self {
            records: distinct.into_iter().collect(),
            active_counts,
            image_ids,
        }
    }

    /// Distinct image records
    pub fn records(&self) -> &[ImageEntity] {
        &self.records
    }

    /// Number of machine instances running the image
    pub fn active_count(&self, image_id: &str) -> Option<u32> {
        self.active_counts.get(image_id).copied()
    }

    /// Distinct image ids
    pub fn image_ids(&self) -> &BTreeSet<String> {
        &self.image_ids
    }

    /// True when no images were seen
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(image_id: &str, repo: &str, tag: &str, mid: u64) -> ImageEntity {
        ImageEntity {
            repo: repo.to_string(),
            tag: tag.to_string(),
            image_id: image_id.to_string(),
            image_created_time: "2026-08-01T00:00:00Z".parse().unwrap(),
            size: 1024,
            mid,
        }
    }

    #[test]
    fn test_full_tuple_deduplication() {
        // pages can repeat the exact same record
        let inventory = ImageInventory::from_entities(vec![
            image("sha256:aaaa", "app", "v1", 1),
            image("sha256:aaaa", "app", "v1", 1),
        ]);

        assert_eq!(inventory.records().len(), 1);
        assert_eq!(inventory.active_count("sha256:aaaa"), Some(1));
    }

    #[test]
    fn test_same_image_on_two_machines_is_two_records() {
        let inventory = ImageInventory::from_entities(vec![
            image("sha256:aaaa", "app", "v1", 1),
            image("sha256:aaaa", "app", "v1", 2),
        ]);

        assert_eq!(inventory.records().len(), 2);
        assert_eq!(inventory.active_count("sha256:aaaa"), Some(2));
        assert_eq!(inventory.image_ids().len(), 1);
    }

    #[test]
    fn test_active_count_counts_instances_not_images() {
        let inventory = ImageInventory::from_entities(vec![
            image("sha256:aaaa", "app", "v1", 1),
            image("sha256:aaaa", "app", "v1", 2),
            image("sha256:aaaa", "app", "v1", 3),
            image("sha256:bbbb", "db", "v2", 1),
        ]);

        assert_eq!(inventory.active_count("sha256:aaaa"), Some(3));
        assert_eq!(inventory.active_count("sha256:bbbb"), Some(1));
        assert_eq!(inventory.active_count("sha256:cccc"), None);
    }

    #[test]
    fn test_empty_inventory() {
        let inventory = ImageInventory::from_entities(Vec::new());
        assert!(inventory.is_empty());
        assert!(inventory.image_ids().is_empty());
    }
}
