//! # Platform Entities
//!
//! Wire records returned by the three search endpoints the report consumes.
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{SearchRequest, VigilClient};
use crate::VigilError;

/// Machines search endpoint
pub const MACHINES_SEARCH: &str = "/api/v2/Entities/Machines/search";
/// Active container images search endpoint
pub const IMAGES_SEARCH: &str = "/api/v2/Entities/Images/search";
/// Container vulnerability findings search endpoint
pub const CONTAINER_VULNS_SEARCH: &str = "/api/v2/Vulnerabilities/Containers/search";

/// A machine known to the platform
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineEntity {
    /// Machine identifier
    pub mid: u64,
    /// Machine tags, free-form key/value pairs
    #[serde(default)]
    pub machine_tags: HashMap<String, serde_json::Value>,
}

impl MachineEntity {
    /// Search machines over the time window
    pub async fn search(
        client: &VigilClient,
        request: &SearchRequest,
    ) -> Result<Vec<Self>, VigilError> {
        client.search(MACHINES_SEARCH, request).await
    }

    /// Get a machine tag value as a string, if present
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.machine_tags.get(key).and_then(|value| value.as_str())
    }
}

/// A container image active on a machine
///
/// The same image digest appears once per machine running it, so the full
/// record (including `mid`) is the unit of distinctness.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageEntity {
    /// Image registry repository
    pub repo: String,
    /// Image tag
    pub tag: String,
    /// Image identifier (digest)
    pub image_id: String,
    /// Image creation time
    pub image_created_time: chrono::DateTime<chrono::Utc>,
    /// Image size in bytes
    pub size: u64,
    /// Machine the image is active on
    pub mid: u64,
}

impl ImageEntity {
    /// Search active container images over the time window
    pub async fn search(
        client: &VigilClient,
        request: &SearchRequest,
    ) -> Result<Vec<Self>, VigilError> {
        client.search(IMAGES_SEARCH, request).await
    }
}

/// A vulnerability finding against a container image
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VulnEntity {
    /// Vulnerability identifier (e.g. CVE)
    pub vuln_id: String,
    /// Finding status
    pub status: String,
    /// Finding severity
    pub severity: String,
    /// Image the finding applies to
    pub image_id: String,
}

impl VulnEntity {
    /// Search container vulnerability findings over the time window
    pub async fn search(
        client: &VigilClient,
        request: &SearchRequest,
    ) -> Result<Vec<Self>, VigilError> {
        client.search(CONTAINER_VULNS_SEARCH, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_machine_deserialization() {
        let machine: MachineEntity = serde_json::from_value(serde_json::json!({
            "mid": 42,
            "machineTags": {
                "Account": "838515539440",
                "aws:eks:cluster-name": "prod"
            }
        }))
        .unwrap();

        assert_eq!(machine.mid, 42);
        assert_eq!(machine.tag("aws:eks:cluster-name"), Some("prod"));
        assert_eq!(machine.tag("missing"), None);
    }

    #[test]
    fn test_machine_tags_default_to_empty() {
        let machine: MachineEntity =
            serde_json::from_value(serde_json::json!({ "mid": 7 })).unwrap();
        assert!(machine.machine_tags.is_empty());
    }

    #[test]
    fn test_image_deserialization() {
        let image: ImageEntity = serde_json::from_value(serde_json::json!({
            "imageCreatedTime": "2026-08-01T00:00:00.000Z",
            "imageId": "sha256:aaaa",
            "repo": "index.docker.io/library/app",
            "size": 104857600,
            "tag": "v1",
            "mid": 42
        }))
        .unwrap();

        assert_eq!(image.image_id, "sha256:aaaa");
        assert_eq!(image.size, 104_857_600);
        assert_eq!(image.mid, 42);
    }

    #[test]
    fn test_vuln_deserialization() {
        let vuln: VulnEntity = serde_json::from_value(serde_json::json!({
            "vulnId": "CVE-2026-0001",
            "status": "VULNERABLE",
            "severity": "High",
            "imageId": "sha256:aaaa"
        }))
        .unwrap();

        assert_eq!(vuln.vuln_id, "CVE-2026-0001");
        assert_eq!(vuln.severity, "High");
    }
}
