//! # Vulnerability Resolver
//!
//! Resolves fixable findings for every distinct image id in one batched
//! search and groups them by image.
use log::{debug, info};
use std::collections::{BTreeSet, HashMap};

use super::TimeWindow;
use crate::VigilError;
use crate::client::entities::VulnEntity;
use crate::client::{Filter, SearchRequest, VigilClient};

/// Finding statuses excluded from the report: resolved and waived findings
/// are not fixable.
pub const EXCLUDED_STATUSES: [&str; 2] = ["GOOD", "EXCEPTION"];

/// Fields the vulnerability search asks the platform to return
pub const VULN_FIELDS: [&str; 4] = ["vulnId", "status", "severity", "imageId"];

/// Fixable findings grouped by image id
#[derive(Debug, Default, Clone)]
pub struct FindingIndex {
    by_image: HashMap<String, Vec<VulnEntity>>,
}

impl FindingIndex {
    /// Query findings for every image id in one batched call
    ///
    /// An empty id set short-circuits to an empty index.
    pub async fn resolve(
        client: &VigilClient,
        window: &TimeWindow,
        image_ids: &BTreeSet<String>,
    ) -> Result<Self, VigilError> {
        if image_ids.is_empty() {
            debug!("No images to resolve findings for");
            return Ok(Self::default());
        }

        let request = SearchRequest::new(window.time_filter())
            .filter(Filter::is_in(
                "imageId",
                image_ids
                    .iter()
                    .map(|id| serde_json::Value::from(id.as_str()))
                    .collect(),
            ))
            .filter(Filter::not_in(
                "status",
                EXCLUDED_STATUSES
                    .iter()
                    .map(|status| serde_json::Value::from(*status))
                    .collect(),
            ))
            .returns(&VULN_FIELDS);

        let findings = VulnEntity::search(client, &request).await?;
        info!("Findings: {} raw records", findings.len());
        Ok(Self::from_entities(findings))
    }

    /// Group raw findings by image id
    pub fn from_entities(findings: Vec<VulnEntity>) -> Self {
        let mut by_image: HashMap<String, Vec<VulnEntity>> = HashMap::new();
        for finding in findings {
            by_image
                .entry(finding.image_id.clone())
                .or_default()
                .push(finding);
        }
        Self { by_image }
    }

    /// Findings for an image, empty when the image has none
    pub fn findings(&self, image_id: &str) -> &[VulnEntity] {
        self.by_image
            .get(image_id)
            .map(|findings| findings.as_slice())
            .unwrap_or_default()
    }
}

/// Remove full-tuple duplicate findings, returning them in sorted order
///
/// Paginated responses can repeat findings across pages; a finding counts
/// once per distinct (vulnId, status, severity, imageId) tuple.
pub fn dedup_findings(findings: &[VulnEntity]) -> Vec<VulnEntity> {
    let distinct: BTreeSet<&VulnEntity> = findings.iter().collect();
    distinct.into_iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(vuln_id: &str, severity: &str, image_id: &str) -> VulnEntity {
        VulnEntity {
            vuln_id: vuln_id.to_string(),
            status: "VULNERABLE".to_string(),
            severity: severity.to_string(),
            image_id: image_id.to_string(),
        }
    }

    #[test]
    fn test_grouping_by_image() {
        let index = FindingIndex::from_entities(vec![
            finding("CVE-2026-0001", "High", "sha256:aaaa"),
            finding("CVE-2026-0002", "Low", "sha256:aaaa"),
            finding("CVE-2026-0003", "Critical", "sha256:bbbb"),
        ]);

        assert_eq!(index.findings("sha256:aaaa").len(), 2);
        assert_eq!(index.findings("sha256:bbbb").len(), 1);
        assert!(index.findings("sha256:cccc").is_empty());
    }

    #[test]
    fn test_dedup_removes_repeated_tuples() {
        let findings = vec![
            finding("CVE-2026-0001", "High", "sha256:aaaa"),
            finding("CVE-2026-0001", "High", "sha256:aaaa"),
            finding("CVE-2026-0001", "Medium", "sha256:aaaa"),
        ];

        let distinct = dedup_findings(&findings);
        // same vulnId with a different severity is a different tuple
        assert_eq!(distinct.len(), 2);
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let findings = vec![
            finding("CVE-2026-0001", "High", "sha256:aaaa"),
            finding("CVE-2026-0002", "Low", "sha256:aaaa"),
            finding("CVE-2026-0001", "High", "sha256:aaaa"),
        ];

        let once = dedup_findings(&findings);
        let twice = dedup_findings(&once);
        assert_eq!(once, twice);
    }
}
