//! # Aggregator
//!
//! Joins the three resolved data sets into one report row per distinct
//! image record.
use log::warn;

use super::images::ImageInventory;
use super::machines::MachineInventory;
use super::vulns::{FindingIndex, dedup_findings};
use crate::VigilError;

/// Cluster label used when an image's machine carries no cluster tag
pub const UNKNOWN_CLUSTER: &str = "unknown";

/// Finding counts by severity
///
/// `info` findings have always been folded into the `low` counter in this
/// report; the `info` counter exists so the CSV keeps its Info column but it
/// never increments.
#[derive(Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SeverityCounts {
    /// Critical findings
    pub critical: u32,
    /// High findings
    pub high: u32,
    /// Medium findings
    pub medium: u32,
    /// Low findings, including info findings
    pub low: u32,
    /// Info findings, kept at zero (see above)
    pub info: u32,
}

impl SeverityCounts {
    /// Count one finding, matching its severity case-insensitively
    ///
    /// Unrecognized severities fall through uncounted.
    pub fn record(&mut self, severity: &str) {
        match severity.to_lowercase().as_str() {
            "critical" => self.critical += 1,
            "high" => self.high += 1,
            "medium" => self.medium += 1,
            "low" => self.low += 1,
            "info" => self.low += 1,
            _ => {}
        }
    }

    /// Total fixable findings across all severities
    pub fn total(&self) -> u32 {
        self.critical + self.high + self.medium + self.low + self.info
    }
}

/// One emitted report row: a distinct image record joined with its cluster,
/// active instance count, and severity tallies
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReportRow {
    /// Kubernetes cluster hosting the image, or [`UNKNOWN_CLUSTER`]
    pub cluster: String,
    /// Image registry repository
    pub repo: String,
    /// Image tag
    pub tag: String,
    /// Image identifier (digest)
    pub image_id: String,
    /// Image creation time
    pub created_time: chrono::DateTime<chrono::Utc>,
    /// Image size in bytes
    pub size: u64,
    /// Finding counts by severity
    pub counts: SeverityCounts,
    /// Number of machine instances running the image
    pub active_count: u32,
}

/// Build one row per distinct image record
///
/// Rows come back sorted by cluster, repository, tag, then image id so the
/// report is reproducible across runs. A machine without a cluster tag maps
/// to [`UNKNOWN_CLUSTER`] rather than failing the run; a missing active
/// count is a broken invariant (the count map is derived from the same
/// distinct set) and fails the run.
pub fn aggregate(
    images: &ImageInventory,
    findings: &FindingIndex,
    machines: &MachineInventory,
) -> Result<Vec<ReportRow>, VigilError> {
    let mut rows = Vec::with_capacity(images.records().len());

    for record in images.records() {
        let active_count = images.active_count(&record.image_id).ok_or_else(|| {
            VigilError::InvalidData(format!(
                "No active count for image: {}",
                record.image_id
            ))
        })?;

        let mut counts = SeverityCounts::default();
        for finding in dedup_findings(findings.findings(&record.image_id)) {
            counts.record(&finding.severity);
        }

        let cluster = match machines.cluster(record.mid) {
            Some(cluster) => cluster.to_string(),
            None => {
                warn!(
                    "Machine {} has no cluster tag, image {} reported as '{}'",
                    record.mid, record.image_id, UNKNOWN_CLUSTER
                );
                UNKNOWN_CLUSTER.to_string()
            }
        };

        rows.push(ReportRow {
            cluster,
            repo: record.repo.clone(),
            tag: record.tag.clone(),
            image_id: record.image_id.clone(),
            created_time: record.image_created_time,
            size: record.size,
            counts,
            active_count,
        });
    }

    rows.sort();
    Ok(rows)
}
