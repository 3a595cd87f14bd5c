//! # Container Vulnerability Report
//!
//! The report pipeline: resolve machines for an account, resolve the images
//! active on them, resolve findings for those images in one batched call,
//! then aggregate one row per distinct image record.
//!
//! Each stage fully consumes its query (all pages) before the next begins.
use log::warn;

pub mod aggregate;
pub mod csv;
pub mod images;
pub mod machines;
pub mod vulns;
pub mod window;

pub use aggregate::{ReportRow, SeverityCounts, aggregate};
pub use images::ImageInventory;
pub use machines::MachineInventory;
pub use vulns::FindingIndex;
pub use window::TimeWindow;

use crate::{VigilClient, VigilError};

/// Run the full report pipeline and return the sorted rows
pub async fn run(
    client: &VigilClient,
    window: &TimeWindow,
    account: &str,
) -> Result<Vec<ReportRow>, VigilError> {
    let machines = MachineInventory::resolve(client, window, account).await?;
    if machines.is_empty() {
        warn!("No machines found for account '{}'", account);
        return Ok(Vec::new());
    }

    let images = ImageInventory::resolve(client, window, machines.mids()).await?;
    let findings = FindingIndex::resolve(client, window, images.image_ids()).await?;

    aggregate(&images, &findings, &machines)
}
