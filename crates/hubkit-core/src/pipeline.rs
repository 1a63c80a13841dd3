// ── Address export pipeline ──
//
// fetch (sequential, validated per record) -> CSV export. Nothing is
// written unless every record was fetched and validated.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::address::Address;
use crate::error::CoreError;
use crate::export::export_addresses;
use crate::fetch::{AddressSource, fetch_addresses};

/// Outcome of a successful export run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportSummary {
    /// Where the CSV was written.
    pub path: PathBuf,
    /// The exported rows, in customer-number order.
    pub addresses: Vec<Address>,
}

/// Fetch every customer address from `source` and export them to `path`.
pub async fn export_customer_addresses<S: AddressSource>(
    source: &S,
    path: &Path,
) -> Result<ExportSummary, CoreError> {
    let addresses = fetch_addresses(source).await?;
    let path = export_addresses(&addresses, path)?;
    info!(rows = addresses.len(), path = %path.display(), "export complete");
    Ok(ExportSummary { path, addresses })
}
