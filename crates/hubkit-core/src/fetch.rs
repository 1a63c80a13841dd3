// ── Paginated address fetcher ──
//
// One count request, then one request per customer number from 1 to the
// count, strictly in sequence. Each record is validated as soon as it
// arrives; the first failure aborts the run and drops everything fetched
// so far.

use serde_json::Value;
use tracing::{debug, info};

use hubkit_api::InventoryClient;

use crate::address::Address;
use crate::error::CoreError;

/// Anything that can serve the customer count and individual addresses.
///
/// Implemented by [`InventoryClient`]; tests plug in in-memory sources.
pub trait AddressSource {
    /// Total number of customers.
    fn customer_count(&self) -> impl Future<Output = Result<u64, CoreError>>;

    /// Raw address record for a 1-based customer number.
    fn customer_address(&self, number: u64) -> impl Future<Output = Result<Value, CoreError>>;
}

impl AddressSource for InventoryClient {
    async fn customer_count(&self) -> Result<u64, CoreError> {
        InventoryClient::customer_count(self)
            .await
            .map_err(|e| CoreError::transport(e, None))
    }

    async fn customer_address(&self, number: u64) -> Result<Value, CoreError> {
        InventoryClient::customer_address(self, number)
            .await
            .map_err(|e| CoreError::transport(e, Some(number)))
    }
}

/// Fetch and validate every customer address, in customer-number order.
pub async fn fetch_addresses<S: AddressSource>(source: &S) -> Result<Vec<Address>, CoreError> {
    let count = source.customer_count().await?;
    info!(count, "fetching customer addresses");

    let capacity = usize::try_from(count).unwrap_or(usize::MAX);
    let mut addresses = Vec::with_capacity(capacity.min(4096));

    for number in 1..=count {
        let raw = source.customer_address(number).await?;
        let address = Address::from_value(raw)?;
        debug!(number, id = %address.id, "address validated");
        addresses.push(address);
    }

    Ok(addresses)
}
