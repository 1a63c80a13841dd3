// hubkit-api: Async Rust client for the customer address inventory service

pub mod error;
pub mod inventory;
pub mod transport;

pub use error::Error;
pub use inventory::InventoryClient;
pub use transport::{TlsMode, TransportConfig};
