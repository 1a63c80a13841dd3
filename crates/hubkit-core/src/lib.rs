//! Core pipelines for hubkit.
//!
//! Two independent tasks share one shape: validate the input against a
//! field contract, transform or order it deterministically, then hand it
//! to an output stage.
//!
//! - **Hub serial assignment** ([`hub`]): validates an `Internet_hubs`
//!   payload, orders hubs by the trailing digit of their id, and assigns
//!   descending serial numbers from a [`SerialPlan`], skipping a sentinel.
//!   Both the untouched snapshot and the updated collection are returned.
//!
//! - **Address export** ([`fetch`], [`export`], [`pipeline`]): reads the
//!   customer count from the inventory service, fetches each address in
//!   index order through an [`AddressSource`], validates every record
//!   against [`ADDRESS_SCHEMA`](validate::ADDRESS_SCHEMA), and writes the
//!   result to a CSV file atomically.
//!
//! - **Validation** ([`validate`]): presence and primitive-type checks over
//!   structurally typed JSON, configured by static field tables.

pub mod address;
pub mod config;
pub mod error;
pub mod export;
pub mod fetch;
pub mod hub;
pub mod pipeline;
pub mod validate;

// ── Primary re-exports ──────────────────────────────────────────────
pub use hubkit_api as api;
pub use address::Address;
pub use config::{InventoryConfig, TlsMode};
pub use error::CoreError;
pub use export::export_addresses;
pub use fetch::{AddressSource, fetch_addresses};
pub use hub::{
    Hub, HubCollection, Reassignment, ReassignmentText, SerialPlan, SortKey, reassign,
    reassign_json, reassign_value,
};
pub use pipeline::{ExportSummary, export_customer_addresses};
pub use validate::{FieldKind, FieldRule, validate_fields, validate_schema};
