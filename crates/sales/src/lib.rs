//! Sales ledger module.
//!
//! This crate contains the completed-sale record and its append-only history,
//! implemented purely as deterministic domain logic (no IO, no storage).

pub mod ledger;

pub use ledger::{Sale, SalesLedger};
