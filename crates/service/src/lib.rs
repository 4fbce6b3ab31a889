//! Inventory service: the one orchestrator over catalog, queue and ledger.
//!
//! The shell talks to [`InventoryService`]; the service reads/mutates the
//! catalog and queue and appends to the ledger. Nothing here calls back out.

pub mod config;
pub mod service;

pub use config::{
    AdmissionPolicy, FulfillmentPolicy, ServiceConfig, DEFAULT_LOW_STOCK_THRESHOLD,
};
pub use service::{FulfillmentReceipt, InventoryService, StockReportKind, Submission};
