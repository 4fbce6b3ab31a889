//! Service policies and tuning knobs.
//!
//! Two divergent fulfillment behaviors and two divergent admission behaviors
//! exist in the wild for this kind of tool; both pairs are explicit policy
//! choices here rather than something the service picks silently.

use serde::{Deserialize, Serialize};

/// Items with `0 < quantity < threshold` show up in the low-stock report.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

/// How `process_next` treats stock shortfalls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FulfillmentPolicy {
    /// Verify every line first; any shortfall fails the whole order and
    /// leaves stock and ledger untouched. The default: strictly safer.
    #[default]
    AllOrNothing,
    /// Decrement regardless of sufficiency (stock may go negative) and record
    /// a sale per line; a missing item is skipped without a sale.
    Unconditional,
}

/// How `submit` treats an invalid order line (unknown item, shortfall at
/// submission time, non-positive quantity).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionPolicy {
    /// The whole submission fails on the first invalid line. The default.
    #[default]
    RejectOrder,
    /// Invalid lines are dropped individually and the rest of the order
    /// proceeds, even down to zero surviving lines.
    DropInvalidLines,
}

/// Inventory service configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub fulfillment: FulfillmentPolicy,
    pub admission: AdmissionPolicy,
    pub low_stock_threshold: i64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            fulfillment: FulfillmentPolicy::default(),
            admission: AdmissionPolicy::default(),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}
