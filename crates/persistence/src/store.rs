//! Storage trait and error type shared by the backends.

use thiserror::Error;

use stockroom_catalog::Item;
use stockroom_orders::Order;
use stockroom_sales::Sale;

/// Persistence-layer error. Converted to `DomainError::Persistence` at the
/// service boundary.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed record: {0}")]
    Malformed(String),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

impl PersistenceError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}

/// Flat-file dump of the three stores.
///
/// Backends must round-trip: `save_*` followed by `load_*` reproduces an
/// equivalent sequence of records.
pub trait FlatFileStore {
    fn load_catalog(&self) -> Result<Vec<Item>, PersistenceError>;
    fn save_catalog(&self, items: &[Item]) -> Result<(), PersistenceError>;

    fn load_orders(&self) -> Result<Vec<Order>, PersistenceError>;
    fn save_orders(&self, orders: &[Order]) -> Result<(), PersistenceError>;

    fn load_sales(&self) -> Result<Vec<Sale>, PersistenceError>;
    fn save_sales(&self, sales: &[Sale]) -> Result<(), PersistenceError>;
}
