//! Flat-file persistence: load at startup, flush at shutdown or on demand.
//!
//! Two interchangeable backends exist behind [`FlatFileStore`]: a delimited
//! text layout and a JSON layout. Round-trip fidelity is the only contract;
//! the core never sees the encoding.

pub mod bootstrap;
pub mod delimited;
pub mod json;
pub mod store;

pub use bootstrap::{flush_service, load_service};
pub use delimited::DelimitedStore;
pub use json::JsonStore;
pub use store::{FlatFileStore, PersistenceError};
