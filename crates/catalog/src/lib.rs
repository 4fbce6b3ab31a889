//! Item catalog module.
//!
//! This crate contains the authoritative store of stocked items, implemented
//! purely as deterministic domain logic (no IO, no prompting, no storage).

pub mod catalog;
pub mod item;

pub use catalog::Catalog;
pub use item::{Item, ItemField};
