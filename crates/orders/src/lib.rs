//! Customer orders module.
//!
//! This crate contains the pending-order record and the FIFO queue it waits
//! in, implemented purely as deterministic domain logic (no IO, no storage).

pub mod order;
pub mod queue;

pub use order::{Order, OrderLine, OrderState};
pub use queue::OrderQueue;
