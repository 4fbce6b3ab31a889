use std::collections::VecDeque;

use stockroom_core::{DomainError, DomainResult, OrderId};

use crate::order::Order;

/// FIFO collection of pending orders.
///
/// Orders enter at the tail and are drained from the head; cancellation may
/// pull one out of any position without disturbing the relative order of the
/// rest.
#[derive(Debug, Default, Clone)]
pub struct OrderQueue {
    pending: VecDeque<Order>,
}

impl OrderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a persisted sequence; non-pending records are skipped
    /// (resolved orders are not retained by this core).
    pub fn from_orders(orders: impl IntoIterator<Item = Order>) -> Self {
        Self {
            pending: orders.into_iter().filter(Order::is_pending).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn contains(&self, id: &OrderId) -> bool {
        self.pending.iter().any(|o| o.id() == id)
    }

    /// Append at the tail. Only pending orders belong in the queue.
    pub fn enqueue(&mut self, order: Order) -> DomainResult<()> {
        if !order.is_pending() {
            return Err(DomainError::validation("only pending orders can be queued"));
        }
        if self.contains(order.id()) {
            return Err(DomainError::duplicate_key(order.id().as_str()));
        }
        self.pending.push_back(order);
        Ok(())
    }

    /// Remove and return the head.
    pub fn dequeue_next(&mut self) -> DomainResult<Order> {
        self.pending.pop_front().ok_or(DomainError::EmptyQueue)
    }

    /// Remove the first order with a matching id, from any position, and
    /// return it marked cancelled.
    pub fn cancel(&mut self, id: &OrderId) -> DomainResult<Order> {
        let position = self
            .pending
            .iter()
            .position(|o| o.id() == id)
            .ok_or_else(|| DomainError::not_found(id.as_str()))?;
        // VecDeque::remove preserves the relative order of the remainder.
        let mut order = self
            .pending
            .remove(position)
            .ok_or_else(|| DomainError::not_found(id.as_str()))?;
        order.mark_cancelled()?;
        Ok(order)
    }

    /// Current queue order, head first. Restartable; does not mutate.
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.pending.iter()
    }
}
