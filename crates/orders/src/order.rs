use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, ItemId, OrderId};

/// One requested line: item referenced by id (by value, never by live
/// reference) plus a positive quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_id: ItemId,
    pub quantity: i64,
}

impl OrderLine {
    pub fn new(item_id: ItemId, quantity: i64) -> DomainResult<Self> {
        if quantity <= 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        Ok(Self { item_id, quantity })
    }
}

/// Order lifecycle. `Fulfilled` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderState {
    Pending,
    Fulfilled,
    Cancelled,
}

/// A customer order awaiting fulfillment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    customer_name: String,
    lines: Vec<OrderLine>,
    state: OrderState,
}

impl Order {
    /// Create a pending order. A repeated item id replaces the earlier line
    /// (the lines are a mapping, not a list). Zero lines is permitted; whether
    /// such an order gets enqueued is an admission-policy question.
    pub fn new(
        id: OrderId,
        customer_name: impl Into<String>,
        lines: Vec<OrderLine>,
    ) -> DomainResult<Self> {
        let customer_name = customer_name.into();
        if customer_name.trim().is_empty() {
            return Err(DomainError::validation("customer name cannot be blank"));
        }
        let mut deduped: Vec<OrderLine> = Vec::with_capacity(lines.len());
        for line in lines {
            match deduped.iter_mut().find(|l| l.item_id == line.item_id) {
                Some(existing) => *existing = line,
                None => deduped.push(line),
            }
        }
        Ok(Self {
            id,
            customer_name,
            lines: deduped,
            state: OrderState::Pending,
        })
    }

    pub fn id(&self) -> &OrderId {
        &self.id
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn state(&self) -> OrderState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        self.state == OrderState::Pending
    }

    pub fn mark_fulfilled(&mut self) -> DomainResult<()> {
        self.resolve(OrderState::Fulfilled)
    }

    pub fn mark_cancelled(&mut self) -> DomainResult<()> {
        self.resolve(OrderState::Cancelled)
    }

    fn resolve(&mut self, terminal: OrderState) -> DomainResult<()> {
        if !self.is_pending() {
            return Err(DomainError::validation("order is already resolved"));
        }
        self.state = terminal;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(s: &str) -> ItemId {
        ItemId::new(s).unwrap()
    }

    fn order_id(s: &str) -> OrderId {
        OrderId::new(s).unwrap()
    }

    #[test]
    fn line_quantity_must_be_positive() {
        assert!(OrderLine::new(item("A1"), 1).is_ok());
        assert!(OrderLine::new(item("A1"), 0).is_err());
        assert!(OrderLine::new(item("A1"), -2).is_err());
    }

    #[test]
    fn repeated_item_id_replaces_the_earlier_line() {
        let order = Order::new(
            order_id("O1"),
            "Bob",
            vec![
                OrderLine::new(item("A1"), 2).unwrap(),
                OrderLine::new(item("B2"), 1).unwrap(),
                OrderLine::new(item("A1"), 5).unwrap(),
            ],
        )
        .unwrap();

        assert_eq!(order.lines().len(), 2);
        assert_eq!(order.lines()[0].item_id, item("A1"));
        assert_eq!(order.lines()[0].quantity, 5);
    }

    #[test]
    fn terminal_states_are_immutable() {
        let mut order = Order::new(order_id("O1"), "Bob", vec![]).unwrap();
        order.mark_cancelled().unwrap();
        assert_eq!(order.state(), OrderState::Cancelled);
        assert!(order.mark_fulfilled().is_err());
        assert!(order.mark_cancelled().is_err());
    }

    #[test]
    fn blank_customer_name_is_rejected() {
        assert!(Order::new(order_id("O1"), "  ", vec![]).is_err());
    }
}
