use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, ItemId, Money};

/// Point-in-time record of one fulfilled order line.
///
/// The item's name and price are copied at fulfillment time; later catalog
/// mutation (or deletion) cannot reach back into the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    pub item_id: ItemId,
    pub item_name: String,
    pub total_price: Money,
    pub quantity_sold: i64,
}

impl Sale {
    /// Snapshot a sale: total = unit price at fulfillment time × quantity.
    pub fn record(
        item_id: ItemId,
        item_name: impl Into<String>,
        unit_price: Money,
        quantity_sold: i64,
    ) -> DomainResult<Self> {
        if quantity_sold <= 0 {
            return Err(DomainError::validation("quantity sold must be positive"));
        }
        let total_price = unit_price
            .checked_mul(quantity_sold)
            .ok_or_else(|| DomainError::validation("sale total overflow"))?;
        Ok(Self {
            item_id,
            item_name: item_name.into(),
            total_price,
            quantity_sold,
        })
    }
}

/// Append-only sequence of completed sales.
///
/// Entries never change once appended; the ledger is only ever replaced
/// wholesale by an explicit reload from persistence.
#[derive(Debug, Default, Clone)]
pub struct SalesLedger {
    entries: Vec<Sale>,
}

impl SalesLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a persisted sequence (the one sanctioned replacement).
    pub fn from_sales(sales: impl IntoIterator<Item = Sale>) -> Self {
        Self {
            entries: sales.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn append(&mut self, sale: Sale) {
        self.entries.push(sale);
    }

    /// Full history, oldest first.
    pub fn entries(&self) -> &[Sale] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ItemId {
        ItemId::new(s).unwrap()
    }

    #[test]
    fn record_computes_the_total_from_the_snapshot_price() {
        let sale = Sale::record(id("A1"), "Widget", Money::from_cents(250), 4).unwrap();
        assert_eq!(sale.total_price, Money::from_cents(1000));
        assert_eq!(sale.quantity_sold, 4);
        assert_eq!(sale.item_name, "Widget");
    }

    #[test]
    fn record_rejects_non_positive_quantity() {
        assert!(Sale::record(id("A1"), "Widget", Money::from_cents(250), 0).is_err());
        assert!(Sale::record(id("A1"), "Widget", Money::from_cents(250), -1).is_err());
    }

    #[test]
    fn ledger_appends_in_order() {
        let mut ledger = SalesLedger::new();
        ledger.append(Sale::record(id("A1"), "Widget", Money::from_cents(250), 1).unwrap());
        ledger.append(Sale::record(id("B2"), "Gadget", Money::from_cents(300), 2).unwrap());

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.entries()[0].item_id, id("A1"));
        assert_eq!(ledger.entries()[1].item_id, id("B2"));
    }
}
