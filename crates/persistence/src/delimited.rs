//! Delimited-text backend.
//!
//! One record per line, comma-separated fields, field order significant:
//! Item = `id,name,price,quantity`; Order = `id,customer,itemId:qty;itemId:qty`;
//! Sale = `itemId,name,totalPrice,quantity`. Prices carry the two-decimal
//! text form.

use std::fs;
use std::path::{Path, PathBuf};

use stockroom_catalog::Item;
use stockroom_core::{ItemId, Money, OrderId};
use stockroom_orders::{Order, OrderLine};
use stockroom_sales::Sale;

use crate::store::{FlatFileStore, PersistenceError};

const INVENTORY_FILE: &str = "inventory.csv";
const ORDERS_FILE: &str = "orders.csv";
const SALES_FILE: &str = "sales.csv";

/// Delimited flat files under one directory.
#[derive(Debug, Clone)]
pub struct DelimitedStore {
    dir: PathBuf,
}

impl DelimitedStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    fn read_rows(path: &Path) -> Result<Vec<Vec<String>>, PersistenceError> {
        let text = fs::read_to_string(path)?;
        Ok(text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.split(',').map(str::to_string).collect())
            .collect())
    }

    fn write_rows(path: &Path, rows: &[Vec<String>]) -> Result<(), PersistenceError> {
        let mut out = String::new();
        for row in rows {
            for field in row {
                // The layout has no quoting; a delimiter inside a field would
                // corrupt the file on reload.
                if field.contains(',') || field.contains('\n') {
                    return Err(PersistenceError::malformed(format!(
                        "field contains a delimiter: {field:?}"
                    )));
                }
            }
            out.push_str(&row.join(","));
            out.push('\n');
        }
        fs::write(path, out)?;
        Ok(())
    }

    fn fields<const N: usize>(row: &[String]) -> Result<[&String; N], PersistenceError> {
        let row: &[String; N] = row.try_into().map_err(|_| {
            PersistenceError::malformed(format!("expected {N} fields, got {}", row.len()))
        })?;
        Ok(row.each_ref())
    }

    fn decode_item(row: &[String]) -> Result<Item, PersistenceError> {
        let [id, name, price, quantity] = Self::fields::<4>(row)?;
        let id: ItemId = id.parse().map_err(bad)?;
        let price: Money = price.parse().map_err(bad)?;
        let quantity: i64 = quantity
            .parse()
            .map_err(|_| PersistenceError::malformed(format!("quantity: {quantity:?}")))?;
        Item::new(id, name.clone(), price, quantity).map_err(bad)
    }

    fn encode_item(item: &Item) -> Vec<String> {
        vec![
            item.id().to_string(),
            item.name().to_string(),
            item.unit_price().to_string(),
            item.quantity_on_hand().to_string(),
        ]
    }

    fn decode_order(row: &[String]) -> Result<Order, PersistenceError> {
        let [id, customer, packed] = Self::fields::<3>(row)?;
        let id: OrderId = id.parse().map_err(bad)?;
        let mut lines = Vec::new();
        // An order admitted with zero lines persists an empty lines field.
        for entry in packed.split(';').filter(|e| !e.is_empty()) {
            let (item_id, quantity) = entry
                .split_once(':')
                .ok_or_else(|| PersistenceError::malformed(format!("order line: {entry:?}")))?;
            let item_id: ItemId = item_id.parse().map_err(bad)?;
            let quantity: i64 = quantity
                .parse()
                .map_err(|_| PersistenceError::malformed(format!("order line: {entry:?}")))?;
            lines.push(OrderLine::new(item_id, quantity).map_err(bad)?);
        }
        Order::new(id, customer.clone(), lines).map_err(bad)
    }

    fn encode_order(order: &Order) -> Result<Vec<String>, PersistenceError> {
        let mut packed = String::new();
        for (i, line) in order.lines().iter().enumerate() {
            let id = line.item_id.as_str();
            if id.contains(':') || id.contains(';') {
                return Err(PersistenceError::malformed(format!(
                    "item id contains a line separator: {id:?}"
                )));
            }
            if i > 0 {
                packed.push(';');
            }
            packed.push_str(id);
            packed.push(':');
            packed.push_str(&line.quantity.to_string());
        }
        Ok(vec![
            order.id().to_string(),
            order.customer_name().to_string(),
            packed,
        ])
    }

    fn decode_sale(row: &[String]) -> Result<Sale, PersistenceError> {
        let [item_id, name, total, quantity] = Self::fields::<4>(row)?;
        let quantity_sold: i64 = quantity
            .parse()
            .map_err(|_| PersistenceError::malformed(format!("quantity: {quantity:?}")))?;
        if quantity_sold <= 0 {
            return Err(PersistenceError::malformed(format!(
                "sale quantity must be positive, got {quantity_sold}"
            )));
        }
        Ok(Sale {
            item_id: item_id.parse().map_err(bad)?,
            item_name: name.clone(),
            total_price: total.parse().map_err(bad)?,
            quantity_sold,
        })
    }

    fn encode_sale(sale: &Sale) -> Vec<String> {
        vec![
            sale.item_id.to_string(),
            sale.item_name.clone(),
            sale.total_price.to_string(),
            sale.quantity_sold.to_string(),
        ]
    }
}

fn bad(err: stockroom_core::DomainError) -> PersistenceError {
    PersistenceError::malformed(err.to_string())
}

impl FlatFileStore for DelimitedStore {
    fn load_catalog(&self) -> Result<Vec<Item>, PersistenceError> {
        Self::read_rows(&self.path(INVENTORY_FILE))?
            .iter()
            .map(|row| Self::decode_item(row))
            .collect()
    }

    fn save_catalog(&self, items: &[Item]) -> Result<(), PersistenceError> {
        let rows: Vec<Vec<String>> = items.iter().map(Self::encode_item).collect();
        Self::write_rows(&self.path(INVENTORY_FILE), &rows)
    }

    fn load_orders(&self) -> Result<Vec<Order>, PersistenceError> {
        Self::read_rows(&self.path(ORDERS_FILE))?
            .iter()
            .map(|row| Self::decode_order(row))
            .collect()
    }

    fn save_orders(&self, orders: &[Order]) -> Result<(), PersistenceError> {
        let rows: Vec<Vec<String>> = orders
            .iter()
            .map(Self::encode_order)
            .collect::<Result<_, _>>()?;
        Self::write_rows(&self.path(ORDERS_FILE), &rows)
    }

    fn load_sales(&self) -> Result<Vec<Sale>, PersistenceError> {
        Self::read_rows(&self.path(SALES_FILE))?
            .iter()
            .map(|row| Self::decode_sale(row))
            .collect()
    }

    fn save_sales(&self, sales: &[Sale]) -> Result<(), PersistenceError> {
        let rows: Vec<Vec<String>> = sales.iter().map(Self::encode_sale).collect();
        Self::write_rows(&self.path(SALES_FILE), &rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, name: &str, cents: i64, qty: i64) -> Item {
        Item::new(ItemId::new(id).unwrap(), name, Money::from_cents(cents), qty).unwrap()
    }

    fn order(id: &str, lines: &[(&str, i64)]) -> Order {
        let lines = lines
            .iter()
            .map(|(item, qty)| OrderLine::new(ItemId::new(*item).unwrap(), *qty).unwrap())
            .collect();
        Order::new(OrderId::new(id).unwrap(), "Bob", lines).unwrap()
    }

    #[test]
    fn catalog_round_trips_and_field_order_is_fixed() {
        let dir = tempfile::tempdir().unwrap();
        let store = DelimitedStore::new(dir.path());
        let items = vec![item("A1", "Widget", 250, 10), item("B2", "Gadget", 5, 0)];

        store.save_catalog(&items).unwrap();
        let text = fs::read_to_string(dir.path().join("inventory.csv")).unwrap();
        assert_eq!(text, "A1,Widget,2.50,10\nB2,Gadget,0.05,0\n");

        assert_eq!(store.load_catalog().unwrap(), items);
    }

    #[test]
    fn orders_round_trip_including_zero_line_orders() {
        let dir = tempfile::tempdir().unwrap();
        let store = DelimitedStore::new(dir.path());
        let orders = vec![
            order("O1", &[("A1", 4), ("B2", 1)]),
            order("O2", &[]),
        ];

        store.save_orders(&orders).unwrap();
        let text = fs::read_to_string(dir.path().join("orders.csv")).unwrap();
        assert_eq!(text, "O1,Bob,A1:4;B2:1\nO2,Bob,\n");

        assert_eq!(store.load_orders().unwrap(), orders);
    }

    #[test]
    fn sales_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = DelimitedStore::new(dir.path());
        let sales = vec![Sale::record(
            ItemId::new("A1").unwrap(),
            "Widget",
            Money::from_cents(250),
            4,
        )
        .unwrap()];

        store.save_sales(&sales).unwrap();
        let text = fs::read_to_string(dir.path().join("sales.csv")).unwrap();
        assert_eq!(text, "A1,Widget,10.00,4\n");

        assert_eq!(store.load_sales().unwrap(), sales);
    }

    #[test]
    fn load_misses_when_no_file_exists() {
        let dir = tempfile::tempdir().unwrap();
        let store = DelimitedStore::new(dir.path());
        assert!(matches!(
            store.load_catalog(),
            Err(PersistenceError::Io(_))
        ));
    }

    #[test]
    fn malformed_rows_are_reported_not_panicked() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("inventory.csv"), "A1,Widget,notaprice,10\n").unwrap();
        let store = DelimitedStore::new(dir.path());
        assert!(matches!(
            store.load_catalog(),
            Err(PersistenceError::Malformed(_))
        ));

        fs::write(dir.path().join("inventory.csv"), "A1,Widget\n").unwrap();
        assert!(matches!(
            store.load_catalog(),
            Err(PersistenceError::Malformed(_))
        ));
    }

    #[test]
    fn sale_rows_with_non_positive_quantity_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = DelimitedStore::new(dir.path());

        fs::write(dir.path().join("sales.csv"), "A1,Widget,0.00,0\n").unwrap();
        assert!(matches!(
            store.load_sales(),
            Err(PersistenceError::Malformed(_))
        ));

        fs::write(dir.path().join("sales.csv"), "A1,Widget,10.00,-4\n").unwrap();
        assert!(matches!(
            store.load_sales(),
            Err(PersistenceError::Malformed(_))
        ));
    }

    #[test]
    fn save_rejects_fields_holding_the_delimiter() {
        let dir = tempfile::tempdir().unwrap();
        let store = DelimitedStore::new(dir.path());
        let items = vec![item("A1", "Widget, deluxe", 250, 10)];
        assert!(matches!(
            store.save_catalog(&items),
            Err(PersistenceError::Malformed(_))
        ));
    }
}
