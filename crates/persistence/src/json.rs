//! JSON backend: one array file per store, serde record shapes.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use stockroom_catalog::Item;
use stockroom_orders::Order;
use stockroom_sales::Sale;

use crate::store::{FlatFileStore, PersistenceError};

const INVENTORY_FILE: &str = "inventory.json";
const ORDERS_FILE: &str = "orders.json";
const SALES_FILE: &str = "sales.json";

/// JSON flat files under one directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn load<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>, PersistenceError> {
        let reader = BufReader::new(File::open(self.path(file))?);
        Ok(serde_json::from_reader(reader)?)
    }

    fn save<T: Serialize>(&self, file: &str, records: &[T]) -> Result<(), PersistenceError> {
        let writer = BufWriter::new(File::create(self.path(file))?);
        serde_json::to_writer_pretty(writer, records)?;
        Ok(())
    }

    fn path(&self, file: &str) -> PathBuf {
        Path::new(&self.dir).join(file)
    }
}

impl FlatFileStore for JsonStore {
    fn load_catalog(&self) -> Result<Vec<Item>, PersistenceError> {
        self.load(INVENTORY_FILE)
    }

    fn save_catalog(&self, items: &[Item]) -> Result<(), PersistenceError> {
        self.save(INVENTORY_FILE, items)
    }

    fn load_orders(&self) -> Result<Vec<Order>, PersistenceError> {
        self.load(ORDERS_FILE)
    }

    fn save_orders(&self, orders: &[Order]) -> Result<(), PersistenceError> {
        self.save(ORDERS_FILE, orders)
    }

    fn load_sales(&self) -> Result<Vec<Sale>, PersistenceError> {
        self.load(SALES_FILE)
    }

    fn save_sales(&self, sales: &[Sale]) -> Result<(), PersistenceError> {
        self.save(SALES_FILE, sales)
    }
}
