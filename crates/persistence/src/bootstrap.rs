//! Startup/shutdown wiring between the stores and the service.

use stockroom_catalog::{Catalog, Item};
use stockroom_core::{DomainError, DomainResult};
use stockroom_orders::{Order, OrderQueue};
use stockroom_sales::SalesLedger;
use stockroom_service::{InventoryService, ServiceConfig};

use crate::store::{FlatFileStore, PersistenceError};

/// Load all three stores and assemble the service.
///
/// A load failure degrades that store to empty instead of aborting startup;
/// the failure is logged, never fatal.
pub fn load_service(store: &dyn FlatFileStore, config: ServiceConfig) -> InventoryService {
    let catalog = match store.load_catalog() {
        Ok(items) => Catalog::from_items(items),
        Err(err) => {
            tracing::warn!(error = %err, "could not load catalog; starting empty");
            Catalog::new()
        }
    };
    let queue = match store.load_orders() {
        Ok(orders) => OrderQueue::from_orders(orders),
        Err(err) => {
            tracing::warn!(error = %err, "could not load orders; starting empty");
            OrderQueue::new()
        }
    };
    let ledger = match store.load_sales() {
        Ok(sales) => SalesLedger::from_sales(sales),
        Err(err) => {
            tracing::warn!(error = %err, "could not load sales history; starting empty");
            SalesLedger::new()
        }
    };
    InventoryService::from_parts(config, catalog, queue, ledger)
}

/// Dump all three stores. In-memory state is never rolled back on failure;
/// the caller decides whether to retry or surface the error.
pub fn flush_service(
    service: &InventoryService,
    store: &dyn FlatFileStore,
) -> DomainResult<()> {
    let items: Vec<Item> = service.catalog().iter().cloned().collect();
    store.save_catalog(&items).map_err(to_domain)?;

    let orders: Vec<Order> = service.pending_orders().cloned().collect();
    store.save_orders(&orders).map_err(to_domain)?;

    store.save_sales(service.sales_report()).map_err(to_domain)
}

fn to_domain(err: PersistenceError) -> DomainError {
    DomainError::persistence(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delimited::DelimitedStore;
    use crate::json::JsonStore;
    use stockroom_core::{ItemId, Money, OrderId};

    fn populated_service() -> InventoryService {
        let mut service = InventoryService::new(ServiceConfig::default());
        service
            .catalog_mut()
            .add(
                Item::new(
                    ItemId::new("A1").unwrap(),
                    "Widget",
                    Money::from_cents(250),
                    10,
                )
                .unwrap(),
            )
            .unwrap();
        service
            .submit(
                OrderId::new("O1").unwrap(),
                "Bob",
                vec![(ItemId::new("A1").unwrap(), 4)],
            )
            .unwrap();
        service
            .submit(
                OrderId::new("O2").unwrap(),
                "Alice",
                vec![(ItemId::new("A1").unwrap(), 2)],
            )
            .unwrap();
        service.process_next().unwrap();
        service
    }

    #[test]
    fn missing_files_degrade_to_an_empty_service() {
        let dir = tempfile::tempdir().unwrap();
        let store = DelimitedStore::new(dir.path());
        let service = load_service(&store, ServiceConfig::default());

        assert!(service.catalog().is_empty());
        assert_eq!(service.pending_count(), 0);
        assert!(service.sales_report().is_empty());
    }

    #[test]
    fn flush_then_load_reproduces_state_via_delimited_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = DelimitedStore::new(dir.path());
        let service = populated_service();

        flush_service(&service, &store).unwrap();
        let reloaded = load_service(&store, ServiceConfig::default());

        assert_eq!(
            reloaded
                .catalog()
                .get(&ItemId::new("A1").unwrap())
                .unwrap()
                .quantity_on_hand(),
            6
        );
        // Only the still-pending order survives; the fulfilled one moved to
        // the ledger.
        let pending: Vec<&str> = reloaded.pending_orders().map(|o| o.id().as_str()).collect();
        assert_eq!(pending, ["O2"]);
        assert_eq!(reloaded.sales_report(), service.sales_report());
    }

    #[test]
    fn flush_then_load_reproduces_state_via_json_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        let service = populated_service();

        flush_service(&service, &store).unwrap();
        let reloaded = load_service(&store, ServiceConfig::default());

        let original: Vec<Item> = service.catalog().iter().cloned().collect();
        let roundtrip: Vec<Item> = reloaded.catalog().iter().cloned().collect();
        assert_eq!(roundtrip, original);
        assert_eq!(reloaded.pending_count(), 1);
        assert_eq!(reloaded.sales_report(), service.sales_report());
    }

    #[test]
    fn flush_failure_surfaces_without_touching_memory() {
        let store = DelimitedStore::new("/nonexistent/path/for/sure");
        let service = populated_service();

        match flush_service(&service, &store) {
            Err(DomainError::Persistence(_)) => {}
            other => panic!("expected Persistence error, got {other:?}"),
        }
        assert_eq!(service.pending_count(), 1);
        assert_eq!(service.sales_report().len(), 1);
    }
}
