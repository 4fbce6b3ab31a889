use stockroom_catalog::{Catalog, Item};
use stockroom_core::{DomainError, DomainResult, ItemId, Money, OrderId};
use stockroom_orders::{Order, OrderLine, OrderQueue};
use stockroom_sales::{Sale, SalesLedger};

use crate::config::{AdmissionPolicy, FulfillmentPolicy, ServiceConfig};

/// Stock report selector. All reports are pure reads over the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockReportKind {
    /// `0 < quantity < low_stock_threshold`.
    LowStock,
    /// `quantity > 0`.
    FullStock,
    /// `quantity == 0`.
    EmptyStock,
    AllItems,
}

/// Outcome of an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub order_id: OrderId,
    pub accepted_lines: usize,
    /// Item ids of lines dropped at admission (only under
    /// [`AdmissionPolicy::DropInvalidLines`]).
    pub dropped: Vec<ItemId>,
}

/// Outcome of a successful fulfillment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FulfillmentReceipt {
    pub order_id: OrderId,
    pub customer_name: String,
    pub lines_fulfilled: usize,
    pub total_cost: Money,
}

/// Orchestrator over the three stores.
///
/// One instance per process (or per test); initialized from persistence at
/// startup, mutated only through these operations, flushed at shutdown.
/// Single-threaded by design: every operation runs to completion before the
/// next is invoked.
#[derive(Debug, Default)]
pub struct InventoryService {
    config: ServiceConfig,
    catalog: Catalog,
    queue: OrderQueue,
    ledger: SalesLedger,
}

impl InventoryService {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Assemble from already-loaded stores (the persistence bootstrap path).
    pub fn from_parts(
        config: ServiceConfig,
        catalog: Catalog,
        queue: OrderQueue,
        ledger: SalesLedger,
    ) -> Self {
        Self {
            config,
            catalog,
            queue,
            ledger,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Direct catalog mutation (add/update/remove) for the shell.
    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    pub fn ledger(&self) -> &SalesLedger {
        &self.ledger
    }

    /// Pending orders in queue order, head first; does not mutate.
    pub fn pending_orders(&self) -> impl Iterator<Item = &Order> {
        self.queue.iter()
    }

    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Remove one pending order by id, from any position in the queue.
    pub fn cancel_order(&mut self, id: &OrderId) -> DomainResult<Order> {
        let order = self.queue.cancel(id)?;
        tracing::info!(order_id = %id, "order cancelled");
        Ok(order)
    }

    /// Admit an order: validate each requested line against the catalog at
    /// submission time, then enqueue.
    ///
    /// Under [`AdmissionPolicy::RejectOrder`] the first invalid line fails the
    /// whole submission. Under [`AdmissionPolicy::DropInvalidLines`] invalid
    /// lines are discarded individually and the order is enqueued with
    /// whatever survives, zero lines included.
    pub fn submit(
        &mut self,
        order_id: OrderId,
        customer_name: impl Into<String>,
        requests: Vec<(ItemId, i64)>,
    ) -> DomainResult<Submission> {
        if self.queue.contains(&order_id) {
            return Err(DomainError::duplicate_key(order_id.as_str()));
        }

        let mut accepted = Vec::with_capacity(requests.len());
        let mut dropped = Vec::new();
        for (item_id, quantity) in requests {
            match self.admit_line(&item_id, quantity) {
                Ok(line) => accepted.push(line),
                Err(err) => match self.config.admission {
                    AdmissionPolicy::RejectOrder => return Err(err),
                    AdmissionPolicy::DropInvalidLines => {
                        tracing::warn!(
                            order_id = %order_id,
                            item_id = %item_id,
                            error = %err,
                            "dropping invalid order line"
                        );
                        dropped.push(item_id);
                    }
                },
            }
        }

        let order = Order::new(order_id.clone(), customer_name, accepted)?;
        let accepted_lines = order.lines().len();
        self.queue.enqueue(order)?;
        tracing::info!(
            order_id = %order_id,
            accepted_lines,
            dropped_lines = dropped.len(),
            "order submitted"
        );
        Ok(Submission {
            order_id,
            accepted_lines,
            dropped,
        })
    }

    fn admit_line(&self, item_id: &ItemId, quantity: i64) -> DomainResult<OrderLine> {
        let line = OrderLine::new(item_id.clone(), quantity)?;
        let item = self.catalog.get(item_id)?;
        if line.quantity > item.quantity_on_hand() {
            return Err(DomainError::insufficient_stock(item_id.as_str()));
        }
        Ok(line)
    }

    /// Fulfill the head order against current stock.
    ///
    /// The order leaves the queue either way; on failure the error reports
    /// which item fell short and neither stock nor ledger is touched.
    pub fn process_next(&mut self) -> DomainResult<FulfillmentReceipt> {
        let order = self.queue.dequeue_next()?;
        let result = match self.config.fulfillment {
            FulfillmentPolicy::AllOrNothing => self.fulfill_all_or_nothing(order),
            FulfillmentPolicy::Unconditional => self.fulfill_unconditional(order),
        };
        match &result {
            Ok(receipt) => tracing::info!(
                order_id = %receipt.order_id,
                customer = %receipt.customer_name,
                total = %receipt.total_cost,
                "order fulfilled"
            ),
            Err(err) => tracing::warn!(error = %err, "order rejected"),
        }
        result
    }

    fn fulfill_all_or_nothing(&mut self, mut order: Order) -> DomainResult<FulfillmentReceipt> {
        // Pass 1: verify every line. An item deleted since submission counts
        // as out of stock, not a crash.
        let mut total_cost = Money::ZERO;
        for line in order.lines() {
            let item = self
                .catalog
                .get(&line.item_id)
                .map_err(|_| DomainError::insufficient_stock(line.item_id.as_str()))?;
            if line.quantity > item.quantity_on_hand() {
                return Err(DomainError::insufficient_stock(line.item_id.as_str()));
            }
            let line_total = item
                .unit_price()
                .checked_mul(line.quantity)
                .ok_or_else(|| DomainError::validation("order total overflow"))?;
            total_cost = total_cost
                .checked_add(line_total)
                .ok_or_else(|| DomainError::validation("order total overflow"))?;
        }

        // Pass 2: commit. Every check above passed, so nothing below fails.
        let lines: Vec<OrderLine> = order.lines().to_vec();
        for line in &lines {
            let (name, unit_price) = {
                let item = self.catalog.get(&line.item_id)?;
                (item.name().to_string(), item.unit_price())
            };
            self.catalog
                .adjust_quantity(&line.item_id, -line.quantity, false)?;
            self.ledger
                .append(Sale::record(line.item_id.clone(), name, unit_price, line.quantity)?);
        }
        order.mark_fulfilled()?;

        Ok(FulfillmentReceipt {
            order_id: order.id().clone(),
            customer_name: order.customer_name().to_string(),
            lines_fulfilled: lines.len(),
            total_cost,
        })
    }

    fn fulfill_unconditional(&mut self, mut order: Order) -> DomainResult<FulfillmentReceipt> {
        let mut total_cost = Money::ZERO;
        let mut lines_fulfilled = 0usize;
        let lines: Vec<OrderLine> = order.lines().to_vec();
        for line in &lines {
            // Missing item: skipped, no sale.
            let (name, unit_price) = match self.catalog.get(&line.item_id) {
                Ok(item) => (item.name().to_string(), item.unit_price()),
                Err(_) => continue,
            };
            self.catalog
                .adjust_quantity(&line.item_id, -line.quantity, true)?;
            let sale = Sale::record(line.item_id.clone(), name, unit_price, line.quantity)?;
            total_cost = total_cost
                .checked_add(sale.total_price)
                .ok_or_else(|| DomainError::validation("order total overflow"))?;
            self.ledger.append(sale);
            lines_fulfilled += 1;
        }
        order.mark_fulfilled()?;

        Ok(FulfillmentReceipt {
            order_id: order.id().clone(),
            customer_name: order.customer_name().to_string(),
            lines_fulfilled,
            total_cost,
        })
    }

    /// Pure read over the catalog; records are cloned snapshots.
    pub fn stock_report(&self, kind: StockReportKind) -> Vec<Item> {
        let threshold = self.config.low_stock_threshold;
        self.catalog
            .iter()
            .filter(|item| {
                let qty = item.quantity_on_hand();
                match kind {
                    StockReportKind::LowStock => qty > 0 && qty < threshold,
                    StockReportKind::FullStock => qty > 0,
                    StockReportKind::EmptyStock => qty == 0,
                    StockReportKind::AllItems => true,
                }
            })
            .cloned()
            .collect()
    }

    /// Full ledger dump, oldest first.
    pub fn sales_report(&self) -> &[Sale] {
        self.ledger.entries()
    }
}
