use std::collections::HashMap;

use stockroom_core::{DomainError, DomainResult, ItemId};

use crate::item::{Item, ItemField};

/// Authoritative store of [`Item`] records.
///
/// Lookup is by id; iteration and search follow insertion order so "first
/// match" is deterministic.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    items: HashMap<ItemId, Item>,
    insertion: Vec<ItemId>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a persisted sequence. A repeated id replaces the earlier
    /// record (load shape, matching map-insert reload semantics).
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Self {
        let mut catalog = Self::new();
        for item in items {
            catalog.upsert(item);
        }
        catalog
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Insert a new item; the id must not already be present.
    pub fn add(&mut self, item: Item) -> DomainResult<()> {
        if self.items.contains_key(item.id()) {
            return Err(DomainError::duplicate_key(item.id().as_str()));
        }
        self.upsert(item);
        Ok(())
    }

    /// Insert, or fold the quantity into an existing record.
    ///
    /// On an existing id only `quantity_on_hand` grows; the original name and
    /// price win.
    pub fn add_or_accumulate(&mut self, item: Item) -> DomainResult<()> {
        match self.items.get_mut(item.id()) {
            Some(existing) => existing.accumulate(item.quantity_on_hand()),
            None => {
                self.upsert(item);
                Ok(())
            }
        }
    }

    /// Overwrite a single attribute of an existing item.
    ///
    /// The value is validated here as well as at the parse boundary, so a
    /// directly constructed [`ItemField`] cannot sidestep the record
    /// invariants.
    pub fn update(&mut self, id: &ItemId, field: ItemField) -> DomainResult<()> {
        let item = self
            .items
            .get_mut(id)
            .ok_or_else(|| DomainError::not_found(id.as_str()))?;
        match field {
            ItemField::Name(name) => item.set_name(name),
            ItemField::Price(price) => item.set_unit_price(price),
            ItemField::Quantity(quantity) => item.set_quantity(quantity),
        }
    }

    /// Delete an item and return the removed record.
    pub fn remove(&mut self, id: &ItemId) -> DomainResult<Item> {
        let item = self
            .items
            .remove(id)
            .ok_or_else(|| DomainError::not_found(id.as_str()))?;
        self.insertion.retain(|i| i != id);
        Ok(item)
    }

    pub fn get(&self, id: &ItemId) -> DomainResult<&Item> {
        self.items
            .get(id)
            .ok_or_else(|| DomainError::not_found(id.as_str()))
    }

    /// Case-insensitive lookup: exact match on id OR substring match on name.
    /// Returns the first hit in insertion order.
    pub fn search(&self, query: &str) -> DomainResult<&Item> {
        let needle = query.to_lowercase();
        self.iter()
            .find(|item| {
                item.id().as_str().eq_ignore_ascii_case(query)
                    || item.name().to_lowercase().contains(&needle)
            })
            .ok_or_else(|| DomainError::not_found(query))
    }

    /// All records in insertion order. Restartable: each call yields a fresh
    /// iterator.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.insertion.iter().filter_map(|id| self.items.get(id))
    }

    /// Decrement (or with a negative `delta`, replenish) stock.
    ///
    /// With `allow_negative` false the mutation is rejected with
    /// `InsufficientStock` before any change; this is the catalog's only gate
    /// on the non-negative stock invariant during fulfillment.
    pub fn adjust_quantity(
        &mut self,
        id: &ItemId,
        delta: i64,
        allow_negative: bool,
    ) -> DomainResult<i64> {
        let item = self
            .items
            .get_mut(id)
            .ok_or_else(|| DomainError::not_found(id.as_str()))?;
        let next = item
            .quantity_on_hand()
            .checked_add(delta)
            .ok_or_else(|| DomainError::validation("quantity overflow"))?;
        if next < 0 && !allow_negative {
            return Err(DomainError::insufficient_stock(id.as_str()));
        }
        item.force_quantity(next);
        Ok(next)
    }

    fn upsert(&mut self, item: Item) {
        let id = item.id().clone();
        if self.items.insert(id.clone(), item).is_none() {
            self.insertion.push(id);
        }
    }
}
