use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, ItemId, Money};

/// Catalog record: one stocked item.
///
/// `id` is immutable after creation; `quantity_on_hand` never goes negative
/// through catalog operations (the unconditional fulfillment policy bypasses
/// that check deliberately, see the service crate).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    name: String,
    unit_price: Money,
    quantity_on_hand: i64,
}

impl Item {
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        unit_price: Money,
        quantity_on_hand: i64,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("item name cannot be blank"));
        }
        if unit_price.is_negative() {
            return Err(DomainError::validation("unit price cannot be negative"));
        }
        if quantity_on_hand < 0 {
            return Err(DomainError::validation("quantity cannot be negative"));
        }
        Ok(Self {
            id,
            name,
            unit_price,
            quantity_on_hand,
        })
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn quantity_on_hand(&self) -> i64 {
        self.quantity_on_hand
    }

    pub(crate) fn set_name(&mut self, name: String) -> DomainResult<()> {
        if name.trim().is_empty() {
            return Err(DomainError::validation("item name cannot be blank"));
        }
        self.name = name;
        Ok(())
    }

    pub(crate) fn set_unit_price(&mut self, price: Money) -> DomainResult<()> {
        if price.is_negative() {
            return Err(DomainError::validation("unit price cannot be negative"));
        }
        self.unit_price = price;
        Ok(())
    }

    pub(crate) fn set_quantity(&mut self, quantity: i64) -> DomainResult<()> {
        if quantity < 0 {
            return Err(DomainError::validation("quantity cannot be negative"));
        }
        self.quantity_on_hand = quantity;
        Ok(())
    }

    /// Stock write with no floor check; the caller owns the invariant (the
    /// unconditional fulfillment policy deliberately goes below zero).
    pub(crate) fn force_quantity(&mut self, quantity: i64) {
        self.quantity_on_hand = quantity;
    }

    pub(crate) fn accumulate(&mut self, quantity: i64) -> DomainResult<()> {
        let total = self
            .quantity_on_hand
            .checked_add(quantity)
            .ok_or_else(|| DomainError::validation("quantity overflow"))?;
        self.quantity_on_hand = total;
        Ok(())
    }
}

/// Updatable attribute of an [`Item`], parsed from the shell's `field`/`value`
/// pair. Unknown field names map to `InvalidField`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemField {
    Name(String),
    Price(Money),
    Quantity(i64),
}

impl ItemField {
    pub fn parse(field: &str, value: &str) -> DomainResult<Self> {
        match field.to_ascii_lowercase().as_str() {
            "name" => {
                if value.trim().is_empty() {
                    return Err(DomainError::validation("item name cannot be blank"));
                }
                Ok(ItemField::Name(value.to_string()))
            }
            "price" => {
                let price: Money = value.parse()?;
                if price.is_negative() {
                    return Err(DomainError::validation("unit price cannot be negative"));
                }
                Ok(ItemField::Price(price))
            }
            "quantity" => {
                let quantity: i64 = value
                    .parse()
                    .map_err(|_| DomainError::validation(format!("malformed quantity: {value:?}")))?;
                if quantity < 0 {
                    return Err(DomainError::validation("quantity cannot be negative"));
                }
                Ok(ItemField::Quantity(quantity))
            }
            other => Err(DomainError::invalid_field(other)),
        }
    }
}
