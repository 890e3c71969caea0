use serde::Serialize;

use storefront_core::{ItemId, Money};

use crate::item::CartLineItem;

/// Cart contents for one UI session.
///
/// Invariants (maintained by the reducer, the only writer):
/// - item ids are unique
/// - every item has `quantity >= 1`
/// - `total_amount` never goes below zero
///
/// `total_amount` is the running total after discounts and may differ from
/// [`CartState::subtotal`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    pub(crate) items: Vec<CartLineItem>,
    pub(crate) total_amount: Money,
}

impl CartState {
    /// The empty cart a session starts with.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    pub fn find(&self, id: &ItemId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub(crate) fn position(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Σ price × quantity, ignoring any discount.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(CartLineItem::line_total).sum()
    }
}
