use serde::{Deserialize, Deserializer, Serialize};

use storefront_core::money::zero_if_null;
use storefront_core::{Entity, ItemId, Money};

/// One product entry in the cart.
///
/// Wire shape follows the backend: `{ "_id", "title", "price", "quantity" }`.
/// A missing or null `price` decodes as zero; a missing or null `quantity`
/// decodes as one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    #[serde(rename = "_id", alias = "id")]
    pub id: ItemId,
    #[serde(default)]
    pub title: String,
    /// Unit price in smallest currency unit (e.g., cents).
    #[serde(default, deserialize_with = "zero_if_null")]
    pub price: Money,
    #[serde(default = "one", deserialize_with = "one_if_null")]
    pub quantity: u32,
}

fn one() -> u32 {
    1
}

fn one_if_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(1))
}

impl CartLineItem {
    pub fn new(id: ItemId, title: impl Into<String>, price: Money, quantity: u32) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            quantity,
        }
    }

    /// `price × quantity`.
    pub fn line_total(&self) -> Money {
        self.price.times(self.quantity)
    }
}

/// Item payload of an `AddItem` action.
///
/// Unlike [`CartLineItem`], a missing `quantity` stays missing: it merges or
/// appends one unit but contributes nothing to the running total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddedItem {
    #[serde(rename = "_id", alias = "id")]
    pub id: ItemId,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

impl AddedItem {
    /// Units merged into (or appended to) the cart.
    pub fn units(&self) -> u32 {
        self.quantity.unwrap_or(1)
    }

    /// Amount added to the running total: `price × quantity`, zero when the
    /// quantity was not supplied.
    pub fn total_delta(&self) -> Money {
        self.price.times(self.quantity.unwrap_or(0))
    }

    pub fn into_line_item(self) -> CartLineItem {
        let quantity = self.units();
        CartLineItem::new(self.id, self.title, self.price, quantity)
    }
}

impl From<CartLineItem> for AddedItem {
    fn from(item: CartLineItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            price: item.price,
            quantity: Some(item.quantity),
        }
    }
}

impl Entity for CartLineItem {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
