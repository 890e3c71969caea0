use serde::{Deserialize, Serialize};

use storefront_cart::CartLineItem;
use storefront_core::money::zero_if_null;
use storefront_core::{DomainError, DomainResult, Entity, ItemId, Money};

/// A product listed in the shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id", alias = "id")]
    pub id: ItemId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Price in smallest currency unit (e.g., cents).
    #[serde(default, deserialize_with = "zero_if_null")]
    pub price: Money,
    /// Image URL.
    #[serde(default)]
    pub image: String,
}

impl Product {
    /// Cart line for `quantity` units of this product at its list price.
    pub fn to_line_item(&self, quantity: u32) -> CartLineItem {
        CartLineItem::new(self.id.clone(), self.title.clone(), self.price, quantity)
    }
}

impl Entity for Product {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Admin input for listing a new product (the backend assigns the id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub title: String,
    pub description: String,
    pub price: Money,
    pub image: String,
}

impl NewProduct {
    /// All text fields must be non-blank and the price must be positive.
    pub fn validate(&self) -> DomainResult<()> {
        let blank = [&self.title, &self.description, &self.image]
            .iter()
            .any(|field| field.trim().is_empty());

        if blank || self.price.is_zero() {
            return Err(DomainError::validation(
                "all fields are required and price must be greater than 0",
            ));
        }
        Ok(())
    }
}
