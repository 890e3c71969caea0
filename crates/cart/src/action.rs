use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use storefront_core::{DomainError, DomainResult, ItemId};

use crate::item::{AddedItem, CartLineItem};

/// Cart transitions dispatched by the UI layer.
///
/// Wire shape is internally tagged on `kind`, e.g.
/// `{"kind":"RemoveItem","id":"p1"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum CartAction {
    /// Merge into an existing line (same id) or append a new one.
    AddItem { item: AddedItem },
    /// Take one unit of `id` out of the cart.
    RemoveItem { id: ItemId },
    /// Replace the whole cart, e.g. with contents fetched from the backend.
    SetItems {
        #[serde(default, deserialize_with = "list_or_empty")]
        items: Vec<CartLineItem>,
    },
    /// Discount the running total by the coupon's percentage.
    ApplyCoupon { code: String },
}

const KNOWN_KINDS: [&str; 4] = ["AddItem", "RemoveItem", "SetItems", "ApplyCoupon"];

impl CartAction {
    /// Stable name of the action, matching the wire `kind` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            CartAction::AddItem { .. } => "AddItem",
            CartAction::RemoveItem { .. } => "RemoveItem",
            CartAction::SetItems { .. } => "SetItems",
            CartAction::ApplyCoupon { .. } => "ApplyCoupon",
        }
    }

    /// Decode a wire action.
    ///
    /// Returns `Ok(None)` for a well-formed object whose `kind` is not one of
    /// the cart actions; callers treat that as a no-op.
    pub fn decode(json: &str) -> DomainResult<Option<CartAction>> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| DomainError::validation(format!("malformed cart action: {e}")))?;

        let kind = value
            .get("kind")
            .and_then(Value::as_str)
            .ok_or_else(|| DomainError::validation("cart action is missing `kind`"))?;

        if !KNOWN_KINDS.contains(&kind) {
            return Ok(None);
        }

        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| DomainError::validation(format!("malformed cart action: {e}")))
    }
}

/// Anything that is not a JSON array decodes as an empty list.
fn list_or_empty<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<CartLineItem>, D::Error> {
    match Value::deserialize(deserializer)? {
        value @ Value::Array(_) => serde_json::from_value(value).map_err(serde::de::Error::custom),
        _ => Ok(Vec::new()),
    }
}
