use serde::{Deserialize, Serialize};

use storefront_cart::{CartSession, CartState};
use storefront_core::{DomainError, DomainResult, ItemId, Money};

/// Order line: product and quantity. Prices are re-derived by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub item_id: ItemId,
    pub quantity: u32,
}

/// Checkout payload: `{ address, totalAmount, orderItems: [{ itemId, quantity }] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSubmission {
    pub address: String,
    /// Cart total at submission time, discounts included.
    pub total_amount: Money,
    pub order_items: Vec<OrderLine>,
}

impl OrderSubmission {
    /// Build the order for `cart`, shipping to `address`.
    pub fn from_cart(cart: &CartState, address: &str) -> DomainResult<Self> {
        if cart.is_empty() {
            return Err(DomainError::validation("cart is empty"));
        }

        let address = address.trim();
        if address.is_empty() {
            return Err(DomainError::validation("address is required"));
        }

        let order_items = cart
            .items()
            .iter()
            .map(|item| OrderLine {
                item_id: item.id.clone(),
                quantity: item.quantity,
            })
            .collect();

        Ok(Self {
            address: address.to_string(),
            total_amount: cart.total_amount(),
            order_items,
        })
    }
}

/// Empty the session's cart once the backend has accepted the order.
pub fn complete_checkout(session: &mut CartSession) {
    let lines = session.state().len();
    session.clear();
    tracing::info!(session_id = %session.id(), lines, "checkout completed; cart cleared");
}
