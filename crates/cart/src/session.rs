//! Session-scoped cart handle.

use storefront_core::{DomainResult, ItemId, Reducer, SessionId};

use crate::action::CartAction;
use crate::item::CartLineItem;
use crate::reducer::CartReducer;
use crate::state::CartState;

/// Owns the cart for one UI session.
///
/// Hosts hold one of these per session and pass it by reference to whatever
/// reads or dispatches against the cart. Each dispatch runs to completion
/// before the next; `&mut self` enforces that.
#[derive(Debug, Clone)]
pub struct CartSession {
    id: SessionId,
    state: CartState,
    reducer: CartReducer,
}

impl Default for CartSession {
    fn default() -> Self {
        Self::new(SessionId::new(), CartReducer::default())
    }
}

impl CartSession {
    /// Start a session with an empty cart.
    pub fn new(id: SessionId, reducer: CartReducer) -> Self {
        Self {
            id,
            state: CartState::empty(),
            reducer,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// End the session, handing back the final cart.
    pub fn into_state(self) -> CartState {
        self.state
    }

    /// Run `action` through the reducer and return the new state.
    pub fn dispatch(&mut self, action: CartAction) -> &CartState {
        let kind = action.kind();
        let current = std::mem::take(&mut self.state);
        self.state = self.reducer.reduce(current, action);

        tracing::debug!(
            session_id = %self.id,
            action = kind,
            items = self.state.len(),
            total = self.state.total_amount().cents(),
            "cart action applied"
        );

        &self.state
    }

    /// Decode a wire action and dispatch it.
    ///
    /// Malformed payloads are rejected without touching the cart; unknown
    /// action kinds are accepted as no-ops.
    pub fn dispatch_json(&mut self, json: &str) -> DomainResult<&CartState> {
        match CartAction::decode(json)? {
            Some(action) => Ok(self.dispatch(action)),
            None => {
                tracing::debug!(session_id = %self.id, "ignoring unknown cart action kind");
                Ok(&self.state)
            }
        }
    }

    pub fn add_item(&mut self, item: CartLineItem) -> &CartState {
        self.dispatch(CartAction::AddItem { item: item.into() })
    }

    pub fn remove_item(&mut self, id: ItemId) -> &CartState {
        self.dispatch(CartAction::RemoveItem { id })
    }

    pub fn set_items(&mut self, items: Vec<CartLineItem>) -> &CartState {
        self.dispatch(CartAction::SetItems { items })
    }

    pub fn apply_coupon(&mut self, code: impl Into<String>) -> &CartState {
        self.dispatch(CartAction::ApplyCoupon { code: code.into() })
    }

    /// Empty the cart (`SetItems` with no items).
    pub fn clear(&mut self) -> &CartState {
        self.set_items(Vec::new())
    }
}
