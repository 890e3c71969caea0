//! The cart state reducer.
//!
//! Pure and total: every action yields a new state, inapplicable actions
//! return the state unchanged.

use std::sync::LazyLock;

use storefront_core::{ItemId, Reducer};

use crate::action::CartAction;
use crate::coupon::CouponTable;
use crate::item::{AddedItem, CartLineItem};
use crate::state::CartState;

static DEFAULT_REDUCER: LazyLock<CartReducer> = LazyLock::new(CartReducer::default);

/// Apply `action` to `state` using the built-in coupon table.
pub fn reduce(state: CartState, action: CartAction) -> CartState {
    DEFAULT_REDUCER.reduce(state, action)
}

/// Cart reducer parameterised by its coupon table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartReducer {
    coupons: CouponTable,
}

impl CartReducer {
    pub fn new(coupons: CouponTable) -> Self {
        Self { coupons }
    }

    /// Reducer whose coupon table comes from `STOREFRONT_COUPONS`; see
    /// [`CouponTable::from_env`]. Hosts build their sessions with this.
    pub fn from_env() -> Self {
        Self::new(CouponTable::from_env())
    }

    pub fn coupons(&self) -> &CouponTable {
        &self.coupons
    }

    /// A missing quantity merges one unit but adds nothing to the total.
    fn add_item(&self, mut state: CartState, item: AddedItem) -> CartState {
        let delta = item.total_delta();
        let units = item.units();

        // A zero-quantity line would break `quantity >= 1`; it only contributes
        // its (zero) delta.
        if units > 0 {
            match state.position(&item.id) {
                Some(idx) => {
                    let line = &mut state.items[idx];
                    line.quantity = line.quantity.saturating_add(units);
                }
                None => state.items.push(item.into_line_item()),
            }
        }

        state.total_amount = state.total_amount.saturating_add(delta);
        state
    }

    /// Takes one unit out and subtracts one unit price, whatever quantity remains.
    fn remove_item(&self, mut state: CartState, id: &ItemId) -> CartState {
        let Some(idx) = state.position(id) else {
            return state;
        };

        let unit_price = state.items[idx].price;
        if state.items[idx].quantity <= 1 {
            state.items.remove(idx);
        } else {
            state.items[idx].quantity -= 1;
        }

        state.total_amount = state.total_amount.saturating_sub(unit_price);
        state
    }

    fn set_items(&self, items: Vec<CartLineItem>) -> CartState {
        let mut state = CartState::empty();

        for item in items.into_iter().filter(|item| item.quantity > 0) {
            match state.position(&item.id) {
                Some(idx) => {
                    let line = &mut state.items[idx];
                    line.quantity = line.quantity.saturating_add(item.quantity);
                }
                None => state.items.push(item),
            }
        }

        state.total_amount = state.subtotal();
        state
    }

    /// Repeated application compounds; there is no record of applied codes.
    fn apply_coupon(&self, mut state: CartState, code: &str) -> CartState {
        let Some(pct) = self.coupons.discount_for(code) else {
            tracing::debug!(code, "unknown coupon code; no discount applied");
            return state;
        };

        let discount = state.total_amount.percent_of(pct);
        state.total_amount = state.total_amount.saturating_sub(discount);
        state
    }
}

impl Reducer for CartReducer {
    type State = CartState;
    type Action = CartAction;

    fn reduce(&self, state: CartState, action: CartAction) -> CartState {
        match action {
            CartAction::AddItem { item } => self.add_item(state, item),
            CartAction::RemoveItem { id } => self.remove_item(state, &id),
            CartAction::SetItems { items } => self.set_items(items),
            CartAction::ApplyCoupon { code } => self.apply_coupon(state, &code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;
    use storefront_core::Money;

    fn id(raw: &str) -> ItemId {
        raw.parse().unwrap()
    }

    fn line(raw: &str, price: u64, quantity: u32) -> CartLineItem {
        CartLineItem::new(id(raw), raw.to_uppercase(), Money::from_cents(price), quantity)
    }

    fn add(raw: &str, price: u64, quantity: u32) -> CartAction {
        CartAction::AddItem {
            item: line(raw, price, quantity).into(),
        }
    }

    fn remove(raw: &str) -> CartAction {
        CartAction::RemoveItem { id: id(raw) }
    }

    fn coupon(code: &str) -> CartAction {
        CartAction::ApplyCoupon {
            code: code.to_string(),
        }
    }

    #[test]
    fn add_to_empty_cart_appends_line() {
        let state = reduce(CartState::empty(), add("a", 10, 2));

        assert_eq!(state.len(), 1);
        assert_eq!(state.items()[0].quantity, 2);
        assert_eq!(state.total_amount(), Money::from_cents(20));
    }

    #[test]
    fn add_existing_id_merges_quantity_in_place() {
        let state = reduce(CartState::empty(), add("a", 10, 2));
        let state = reduce(state, add("b", 7, 1));
        let state = reduce(state, add("a", 10, 1));

        assert_eq!(state.len(), 2);
        assert_eq!(state.items()[0].id, id("a"));
        assert_eq!(state.items()[0].quantity, 3);
        assert_eq!(state.items()[1].id, id("b"));
        assert_eq!(state.total_amount(), Money::from_cents(37));
    }

    #[test]
    fn add_with_zero_price_or_quantity_adds_nothing_to_total() {
        let state = reduce(CartState::empty(), add("free", 0, 3));
        assert_eq!(state.len(), 1);
        assert_eq!(state.total_amount(), Money::ZERO);

        let state = reduce(state, add("ghost", 50, 0));
        assert_eq!(state.len(), 1);
        assert!(state.find(&id("ghost")).is_none());
        assert_eq!(state.total_amount(), Money::ZERO);
    }

    #[test]
    fn add_without_quantity_merges_one_unit_at_zero_delta() {
        let no_quantity = |raw: &str| CartAction::AddItem {
            item: AddedItem {
                id: id(raw),
                title: raw.to_string(),
                price: Money::from_cents(10),
                quantity: None,
            },
        };

        let state = reduce(CartState::empty(), no_quantity("a"));
        assert_eq!(state.items()[0].quantity, 1);
        assert_eq!(state.total_amount(), Money::ZERO);

        let state = reduce(reduce(state, add("b", 7, 2)), no_quantity("b"));
        assert_eq!(state.find(&id("b")).map(|i| i.quantity), Some(3));
        assert_eq!(state.total_amount(), Money::from_cents(14));
    }

    #[test]
    fn remove_walks_quantity_down_then_drops_line() {
        let state = reduce_all(vec![add("a", 10, 2), add("a", 10, 1)]);
        assert_eq!(state.total_amount(), Money::from_cents(30));

        let state = reduce(state, remove("a"));
        assert_eq!(state.items()[0].quantity, 2);
        assert_eq!(state.total_amount(), Money::from_cents(20));

        let state = reduce(state, remove("a"));
        let state = reduce(state, remove("a"));
        assert!(state.is_empty());
        assert_eq!(state.total_amount(), Money::ZERO);
    }

    #[test]
    fn remove_unknown_id_is_a_no_op() {
        let before = reduce(CartState::empty(), add("a", 10, 1));
        let after = reduce(before.clone(), remove("zzz"));
        assert_eq!(before, after);
    }

    #[test]
    fn remove_subtracts_one_unit_price_even_after_discount() {
        let state = reduce_all(vec![add("a", 100, 1), coupon("SAVE20")]);
        assert_eq!(state.total_amount(), Money::from_cents(80));

        // Total floors at zero rather than going negative.
        let state = reduce(state, remove("a"));
        assert!(state.is_empty());
        assert_eq!(state.total_amount(), Money::ZERO);
    }

    #[test]
    fn set_items_replaces_state_and_recomputes_total() {
        let state = reduce_all(vec![add("a", 100, 1), coupon("SAVE20"), add("c", 3, 3)]);
        let state = reduce(
            state,
            CartAction::SetItems {
                items: vec![line("b", 5, 4)],
            },
        );

        assert_eq!(state.len(), 1);
        assert_eq!(state.items()[0].id, id("b"));
        assert_eq!(state.total_amount(), Money::from_cents(20));
    }

    #[test]
    fn set_items_prunes_zero_quantities_and_merges_duplicates() {
        let state = reduce(
            CartState::empty(),
            CartAction::SetItems {
                items: vec![
                    line("a", 10, 1),
                    line("z", 99, 0),
                    line("b", 2, 2),
                    line("a", 10, 2),
                ],
            },
        );

        let ids: Vec<_> = state.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(state.items()[0].quantity, 3);
        assert_eq!(state.total_amount(), Money::from_cents(34));
    }

    #[test]
    fn set_items_empty_clears_cart() {
        let state = reduce_all(vec![add("a", 10, 5)]);
        let state = reduce(state, CartAction::SetItems { items: Vec::new() });
        assert_eq!(state, CartState::empty());
    }

    #[test]
    fn known_coupon_discounts_total() {
        let state = reduce_all(vec![add("a", 100, 1), coupon("SAVE20")]);
        assert_eq!(state.total_amount(), Money::from_cents(80));
        // Line items are untouched by a discount.
        assert_eq!(state.subtotal(), Money::from_cents(100));
    }

    #[test]
    fn unknown_coupon_leaves_state_unchanged() {
        let before = reduce_all(vec![add("a", 100, 1)]);
        let after = reduce(before.clone(), coupon("BOGUS"));
        assert_eq!(before, after);
    }

    #[test]
    fn coupon_applied_twice_compounds() {
        let state = reduce_all(vec![add("a", 100, 1), coupon("SAVE20"), coupon("SAVE20")]);
        assert_eq!(state.total_amount(), Money::from_cents(64));
    }

    #[test]
    fn custom_coupon_table_is_honoured() {
        let reducer = CartReducer::new(CouponTable::parse("ALL=100").unwrap());
        let state = reducer.reduce_all(CartState::empty(), vec![add("a", 40, 2), coupon("ALL")]);
        assert_eq!(state.total_amount(), Money::ZERO);

        let state = reducer.reduce(state, coupon("SAVE20"));
        assert_eq!(state.total_amount(), Money::ZERO);
    }

    fn reduce_all(actions: Vec<CartAction>) -> CartState {
        CartReducer::default().reduce_all(CartState::empty(), actions)
    }

    fn arb_id() -> impl Strategy<Value = String> {
        prop::sample::select(vec!["a", "b", "c", "d"]).prop_map(str::to_string)
    }

    fn arb_line() -> impl Strategy<Value = CartLineItem> {
        (arb_id(), 0u64..10_000, 0u32..5).prop_map(|(raw, price, qty)| line(&raw, price, qty))
    }

    fn arb_action() -> impl Strategy<Value = CartAction> {
        prop_oneof![
            4 => arb_line().prop_map(|item| CartAction::AddItem { item: item.into() }),
            3 => arb_id().prop_map(|raw| remove(&raw)),
            1 => prop::collection::vec(arb_line(), 0..6)
                .prop_map(|items| CartAction::SetItems { items }),
            1 => prop::sample::select(vec!["SAVE10", "SAVE20", "NOPE"]).prop_map(coupon),
        ]
    }

    fn assert_invariants(state: &CartState) -> Result<(), TestCaseError> {
        let mut seen = BTreeSet::new();
        for item in state.items() {
            prop_assert!(item.quantity >= 1, "quantity 0 for {}", item.id);
            prop_assert!(seen.insert(item.id.clone()), "duplicate id {}", item.id);
        }
        Ok(())
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 512,
            ..ProptestConfig::default()
        })]

        /// Property: ids stay unique and quantities stay positive after every step.
        #[test]
        fn invariants_hold_after_every_action(
            actions in prop::collection::vec(arb_action(), 0..40)
        ) {
            let mut state = CartState::empty();
            for action in actions {
                state = reduce(state, action);
                assert_invariants(&state)?;
            }
        }

        /// Property: SetItems leaves total == subtotal regardless of history.
        #[test]
        fn set_items_total_equals_subtotal(
            history in prop::collection::vec(arb_action(), 0..20),
            items in prop::collection::vec(arb_line(), 0..8)
        ) {
            let state = reduce_all(history);
            let state = reduce(state, CartAction::SetItems { items });
            prop_assert_eq!(state.total_amount(), state.subtotal());
        }

        /// Property: adding q units then removing q units restores membership.
        #[test]
        fn add_then_remove_restores_membership(
            history in prop::collection::vec(arb_action(), 0..20),
            item in arb_line().prop_filter("needs units", |i| i.quantity > 0)
        ) {
            let before = reduce_all(history);
            let quantity = item.quantity;
            let target = item.id.clone();

            let mut after = reduce(before.clone(), CartAction::AddItem { item: item.into() });
            for _ in 0..quantity {
                after = reduce(after, CartAction::RemoveItem { id: target.clone() });
            }

            let ids = |s: &CartState| {
                s.items()
                    .iter()
                    .map(|i| (i.id.clone(), i.quantity))
                    .collect::<Vec<_>>()
            };
            prop_assert_eq!(ids(&before), ids(&after));
        }

        /// Property: reduction is deterministic.
        #[test]
        fn reduce_is_deterministic(actions in prop::collection::vec(arb_action(), 0..30)) {
            prop_assert_eq!(reduce_all(actions.clone()), reduce_all(actions));
        }
    }
}
