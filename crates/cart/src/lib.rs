//! Shopping cart domain module.
//!
//! The cart is a pure reducer over [`CartState`]: the UI layer dispatches
//! [`CartAction`]s (directly or through a [`CartSession`]) and renders the
//! resulting state. Syncing the cart with the backend is the caller's job.

pub mod action;
pub mod coupon;
pub mod item;
pub mod reducer;
pub mod session;
pub mod state;

pub use action::CartAction;
pub use coupon::{COUPONS_ENV, CouponTable};
pub use item::{AddedItem, CartLineItem};
pub use reducer::{CartReducer, reduce};
pub use session::CartSession;
pub use state::CartState;
