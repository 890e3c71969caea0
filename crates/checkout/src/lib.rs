//! Checkout domain module.
//!
//! Turns a cart into the order payload the backend's checkout endpoint
//! expects. Submitting it is the caller's job.

pub mod order;

pub use order::{OrderLine, OrderSubmission, complete_checkout};
