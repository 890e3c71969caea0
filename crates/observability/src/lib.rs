//! Tracing/logging setup shared by storefront hosts.
//!
//! Domain crates only emit `tracing` events; whichever binary embeds them
//! calls [`init`] once at startup.

pub mod subscriber;

pub use subscriber::{DEFAULT_FILTER, init, init_with_default};
