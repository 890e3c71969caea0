//! `storefront-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no UI, no HTTP).

pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod reducer;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{ItemId, SessionId};
pub use money::Money;
pub use reducer::Reducer;
pub use value_object::ValueObject;
