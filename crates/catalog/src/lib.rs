//! Product catalog domain module.
//!
//! Products as the storefront shows them, plus validation of the admin
//! "add product" form. Persisting products is the backend's job.

pub mod product;

pub use product::{NewProduct, Product};
