//! Domain building blocks shared by the store and API crates.
//!
//! This crate has no internal dependencies: it holds the identifier and
//! timestamp aliases, the domain error taxonomy, and the pagination
//! resolver that turns raw list parameters into a fetch plan.

pub mod error;
pub mod pagination;
pub mod types;
