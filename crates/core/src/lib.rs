//! Core types and traits for the shop chat agent
//!
//! This crate provides foundational types used across all other crates:
//! - Parsed intent and sort order types
//! - Catalog product types (read-only to the core)
//! - The `CatalogSearch` collaborator trait
//! - Error types

pub mod error;
pub mod intent;
pub mod product;
pub mod traits;

pub use error::{Error, Result};
pub use intent::{Intent, Mode, SortOrder};
pub use product::{Product, Variant};
pub use traits::{CatalogSearch, SortKey};
