//! Modifier catalog domain module.
//!
//! This crate contains the typed representation of the backend-supplied price
//! modifiers (promotions, discounts, taxes) a seller can attach to a product,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no
//! storage). The backend remains authoritative for which modifiers exist;
//! this crate models, filters and resolves them.

pub mod catalog;
pub mod modifier;

pub use catalog::{ModifierCatalog, ModifierSelection, ResolvedModifiers};
pub use modifier::{AdjustmentKind, Discount, Modifier, Promotion, Tax};
