//! Staged price-adjustment engine.
//!
//! The single shared implementation of the pipeline both product flows used
//! to duplicate: `BASE → PROMOTION* → DISCOUNT? → TAX* → TOTAL`, producing a
//! final sale price plus an ordered, auditable ledger of intermediate steps.
//! Pure domain logic: no IO, no shared state, never fails.

pub mod preview;

pub use preview::{compute, AdjustmentStep, PriceInput, PricePreviewResult, StepKind};
