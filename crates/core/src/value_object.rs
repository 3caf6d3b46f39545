//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value** - two instances
/// with the same attribute values are interchangeable. Ledger steps and
/// preview results are value objects: nothing identifies them beyond their
/// contents, and they are rebuilt from scratch on every recomputation.
///
/// The trait requires `Clone + PartialEq + Debug` only. `Eq` is deliberately
/// not required: price amounts are `f64`, which has no total equality.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
