//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**; they are defined entirely by their
//! attribute values. An `Amount` of 150000 is the same amount wherever it
//! appears, while two transactions with identical fields are still distinct
//! entities because their ids differ.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// construct a new one. Validation happens at construction, so a value object
/// in hand is always valid.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
