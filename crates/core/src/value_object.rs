//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: two value
/// objects with the same attribute values are considered equal. To "modify"
/// one, construct a new one. Examples in this codebase: a price snapshot on
/// an invoice line, a set of invoice totals.
///
/// Contrast with [`crate::Entity`], which has identity: two entities with the
/// same id are the same entity regardless of attribute values.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
