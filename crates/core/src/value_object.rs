//! Value object trait: equality by value, not identity.
//!
//! Intakes, cargo metrics and commercial parameters are value objects: an edit
//! produces a new value that replaces the old one wholesale.

/// Marker trait for value objects.
///
/// Value objects have no identity and are compared by their attributes. They are
/// immutable by convention: "changing" one means building a replacement.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
