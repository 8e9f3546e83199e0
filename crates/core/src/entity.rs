//! Entity trait: identity that survives edits.

/// Something with a stable identifier, e.g. a cargo line inside an intake.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
