//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Entities are compared by identifier only. Two entities with the same id are
/// the same entity even if the rest of their state differs; contrast with
/// [`crate::ValueObject`], which compares every declared field.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Identity comparison.
    fn same_identity(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
