//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// A cart line item is an entity: two lines with the same product id are the
/// same line, whatever their quantities.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
