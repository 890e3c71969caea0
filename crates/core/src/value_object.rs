//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values. To
/// "modify" one, build a new value. `Money` is the canonical example in this
/// workspace: two amounts of 500 cents are the same amount.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
