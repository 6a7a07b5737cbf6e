//! Specialized collection types
//!
//! Objects and pairs live in slot maps owned by the physics space. Everything
//! else refers to them through the copyable keys declared here, so a pair can
//! point at its endpoints without owning or borrowing them.

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Stable handle to a collision object (body or area) in a space
    pub struct ObjectHandle;

    /// Stable handle to a pair owned by a space
    pub struct PairHandle;
}

/// Table of collision objects keyed by [`ObjectHandle`]
pub type ObjectMap<T> = SlotMap<ObjectHandle, T>;

/// Table of pairs keyed by [`PairHandle`]
pub type PairMap<T> = SlotMap<PairHandle, T>;
