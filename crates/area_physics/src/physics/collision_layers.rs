//! Collision layer system for filtering collision detection
//!
//! Every collision object sits on one or more layers and carries a mask of the
//! layers it wants to interact with. Pairs consult this filter before running
//! any geometry test.

use bitflags::bitflags;

bitflags! {
    /// Collision layer bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CollisionLayers: u32 {
        /// Default layer for newly created objects
        const DEFAULT = 1 << 0;
        /// Static environment geometry
        const ENVIRONMENT = 1 << 1;
        /// Simulated or moved bodies
        const BODY = 1 << 2;
        /// Trigger volumes (no physical response)
        const TRIGGER = 1 << 3;
        /// Objects that only interact with explicit opt-in layers
        const DETAIL = 1 << 4;
    }
}

impl Default for CollisionLayers {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl CollisionLayers {
    /// Layer for a zero-based bit number, e.g. `layer(8)` for a user layer.
    /// Bits past 31 give an empty set.
    pub fn layer(bit: u32) -> Self {
        1u32.checked_shl(bit).map_or_else(Self::empty, Self::from_bits_retain)
    }

    /// Check if two objects should interact based on their layers and masks
    ///
    /// A's layer must be in B's mask AND B's layer must be in A's mask. The
    /// result is the same whichever object asks.
    pub fn should_collide(
        layer_a: Self,
        mask_a: Self,
        layer_b: Self,
        mask_b: Self,
    ) -> bool {
        layer_a.intersects(mask_b) && layer_b.intersects(mask_a)
    }
}
