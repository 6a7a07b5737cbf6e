//! Errors reported by the physics space API

use thiserror::Error;

use crate::foundation::collections::{ObjectHandle, PairHandle};

/// Errors from [`PhysicsSpace`](super::PhysicsSpace) operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhysicsError {
    /// The object handle is stale or foreign
    #[error("Unknown collision object: {0:?}")]
    UnknownObject(ObjectHandle),

    /// The pair handle is stale or foreign
    #[error("Unknown pair: {0:?}")]
    UnknownPair(PairHandle),

    /// Shape index past the end of the object's shape list
    #[error("Shape index {index} out of range (object has {count} shapes)")]
    ShapeIndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of shapes on the object
        count: usize,
    },

    /// Body-body overlaps are resolved by contact pairs, not trigger pairs
    #[error("No trigger pair exists between two bodies")]
    UnsupportedPair,

    /// Both endpoints name the same object
    #[error("Object {0:?} cannot be paired with itself")]
    SelfPair(ObjectHandle),
}

/// Result type for physics space operations
pub type PhysicsResult<T> = Result<T, PhysicsError>;
