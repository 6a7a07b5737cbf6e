//! Shape geometry and the narrow-phase overlap test
//!
//! Shapes are stored in model space on their owning object and transformed to
//! world space only while a test runs.
//!
//! # Module Organization
//!
//! - [`primitives`] - World-space spheres and oriented boxes with intersection tests
//! - [`shape`] - Model-space shapes attached to collision objects
//! - [`solver`] - The [`OverlapSolver`] seam pairs call every step

pub mod primitives;
pub mod shape;
pub mod solver;

pub use primitives::{BoundingSphere, OrientedBox};
pub use shape::{Shape, WorldSpaceShape};
pub use solver::{ContactCallback, OverlapSolver, ShapeOverlapSolver};
