//! Narrow-phase overlap test
//!
//! Pairs never look at geometry themselves. They hand both shapes and their
//! world transforms to an [`OverlapSolver`], which keeps the exact collision
//! routines behind a narrow seam and lets tests substitute a mock.

use crate::foundation::math::{Transform, Vec3};
use super::shape::Shape;

/// Receives `(point on A, point on B)` for each contact found
pub type ContactCallback<'a> = &'a mut dyn FnMut(Vec3, Vec3);

/// Exact overlap test between two placed shapes
pub trait OverlapSolver {
    /// Returns whether the shapes intersect at the given world transforms
    ///
    /// When `contacts` is `Some`, contact points are reported through it.
    /// Callers that only need the boolean pass `None`.
    fn solve_static(
        &self,
        shape_a: &Shape,
        transform_a: &Transform,
        shape_b: &Shape,
        transform_b: &Transform,
        contacts: Option<ContactCallback<'_>>,
    ) -> bool;
}

/// Overlap solver for the built-in sphere and box shapes
#[derive(Debug, Default, Clone, Copy)]
pub struct ShapeOverlapSolver;

impl OverlapSolver for ShapeOverlapSolver {
    fn solve_static(
        &self,
        shape_a: &Shape,
        transform_a: &Transform,
        shape_b: &Shape,
        transform_b: &Transform,
        contacts: Option<ContactCallback<'_>>,
    ) -> bool {
        let world_a = shape_a.to_world_space(transform_a);
        let world_b = shape_b.to_world_space(transform_b);

        if !world_a.intersects(&world_b) {
            return false;
        }

        if let Some(callback) = contacts {
            if let Some((on_a, on_b)) = world_a.contact_points(&world_b) {
                callback(on_a, on_b);
            }
        }

        true
    }
}
