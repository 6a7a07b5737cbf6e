//! Collision shapes attached to collision objects
//!
//! Shapes are stored in model space together with a local transform on the
//! owning object, and turned into a [`WorldSpaceShape`] only for a test.

use crate::foundation::math::{Transform, Vec3};
use super::primitives::{BoundingSphere, OrientedBox};

/// Collision shape types (stored in MODEL SPACE)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Sphere centered on the shape origin
    Sphere {
        /// Radius before scaling
        radius: f32,
    },
    /// Box centered on the shape origin
    Box {
        /// Half size along each local axis before scaling
        half_extents: Vec3,
    },
}

impl Shape {
    /// Creates a spherical shape
    pub fn sphere(radius: f32) -> Self {
        Self::Sphere { radius }
    }

    /// Creates a box shape from its half extents
    pub fn cuboid(half_extents: Vec3) -> Self {
        Self::Box { half_extents }
    }

    /// Get the bounding radius in model space
    pub fn local_bounding_radius(&self) -> f32 {
        match self {
            Self::Sphere { radius } => *radius,
            Self::Box { half_extents } => half_extents.magnitude(),
        }
    }

    /// Place this shape in the world with the given (already composed) transform
    ///
    /// Spheres scale by the largest scale component so they stay spheres;
    /// boxes scale per axis.
    pub fn to_world_space(&self, transform: &Transform) -> WorldSpaceShape {
        match self {
            Self::Sphere { radius } => WorldSpaceShape::Sphere(BoundingSphere::new(
                transform.position,
                radius * transform.max_scale(),
            )),
            Self::Box { half_extents } => WorldSpaceShape::Box(OrientedBox::new(
                transform.position,
                transform.rotation_matrix(),
                half_extents.component_mul(&transform.scale.abs()),
            )),
        }
    }
}

/// World-space collision shape (temporary, for testing only)
#[derive(Debug, Clone, Copy)]
pub enum WorldSpaceShape {
    /// World-space sphere
    Sphere(BoundingSphere),
    /// World-space oriented box
    Box(OrientedBox),
}

impl WorldSpaceShape {
    /// Test if this shape intersects with another shape
    pub fn intersects(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Sphere(a), Self::Sphere(b)) => a.intersects(b),
            (Self::Sphere(sphere), Self::Box(obb)) | (Self::Box(obb), Self::Sphere(sphere)) => {
                obb.intersects_sphere(sphere)
            }
            (Self::Box(a), Self::Box(b)) => a.intersects_box(b),
        }
    }

    /// Representative contact points `(on self, on other)` for intersecting shapes
    ///
    /// Box-box pairs have no cheap witness points and yield `None`.
    pub fn contact_points(&self, other: &Self) -> Option<(Vec3, Vec3)> {
        match (self, other) {
            (Self::Sphere(a), Self::Sphere(b)) => Some(a.contact_points(b)),
            (Self::Sphere(sphere), Self::Box(obb)) => {
                let on_box = obb.closest_point(sphere.center);
                Some((sphere.support_towards(on_box), on_box))
            }
            (Self::Box(obb), Self::Sphere(sphere)) => {
                let on_box = obb.closest_point(sphere.center);
                Some((on_box, sphere.support_towards(on_box)))
            }
            (Self::Box(_), Self::Box(_)) => None,
        }
    }
}
