//! Primitive collision volumes and intersection algorithms

use crate::foundation::math::{Mat3, Vec3};

/// Guards the box-box test against nearly parallel edge pairs
const PARALLEL_EPSILON: f32 = 1e-6;

/// A sphere in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// The center position of the sphere in world space
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new bounding sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Check if this sphere intersects with another (touching counts)
    pub fn intersects(&self, other: &Self) -> bool {
        let distance_squared = (self.center - other.center).magnitude_squared();
        let radius_sum = self.radius + other.radius;
        distance_squared <= radius_sum * radius_sum
    }

    /// Closest surface points between two intersecting spheres, `(on self, on other)`
    pub fn contact_points(&self, other: &Self) -> (Vec3, Vec3) {
        let offset = other.center - self.center;
        let direction = offset.try_normalize(f32::EPSILON).unwrap_or_else(Vec3::x);
        (
            self.center + direction * self.radius,
            other.center - direction * other.radius,
        )
    }

    /// Point on the sphere surface facing `target` (the center if they coincide)
    pub fn support_towards(&self, target: Vec3) -> Vec3 {
        (target - self.center)
            .try_normalize(f32::EPSILON)
            .map_or(self.center, |dir| self.center + dir * self.radius)
    }
}

/// An oriented box in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedBox {
    /// Box center in world space
    pub center: Vec3,
    /// Local axes as matrix columns
    pub axes: Mat3,
    /// Half size along each local axis
    pub half_extents: Vec3,
}

impl OrientedBox {
    /// Creates a new oriented box
    pub fn new(center: Vec3, axes: Mat3, half_extents: Vec3) -> Self {
        Self { center, axes, half_extents }
    }

    /// Closest point on or inside the box to `point`
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        let local = self.axes.transpose() * (point - self.center);
        let clamped = Vec3::new(
            local.x.clamp(-self.half_extents.x, self.half_extents.x),
            local.y.clamp(-self.half_extents.y, self.half_extents.y),
            local.z.clamp(-self.half_extents.z, self.half_extents.z),
        );
        self.center + self.axes * clamped
    }

    /// Sphere test against the closest point in the box
    pub fn intersects_sphere(&self, sphere: &BoundingSphere) -> bool {
        let closest = self.closest_point(sphere.center);
        (closest - sphere.center).magnitude_squared() <= sphere.radius * sphere.radius
    }

    /// Separating axis test over the 15 candidate axes
    pub fn intersects_box(&self, other: &Self) -> bool {
        let a = &self.half_extents;
        let b = &other.half_extents;

        // Rotation of `other` expressed in this box's frame
        let r = self.axes.transpose() * other.axes;
        let abs_r = r.map(|v| v.abs() + PARALLEL_EPSILON);
        let t = self.axes.transpose() * (other.center - self.center);

        for i in 0..3 {
            let ra = a[i];
            let rb = b[0] * abs_r[(i, 0)] + b[1] * abs_r[(i, 1)] + b[2] * abs_r[(i, 2)];
            if t[i].abs() > ra + rb {
                return false;
            }
        }

        for j in 0..3 {
            let ra = a[0] * abs_r[(0, j)] + a[1] * abs_r[(1, j)] + a[2] * abs_r[(2, j)];
            let rb = b[j];
            let distance = t[0] * r[(0, j)] + t[1] * r[(1, j)] + t[2] * r[(2, j)];
            if distance.abs() > ra + rb {
                return false;
            }
        }

        for i in 0..3 {
            let (i1, i2) = ((i + 1) % 3, (i + 2) % 3);
            for j in 0..3 {
                let (j1, j2) = ((j + 1) % 3, (j + 2) % 3);
                let ra = a[i1] * abs_r[(i2, j)] + a[i2] * abs_r[(i1, j)];
                let rb = b[j1] * abs_r[(i, j2)] + b[j2] * abs_r[(i, j1)];
                let distance = t[i2] * r[(i1, j)] - t[i1] * r[(i2, j)];
                if distance.abs() > ra + rb {
                    return false;
                }
            }
        }

        true
    }
}
