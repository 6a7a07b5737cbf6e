//! Collision objects: bodies and areas sharing shapes, transform, layers and
//! a registry of the pairs that reference them

use std::collections::HashMap;

use crate::foundation::collections::PairHandle;
use crate::foundation::math::Transform;
use super::area::AreaState;
use super::body::{BodyMode, BodyState};
use super::collision::Shape;
use super::collision_layers::CollisionLayers;

/// A shape attached to an object, with its offset from the object origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeEntry {
    /// Model-space shape
    pub shape: Shape,
    /// Local transform relative to the object
    pub transform: Transform,
}

/// Which endpoint of a pair an object occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointRole {
    /// Body in a body-area pair, or the first area of an area-area pair
    First,
    /// Area in a body-area pair, or the second area of an area-area pair
    Second,
}

/// Body or area specific state
#[derive(Debug)]
pub enum ObjectKind {
    /// Physical body
    Body(BodyState),
    /// Trigger volume
    Area(AreaState),
}

/// A body or area living in a physics space
#[derive(Debug)]
pub struct CollisionObject {
    kind: ObjectKind,
    transform: Transform,
    shapes: Vec<ShapeEntry>,
    layer: CollisionLayers,
    mask: CollisionLayers,
    constraints: HashMap<PairHandle, EndpointRole>,
}

impl CollisionObject {
    fn with_kind(kind: ObjectKind) -> Self {
        Self {
            kind,
            transform: Transform::identity(),
            shapes: Vec::new(),
            layer: CollisionLayers::DEFAULT,
            mask: CollisionLayers::DEFAULT,
            constraints: HashMap::new(),
        }
    }

    /// Create a body in the given mode
    pub fn body(mode: BodyMode) -> Self {
        Self::with_kind(ObjectKind::Body(BodyState::new(mode)))
    }

    /// Create an area with default settings
    pub fn area() -> Self {
        Self::with_kind(ObjectKind::Area(AreaState::new()))
    }

    /// Builder: place the object
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Builder: append a shape
    pub fn with_shape(mut self, shape: Shape, transform: Transform) -> Self {
        self.add_shape(shape, transform);
        self
    }

    /// Builder: set layer and mask
    pub fn with_layers(mut self, layer: CollisionLayers, mask: CollisionLayers) -> Self {
        self.layer = layer;
        self.mask = mask;
        self
    }

    /// Body or area state
    pub fn kind(&self) -> &ObjectKind {
        &self.kind
    }

    /// Body state, if this is a body
    pub fn as_body(&self) -> Option<&BodyState> {
        match &self.kind {
            ObjectKind::Body(body) => Some(body),
            ObjectKind::Area(_) => None,
        }
    }

    /// Mutable body state, if this is a body
    pub fn as_body_mut(&mut self) -> Option<&mut BodyState> {
        match &mut self.kind {
            ObjectKind::Body(body) => Some(body),
            ObjectKind::Area(_) => None,
        }
    }

    /// Area state, if this is an area
    pub fn as_area(&self) -> Option<&AreaState> {
        match &self.kind {
            ObjectKind::Area(area) => Some(area),
            ObjectKind::Body(_) => None,
        }
    }

    /// Mutable area state, if this is an area
    pub fn as_area_mut(&mut self) -> Option<&mut AreaState> {
        match &mut self.kind {
            ObjectKind::Area(area) => Some(area),
            ObjectKind::Body(_) => None,
        }
    }

    /// Whether this object is an area
    pub fn is_area(&self) -> bool {
        matches!(self.kind, ObjectKind::Area(_))
    }

    /// World transform of the object
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Move the object
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    /// Layers this object sits on
    pub fn layer(&self) -> CollisionLayers {
        self.layer
    }

    /// Layers this object interacts with
    pub fn mask(&self) -> CollisionLayers {
        self.mask
    }

    /// Change layer and mask
    pub fn set_layers(&mut self, layer: CollisionLayers, mask: CollisionLayers) {
        self.layer = layer;
        self.mask = mask;
    }

    /// Whether this object and `other` are allowed to interact
    pub fn test_collision_mask(&self, other: &Self) -> bool {
        CollisionLayers::should_collide(self.layer, self.mask, other.layer, other.mask)
    }

    /// Append a shape and return its index. Existing indices do not move.
    pub fn add_shape(&mut self, shape: Shape, transform: Transform) -> usize {
        self.shapes.push(ShapeEntry { shape, transform });
        self.shapes.len() - 1
    }

    /// Remove a shape, shifting the ones above it down by one.
    ///
    /// Pairs referencing this object must be reindexed first, which is why
    /// removal goes through [`PhysicsSpace::remove_shape`](super::PhysicsSpace::remove_shape).
    pub(crate) fn remove_shape_entry(&mut self, index: usize) -> Option<ShapeEntry> {
        (index < self.shapes.len()).then(|| self.shapes.remove(index))
    }

    /// Number of shapes
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Shape at `index`
    pub fn shape(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index).map(|entry| &entry.shape)
    }

    /// Local transform of the shape at `index`
    pub fn shape_transform(&self, index: usize) -> Option<&Transform> {
        self.shapes.get(index).map(|entry| &entry.transform)
    }

    /// Change the local transform of the shape at `index`
    pub fn set_shape_transform(&mut self, index: usize, transform: Transform) -> bool {
        if let Some(entry) = self.shapes.get_mut(index) {
            entry.transform = transform;
            true
        } else {
            false
        }
    }

    /// World transform of the shape at `index` (`transform * shape_transform`)
    pub fn shape_world_transform(&self, index: usize) -> Option<Transform> {
        self.shape_transform(index).map(|local| self.transform * *local)
    }

    /// Register a pair referencing this object
    pub(crate) fn add_constraint(&mut self, pair: PairHandle, role: EndpointRole) {
        self.constraints.insert(pair, role);
    }

    /// Deregister a pair
    pub(crate) fn remove_constraint(&mut self, pair: PairHandle) {
        self.constraints.remove(&pair);
    }

    /// Pairs currently referencing this object
    pub fn constraints(&self) -> impl Iterator<Item = (PairHandle, EndpointRole)> + '_ {
        self.constraints.iter().map(|(&pair, &role)| (pair, role))
    }

    /// Number of pairs referencing this object
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Whether `pair` references this object
    pub fn has_constraint(&self, pair: PairHandle) -> bool {
        self.constraints.contains_key(&pair)
    }
}
