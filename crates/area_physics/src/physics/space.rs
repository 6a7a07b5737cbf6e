//! Physics space: owner of collision objects and trigger pairs
//!
//! The space is the only place pairs are created and destroyed. The broad
//! phase drives it through [`PhysicsSpace::broadphase_pair`] and
//! [`PhysicsSpace::broadphase_unpair`]; the simulation loop calls
//! [`PhysicsSpace::step`] once per tick.
//!
//! Removing a shape or an object is synchronous with respect to pairs: every
//! pair in the object's registry is reindexed or destroyed before the call
//! returns.

use log::{debug, trace, warn};

use crate::config::SpaceConfig;
use crate::foundation::collections::{ObjectHandle, ObjectMap, PairHandle, PairMap, SlotMap};
use crate::foundation::math::Transform;
use super::collision::{OverlapSolver, Shape};
use super::error::{PhysicsError, PhysicsResult};
use super::object::{CollisionObject, ShapeEntry};
use super::pair::{AreaPair, Constraint, Endpoint};

/// A simulation space holding bodies, areas and the pairs between them
#[derive(Debug)]
pub struct PhysicsSpace {
    config: SpaceConfig,
    objects: ObjectMap<CollisionObject>,
    pairs: PairMap<AreaPair>,
}

impl Default for PhysicsSpace {
    fn default() -> Self {
        Self::new(SpaceConfig::default())
    }
}

impl PhysicsSpace {
    /// Create an empty space
    pub fn new(config: SpaceConfig) -> Self {
        Self {
            config,
            objects: SlotMap::with_key(),
            pairs: SlotMap::with_key(),
        }
    }

    /// Space settings
    pub fn config(&self) -> &SpaceConfig {
        &self.config
    }

    /// Add a body or area
    pub fn insert_object(&mut self, object: CollisionObject) -> ObjectHandle {
        let is_area = object.is_area();
        let handle = self.objects.insert(object);
        debug!("Inserted {} {:?}", if is_area { "area" } else { "body" }, handle);
        handle
    }

    /// Look up an object
    pub fn object(&self, handle: ObjectHandle) -> Option<&CollisionObject> {
        self.objects.get(handle)
    }

    /// Look up an object for modification (transform, layers, callbacks, ...)
    pub fn object_mut(&mut self, handle: ObjectHandle) -> Option<&mut CollisionObject> {
        self.objects.get_mut(handle)
    }

    /// All objects in the space
    pub fn objects(&self) -> impl Iterator<Item = (ObjectHandle, &CollisionObject)> {
        self.objects.iter()
    }

    /// Number of objects
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Look up a pair
    pub fn pair(&self, handle: PairHandle) -> Option<&AreaPair> {
        self.pairs.get(handle)
    }

    /// All live pairs
    pub fn pairs(&self) -> impl Iterator<Item = (PairHandle, &AreaPair)> {
        self.pairs.iter()
    }

    /// Number of live pairs
    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    /// Append a shape to an object and return its index
    pub fn add_shape(
        &mut self,
        handle: ObjectHandle,
        shape: Shape,
        transform: Transform,
    ) -> PhysicsResult<usize> {
        let object = self.objects.get_mut(handle).ok_or(PhysicsError::UnknownObject(handle))?;
        Ok(object.add_shape(shape, transform))
    }

    /// Remove a shape from an object.
    ///
    /// Every pair referencing the object is reindexed first: pairs on the
    /// removed shape become inert (and exit on their next step if they were
    /// colliding), pairs on higher shapes follow the shift.
    pub fn remove_shape(&mut self, handle: ObjectHandle, index: usize) -> PhysicsResult<ShapeEntry> {
        let object = self.objects.get(handle).ok_or(PhysicsError::UnknownObject(handle))?;
        let count = object.shape_count();
        if index >= count {
            return Err(PhysicsError::ShapeIndexOutOfRange { index, count });
        }

        let registered: Vec<PairHandle> = object.constraints().map(|(pair, _)| pair).collect();
        for pair in &registered {
            if let Some(pair) = self.pairs.get_mut(*pair) {
                pair.shift_shape_indices(handle, index);
            }
        }

        debug!("Removed shape {} from {:?} ({} pairs reindexed)", index, handle, registered.len());
        self.objects
            .get_mut(handle)
            .and_then(|object| object.remove_shape_entry(index))
            .ok_or(PhysicsError::ShapeIndexOutOfRange { index, count })
    }

    /// Remove an object, destroying every pair that references it first
    pub fn remove_object(&mut self, handle: ObjectHandle) -> PhysicsResult<CollisionObject> {
        let object = self.objects.get(handle).ok_or(PhysicsError::UnknownObject(handle))?;
        let registered: Vec<PairHandle> = object.constraints().map(|(pair, _)| pair).collect();

        for pair in registered {
            self.destroy_pair(pair);
        }

        debug!("Removed object {:?}", handle);
        self.objects.remove(handle).ok_or(PhysicsError::UnknownObject(handle))
    }

    /// Broad-phase callback: the bounding volumes of two shapes started overlapping.
    ///
    /// Body/area in either order makes a body-area pair; two areas make an
    /// area-area pair. The caller guarantees at most one pair per shape pair.
    pub fn broadphase_pair(
        &mut self,
        object_a: ObjectHandle,
        shape_a: usize,
        object_b: ObjectHandle,
        shape_b: usize,
    ) -> PhysicsResult<PairHandle> {
        if object_a == object_b {
            return Err(PhysicsError::SelfPair(object_a));
        }
        let a = self.objects.get(object_a).ok_or(PhysicsError::UnknownObject(object_a))?;
        let b = self.objects.get(object_b).ok_or(PhysicsError::UnknownObject(object_b))?;
        check_shape_index(a, shape_a)?;
        check_shape_index(b, shape_b)?;

        let first = Endpoint::new(object_a, shape_a);
        let second = Endpoint::new(object_b, shape_b);
        let pair = match (a.is_area(), b.is_area()) {
            (false, true) => AreaPair::body_area(first, second),
            (true, false) => AreaPair::body_area(second, first),
            (true, true) => AreaPair::area_area(first, second),
            (false, false) => {
                warn!("Broad phase offered body-body pair {:?}/{:?} to the trigger layer", object_a, object_b);
                return Err(PhysicsError::UnsupportedPair);
            }
        };

        let handle = self.pairs.insert(pair);
        self.pairs[handle].attach(handle, &mut self.objects);
        debug!(
            "Created {:?} pair {:?} between {:?}:{} and {:?}:{}",
            self.pairs[handle].kind(), handle, object_a, shape_a, object_b, shape_b
        );
        Ok(handle)
    }

    /// Broad-phase callback: the bounding volumes separated
    pub fn broadphase_unpair(&mut self, pair: PairHandle) -> PhysicsResult<()> {
        if self.destroy_pair(pair) {
            Ok(())
        } else {
            Err(PhysicsError::UnknownPair(pair))
        }
    }

    fn destroy_pair(&mut self, handle: PairHandle) -> bool {
        let Some(mut pair) = self.pairs.remove(handle) else {
            return false;
        };
        let was_colliding = pair.is_colliding();
        pair.detach(handle, &mut self.objects);
        debug!("Destroyed pair {:?} (was colliding: {})", handle, was_colliding);
        true
    }

    /// Run one simulation step of `step` seconds.
    ///
    /// Every pair is set up; pairs that ask for it are solved; then pending
    /// area notifications are delivered if the config says so.
    pub fn step(&mut self, step: f32, solver: &dyn OverlapSolver) {
        let mut to_solve = Vec::new();

        for (handle, pair) in &mut self.pairs {
            let was_colliding = pair.is_colliding();
            if pair.setup(&mut self.objects, solver, step) {
                to_solve.push(handle);
            }
            if self.config.trace_transitions && was_colliding != pair.is_colliding() {
                trace!(
                    "Pair {:?} {} ({:?} / {:?})",
                    handle,
                    if pair.is_colliding() { "entered" } else { "exited" },
                    pair.first().object,
                    pair.second().object
                );
            }
        }

        for handle in to_solve {
            if let Some(pair) = self.pairs.get_mut(handle) {
                pair.solve(step);
            }
        }

        if self.config.flush_queries {
            self.flush_queries();
        }
    }

    /// Step by the configured fixed step
    pub fn step_fixed(&mut self, solver: &dyn OverlapSolver) {
        let step = self.config.fixed_step;
        self.step(step, solver);
    }

    /// Deliver pending notifications of every area to its callbacks.
    /// Returns the number of events delivered.
    pub fn flush_queries(&mut self) -> usize {
        self.objects
            .values_mut()
            .filter_map(CollisionObject::as_area_mut)
            .map(|area| area.call_queries())
            .sum()
    }
}

fn check_shape_index(object: &CollisionObject, index: usize) -> PhysicsResult<()> {
    let count = object.shape_count();
    if index < count {
        Ok(())
    } else {
        Err(PhysicsError::ShapeIndexOutOfRange { index, count })
    }
}
