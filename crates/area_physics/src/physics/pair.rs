//! Trigger pairs: per-overlap relationships between a body and an area, or
//! between two areas
//!
//! The broad phase creates one [`AreaPair`] per pair of shapes whose bounding
//! volumes overlap and destroys it when they separate. In between, every step
//! runs [`Constraint::setup`], which re-tests the exact overlap and fires
//! enter/exit side effects on the endpoint objects when the result changes.
//!
//! # State machine
//!
//! A pair is either colliding or not. Side effects only fire on a change, and
//! destroying a colliding pair first performs the missing exit, so listeners
//! always observe matched enter/exit sequences.
//!
//! Both variants share this lifecycle. [`PairKind`] only decides who gets
//! notified. The enter records which effects it applied and the exit undoes
//! exactly those, even if the area's settings changed in between.

use crate::foundation::collections::{ObjectHandle, ObjectMap, PairHandle};
use super::area::AreaState;
use super::body::BodyMode;
use super::collision::OverlapSolver;
use super::object::{CollisionObject, EndpointRole};

/// Per-step entry points shared by everything the space steps
pub trait Constraint {
    /// Prepare for this step. Returns whether [`solve`](Self::solve) must run.
    fn setup(
        &mut self,
        objects: &mut ObjectMap<CollisionObject>,
        solver: &dyn OverlapSolver,
        step: f32,
    ) -> bool;

    /// Apply impulses for this step
    fn solve(&mut self, step: f32);

    /// A shape at `removed_index` is about to be removed from `object`
    fn shift_shape_indices(&mut self, object: ObjectHandle, removed_index: usize);
}

/// One side of a pair: an object and one of its shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint {
    /// Object in the space's table (not owned)
    pub object: ObjectHandle,
    /// Shape index on that object; `None` once the shape has been removed
    pub shape: Option<usize>,
}

impl Endpoint {
    /// Endpoint on a valid shape
    pub fn new(object: ObjectHandle, shape: usize) -> Self {
        Self { object, shape: Some(shape) }
    }

    fn shift(&mut self, removed_index: usize) {
        self.shape = match self.shape {
            Some(index) if index == removed_index => None,
            Some(index) if index > removed_index => Some(index - 1),
            other => other,
        };
    }
}

/// Which notifications a pair produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PairKind {
    /// First endpoint is a body, second an area
    BodyArea,
    /// Both endpoints are areas
    AreaArea,
}

/// Enter side effects currently in force
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct AppliedEffects {
    /// The area sits in the body's override list
    override_list: bool,
    /// The first endpoint's query holds the second
    first_observes: bool,
    /// The second endpoint's query holds the first
    second_observes: bool,
}

/// Overlap tracker between two shapes, at least one of them an area's
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaPair {
    kind: PairKind,
    first: Endpoint,
    second: Endpoint,
    colliding: bool,
    applied: AppliedEffects,
}

impl AreaPair {
    /// Pair between a body shape and an area shape
    pub fn body_area(body: Endpoint, area: Endpoint) -> Self {
        Self {
            kind: PairKind::BodyArea,
            first: body,
            second: area,
            colliding: false,
            applied: AppliedEffects::default(),
        }
    }

    /// Pair between shapes of two areas
    pub fn area_area(area_a: Endpoint, area_b: Endpoint) -> Self {
        Self {
            kind: PairKind::AreaArea,
            first: area_a,
            second: area_b,
            colliding: false,
            applied: AppliedEffects::default(),
        }
    }

    /// Variant of this pair
    pub fn kind(&self) -> PairKind {
        self.kind
    }

    /// Body (body-area) or first area (area-area)
    pub fn first(&self) -> Endpoint {
        self.first
    }

    /// Area (body-area) or second area (area-area)
    pub fn second(&self) -> Endpoint {
        self.second
    }

    /// Whether the last overlap test succeeded
    pub fn is_colliding(&self) -> bool {
        self.colliding
    }

    /// Register with both endpoints. Does not test overlap; the first
    /// `setup` does. A kinematic body is woken up so the pair gets evaluated.
    pub(crate) fn attach(&self, handle: PairHandle, objects: &mut ObjectMap<CollisionObject>) {
        if let Some(object) = objects.get_mut(self.first.object) {
            object.add_constraint(handle, EndpointRole::First);
        }
        if let Some(object) = objects.get_mut(self.second.object) {
            object.add_constraint(handle, EndpointRole::Second);
        }

        if self.kind == PairKind::BodyArea {
            if let Some(body) = objects.get_mut(self.first.object).and_then(CollisionObject::as_body_mut) {
                if body.mode() == BodyMode::Kinematic {
                    body.set_active(true);
                }
            }
        }
    }

    /// Tear down: exit first if colliding, then deregister from both endpoints
    pub(crate) fn detach(&mut self, handle: PairHandle, objects: &mut ObjectMap<CollisionObject>) {
        if self.colliding {
            self.transition(objects, false);
        }

        if let Some(object) = objects.get_mut(self.first.object) {
            object.remove_constraint(handle);
        }
        if let Some(object) = objects.get_mut(self.second.object) {
            object.remove_constraint(handle);
        }
    }

    fn test_overlap(&self, objects: &ObjectMap<CollisionObject>, solver: &dyn OverlapSolver) -> bool {
        let (Some(index_a), Some(index_b)) = (self.first.shape, self.second.shape) else {
            return false;
        };
        let (Some(a), Some(b)) = (objects.get(self.first.object), objects.get(self.second.object)) else {
            return false;
        };

        // Layer filtering gates the geometry test
        let allowed = match self.kind {
            PairKind::BodyArea => b.test_collision_mask(a),
            PairKind::AreaArea => a.test_collision_mask(b),
        };
        if !allowed {
            return false;
        }

        let (Some(shape_a), Some(transform_a), Some(shape_b), Some(transform_b)) = (
            a.shape(index_a),
            a.shape_world_transform(index_a),
            b.shape(index_b),
            b.shape_world_transform(index_b),
        ) else {
            return false;
        };

        solver.solve_static(shape_a, &transform_a, shape_b, &transform_b, None)
    }

    fn transition(&mut self, objects: &mut ObjectMap<CollisionObject>, overlapping: bool) {
        if overlapping == self.colliding {
            return;
        }

        let effects = if overlapping { self.gated_effects(objects) } else { self.applied };
        match self.kind {
            PairKind::BodyArea => self.notify_body_area(objects, effects, overlapping),
            PairKind::AreaArea => self.notify_area_area(objects, effects, overlapping),
        }
        self.applied = if overlapping { effects } else { AppliedEffects::default() };
        self.colliding = overlapping;
    }

    /// Effects an enter would apply with the areas' current settings
    fn gated_effects(&self, objects: &ObjectMap<CollisionObject>) -> AppliedEffects {
        match self.kind {
            PairKind::BodyArea => area_state(objects, self.second.object)
                .map_or_else(AppliedEffects::default, |area| AppliedEffects {
                    override_list: area.overrides_space(),
                    first_observes: false,
                    second_observes: area.has_monitor_callback(),
                }),
            PairKind::AreaArea => {
                match (area_state(objects, self.first.object), area_state(objects, self.second.object)) {
                    (Some(a), Some(b)) => AppliedEffects {
                        override_list: false,
                        first_observes: a.has_area_monitor_callback() && b.is_monitorable(),
                        second_observes: b.has_area_monitor_callback() && a.is_monitorable(),
                    },
                    _ => AppliedEffects::default(),
                }
            }
        }
    }

    fn notify_body_area(&self, objects: &mut ObjectMap<CollisionObject>, effects: AppliedEffects, entered: bool) {
        let (body, area) = (self.first, self.second);

        if effects.override_list {
            let priority = area_state(objects, area.object).map_or(0, AreaState::priority);
            if let Some(state) = objects.get_mut(body.object).and_then(CollisionObject::as_body_mut) {
                if entered {
                    state.add_area(area.object, priority);
                } else {
                    state.remove_area(area.object);
                }
            }
        }

        if effects.second_observes {
            if let Some(state) = objects.get_mut(area.object).and_then(CollisionObject::as_area_mut) {
                if entered {
                    state.add_body_to_query(body.object, body.shape, area.shape);
                } else {
                    state.remove_body_from_query(body.object, body.shape, area.shape);
                }
            }
        }
    }

    fn notify_area_area(&self, objects: &mut ObjectMap<CollisionObject>, effects: AppliedEffects, entered: bool) {
        let (a, b) = (self.first, self.second);
        if effects.second_observes {
            Self::enqueue_area(objects, b, a, entered);
        }
        if effects.first_observes {
            Self::enqueue_area(objects, a, b, entered);
        }
    }

    fn enqueue_area(
        objects: &mut ObjectMap<CollisionObject>,
        observer: Endpoint,
        observed: Endpoint,
        entered: bool,
    ) {
        if let Some(state) = objects.get_mut(observer.object).and_then(CollisionObject::as_area_mut) {
            if entered {
                state.add_area_to_query(observed.object, observed.shape, observer.shape);
            } else {
                state.remove_area_from_query(observed.object, observed.shape, observer.shape);
            }
        }
    }
}

fn area_state(objects: &ObjectMap<CollisionObject>, handle: ObjectHandle) -> Option<&AreaState> {
    objects.get(handle).and_then(CollisionObject::as_area)
}

impl Constraint for AreaPair {
    fn setup(
        &mut self,
        objects: &mut ObjectMap<CollisionObject>,
        solver: &dyn OverlapSolver,
        _step: f32,
    ) -> bool {
        let overlapping = self.test_overlap(objects, solver);
        self.transition(objects, overlapping);

        // Trigger pairs never need a solve pass
        false
    }

    fn solve(&mut self, _step: f32) {}

    fn shift_shape_indices(&mut self, object: ObjectHandle, removed_index: usize) {
        if self.first.object == object {
            self.first.shift(removed_index);
        }
        if self.second.object == object {
            self.second.shift(removed_index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::collections::{PairMap, SlotMap};
    use crate::foundation::math::{Transform, Vec3};
    use crate::physics::area::{AreaEvent, AreaEventKind, MonitorCallback, SpaceOverrideMode};
    use crate::physics::collision::{ContactCallback, Shape, ShapeOverlapSolver};
    use crate::physics::collision_layers::CollisionLayers;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Overlap solver with a fixed answer that counts its calls
    struct MockSolver {
        answer: Cell<bool>,
        calls: Cell<usize>,
    }

    impl MockSolver {
        fn new(answer: bool) -> Self {
            Self { answer: Cell::new(answer), calls: Cell::new(0) }
        }
    }

    impl OverlapSolver for MockSolver {
        fn solve_static(
            &self,
            _shape_a: &Shape,
            _transform_a: &Transform,
            _shape_b: &Shape,
            _transform_b: &Transform,
            contacts: Option<ContactCallback<'_>>,
        ) -> bool {
            assert!(contacts.is_none(), "pairs must request a boolean-only test");
            self.calls.set(self.calls.get() + 1);
            self.answer.get()
        }
    }

    type EventLog = Rc<RefCell<Vec<AreaEvent>>>;

    fn recorder() -> (MonitorCallback, EventLog) {
        let log: EventLog = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let callback: MonitorCallback = Box::new(move |event: &AreaEvent| sink.borrow_mut().push(*event));
        (callback, log)
    }

    struct Fixture {
        objects: ObjectMap<CollisionObject>,
        pairs: PairMap<AreaPair>,
    }

    impl Fixture {
        fn new() -> Self {
            Self { objects: SlotMap::with_key(), pairs: SlotMap::with_key() }
        }

        fn add(&mut self, object: CollisionObject) -> ObjectHandle {
            self.objects.insert(object.with_shape(Shape::sphere(1.0), Transform::identity()))
        }

        fn create(&mut self, pair: AreaPair) -> PairHandle {
            let handle = self.pairs.insert(pair);
            self.pairs[handle].attach(handle, &mut self.objects);
            handle
        }

        fn setup(&mut self, handle: PairHandle, solver: &dyn OverlapSolver) -> bool {
            self.pairs[handle].setup(&mut self.objects, solver, 1.0 / 60.0)
        }

        fn destroy(&mut self, handle: PairHandle) {
            if let Some(mut pair) = self.pairs.remove(handle) {
                pair.detach(handle, &mut self.objects);
            }
        }

        fn flush(&mut self) {
            for object in self.objects.values_mut() {
                if let Some(area) = object.as_area_mut() {
                    area.call_queries();
                }
            }
        }

        fn area_mut(&mut self, handle: ObjectHandle) -> &mut crate::physics::area::AreaState {
            self.objects[handle].as_area_mut().unwrap()
        }

        fn overridden(&self, body: ObjectHandle, area: ObjectHandle) -> bool {
            self.objects[body].as_body().unwrap().is_overridden_by(area)
        }
    }

    /// Body plus an area that overrides and monitors, with the event log
    fn monitored_body_area() -> (Fixture, ObjectHandle, ObjectHandle, PairHandle, EventLog) {
        let mut fx = Fixture::new();
        let body = fx.add(CollisionObject::body(BodyMode::Rigid));
        let area = fx.add(CollisionObject::area());
        let (callback, log) = recorder();
        fx.area_mut(area).set_monitor_callback(Some(callback));
        fx.area_mut(area).set_space_override_mode(SpaceOverrideMode::Combine);
        let pair = fx.create(AreaPair::body_area(Endpoint::new(body, 0), Endpoint::new(area, 0)));
        (fx, body, area, pair, log)
    }

    #[test]
    fn test_construction_registers_without_notifying() {
        let (fx, body, area, pair, _log) = monitored_body_area();

        assert!(fx.objects[body].has_constraint(pair));
        assert!(fx.objects[area].has_constraint(pair));
        assert!(!fx.pairs[pair].is_colliding());
        assert!(fx.objects[area].as_area().unwrap().pending_body_events().is_empty());
        assert!(!fx.overridden(body, area));
    }

    #[test]
    fn test_enter_fires_once_while_overlap_is_stable() {
        let (mut fx, body, area, pair, log) = monitored_body_area();
        let solver = MockSolver::new(true);

        assert!(!fx.setup(pair, &solver));
        fx.flush();
        assert!(!fx.setup(pair, &solver));
        fx.flush();

        assert!(fx.pairs[pair].is_colliding());
        assert!(fx.overridden(body, area));
        let events = log.borrow();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, AreaEventKind::Added);
        assert_eq!(events[0].object, body);
        assert_eq!(events[0].object_shape, Some(0));
        assert_eq!(events[0].area_shape, Some(0));
    }

    #[test]
    fn test_exit_on_separation() {
        let (mut fx, body, area, pair, log) = monitored_body_area();
        let solver = MockSolver::new(true);

        fx.setup(pair, &solver);
        solver.answer.set(false);
        fx.setup(pair, &solver);
        fx.flush();

        assert!(!fx.pairs[pair].is_colliding());
        assert!(!fx.overridden(body, area));
        // Added and removed inside one step cancel out
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_destroying_colliding_pair_synthesizes_one_exit() {
        let (mut fx, body, area, pair, log) = monitored_body_area();
        let solver = MockSolver::new(true);
        fx.setup(pair, &solver);
        fx.flush();

        fx.destroy(pair);
        fx.flush();

        let events = log.borrow();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].kind, AreaEventKind::Removed);
        assert!(!fx.overridden(body, area));
        assert_eq!(fx.objects[body].constraint_count(), 0);
        assert_eq!(fx.objects[area].constraint_count(), 0);
    }

    #[test]
    fn test_destroying_idle_pair_only_deregisters() {
        let (mut fx, body, area, pair, log) = monitored_body_area();

        fx.destroy(pair);
        fx.flush();

        assert!(log.borrow().is_empty());
        assert!(!fx.objects[body].has_constraint(pair));
        assert!(!fx.objects[area].has_constraint(pair));
    }

    #[test]
    fn test_invalidated_shape_never_overlaps() {
        let (mut fx, body, area, pair, log) = monitored_body_area();
        let solver = MockSolver::new(true);
        fx.setup(pair, &solver);
        fx.flush();

        fx.pairs[pair].shift_shape_indices(area, 0);
        fx.setup(pair, &solver);
        fx.flush();

        assert_eq!(fx.pairs[pair].second().shape, None);
        assert!(!fx.pairs[pair].is_colliding());
        assert_eq!(solver.calls.get(), 1);
        assert!(!fx.overridden(body, area));
        let events = log.borrow();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].kind, AreaEventKind::Removed);
        assert_eq!(events[1].area_shape, None);
    }

    #[test]
    fn test_shift_shape_indices() {
        let mut fx = Fixture::new();
        let body = fx.add(CollisionObject::body(BodyMode::Rigid));
        let area = fx.add(CollisionObject::area());
        let mut pair = AreaPair::body_area(Endpoint::new(body, 2), Endpoint::new(area, 2));

        // Removal below the stored index shifts it down
        pair.shift_shape_indices(body, 1);
        assert_eq!(pair.first().shape, Some(1));

        // Removal above leaves it alone
        pair.shift_shape_indices(body, 5);
        assert_eq!(pair.first().shape, Some(1));

        // Removal of the stored index invalidates it, and it stays invalid
        pair.shift_shape_indices(body, 1);
        assert_eq!(pair.first().shape, None);
        pair.shift_shape_indices(body, 0);
        assert_eq!(pair.first().shape, None);

        // The other endpoint was never touched
        assert_eq!(pair.second().shape, Some(2));
    }

    #[test]
    fn test_mask_rejection_skips_geometry_test() {
        let mut fx = Fixture::new();
        let body = fx.add(
            CollisionObject::body(BodyMode::Rigid)
                .with_layers(CollisionLayers::BODY, CollisionLayers::TRIGGER),
        );
        let area = fx.add(
            CollisionObject::area()
                .with_layers(CollisionLayers::TRIGGER, CollisionLayers::ENVIRONMENT),
        );
        let (callback, log) = recorder();
        fx.area_mut(area).set_monitor_callback(Some(callback));
        let pair = fx.create(AreaPair::body_area(Endpoint::new(body, 0), Endpoint::new(area, 0)));
        let solver = MockSolver::new(true);

        fx.setup(pair, &solver);
        fx.flush();

        assert_eq!(solver.calls.get(), 0);
        assert!(!fx.pairs[pair].is_colliding());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_quiet_area_leaves_body_and_queries_untouched() {
        let mut fx = Fixture::new();
        let body = fx.add(CollisionObject::body(BodyMode::Rigid));
        let area = fx.add(CollisionObject::area());
        let pair = fx.create(AreaPair::body_area(Endpoint::new(body, 0), Endpoint::new(area, 0)));

        fx.setup(pair, &MockSolver::new(true));

        assert!(fx.pairs[pair].is_colliding());
        assert_eq!(fx.objects[body].as_body().unwrap().overriding_areas().count(), 0);
        assert!(fx.objects[area].as_area().unwrap().pending_body_events().is_empty());
    }

    #[test]
    fn test_override_and_monitor_are_independent() {
        let mut fx = Fixture::new();
        let body = fx.add(CollisionObject::body(BodyMode::Rigid));
        let area = fx.add(CollisionObject::area());
        fx.area_mut(area).set_space_override_mode(SpaceOverrideMode::Replace);
        let pair = fx.create(AreaPair::body_area(Endpoint::new(body, 0), Endpoint::new(area, 0)));

        fx.setup(pair, &MockSolver::new(true));

        assert!(fx.overridden(body, area));
        assert!(fx.objects[area].as_area().unwrap().pending_body_events().is_empty());
    }

    #[test]
    fn test_area_pair_notifies_only_the_monitoring_side() {
        let mut fx = Fixture::new();
        let a = fx.add(CollisionObject::area());
        let b = fx.add(CollisionObject::area());
        let (callback, log_a) = recorder();
        fx.area_mut(a).set_area_monitor_callback(Some(callback));
        let pair = fx.create(AreaPair::area_area(Endpoint::new(a, 0), Endpoint::new(b, 0)));

        fx.setup(pair, &MockSolver::new(true));

        assert!(fx.objects[b].as_area().unwrap().pending_area_events().is_empty());
        fx.flush();
        let events = log_a.borrow();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, AreaEventKind::Added);
        assert_eq!(events[0].object, b);
    }

    #[test]
    fn test_area_pair_respects_monitorable_flag() {
        let mut fx = Fixture::new();
        let a = fx.add(CollisionObject::area());
        let b = fx.add(CollisionObject::area());
        let (callback_a, log_a) = recorder();
        let (callback_b, log_b) = recorder();
        fx.area_mut(a).set_area_monitor_callback(Some(callback_a));
        fx.area_mut(b).set_area_monitor_callback(Some(callback_b));
        fx.area_mut(a).set_monitorable(false);
        let pair = fx.create(AreaPair::area_area(Endpoint::new(a, 0), Endpoint::new(b, 0)));

        fx.setup(pair, &MockSolver::new(true));
        fx.flush();

        // B cannot see A, but A still sees B
        assert!(log_b.borrow().is_empty());
        assert_eq!(log_a.borrow().len(), 1);
    }

    #[test]
    fn test_area_pair_exit_mirrors_enter() {
        let mut fx = Fixture::new();
        let a = fx.add(CollisionObject::area());
        let b = fx.add(CollisionObject::area());
        let (callback_a, log_a) = recorder();
        let (callback_b, log_b) = recorder();
        fx.area_mut(a).set_area_monitor_callback(Some(callback_a));
        fx.area_mut(b).set_area_monitor_callback(Some(callback_b));
        let pair = fx.create(AreaPair::area_area(Endpoint::new(a, 0), Endpoint::new(b, 0)));
        let solver = MockSolver::new(true);

        fx.setup(pair, &solver);
        fx.flush();
        fx.destroy(pair);
        fx.flush();

        for (log, other) in [(log_a, b), (log_b, a)] {
            let events = log.borrow();
            assert_eq!(events.len(), 2);
            assert_eq!(events[0].kind, AreaEventKind::Added);
            assert_eq!(events[1].kind, AreaEventKind::Removed);
            assert!(events.iter().all(|e| e.object == other));
        }
    }

    #[test]
    fn test_exit_undoes_enter_after_override_disabled() {
        let (mut fx, body, area, pair, log) = monitored_body_area();
        fx.setup(pair, &MockSolver::new(true));
        fx.flush();

        fx.area_mut(area).set_space_override_mode(SpaceOverrideMode::Disabled);
        fx.destroy(pair);
        fx.flush();

        assert!(!fx.overridden(body, area));
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn test_monitor_installed_mid_overlap_sees_no_exit() {
        let mut fx = Fixture::new();
        let body = fx.add(CollisionObject::body(BodyMode::Rigid));
        let area = fx.add(CollisionObject::area());
        let pair = fx.create(AreaPair::body_area(Endpoint::new(body, 0), Endpoint::new(area, 0)));
        fx.setup(pair, &MockSolver::new(true));

        let (callback, log) = recorder();
        fx.area_mut(area).set_monitor_callback(Some(callback));
        fx.area_mut(area).set_space_override_mode(SpaceOverrideMode::Replace);
        fx.destroy(pair);
        fx.flush();

        assert!(log.borrow().is_empty());
        assert!(!fx.overridden(body, area));
    }

    #[test]
    fn test_area_exit_delivered_after_monitorable_cleared() {
        let mut fx = Fixture::new();
        let a = fx.add(CollisionObject::area());
        let b = fx.add(CollisionObject::area());
        let (callback, log_a) = recorder();
        fx.area_mut(a).set_area_monitor_callback(Some(callback));
        let pair = fx.create(AreaPair::area_area(Endpoint::new(a, 0), Endpoint::new(b, 0)));
        fx.setup(pair, &MockSolver::new(true));
        fx.flush();

        fx.area_mut(b).set_monitorable(false);
        fx.destroy(pair);
        fx.flush();

        let events = log_a.borrow();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].kind, AreaEventKind::Removed);
        assert_eq!(events[1].object, b);
    }

    #[test]
    fn test_area_pair_mask_rejection_skips_geometry_test() {
        let mut fx = Fixture::new();
        let a = fx.add(CollisionObject::area().with_layers(CollisionLayers::TRIGGER, CollisionLayers::ENVIRONMENT));
        let b = fx.add(CollisionObject::area().with_layers(CollisionLayers::TRIGGER, CollisionLayers::TRIGGER));
        let (callback, log_a) = recorder();
        fx.area_mut(a).set_area_monitor_callback(Some(callback));
        let pair = fx.create(AreaPair::area_area(Endpoint::new(a, 0), Endpoint::new(b, 0)));
        let solver = MockSolver::new(true);

        fx.setup(pair, &solver);
        fx.flush();

        assert_eq!(solver.calls.get(), 0);
        assert!(!fx.pairs[pair].is_colliding());
        assert!(log_a.borrow().is_empty());
    }

    #[test]
    fn test_area_pair_invalidated_shape_exits_both_sides() {
        let mut fx = Fixture::new();
        let a = fx.add(CollisionObject::area());
        let b = fx.add(CollisionObject::area());
        let (callback_a, log_a) = recorder();
        let (callback_b, log_b) = recorder();
        fx.area_mut(a).set_area_monitor_callback(Some(callback_a));
        fx.area_mut(b).set_area_monitor_callback(Some(callback_b));
        let pair = fx.create(AreaPair::area_area(Endpoint::new(a, 0), Endpoint::new(b, 0)));
        let solver = MockSolver::new(true);
        fx.setup(pair, &solver);
        fx.flush();

        fx.pairs[pair].shift_shape_indices(a, 0);
        fx.setup(pair, &solver);
        fx.flush();

        assert_eq!(fx.pairs[pair].first().shape, None);
        assert!(!fx.pairs[pair].is_colliding());
        assert_eq!(solver.calls.get(), 1);

        let events_a = log_a.borrow();
        assert_eq!(events_a.len(), 2);
        assert_eq!(events_a[1].kind, AreaEventKind::Removed);
        assert_eq!(events_a[1].object, b);
        assert_eq!(events_a[1].area_shape, None);

        let events_b = log_b.borrow();
        assert_eq!(events_b.len(), 2);
        assert_eq!(events_b[1].kind, AreaEventKind::Removed);
        assert_eq!(events_b[1].object, a);
        assert_eq!(events_b[1].object_shape, None);
    }

    #[test]
    fn test_kinematic_body_woken_at_construction() {
        let mut fx = Fixture::new();
        let body = fx.add(CollisionObject::body(BodyMode::Kinematic));
        let area = fx.add(CollisionObject::area());
        assert!(!fx.objects[body].as_body().unwrap().is_active());

        fx.create(AreaPair::body_area(Endpoint::new(body, 0), Endpoint::new(area, 0)));

        assert!(fx.objects[body].as_body().unwrap().is_active());
    }

    #[test]
    fn test_static_body_stays_asleep() {
        let mut fx = Fixture::new();
        let body = fx.add(CollisionObject::body(BodyMode::Static));
        let area = fx.add(CollisionObject::area());

        fx.create(AreaPair::body_area(Endpoint::new(body, 0), Endpoint::new(area, 0)));

        assert!(!fx.objects[body].as_body().unwrap().is_active());
    }

    #[test]
    fn test_geometry_follows_world_transforms() {
        let mut fx = Fixture::new();
        let body = fx.add(CollisionObject::body(BodyMode::Rigid));
        let area = fx.add(
            CollisionObject::area().with_transform(Transform::from_position(Vec3::new(10.0, 0.0, 0.0))),
        );
        let pair = fx.create(AreaPair::body_area(Endpoint::new(body, 0), Endpoint::new(area, 0)));
        let solver = ShapeOverlapSolver;

        fx.setup(pair, &solver);
        assert!(!fx.pairs[pair].is_colliding());

        fx.objects[body].set_transform(Transform::from_position(Vec3::new(9.0, 0.0, 0.0)));
        fx.setup(pair, &solver);
        assert!(fx.pairs[pair].is_colliding());

        // Shape offset pushes the body's sphere back out of reach
        fx.objects[body].set_shape_transform(0, Transform::from_position(Vec3::new(-5.0, 0.0, 0.0)));
        fx.setup(pair, &solver);
        assert!(!fx.pairs[pair].is_colliding());
    }
}
