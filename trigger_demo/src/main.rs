//! Trigger Volume Demo
//!
//! Runs a headless scene with:
//! - Kinematic probes drifting through a row of trigger areas
//! - A naive bounding-sphere broad phase that creates and destroys pairs
//! - Area monitors logging every body and area entering or leaving
//! - A shape removed from a busy area halfway through the run
//!
//! Usage: `trigger_demo [space.toml|space.ron]` (set `RUST_LOG=info` to see events)

use std::collections::HashMap;
use std::error::Error;

use area_physics::foundation::logging;
use area_physics::physics::MonitorCallback;
use area_physics::prelude::*;
use log::{info, warn};
use rand::Rng;

// Scene layout
const NUM_PROBES: usize = 8;
const NUM_AREAS: u16 = 4;
const AREA_SPACING: f32 = 12.0;
const AREA_HALF_SIZE: f32 = 3.0;
const PROBE_RADIUS: f32 = 0.75;

// Run length
const STEPS: usize = 600;
const SHAPE_REMOVAL_STEP: usize = STEPS / 2;

type ShapeKey = (ObjectHandle, usize, ObjectHandle, usize);

fn pair_key(a: (ObjectHandle, usize), b: (ObjectHandle, usize)) -> ShapeKey {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    (low.0, low.1, high.0, high.1)
}

fn bounding_sphere(object: &CollisionObject, shape: usize) -> Option<(Vec3, f32)> {
    let world = object.shape_world_transform(shape)?;
    let radius = object.shape(shape)?.local_bounding_radius() * world.max_scale();
    Some((world.position, radius))
}

/// All-pairs bounding-sphere broad phase, reconciled against the live pairs
fn update_broad_phase(space: &mut PhysicsSpace) -> Result<(), PhysicsError> {
    let mut existing: HashMap<ShapeKey, PairHandle> = HashMap::new();
    let mut stale = Vec::new();
    for (handle, pair) in space.pairs() {
        match (pair.first().shape, pair.second().shape) {
            (Some(a), Some(b)) => {
                existing.insert(pair_key((pair.first().object, a), (pair.second().object, b)), handle);
            }
            // Its shape was removed; the broad phase no longer tracks it
            _ => stale.push(handle),
        }
    }

    let objects: Vec<(ObjectHandle, &CollisionObject)> = space.objects().collect();
    let mut wanted = Vec::new();
    for (i, &(handle_a, a)) in objects.iter().enumerate() {
        for &(handle_b, b) in &objects[i + 1..] {
            if !a.is_area() && !b.is_area() {
                continue;
            }
            for shape_a in 0..a.shape_count() {
                for shape_b in 0..b.shape_count() {
                    let (Some((ca, ra)), Some((cb, rb))) = (bounding_sphere(a, shape_a), bounding_sphere(b, shape_b)) else {
                        continue;
                    };
                    if (ca - cb).magnitude_squared() <= (ra + rb) * (ra + rb) {
                        wanted.push(pair_key((handle_a, shape_a), (handle_b, shape_b)));
                    }
                }
            }
        }
    }

    for handle in stale {
        space.broadphase_unpair(handle)?;
    }
    for key in &wanted {
        if existing.remove(key).is_none() {
            space.broadphase_pair(key.0, key.1, key.2, key.3)?;
        }
    }
    for (_, handle) in existing {
        space.broadphase_unpair(handle)?;
    }
    Ok(())
}

fn logging_monitor(name: String) -> MonitorCallback {
    Box::new(move |event: &AreaEvent| {
        info!(
            "{}: {:?} {:?} (its shape {:?}, our shape {:?})",
            name, event.kind, event.object, event.object_shape, event.area_shape
        );
    })
}

fn load_config() -> Result<SpaceConfig, Box<dyn Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading space config from {}", path);
            SpaceConfig::load_from_file(&path)?
        }
        None => SpaceConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn main() -> Result<(), Box<dyn Error>> {
    logging::init();

    let config = load_config()?;
    let mut space = PhysicsSpace::new(config);
    let mut rng = rand::thread_rng();

    // Areas along the X axis; odd ones override space parameters, all monitor bodies
    let mut areas = Vec::new();
    for i in 0..NUM_AREAS {
        let mut object = CollisionObject::area()
            .with_transform(Transform::from_position(Vec3::new(f32::from(i) * AREA_SPACING, 0.0, 0.0)))
            .with_layers(CollisionLayers::TRIGGER, CollisionLayers::BODY | CollisionLayers::TRIGGER)
            .with_shape(Shape::cuboid(Vec3::new(AREA_HALF_SIZE, AREA_HALF_SIZE, AREA_HALF_SIZE)), Transform::identity())
            .with_shape(Shape::sphere(1.5), Transform::from_position(Vec3::new(0.0, AREA_HALF_SIZE + 1.0, 0.0)));

        if let Some(area) = object.as_area_mut() {
            area.set_monitor_callback(Some(logging_monitor(format!("area {i}"))));
            if i % 2 == 1 {
                area.set_space_override_mode(SpaceOverrideMode::Combine);
                area.set_priority(i32::from(i));
            }
        }
        areas.push(space.insert_object(object));
    }

    // One wandering area that watches the others
    let mut sentinel = CollisionObject::area()
        .with_transform(Transform::from_position(Vec3::new(-AREA_SPACING, 0.0, 0.0)))
        .with_layers(CollisionLayers::TRIGGER, CollisionLayers::TRIGGER)
        .with_shape(Shape::sphere(2.0), Transform::identity());
    if let Some(area) = sentinel.as_area_mut() {
        area.set_area_monitor_callback(Some(logging_monitor("sentinel".to_string())));
    }
    let sentinel = space.insert_object(sentinel);

    let mut probes = Vec::new();
    for _ in 0..NUM_PROBES {
        let start = Vec3::new(
            rng.gen_range(-AREA_SPACING..0.0),
            rng.gen_range(-AREA_HALF_SIZE..AREA_HALF_SIZE),
            rng.gen_range(-AREA_HALF_SIZE..AREA_HALF_SIZE),
        );
        let velocity = Vec3::new(rng.gen_range(2.0..6.0), 0.0, 0.0);
        let handle = space.insert_object(
            CollisionObject::body(BodyMode::Kinematic)
                .with_transform(Transform::from_position(start))
                .with_layers(CollisionLayers::BODY, CollisionLayers::TRIGGER)
                .with_shape(Shape::sphere(PROBE_RADIUS), Transform::identity()),
        );
        probes.push((handle, velocity));
    }
    let movers: Vec<(ObjectHandle, Vec3)> = probes
        .iter()
        .copied()
        .chain(std::iter::once((sentinel, Vec3::new(3.0, 0.0, 0.0))))
        .collect();

    let step = space.config().fixed_step;
    for frame in 0..STEPS {
        for &(handle, velocity) in &movers {
            if let Some(object) = space.object_mut(handle) {
                let mut transform = *object.transform();
                transform.position += velocity * step;
                object.set_transform(transform);
            }
        }

        if frame == SHAPE_REMOVAL_STEP {
            // Drop the box of the second area while probes may be inside it
            match space.remove_shape(areas[1], 0) {
                Ok(_) => info!("Removed box shape from area 1"),
                Err(err) => warn!("Could not remove shape: {}", err),
            }
        }

        update_broad_phase(&mut space)?;
        space.step_fixed(&ShapeOverlapSolver);
    }

    let colliding = space.pairs().filter(|(_, pair)| pair.is_colliding()).count();
    info!(
        "Finished {} steps: {} objects, {} pairs ({} colliding)",
        STEPS,
        space.object_count(),
        space.pair_count(),
        colliding
    );

    for (handle, _) in probes {
        space.remove_object(handle)?;
    }
    space.flush_queries();
    info!("Removed probes, {} pairs remain", space.pair_count());

    Ok(())
}
