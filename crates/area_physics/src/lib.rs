//! # Area Physics
//!
//! Narrow-phase pair management for trigger volumes in a real-time physics
//! simulation.
//!
//! ## Features
//!
//! - **Trigger pairs**: one stateful pair per broad-phase shape overlap,
//!   with edge-triggered enter/exit notifications
//! - **Body and area variants**: space-override lists for bodies inside an
//!   area, monitor callbacks for bodies and for other areas
//! - **Shape reindexing**: removing a shape keeps every pair pointing at the
//!   right shape, or makes it inert if its own shape went away
//! - **Layer filtering**: collision layers gate the geometry test
//!
//! ## Quick Start
//!
//! ```rust
//! use area_physics::prelude::*;
//!
//! let mut space = PhysicsSpace::new(SpaceConfig::default());
//! let body = space.insert_object(
//!     CollisionObject::body(BodyMode::Kinematic)
//!         .with_shape(Shape::sphere(0.5), Transform::identity()),
//! );
//! let area = space.insert_object(
//!     CollisionObject::area()
//!         .with_shape(Shape::cuboid(Vec3::new(2.0, 2.0, 2.0)), Transform::identity()),
//! );
//! space
//!     .object_mut(area)
//!     .and_then(CollisionObject::as_area_mut)
//!     .unwrap()
//!     .set_monitor_callback(Some(Box::new(|event: &AreaEvent| {
//!         println!("{:?} {:?}", event.kind, event.object);
//!     })));
//!
//! // Normally called by the broad phase
//! let pair = space.broadphase_pair(body, 0, area, 0)?;
//! space.step_fixed(&ShapeOverlapSolver);
//! assert!(space.pair(pair).unwrap().is_colliding());
//! # Ok::<(), PhysicsError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod physics;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, SpaceConfig},
        foundation::{
            collections::{ObjectHandle, PairHandle},
            math::{Quat, Transform, Vec3},
        },
        physics::{
            AreaEvent, AreaEventKind, AreaPair, BodyMode, CollisionLayers, CollisionObject,
            OverlapSolver, PairKind, PhysicsError, PhysicsSpace, Shape, ShapeOverlapSolver,
            SpaceOverrideMode,
        },
    };
}
