//! Physics module for trigger-volume overlap tracking
//!
//! Bodies and areas live in a [`PhysicsSpace`]. The broad phase reports shape
//! pairs whose bounding volumes overlap; the space turns each into an
//! [`AreaPair`] that re-tests the exact overlap every step and notifies areas
//! when objects enter or leave them.

pub mod area;
pub mod body;
pub mod collision;
pub mod collision_layers;
pub mod error;
pub mod object;
pub mod pair;
pub mod space;

pub use area::{AreaEvent, AreaEventKind, AreaState, MonitorCallback, SpaceOverrideMode};
pub use body::{BodyMode, BodyState};
pub use collision::{OverlapSolver, Shape, ShapeOverlapSolver};
pub use collision_layers::CollisionLayers;
pub use error::{PhysicsError, PhysicsResult};
pub use object::{CollisionObject, EndpointRole, ObjectKind, ShapeEntry};
pub use pair::{AreaPair, Constraint, Endpoint, PairKind};
pub use space::PhysicsSpace;
