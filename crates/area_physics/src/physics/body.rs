//! Body-side state of a collision object

use crate::foundation::collections::ObjectHandle;

/// How a body participates in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BodyMode {
    /// Never moves
    Static,
    /// Moved by user code, not by forces
    Kinematic,
    /// Fully simulated
    #[default]
    Rigid,
    /// Simulated without rotation
    Character,
}

/// An area currently overriding space parameters on a body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AreaOverride {
    area: ObjectHandle,
    priority: i32,
    ref_count: u32,
}

/// Simulation state specific to bodies
#[derive(Debug, Clone)]
pub struct BodyState {
    mode: BodyMode,
    active: bool,
    /// Sorted by ascending priority
    areas: Vec<AreaOverride>,
}

impl BodyState {
    /// Create body state; rigid and character bodies start active
    pub fn new(mode: BodyMode) -> Self {
        Self {
            mode,
            active: matches!(mode, BodyMode::Rigid | BodyMode::Character),
            areas: Vec::new(),
        }
    }

    /// Current mode
    pub fn mode(&self) -> BodyMode {
        self.mode
    }

    /// Change mode; static bodies go to sleep
    pub fn set_mode(&mut self, mode: BodyMode) {
        self.mode = mode;
        if mode == BodyMode::Static {
            self.active = false;
        }
    }

    /// Whether the body is currently simulated
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Wake or sleep the body
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Register an overriding area. Each shape pair adds the same area
    /// separately, so entries are reference counted.
    pub fn add_area(&mut self, area: ObjectHandle, priority: i32) {
        if let Some(entry) = self.areas.iter_mut().find(|e| e.area == area) {
            entry.ref_count += 1;
            return;
        }
        let index = self.areas.partition_point(|e| e.priority <= priority);
        self.areas.insert(index, AreaOverride { area, priority, ref_count: 1 });
    }

    /// Drop one reference to an overriding area
    pub fn remove_area(&mut self, area: ObjectHandle) {
        if let Some(index) = self.areas.iter().position(|e| e.area == area) {
            let entry = &mut self.areas[index];
            entry.ref_count -= 1;
            if entry.ref_count == 0 {
                self.areas.remove(index);
            }
        }
    }

    /// Overriding areas, lowest priority first
    pub fn overriding_areas(&self) -> impl Iterator<Item = ObjectHandle> + '_ {
        self.areas.iter().map(|e| e.area)
    }

    /// Whether `area` is in the override list
    pub fn is_overridden_by(&self, area: ObjectHandle) -> bool {
        self.areas.iter().any(|e| e.area == area)
    }
}
