//! Area (trigger volume) state and its pending notification queries
//!
//! Pairs never call user code directly. They enqueue additions and removals
//! into the area, and the space delivers them in one batch per step through
//! [`AreaState::call_queries`]. An entry that was added and removed again
//! before delivery cancels out; the rest are delivered in the order they were
//! first enqueued.

use std::fmt;

use crate::foundation::collections::ObjectHandle;

/// How an area overrides space parameters (gravity, damping, ...) for bodies inside it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpaceOverrideMode {
    /// No override; bodies never list this area
    #[default]
    Disabled,
    /// Add to what lower priority areas computed
    Combine,
    /// Add, then stop evaluating lower priority areas
    CombineReplace,
    /// Replace what lower priority areas computed
    Replace,
    /// Replace, then keep evaluating lower priority areas
    ReplaceCombine,
}

/// Whether a monitored object entered or left the area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AreaEventKind {
    /// The object started overlapping the area
    Added,
    /// The object stopped overlapping the area
    Removed,
}

/// Notification delivered to an area monitor callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AreaEvent {
    /// Entered or left
    pub kind: AreaEventKind,
    /// The body or area that was seen
    pub object: ObjectHandle,
    /// Shape of `object` involved, `None` if that shape has since been removed
    pub object_shape: Option<usize>,
    /// Shape of the monitoring area involved, `None` if since removed
    pub area_shape: Option<usize>,
}

/// Callback invoked for each delivered [`AreaEvent`]
pub type MonitorCallback = Box<dyn FnMut(&AreaEvent)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct QueryKey {
    object: ObjectHandle,
    object_shape: Option<usize>,
    area_shape: Option<usize>,
}

/// Signed counters per key in enqueue order: each add is +1, each remove is -1
#[derive(Debug, Default, Clone)]
struct PendingQuery {
    entries: Vec<(QueryKey, i32)>,
}

impl PendingQuery {
    fn bump(&mut self, key: QueryKey, delta: i32) {
        match self.entries.iter().position(|(k, _)| *k == key) {
            Some(index) => {
                self.entries[index].1 += delta;
                // Cancelled entries drop out
                if self.entries[index].1 == 0 {
                    self.entries.remove(index);
                }
            }
            None => self.entries.push((key, delta)),
        }
    }

    fn events(&self) -> Vec<AreaEvent> {
        self.entries
            .iter()
            .map(|&(key, state)| AreaEvent {
                kind: if state > 0 { AreaEventKind::Added } else { AreaEventKind::Removed },
                object: key.object,
                object_shape: key.object_shape,
                area_shape: key.area_shape,
            })
            .collect()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Simulation state specific to areas
pub struct AreaState {
    override_mode: SpaceOverrideMode,
    priority: i32,
    monitorable: bool,
    monitor_callback: Option<MonitorCallback>,
    area_monitor_callback: Option<MonitorCallback>,
    body_query: PendingQuery,
    area_query: PendingQuery,
}

impl fmt::Debug for AreaState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AreaState")
            .field("override_mode", &self.override_mode)
            .field("priority", &self.priority)
            .field("monitorable", &self.monitorable)
            .field("monitor_callback", &self.monitor_callback.is_some())
            .field("area_monitor_callback", &self.area_monitor_callback.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for AreaState {
    fn default() -> Self {
        Self::new()
    }
}

impl AreaState {
    /// Create area state with no overrides and no callbacks; monitorable by default
    pub fn new() -> Self {
        Self {
            override_mode: SpaceOverrideMode::Disabled,
            priority: 0,
            monitorable: true,
            monitor_callback: None,
            area_monitor_callback: None,
            body_query: PendingQuery::default(),
            area_query: PendingQuery::default(),
        }
    }

    /// Current space override mode
    pub fn space_override_mode(&self) -> SpaceOverrideMode {
        self.override_mode
    }

    /// Set the space override mode
    pub fn set_space_override_mode(&mut self, mode: SpaceOverrideMode) {
        self.override_mode = mode;
    }

    /// Whether bodies entering this area add it to their override list
    pub fn overrides_space(&self) -> bool {
        self.override_mode != SpaceOverrideMode::Disabled
    }

    /// Ordering among overriding areas on a body
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Set the override priority. Bodies already inside keep the old ordering
    /// until they leave and re-enter.
    pub fn set_priority(&mut self, priority: i32) {
        self.priority = priority;
    }

    /// Whether other areas may monitor this one
    pub fn is_monitorable(&self) -> bool {
        self.monitorable
    }

    /// Allow or forbid other areas to monitor this one
    pub fn set_monitorable(&mut self, monitorable: bool) {
        self.monitorable = monitorable;
    }

    /// Whether body enter/exit notifications are wanted
    pub fn has_monitor_callback(&self) -> bool {
        self.monitor_callback.is_some()
    }

    /// Whether area enter/exit notifications are wanted
    pub fn has_area_monitor_callback(&self) -> bool {
        self.area_monitor_callback.is_some()
    }

    /// Install or clear the body monitor. Pending body notifications are discarded.
    pub fn set_monitor_callback(&mut self, callback: Option<MonitorCallback>) {
        self.monitor_callback = callback;
        self.body_query.clear();
    }

    /// Install or clear the area monitor. Pending area notifications are discarded.
    pub fn set_area_monitor_callback(&mut self, callback: Option<MonitorCallback>) {
        self.area_monitor_callback = callback;
        self.area_query.clear();
    }

    /// Enqueue a body entering this area
    pub fn add_body_to_query(&mut self, body: ObjectHandle, body_shape: Option<usize>, area_shape: Option<usize>) {
        self.body_query.bump(QueryKey { object: body, object_shape: body_shape, area_shape }, 1);
    }

    /// Enqueue a body leaving this area
    pub fn remove_body_from_query(&mut self, body: ObjectHandle, body_shape: Option<usize>, area_shape: Option<usize>) {
        self.body_query.bump(QueryKey { object: body, object_shape: body_shape, area_shape }, -1);
    }

    /// Enqueue another area entering this one
    pub fn add_area_to_query(&mut self, area: ObjectHandle, other_shape: Option<usize>, own_shape: Option<usize>) {
        self.area_query.bump(QueryKey { object: area, object_shape: other_shape, area_shape: own_shape }, 1);
    }

    /// Enqueue another area leaving this one
    pub fn remove_area_from_query(&mut self, area: ObjectHandle, other_shape: Option<usize>, own_shape: Option<usize>) {
        self.area_query.bump(QueryKey { object: area, object_shape: other_shape, area_shape: own_shape }, -1);
    }

    /// Body notifications that the next [`call_queries`](Self::call_queries) would deliver
    pub fn pending_body_events(&self) -> Vec<AreaEvent> {
        self.body_query.events()
    }

    /// Area notifications that the next [`call_queries`](Self::call_queries) would deliver
    pub fn pending_area_events(&self) -> Vec<AreaEvent> {
        self.area_query.events()
    }

    /// Deliver pending notifications to the callbacks and clear both queries.
    /// Returns the number of events delivered.
    pub fn call_queries(&mut self) -> usize {
        let mut delivered = 0;

        if let Some(callback) = self.monitor_callback.as_mut() {
            for event in self.body_query.events() {
                callback(&event);
                delivered += 1;
            }
        }
        self.body_query.clear();

        if let Some(callback) = self.area_monitor_callback.as_mut() {
            for event in self.area_query.events() {
                callback(&event);
                delivered += 1;
            }
        }
        self.area_query.clear();

        delivered
    }
}
