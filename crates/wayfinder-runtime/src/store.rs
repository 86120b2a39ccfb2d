//! Read-only waypoint lookup.
//!
//! The engine never owns waypoints; it asks a [`WaypointStore`] when a route
//! is requested.  [`InMemoryWaypointStore`] is enough for replays and tests;
//! an app backs the trait with its own persistence.

use uuid::Uuid;
use wayfinder_types::Waypoint;

/// Lookup capability over the user's saved waypoints.
pub trait WaypointStore {
    fn get(&self, id: Uuid) -> Option<Waypoint>;

    /// All waypoints, in creation order.
    fn list(&self) -> Vec<Waypoint>;

    /// First waypoint whose name matches `name`, ignoring ASCII case.
    fn find_by_name(&self, name: &str) -> Option<Waypoint> {
        self.list()
            .into_iter()
            .find(|w| w.name.eq_ignore_ascii_case(name))
    }
}

/// A [`WaypointStore`] held entirely in memory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryWaypointStore {
    waypoints: Vec<Waypoint>,
}

impl InMemoryWaypointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a waypoint, replacing any existing one with the same id.
    pub fn add(&mut self, waypoint: Waypoint) {
        self.remove(waypoint.id);
        self.waypoints.push(waypoint);
    }

    /// Remove a waypoint; returns it if it existed.
    pub fn remove(&mut self, id: Uuid) -> Option<Waypoint> {
        let idx = self.waypoints.iter().position(|w| w.id == id)?;
        Some(self.waypoints.remove(idx))
    }
}

impl FromIterator<Waypoint> for InMemoryWaypointStore {
    fn from_iter<I: IntoIterator<Item = Waypoint>>(iter: I) -> Self {
        let mut store = Self::new();
        for w in iter {
            store.add(w);
        }
        store
    }
}

impl WaypointStore for InMemoryWaypointStore {
    fn get(&self, id: Uuid) -> Option<Waypoint> {
        self.waypoints.iter().find(|w| w.id == id).cloned()
    }

    fn list(&self) -> Vec<Waypoint> {
        self.waypoints.clone()
    }
}
