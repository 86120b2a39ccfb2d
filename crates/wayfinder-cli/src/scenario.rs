//! Recorded scenarios for offline replay.
//!
//! ```json
//! {
//!   "waypoints": [{ "name": "Desk", "position": { "x": 5.0, "y": 0.0, "z": 0.0 } }],
//!   "target": "Desk",
//!   "frames": [
//!     { "pose": { "position": { "x": 0.0, "y": 1.4, "z": 0.0 }, "heading_rad": 0.0 } },
//!     { "pose": { ... }, "scene": { "floor_y": 0.0, "boxes": [ ... ] } }
//!   ]
//! }
//! ```
//!
//! A frame without `scene` replays a tick with no perception data.

use std::path::Path;

use serde::Deserialize;
use uuid::Uuid;
use wayfinder_perception::StaticScene;
use wayfinder_runtime::{InMemoryWaypointStore, WaypointStore};
use wayfinder_types::{NavError, Pose, Vec3, Waypoint};

#[derive(Debug, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub waypoints: Vec<ScenarioWaypoint>,
    /// Name of the waypoint to navigate to.
    #[serde(default)]
    pub target: Option<String>,
    pub frames: Vec<Frame>,
}

/// A waypoint as written in a scenario file; the id is generated when
/// omitted.
#[derive(Debug, Deserialize)]
pub struct ScenarioWaypoint {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub name: String,
    pub position: Vec3,
}

#[derive(Debug, Deserialize)]
pub struct Frame {
    pub pose: Pose,
    #[serde(default)]
    pub scene: Option<StaticScene>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self, NavError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| NavError::Scenario(format!("failed to read {}: {e}", path.display())))?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, NavError> {
        let scenario: Scenario =
            serde_json::from_str(raw).map_err(|e| NavError::Scenario(e.to_string()))?;
        if scenario.waypoints.is_empty() {
            return Err(NavError::Scenario("scenario has no waypoints".to_string()));
        }
        Ok(scenario)
    }

    pub fn store(&self) -> InMemoryWaypointStore {
        self.waypoints
            .iter()
            .map(|w| {
                let mut waypoint = Waypoint::new(w.name.clone(), w.position);
                if let Some(id) = w.id {
                    waypoint.id = id;
                }
                waypoint
            })
            .collect()
    }

    /// Resolve the target waypoint: `name_override` first, then the file's
    /// `target`, then the only waypoint when there is exactly one.
    pub fn resolve_target(
        &self,
        store: &dyn WaypointStore,
        name_override: Option<&str>,
    ) -> Result<Waypoint, NavError> {
        let name = match name_override.or(self.target.as_deref()) {
            Some(name) => name,
            None => {
                let mut all = store.list();
                if all.len() == 1 {
                    return Ok(all.remove(0));
                }
                return Err(NavError::Scenario(
                    "no target given and the scenario has several waypoints".to_string(),
                ));
            }
        };
        store
            .find_by_name(name)
            .ok_or_else(|| NavError::UnknownWaypointName(name.to_string()))
    }
}
