//! `wayfinder-types` – shared data model for the Wayfinder navigation stack.
//!
//! Every crate in the workspace speaks in these types: poses arrive from the
//! spatial tracker, waypoints come from the waypoint store, and
//! [`NavigationUpdate`]s leave the engine for speech, haptics, and UI.
//!
//! Coordinates are world-space metres with **Y up**; the ground plane is
//! X/Z and headings are measured in that plane from +X towards +Z.

pub mod config;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub use config::{
    GuidanceConfig, NavigationConfig, ScannerConfig, SmoothingConfig, TurnConvention,
};

// ────────────────────────────────────────────────────────────────────────────
// Vec3
// ────────────────────────────────────────────────────────────────────────────

/// A 3-D vector in world space (metres).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    /// Create a new vector.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// The zero vector.
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }

    pub fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }

    pub fn scale(self, k: f32) -> Self {
        Self::new(self.x * k, self.y * k, self.z * k)
    }

    pub fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    /// Euclidean length.
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Length of the ground-plane (X/Z) projection.
    pub fn horizontal_length(self) -> f32 {
        (self.x * self.x + self.z * self.z).sqrt()
    }

    /// Unit vector in the same direction, or `None` when the vector is
    /// shorter than `epsilon`.
    pub fn try_normalize(self, epsilon: f32) -> Option<Self> {
        let len = self.length();
        if len < epsilon {
            None
        } else {
            Some(self.scale(1.0 / len))
        }
    }

    pub fn distance(self, other: Self) -> f32 {
        self.sub(other).length()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pose & Waypoint
// ────────────────────────────────────────────────────────────────────────────

/// One tracking frame: device position plus forward heading.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Pose {
    pub position: Vec3,
    /// Ground-plane heading (radians), measured from +X towards +Z.
    pub heading_rad: f32,
}

impl Pose {
    pub fn new(position: Vec3, heading_rad: f32) -> Self {
        Self {
            position,
            heading_rad,
        }
    }
}

/// A named location stored by the user.  Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Waypoint {
    pub id: Uuid,
    pub name: String,
    pub position: Vec3,
    pub created_at: DateTime<Utc>,
}

impl Waypoint {
    /// Create a waypoint with a fresh id, stamped now.
    pub fn new(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            position,
            created_at: Utc::now(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Obstacles
// ────────────────────────────────────────────────────────────────────────────

/// Which way the user should step to get around an obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AvoidanceSide {
    #[default]
    None,
    Left,
    Right,
}

impl std::fmt::Display for AvoidanceSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AvoidanceSide::None => write!(f, "none"),
            AvoidanceSide::Left => write!(f, "left"),
            AvoidanceSide::Right => write!(f, "right"),
        }
    }
}

/// A single obstacle point produced by one of the scanner's sensing methods.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectedObstacle {
    pub position: Vec3,
    /// Straight-line distance from the observer (metres).
    pub distance: f32,
    /// Height above the floor (metres).
    pub height: f32,
    /// Confidence of the sensing method, in `[0, 1]`.
    pub confidence: f32,
}

/// The scanner's decision for one tick.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct ObstacleVerdict {
    pub has_obstacle: bool,
    /// Mean distance of the nearest cluster (metres); `None` without a threat.
    pub distance: Option<f32>,
    pub suggested_side: AvoidanceSide,
    pub warning: Option<String>,
}

impl ObstacleVerdict {
    /// The "path is clear" verdict.
    pub fn clear() -> Self {
        Self::default()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Navigation session
// ────────────────────────────────────────────────────────────────────────────

/// Lifecycle state of a navigation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NavigationState {
    #[default]
    Idle,
    Navigating,
    Arrived,
}

/// The directional instruction committed for the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    None,
    Straight,
    Left,
    Right,
    TurnBack,
    Arrived,
}

impl From<AvoidanceSide> for Direction {
    fn from(side: AvoidanceSide) -> Self {
        match side {
            AvoidanceSide::None => Direction::Straight,
            AvoidanceSide::Left => Direction::Left,
            AvoidanceSide::Right => Direction::Right,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Direction::None => "none",
            Direction::Straight => "straight",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::TurnBack => "turn_back",
            Direction::Arrived => "arrived",
        };
        f.write_str(s)
    }
}

/// Obstacle sub-record of a [`NavigationUpdate`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct ObstacleStatus {
    pub detected: bool,
    pub distance: Option<f32>,
    pub warning: Option<String>,
    pub suggested_side: AvoidanceSide,
}

impl From<&ObstacleVerdict> for ObstacleStatus {
    fn from(v: &ObstacleVerdict) -> Self {
        Self {
            detected: v.has_obstacle,
            distance: v.distance,
            warning: v.warning.clone(),
            suggested_side: v.suggested_side,
        }
    }
}

/// The engine's per-tick output while a session is Navigating or Arrived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NavigationUpdate {
    pub state: NavigationState,
    pub target_id: Uuid,
    pub target_name: String,
    pub direction: Direction,
    /// 3-D distance to the target (metres).
    pub distance: f32,
    /// Ground-plane distance to the target (metres).
    pub horizontal_distance: f32,
    /// Angle from the current heading to the target, in `(-180, 180]` degrees.
    pub bearing_deg: f32,
    /// Absolute ground-plane bearing of the target, in `(-180, 180]` degrees.
    pub target_bearing_deg: f32,
    pub message: String,
    pub obstacle: ObstacleStatus,
}

// ────────────────────────────────────────────────────────────────────────────
// Bus events
// ────────────────────────────────────────────────────────────────────────────

/// Unified event wrapper for the navigation event bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// e.g. `"wayfinder-runtime::engine"`
    pub source: String,
    pub payload: EventPayload,
}

impl Event {
    /// Wrap `payload` with a fresh id and the current time.
    pub fn new(source: impl Into<String>, payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            source: source.into(),
            payload,
        }
    }
}

/// Variants of data routed over the event bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EventPayload {
    Navigation(NavigationUpdate),
    ObstacleAlert(ObstacleStatus),
    SessionChanged {
        from: NavigationState,
        to: NavigationState,
        target: Option<Uuid>,
    },
}

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

/// Errors raised at the fallible edges of the stack.  The per-tick guidance
/// path never fails.
#[derive(Error, Debug, Serialize, Deserialize)]
pub enum NavError {
    #[error("Waypoint not found: {0}")]
    WaypointNotFound(Uuid),

    #[error("No waypoint named '{0}'")]
    UnknownWaypointName(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Scenario error: {0}")]
    Scenario(String),

    #[error("Event bus error: {0}")]
    Channel(String),
}
