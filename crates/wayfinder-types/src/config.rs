//! Tunable thresholds for smoothing, obstacle scanning, and guidance.
//!
//! Every field deserialises with a default so a partial TOML table such as
//!
//! ```toml
//! [guidance]
//! arrival_radius_m = 1.0
//! ```
//!
//! overrides only what it names.

use serde::{Deserialize, Serialize};

use crate::NavError;

pub const DEFAULT_SMOOTHING_WINDOW: usize = 5;

pub const DEFAULT_MAX_RANGE_M: f32 = 3.0;
pub const DEFAULT_WARNING_DISTANCE_M: f32 = 2.0;
pub const DEFAULT_CRITICAL_DISTANCE_M: f32 = 1.0;
pub const DEFAULT_CLUSTER_RADIUS_M: f32 = 0.5;
pub const DEFAULT_MIN_OBSTACLE_HEIGHT_M: f32 = 0.15;
pub const DEFAULT_MAX_OBSTACLE_HEIGHT_M: f32 = 2.0;
pub const DEFAULT_RAY_FOV_DEG: f32 = 60.0;
pub const DEFAULT_RAY_STEPS: usize = 9;
pub const DEFAULT_RAY_LEVELS: usize = 5;
pub const DEFAULT_RAY_MIN_HEIGHT_M: f32 = 0.2;
pub const DEFAULT_RAY_MAX_HEIGHT_M: f32 = 1.8;
pub const DEFAULT_FEATURE_MIN_DISTANCE_M: f32 = 0.1;
pub const DEFAULT_FEATURE_CONE_COS: f32 = 0.5;
pub const DEFAULT_MESH_CONE_COS: f32 = 0.7;
pub const DEFAULT_MESH_STRIDE: usize = 5;
pub const DEFAULT_MESH_VERTEX_BUDGET: usize = 4096;
pub const DEFAULT_RAY_CONFIDENCE: f32 = 0.8;
pub const DEFAULT_FEATURE_CONFIDENCE: f32 = 0.6;
pub const DEFAULT_MESH_CONFIDENCE: f32 = 0.9;
pub const DEFAULT_DEVICE_HEIGHT_M: f32 = 1.4;

pub const DEFAULT_ARRIVAL_RADIUS_M: f32 = 0.75;
pub const DEFAULT_STRAIGHT_ZONE_DEG: f32 = 40.0;
pub const DEFAULT_SLIGHT_ZONE_DEG: f32 = 50.0;
pub const DEFAULT_TURN_BACK_DEG: f32 = 135.0;
pub const DEFAULT_HYSTERESIS_THRESHOLD: u32 = 2;

/// Root configuration bundle handed to the engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NavigationConfig {
    #[serde(default)]
    pub smoothing: SmoothingConfig,
    #[serde(default)]
    pub scanner: ScannerConfig,
    #[serde(default)]
    pub guidance: GuidanceConfig,
}

impl NavigationConfig {
    /// Reject settings the engine cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<(), NavError> {
        if self.smoothing.window == 0 {
            return Err(config_err("smoothing.window must be > 0"));
        }

        let s = &self.scanner;
        if s.max_range_m <= 0.0 || s.warning_distance_m <= 0.0 || s.critical_distance_m <= 0.0 {
            return Err(config_err("scanner distances must be > 0"));
        }
        if s.critical_distance_m > s.warning_distance_m {
            return Err(config_err(
                "scanner.critical_distance_m must not exceed warning_distance_m",
            ));
        }
        if s.min_obstacle_height_m >= s.max_obstacle_height_m {
            return Err(config_err("scanner height band is empty"));
        }
        if s.cluster_radius_m <= 0.0 {
            return Err(config_err("scanner.cluster_radius_m must be > 0"));
        }
        if s.mesh_stride == 0 {
            return Err(config_err("scanner.mesh_stride must be > 0"));
        }

        let g = &self.guidance;
        if g.arrival_radius_m < 0.0 {
            return Err(config_err("guidance.arrival_radius_m must be >= 0"));
        }
        if !(0.0 < g.straight_zone_deg
            && g.straight_zone_deg <= g.slight_zone_deg
            && g.slight_zone_deg <= g.turn_back_deg
            && g.turn_back_deg <= 180.0)
        {
            return Err(config_err(
                "guidance zones must satisfy 0 < straight <= slight <= turn_back <= 180",
            ));
        }
        if g.hysteresis_threshold == 0 {
            return Err(config_err("guidance.hysteresis_threshold must be > 0"));
        }
        Ok(())
    }
}

fn config_err(msg: &str) -> NavError {
    NavError::Config(msg.to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Smoothing
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmoothingConfig {
    /// Number of raw samples averaged per signal.
    #[serde(default = "default_smoothing_window")]
    pub window: usize,
}

fn default_smoothing_window() -> usize {
    DEFAULT_SMOOTHING_WINDOW
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_SMOOTHING_WINDOW,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Scanner
// ────────────────────────────────────────────────────────────────────────────

/// Obstacle scanner thresholds.  Distances in metres, angles in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Hits further than this are ignored by every method.
    pub max_range_m: f32,
    /// A cluster closer than this raises an obstacle verdict.
    pub warning_distance_m: f32,
    /// A cluster closer than this raises a "STOP" warning.
    pub critical_distance_m: f32,
    pub cluster_radius_m: f32,
    /// Exclusive lower bound of the height band (filters the floor).
    pub min_obstacle_height_m: f32,
    /// Exclusive upper bound of the height band (filters overhangs).
    pub max_obstacle_height_m: f32,
    pub ray_fov_deg: f32,
    pub ray_steps: usize,
    pub ray_levels: usize,
    pub ray_min_height_m: f32,
    pub ray_max_height_m: f32,
    pub feature_min_distance_m: f32,
    /// Cosine of the feature-point forward cone half-angle.
    pub feature_cone_cos: f32,
    /// Cosine of the mesh forward cone half-angle.
    pub mesh_cone_cos: f32,
    /// Only every `mesh_stride`-th vertex of a surface mesh is examined.
    pub mesh_stride: usize,
    /// The mesh pass is skipped for a tick that would sample more vertices.
    pub mesh_vertex_budget: usize,
    pub ray_confidence: f32,
    pub feature_confidence: f32,
    pub mesh_confidence: f32,
    /// Device height above the floor, used when the source has no floor plane.
    pub device_height_m: f32,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            max_range_m: DEFAULT_MAX_RANGE_M,
            warning_distance_m: DEFAULT_WARNING_DISTANCE_M,
            critical_distance_m: DEFAULT_CRITICAL_DISTANCE_M,
            cluster_radius_m: DEFAULT_CLUSTER_RADIUS_M,
            min_obstacle_height_m: DEFAULT_MIN_OBSTACLE_HEIGHT_M,
            max_obstacle_height_m: DEFAULT_MAX_OBSTACLE_HEIGHT_M,
            ray_fov_deg: DEFAULT_RAY_FOV_DEG,
            ray_steps: DEFAULT_RAY_STEPS,
            ray_levels: DEFAULT_RAY_LEVELS,
            ray_min_height_m: DEFAULT_RAY_MIN_HEIGHT_M,
            ray_max_height_m: DEFAULT_RAY_MAX_HEIGHT_M,
            feature_min_distance_m: DEFAULT_FEATURE_MIN_DISTANCE_M,
            feature_cone_cos: DEFAULT_FEATURE_CONE_COS,
            mesh_cone_cos: DEFAULT_MESH_CONE_COS,
            mesh_stride: DEFAULT_MESH_STRIDE,
            mesh_vertex_budget: DEFAULT_MESH_VERTEX_BUDGET,
            ray_confidence: DEFAULT_RAY_CONFIDENCE,
            feature_confidence: DEFAULT_FEATURE_CONFIDENCE,
            mesh_confidence: DEFAULT_MESH_CONFIDENCE,
            device_height_m: DEFAULT_DEVICE_HEIGHT_M,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Guidance
// ────────────────────────────────────────────────────────────────────────────

/// How the sign of the heading-to-target angle maps to left and right.
///
/// The default matches the convention observed on the reference device; it
/// has not been validated against every tracker's handedness, hence the knob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnConvention {
    #[default]
    PositiveIsRight,
    PositiveIsLeft,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuidanceConfig {
    /// Horizontal distance at which the target counts as reached.
    pub arrival_radius_m: f32,
    pub straight_zone_deg: f32,
    pub slight_zone_deg: f32,
    pub turn_back_deg: f32,
    /// Consecutive ticks a new direction must persist before it is committed.
    pub hysteresis_threshold: u32,
    pub turn_convention: TurnConvention,
}

impl Default for GuidanceConfig {
    fn default() -> Self {
        Self {
            arrival_radius_m: DEFAULT_ARRIVAL_RADIUS_M,
            straight_zone_deg: DEFAULT_STRAIGHT_ZONE_DEG,
            slight_zone_deg: DEFAULT_SLIGHT_ZONE_DEG,
            turn_back_deg: DEFAULT_TURN_BACK_DEG,
            hysteresis_threshold: DEFAULT_HYSTERESIS_THRESHOLD,
            turn_convention: TurnConvention::default(),
        }
    }
}
