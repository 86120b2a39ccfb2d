//! Perception capability.
//!
//! The engine never talks to platform tracking APIs.  The caller implements
//! [`PerceptionSource`] over whatever its tracker exposes for the current
//! frame and hands it to the engine once per tick.
//!
//! [`StaticScene`] is a self-contained implementation over axis-aligned
//! boxes.  It deserialises from JSON, so recorded scenarios can be replayed
//! without a device.

use serde::{Deserialize, Serialize};
use wayfinder_types::Vec3;

use crate::transform::Transform3D;

/// One tick's worth of raw sensing data.
pub trait PerceptionSource {
    /// Cast a ray and return the nearest hit point, if any.
    ///
    /// `direction` is a unit vector.
    fn raycast(&self, origin: Vec3, direction: Vec3) -> Option<Vec3>;

    /// Sparse feature points tracked in the current frame (world space).
    fn feature_points(&self) -> &[Vec3];

    /// Dense surface meshes.  `None` on hardware without depth sensing.
    fn surfaces(&self) -> Option<&[SurfaceMesh]> {
        None
    }

    /// World-space height of the detected floor plane, if known.
    fn floor_height(&self) -> Option<f32> {
        None
    }
}

/// A reconstructed surface: vertices in the anchor's local frame plus the
/// anchor's pose.  Use [`Transform3D::identity`] for world-space vertices.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfaceMesh {
    #[serde(default)]
    pub anchor: Transform3D,
    pub vertices: Vec<Vec3>,
}

impl SurfaceMesh {
    pub fn world(vertices: Vec<Vec3>) -> Self {
        Self {
            anchor: Transform3D::identity(),
            vertices,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Aabb
// ────────────────────────────────────────────────────────────────────────────

/// An axis-aligned bounding box, defined by its minimum and maximum corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create a bounding box from its two opposite corners.
    ///
    /// The constructor normalises the corners so that `min ≤ max` per axis.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: Vec3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Vec3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Ray parameter `t ≥ 0` of the first intersection (slab method).
    pub fn ray_intersection(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        let mut t_min = 0.0_f32;
        let mut t_max = f32::INFINITY;

        let axes = [
            (origin.x, direction.x, self.min.x, self.max.x),
            (origin.y, direction.y, self.min.y, self.max.y),
            (origin.z, direction.z, self.min.z, self.max.z),
        ];
        for (o, d, lo, hi) in axes {
            if d.abs() < f32::EPSILON {
                // Parallel to this slab: miss unless already between its planes.
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / d;
            let (t0, t1) = {
                let a = (lo - o) * inv;
                let b = (hi - o) * inv;
                if a <= b { (a, b) } else { (b, a) }
            };
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }
        Some(t_min)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// StaticScene
// ────────────────────────────────────────────────────────────────────────────

/// A perception snapshot backed by a fixed set of boxes.
///
/// Rays are cast against `boxes`; feature points and surfaces are returned
/// as given.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticScene {
    pub boxes: Vec<Aabb>,
    pub feature_points: Vec<Vec3>,
    pub surfaces: Option<Vec<SurfaceMesh>>,
    pub floor_y: Option<f32>,
}

impl StaticScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_box(mut self, b: Aabb) -> Self {
        self.boxes.push(b);
        self
    }

    pub fn with_feature_points(mut self, points: Vec<Vec3>) -> Self {
        self.feature_points = points;
        self
    }

    pub fn with_surface(mut self, mesh: SurfaceMesh) -> Self {
        self.surfaces.get_or_insert_with(Vec::new).push(mesh);
        self
    }

    pub fn with_floor(mut self, floor_y: f32) -> Self {
        self.floor_y = Some(floor_y);
        self
    }
}

impl PerceptionSource for StaticScene {
    fn raycast(&self, origin: Vec3, direction: Vec3) -> Option<Vec3> {
        self.boxes
            .iter()
            .filter_map(|b| b.ray_intersection(origin, direction))
            .min_by(|a, b| a.total_cmp(b))
            .map(|t| origin.add(direction.scale(t)))
    }

    fn feature_points(&self) -> &[Vec3] {
        &self.feature_points
    }

    fn surfaces(&self) -> Option<&[SurfaceMesh]> {
        self.surfaces.as_deref()
    }

    fn floor_height(&self) -> Option<f32> {
        self.floor_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall() -> Aabb {
        Aabb::new(Vec3::new(2.0, 0.0, -1.0), Vec3::new(2.2, 2.5, 1.0))
    }

    #[test]
    fn aabb_normalises_corners() {
        let b = Aabb::new(Vec3::new(1.0, 1.0, 1.0), Vec3::new(-1.0, -1.0, -1.0));
        assert_eq!(b.min, Vec3::new(-1.0, -1.0, -1.0));
        assert_eq!(b.max, Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn ray_hits_near_face() {
        let t = wall()
            .ray_intersection(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 0.0, 0.0))
            .unwrap();
        assert!((t - 2.0).abs() < 1e-5);
    }

    #[test]
    fn ray_pointing_away_misses() {
        assert!(wall()
            .ray_intersection(Vec3::new(0.0, 1.0, 0.0), Vec3::new(-1.0, 0.0, 0.0))
            .is_none());
    }

    #[test]
    fn ray_above_box_misses() {
        assert!(wall()
            .ray_intersection(Vec3::new(0.0, 3.0, 0.0), Vec3::new(1.0, 0.0, 0.0))
            .is_none());
    }

    #[test]
    fn scene_returns_nearest_hit() {
        let scene = StaticScene::new()
            .with_box(wall())
            .with_box(Aabb::new(Vec3::new(1.0, 0.0, -0.2), Vec3::new(1.2, 1.0, 0.2)));
        let hit = scene
            .raycast(Vec3::new(0.0, 0.5, 0.0), Vec3::new(1.0, 0.0, 0.0))
            .unwrap();
        assert!((hit.x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn scene_without_surfaces_reports_none() {
        let scene = StaticScene::new();
        assert!(scene.surfaces().is_none());
        assert!(scene.floor_height().is_none());
        let scene = scene.with_surface(SurfaceMesh::world(vec![Vec3::zero()]));
        assert_eq!(scene.surfaces().map(<[_]>::len), Some(1));
    }

    #[test]
    fn scene_deserialises_from_json() {
        let json = r#"{
            "boxes": [{ "min": {"x": 1.0, "y": 0.0, "z": -0.5}, "max": {"x": 1.5, "y": 1.0, "z": 0.5} }],
            "feature_points": [{"x": 1.0, "y": 0.8, "z": 0.0}],
            "floor_y": 0.0
        }"#;
        let scene: StaticScene = serde_json::from_str(json).unwrap();
        assert_eq!(scene.boxes.len(), 1);
        assert_eq!(scene.feature_points().len(), 1);
        assert_eq!(scene.floor_height(), Some(0.0));
    }
}
