//! Obstacle Scanner.
//!
//! Decides, once per tick, whether something blocks the way to the target
//! and which side is clearer.  Three independent sensing methods feed one
//! pool of [`DetectedObstacle`] points:
//!
//! | Method | Source | Cone | Confidence |
//! |---|---|---|---|
//! | Ray grid | [`PerceptionSource::raycast`] over `ray_steps × ray_levels` rays | ray FOV | 0.8 |
//! | Feature points | [`PerceptionSource::feature_points`] | cos > 0.5 | 0.6 |
//! | Surface mesh | every `mesh_stride`-th vertex of [`PerceptionSource::surfaces`] | cos > 0.7 | 0.9 |
//!
//! Every method applies the same range limit and floor-relative height band.
//! The pooled points are clustered ([`cluster_points`]); the verdict is
//! driven by the cluster with the smallest mean distance, and the avoidance
//! side by a confidence-weighted left/right tally of every point inside the
//! warning distance: the side whose points carry less total confidence wins.
//!
//! The scan axis is the horizontal direction from the observer to the
//! target.  When the target sits on the observer the axis is undefined and
//! the scan reports a clear path.

use tracing::debug;
use wayfinder_types::{
    AvoidanceSide, DetectedObstacle, ObstacleVerdict, Pose, ScannerConfig, TurnConvention, Vec3,
};

use crate::cluster::{ObstacleCluster, cluster_points};
use crate::source::PerceptionSource;

/// Below this horizontal length the pose-to-target axis is treated as zero.
const MIN_AXIS_LENGTH: f32 = 1e-4;

/// Per-tick scan statistics, emitted as structured trace fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanReport {
    pub ray_hits: usize,
    pub feature_hits: usize,
    pub mesh_hits: usize,
    /// `false` when no mesh was available or the pass was over budget.
    pub mesh_scanned: bool,
    pub clusters: usize,
    pub left_count: usize,
    pub right_count: usize,
}

/// Near points on each side of the scan axis, by count and by summed
/// confidence.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct SideTally {
    left: usize,
    right: usize,
    left_weight: f32,
    right_weight: f32,
}

impl SideTally {
    /// The side whose points carry less total confidence.  Ties go right.
    fn clearer_side(&self) -> AvoidanceSide {
        if self.left_weight < self.right_weight {
            AvoidanceSide::Left
        } else {
            AvoidanceSide::Right
        }
    }
}

/// Result of one [`ObstacleScanner::scan`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutcome {
    pub verdict: ObstacleVerdict,
    pub report: ScanReport,
}

impl ScanOutcome {
    fn clear() -> Self {
        Self {
            verdict: ObstacleVerdict::clear(),
            report: ScanReport::default(),
        }
    }
}

/// Fuses ray-cast, feature-point, and mesh detections into an
/// [`ObstacleVerdict`].
#[derive(Debug, Clone)]
pub struct ObstacleScanner {
    config: ScannerConfig,
    convention: TurnConvention,
}

/// Observer frame for one scan.
struct ScanFrame {
    observer: Vec3,
    floor_y: f32,
    /// Horizontal unit vector towards the target.
    axis: Vec3,
    /// Horizontal unit vector pointing to the user's right.
    right: Vec3,
}

impl ObstacleScanner {
    pub fn new(config: ScannerConfig, convention: TurnConvention) -> Self {
        Self { config, convention }
    }

    /// Scan for obstacles between `pose` and `target`.
    ///
    /// A missing `source` (no tracking frame this tick) or a target on top of
    /// the observer yields a clear verdict.
    pub fn scan(
        &self,
        pose: &Pose,
        target: Vec3,
        source: Option<&dyn PerceptionSource>,
    ) -> ScanOutcome {
        let Some(source) = source else {
            debug!("no perception snapshot; scan skipped");
            return ScanOutcome::clear();
        };

        let to_target = target.sub(pose.position);
        let flat = Vec3::new(to_target.x, 0.0, to_target.z);
        let Some(axis) = flat.try_normalize(MIN_AXIS_LENGTH) else {
            debug!("target coincides with observer; scan skipped");
            return ScanOutcome::clear();
        };

        let frame = ScanFrame {
            observer: pose.position,
            floor_y: source
                .floor_height()
                .unwrap_or(pose.position.y - self.config.device_height_m),
            axis,
            right: self.right_of(axis),
        };

        let mut report = ScanReport::default();
        let mut points = self.ray_grid(source, &frame);
        report.ray_hits = points.len();

        let features = self.feature_points(source, &frame);
        report.feature_hits = features.len();
        points.extend(features);

        if let Some(mesh) = self.surface_mesh(source, &frame) {
            report.mesh_scanned = true;
            report.mesh_hits = mesh.len();
            points.extend(mesh);
        }

        let (verdict, clusters, tally) = self.analyze(&points, &frame);
        report.clusters = clusters;
        report.left_count = tally.left;
        report.right_count = tally.right;

        debug!(
            ray_hits = report.ray_hits,
            feature_hits = report.feature_hits,
            mesh_hits = report.mesh_hits,
            mesh_scanned = report.mesh_scanned,
            clusters = report.clusters,
            has_obstacle = verdict.has_obstacle,
            "obstacle scan complete"
        );

        ScanOutcome { verdict, report }
    }

    // -------------------------------------------------------------------------
    // Sensing methods
    // -------------------------------------------------------------------------

    fn ray_grid(&self, source: &dyn PerceptionSource, frame: &ScanFrame) -> Vec<DetectedObstacle> {
        let c = &self.config;
        let base_angle = frame.axis.z.atan2(frame.axis.x);
        let half_fov = (c.ray_fov_deg * 0.5).to_radians();

        let mut hits = Vec::new();
        for level in 0..c.ray_levels {
            let height = spread(c.ray_min_height_m, c.ray_max_height_m, level, c.ray_levels);
            let origin = Vec3::new(frame.observer.x, frame.floor_y + height, frame.observer.z);

            for step in 0..c.ray_steps {
                let angle = base_angle + spread(-half_fov, half_fov, step, c.ray_steps);
                let direction = Vec3::new(angle.cos(), 0.0, angle.sin());
                let Some(hit) = source.raycast(origin, direction) else {
                    continue;
                };
                let distance = hit.distance(frame.observer);
                if distance < c.max_range_m
                    && let Some(o) = self.in_band(hit, distance, frame, c.ray_confidence)
                {
                    hits.push(o);
                }
            }
        }
        hits
    }

    fn feature_points(
        &self,
        source: &dyn PerceptionSource,
        frame: &ScanFrame,
    ) -> Vec<DetectedObstacle> {
        let c = &self.config;
        source
            .feature_points()
            .iter()
            .filter_map(|&p| {
                let distance = p.distance(frame.observer);
                if distance <= c.feature_min_distance_m || distance >= c.max_range_m {
                    return None;
                }
                if !in_cone(p, frame, c.feature_cone_cos) {
                    return None;
                }
                self.in_band(p, distance, frame, c.feature_confidence)
            })
            .collect()
    }

    /// Returns `None` when no mesh is available or sampling it would exceed
    /// the per-tick vertex budget.
    fn surface_mesh(
        &self,
        source: &dyn PerceptionSource,
        frame: &ScanFrame,
    ) -> Option<Vec<DetectedObstacle>> {
        let c = &self.config;
        let surfaces = source.surfaces()?;
        let stride = c.mesh_stride.max(1);

        let sampled: usize = surfaces
            .iter()
            .map(|s| s.vertices.len().div_ceil(stride))
            .sum();
        if sampled > c.mesh_vertex_budget {
            debug!(
                sampled,
                budget = c.mesh_vertex_budget,
                "mesh pass over budget; skipped this tick"
            );
            return None;
        }

        let mut hits = Vec::new();
        for surface in surfaces {
            for &local in surface.vertices.iter().step_by(stride) {
                let p = surface.anchor.transform_point(local);
                let distance = p.distance(frame.observer);
                if distance >= c.max_range_m || !in_cone(p, frame, c.mesh_cone_cos) {
                    continue;
                }
                if let Some(o) = self.in_band(p, distance, frame, c.mesh_confidence) {
                    hits.push(o);
                }
            }
        }
        Some(hits)
    }

    /// Apply the floor-relative height band.
    fn in_band(
        &self,
        p: Vec3,
        distance: f32,
        frame: &ScanFrame,
        confidence: f32,
    ) -> Option<DetectedObstacle> {
        let height = p.y - frame.floor_y;
        if height <= self.config.min_obstacle_height_m
            || height >= self.config.max_obstacle_height_m
        {
            return None;
        }
        Some(DetectedObstacle {
            position: p,
            distance,
            height,
            confidence,
        })
    }

    // -------------------------------------------------------------------------
    // Analysis
    // -------------------------------------------------------------------------

    /// Cluster the pooled points and derive the verdict.
    ///
    /// Returns `(verdict, cluster_count, side_tally)`.
    fn analyze(
        &self,
        points: &[DetectedObstacle],
        frame: &ScanFrame,
    ) -> (ObstacleVerdict, usize, SideTally) {
        let c = &self.config;
        let clusters = cluster_points(points, c.cluster_radius_m);

        let Some(closest) = clusters
            .iter()
            .min_by(|a, b| a.mean_distance().total_cmp(&b.mean_distance()))
        else {
            return (ObstacleVerdict::clear(), 0, SideTally::default());
        };

        let distance = closest.mean_distance();
        if distance >= c.warning_distance_m {
            return (ObstacleVerdict::clear(), clusters.len(), SideTally::default());
        }

        let tally = self.tally_sides(points, frame);
        let side = tally.clearer_side();

        (
            ObstacleVerdict {
                has_obstacle: true,
                distance: Some(distance),
                suggested_side: side,
                warning: Some(self.warning_text(closest, side)),
            },
            clusters.len(),
            tally,
        )
    }

    /// Tally near points on each side of the scan axis.  Points on the axis
    /// count for neither side.
    fn tally_sides(&self, points: &[DetectedObstacle], frame: &ScanFrame) -> SideTally {
        points
            .iter()
            .filter(|p| p.distance < self.config.warning_distance_m)
            .fold(SideTally::default(), |mut tally, p| {
                let lateral = p.position.sub(frame.observer).dot(frame.right);
                if lateral > 0.0 {
                    tally.right += 1;
                    tally.right_weight += p.confidence;
                } else if lateral < 0.0 {
                    tally.left += 1;
                    tally.left_weight += p.confidence;
                }
                tally
            })
    }

    fn warning_text(&self, closest: &ObstacleCluster, side: AvoidanceSide) -> String {
        let distance = closest.mean_distance();
        if distance < self.config.critical_distance_m {
            format!("STOP! Obstacle {distance:.1}m ahead")
        } else {
            format!("Obstacle detected {distance:.1}m ahead, step {side}")
        }
    }

    /// Horizontal unit vector to the right of `axis` under the configured
    /// turn convention.
    fn right_of(&self, axis: Vec3) -> Vec3 {
        let positive = Vec3::new(-axis.z, 0.0, axis.x);
        match self.convention {
            TurnConvention::PositiveIsRight => positive,
            TurnConvention::PositiveIsLeft => positive.scale(-1.0),
        }
    }
}

/// `i`-th of `n` evenly spaced values across `[lo, hi]`; the midpoint when
/// `n == 1`.
fn spread(lo: f32, hi: f32, i: usize, n: usize) -> f32 {
    if n <= 1 {
        return (lo + hi) * 0.5;
    }
    lo + (hi - lo) * i as f32 / (n - 1) as f32
}

fn in_cone(p: Vec3, frame: &ScanFrame, min_cos: f32) -> bool {
    p.sub(frame.observer)
        .try_normalize(MIN_AXIS_LENGTH)
        .is_some_and(|dir| dir.dot(frame.axis) > min_cos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Aabb, StaticScene, SurfaceMesh};
    use crate::transform::{Quaternion, Transform3D};

    /// Observer 1.4 m above a floor at y = 0, facing +X; target 5 m ahead.
    fn pose() -> Pose {
        Pose::new(Vec3::new(0.0, 1.4, 0.0), 0.0)
    }

    fn target() -> Vec3 {
        Vec3::new(5.0, 1.4, 0.0)
    }

    fn scanner() -> ObstacleScanner {
        ObstacleScanner::new(ScannerConfig::default(), TurnConvention::PositiveIsRight)
    }

    fn scan(scene: &StaticScene) -> ScanOutcome {
        scanner().scan(&pose(), target(), Some(scene))
    }

    fn frame() -> ScanFrame {
        let axis = Vec3::new(1.0, 0.0, 0.0);
        ScanFrame {
            observer: pose().position,
            floor_y: 0.0,
            axis,
            right: scanner().right_of(axis),
        }
    }

    fn point(x: f32, z: f32, distance: f32) -> DetectedObstacle {
        DetectedObstacle {
            position: Vec3::new(x, 1.0, z),
            distance,
            height: 1.0,
            confidence: 0.8,
        }
    }

    #[test]
    fn missing_snapshot_is_clear() {
        let out = scanner().scan(&pose(), target(), None);
        assert!(!out.verdict.has_obstacle);
        assert_eq!(out.report, ScanReport::default());
    }

    #[test]
    fn coincident_target_is_clear() {
        let scene = StaticScene::new()
            .with_floor(0.0)
            .with_box(Aabb::new(Vec3::new(0.5, 0.0, -1.0), Vec3::new(0.7, 2.0, 1.0)));
        let out = scanner().scan(&pose(), Vec3::new(0.0, 0.0, 0.0), Some(&scene));
        assert!(!out.verdict.has_obstacle);
    }

    #[test]
    fn empty_scene_is_clear() {
        let out = scan(&StaticScene::new().with_floor(0.0));
        assert!(!out.verdict.has_obstacle);
        assert_eq!(out.report.clusters, 0);
    }

    #[test]
    fn wall_ahead_is_detected_by_ray_grid() {
        let scene = StaticScene::new()
            .with_floor(0.0)
            .with_box(Aabb::new(Vec3::new(1.2, 0.0, -2.0), Vec3::new(1.4, 2.5, 2.0)));
        let out = scan(&scene);
        assert!(out.verdict.has_obstacle);
        assert!(out.report.ray_hits > 0);
        assert!(out.verdict.distance.unwrap() < 2.0);
        assert!(out.verdict.warning.is_some());
    }

    #[test]
    fn floor_only_hits_are_filtered() {
        // A slab 10 cm tall: every hit is below the 0.15 m band floor.
        let scene = StaticScene::new()
            .with_floor(0.0)
            .with_box(Aabb::new(Vec3::new(1.0, 0.0, -2.0), Vec3::new(1.2, 0.1, 2.0)));
        let out = scan(&scene);
        assert_eq!(out.report.ray_hits, 0);
        assert!(!out.verdict.has_obstacle);
    }

    #[test]
    fn far_wall_beyond_range_is_ignored() {
        let scene = StaticScene::new()
            .with_floor(0.0)
            .with_box(Aabb::new(Vec3::new(3.5, 0.0, -2.0), Vec3::new(3.7, 2.5, 2.0)));
        let out = scan(&scene);
        assert_eq!(out.report.ray_hits, 0);
        assert!(!out.verdict.has_obstacle);
    }

    #[test]
    fn feature_points_outside_cone_are_ignored() {
        let scene = StaticScene::new().with_floor(0.0).with_feature_points(vec![
            // Directly beside the user, 90° off-axis.
            Vec3::new(0.0, 1.2, 1.0),
            // Behind.
            Vec3::new(-1.0, 1.2, 0.0),
        ]);
        let out = scan(&scene);
        assert_eq!(out.report.feature_hits, 0);
    }

    #[test]
    fn feature_points_inside_cone_count() {
        let scene = StaticScene::new().with_floor(0.0).with_feature_points(vec![
            Vec3::new(1.5, 1.2, 0.1),
            Vec3::new(1.5, 1.3, -0.1),
        ]);
        let out = scan(&scene);
        assert_eq!(out.report.feature_hits, 2);
        assert!(out.verdict.has_obstacle);
    }

    #[test]
    fn floor_falls_back_to_device_height() {
        // No floor plane: floor assumed 1.4 m below the observer (y = 0).
        let scene = StaticScene::new().with_feature_points(vec![Vec3::new(1.5, 0.05, 0.0)]);
        let out = scan(&scene);
        assert_eq!(out.report.feature_hits, 0);
    }

    #[test]
    fn mesh_vertices_are_strided_and_transformed() {
        // Ten local vertices; stride 5 samples indices 0 and 5.
        let vertices: Vec<Vec3> = (0..10).map(|i| Vec3::new(0.0, 1.0, i as f32 * 0.01)).collect();
        let mesh = SurfaceMesh {
            anchor: Transform3D::new(Vec3::new(1.5, 0.0, 0.0), Quaternion::identity()),
            vertices,
        };
        let scene = StaticScene::new().with_floor(0.0).with_surface(mesh);
        let out = scan(&scene);
        assert!(out.report.mesh_scanned);
        assert_eq!(out.report.mesh_hits, 2);
        assert!(out.verdict.has_obstacle);
    }

    #[test]
    fn mesh_over_budget_is_skipped() {
        let mut cfg = ScannerConfig::default();
        cfg.mesh_vertex_budget = 1;
        let vertices = vec![Vec3::new(1.5, 1.0, 0.0); 10];
        let scene = StaticScene::new()
            .with_floor(0.0)
            .with_surface(SurfaceMesh::world(vertices));
        let out = ObstacleScanner::new(cfg, TurnConvention::PositiveIsRight).scan(
            &pose(),
            target(),
            Some(&scene),
        );
        assert!(!out.report.mesh_scanned);
        assert!(!out.verdict.has_obstacle);
    }

    #[test]
    fn critical_cluster_warns_stop() {
        let points = [point(0.8, 0.1, 0.8), point(0.8, 0.2, 0.8)];
        let (v, clusters, _) = scanner().analyze(&points, &frame());
        assert_eq!(clusters, 1);
        assert!(v.has_obstacle);
        let warning = v.warning.unwrap();
        assert!(warning.contains("STOP"), "{warning}");
        assert!(warning.contains("0.8"), "{warning}");
    }

    #[test]
    fn non_critical_cluster_warns_generically() {
        let points = [point(1.5, 0.0, 1.5)];
        let (v, _, _) = scanner().analyze(&points, &frame());
        assert!(v.has_obstacle);
        let warning = v.warning.unwrap();
        assert!(!warning.contains("STOP"));
        assert!(warning.to_lowercase().contains("obstacle detected"));
    }

    #[test]
    fn cluster_at_warning_distance_is_clear() {
        let points = [point(2.0, 0.0, 2.0)];
        let (v, clusters, _) = scanner().analyze(&points, &frame());
        assert_eq!(clusters, 1);
        assert!(!v.has_obstacle);
    }

    #[test]
    fn suggests_side_with_fewer_points() {
        // Two points on the right (+Z under positive-is-right), one on the left.
        let points = [
            point(1.0, 0.3, 1.0),
            point(1.0, 0.4, 1.0),
            point(1.0, -0.3, 1.0),
        ];
        let (v, _, tally) = scanner().analyze(&points, &frame());
        assert_eq!((tally.left, tally.right), (1, 2));
        assert_eq!(v.suggested_side, AvoidanceSide::Left);
    }

    #[test]
    fn tie_defaults_to_right() {
        let points = [point(1.0, 0.3, 1.0), point(1.0, -0.3, 1.0)];
        let (v, _, tally) = scanner().analyze(&points, &frame());
        assert_eq!(tally.left, tally.right);
        assert_eq!(v.suggested_side, AvoidanceSide::Right);
    }

    #[test]
    fn convention_flips_side_tally() {
        let flipped = ObstacleScanner::new(ScannerConfig::default(), TurnConvention::PositiveIsLeft);
        let axis = Vec3::new(1.0, 0.0, 0.0);
        let frame = ScanFrame {
            observer: pose().position,
            floor_y: 0.0,
            axis,
            right: flipped.right_of(axis),
        };
        let points = [
            point(1.0, 0.3, 1.0),
            point(1.0, 0.4, 1.0),
            point(1.0, -0.3, 1.0),
        ];
        let (v, _, _) = flipped.analyze(&points, &frame);
        assert_eq!(v.suggested_side, AvoidanceSide::Right);
    }

    #[test]
    fn far_points_excluded_from_tally() {
        let points = [point(1.0, -0.3, 1.0), point(2.5, 0.3, 2.5), point(2.5, 0.4, 2.5)];
        let (v, _, tally) = scanner().analyze(&points, &frame());
        assert_eq!((tally.left, tally.right), (1, 0));
        assert_eq!(v.suggested_side, AvoidanceSide::Right);
    }

    #[test]
    fn side_tally_is_weighted_by_confidence() {
        // Mesh hit (0.9) on one side, feature hit (0.6) on the other: the
        // lower-confidence side is treated as clearer.
        let mesh_right = StaticScene::new()
            .with_floor(0.0)
            .with_feature_points(vec![Vec3::new(1.5, 1.2, -0.3)])
            .with_surface(SurfaceMesh::world(vec![Vec3::new(1.5, 1.2, 0.3)]));
        let out = scan(&mesh_right);
        assert_eq!((out.report.left_count, out.report.right_count), (1, 1));
        assert_eq!(out.verdict.suggested_side, AvoidanceSide::Left);

        let mesh_left = StaticScene::new()
            .with_floor(0.0)
            .with_feature_points(vec![Vec3::new(1.5, 1.2, 0.3)])
            .with_surface(SurfaceMesh::world(vec![Vec3::new(1.5, 1.2, -0.3)]));
        let out = scan(&mesh_left);
        assert_eq!((out.report.left_count, out.report.right_count), (1, 1));
        assert_eq!(out.verdict.suggested_side, AvoidanceSide::Right);
    }

    #[test]
    fn weights_can_outvote_counts() {
        let mut a = point(1.0, -0.3, 1.0);
        a.confidence = 0.9;
        let mut b = point(1.0, 0.3, 1.0);
        b.confidence = 0.3;
        let mut c = point(1.0, 0.4, 1.0);
        c.confidence = 0.3;
        let (v, _, tally) = scanner().analyze(&[a, b, c], &frame());
        assert_eq!((tally.left, tally.right), (1, 2));
        assert!((tally.left_weight - 0.9).abs() < 1e-6);
        assert!((tally.right_weight - 0.6).abs() < 1e-6);
        assert_eq!(v.suggested_side, AvoidanceSide::Right);
    }

    #[test]
    fn overhang_points_are_filtered() {
        // 2.1 m above the floor, and exactly on the exclusive 2.0 m bound.
        let scene = StaticScene::new().with_floor(0.0).with_feature_points(vec![
            Vec3::new(1.5, 2.1, 0.0),
            Vec3::new(1.5, 2.0, 0.1),
        ]);
        let out = scan(&scene);
        assert_eq!(out.report.feature_hits, 0);
        assert!(!out.verdict.has_obstacle);
    }

    #[test]
    fn all_methods_feed_the_clusterer() {
        let scene = StaticScene::new()
            .with_floor(0.0)
            // Wall beyond the warning distance: ray hits only.
            .with_box(Aabb::new(Vec3::new(2.5, 0.0, -2.0), Vec3::new(2.7, 2.5, 2.0)))
            // Close pair straddling the axis.
            .with_feature_points(vec![Vec3::new(0.8, 1.4, 0.05), Vec3::new(0.8, 1.3, -0.05)])
            .with_surface(SurfaceMesh::world(vec![Vec3::new(1.6, 1.0, 0.6)]));
        let out = scan(&scene);

        assert!(out.report.ray_hits > 0);
        assert_eq!(out.report.feature_hits, 2);
        assert!(out.report.mesh_scanned);
        assert_eq!(out.report.mesh_hits, 1);
        assert!(out.report.clusters >= 3);

        // The feature pair is the closest cluster.
        assert!((out.verdict.distance.unwrap() - 0.805).abs() < 0.01);
        let warning = out.verdict.warning.unwrap();
        assert!(warning.contains("STOP"), "{warning}");
        assert!(warning.contains("0.8"), "{warning}");

        // Wall hits are past the warning distance and stay out of the tally.
        assert_eq!((out.report.left_count, out.report.right_count), (1, 2));
        assert_eq!(out.verdict.suggested_side, AvoidanceSide::Left);
    }

    #[test]
    fn spread_covers_endpoints() {
        assert!((spread(0.2, 1.8, 0, 5) - 0.2).abs() < 1e-6);
        assert!((spread(0.2, 1.8, 4, 5) - 1.8).abs() < 1e-6);
        assert!((spread(0.2, 1.8, 2, 5) - 1.0).abs() < 1e-6);
        assert!((spread(-1.0, 1.0, 0, 1)).abs() < 1e-6);
    }
}
