//! Greedy obstacle clustering.
//!
//! Each point joins the first cluster whose centre lies within `radius`,
//! otherwise it starts a new cluster.  A cluster's centre is the running mean
//! of its members and moves with every insertion.  Cost is O(n·k) for n
//! points and k clusters, which is fine at a few hundred points per tick.

use wayfinder_types::{DetectedObstacle, Vec3};

/// A group of nearby obstacle points treated as one threat.
#[derive(Debug, Clone, PartialEq)]
pub struct ObstacleCluster {
    pub center: Vec3,
    pub members: Vec<DetectedObstacle>,
}

impl ObstacleCluster {
    fn seed(point: DetectedObstacle) -> Self {
        Self {
            center: point.position,
            members: vec![point],
        }
    }

    fn insert(&mut self, point: DetectedObstacle) {
        self.members.push(point);
        let n = self.members.len() as f32;
        // Incremental mean: c' = c + (p - c) / n
        self.center = self
            .center
            .add(point.position.sub(self.center).scale(1.0 / n));
    }

    /// Mean observer distance over the members.
    pub fn mean_distance(&self) -> f32 {
        let sum: f32 = self.members.iter().map(|m| m.distance).sum();
        sum / self.members.len() as f32
    }
}

/// Cluster `points` greedily, in input order.
pub fn cluster_points(points: &[DetectedObstacle], radius: f32) -> Vec<ObstacleCluster> {
    let mut clusters: Vec<ObstacleCluster> = Vec::new();
    for &p in points {
        match clusters
            .iter_mut()
            .find(|c| c.center.distance(p.position) <= radius)
        {
            Some(cluster) => cluster.insert(p),
            None => clusters.push(ObstacleCluster::seed(p)),
        }
    }
    clusters
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obstacle(x: f32, z: f32, distance: f32) -> DetectedObstacle {
        DetectedObstacle {
            position: Vec3::new(x, 1.0, z),
            distance,
            height: 1.0,
            confidence: 0.8,
        }
    }

    #[test]
    fn close_points_merge_at_their_mean() {
        let clusters = cluster_points(&[obstacle(1.0, 0.0, 1.0), obstacle(1.3, 0.0, 1.3)], 0.5);
        assert_eq!(clusters.len(), 1);
        assert!((clusters[0].center.x - 1.15).abs() < 1e-5);
        assert!((clusters[0].mean_distance() - 1.15).abs() < 1e-5);
    }

    #[test]
    fn distant_points_stay_separate() {
        let clusters = cluster_points(&[obstacle(1.0, 0.0, 1.0), obstacle(1.6, 0.0, 1.6)], 0.5);
        assert_eq!(clusters.len(), 2);
    }

    #[test]
    fn centre_drifts_with_members() {
        // 0.0 → 0.4 merges (centre 0.2); 0.65 is within 0.5 of 0.2 only
        // because the centre moved, so it merges too.
        let clusters = cluster_points(
            &[
                obstacle(0.0, 0.0, 1.0),
                obstacle(0.4, 0.0, 1.0),
                obstacle(0.65, 0.0, 1.0),
            ],
            0.5,
        );
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].members.len(), 3);
        assert!((clusters[0].center.x - 0.35).abs() < 1e-5);
    }

    #[test]
    fn point_joins_first_matching_cluster() {
        let clusters = cluster_points(
            &[
                obstacle(0.0, 0.0, 1.0),
                obstacle(0.8, 0.0, 1.0),
                obstacle(0.4, 0.0, 1.0),
            ],
            0.5,
        );
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].members.len(), 2);
        assert_eq!(clusters[1].members.len(), 1);
    }

    #[test]
    fn empty_input_yields_no_clusters() {
        assert!(cluster_points(&[], 0.5).is_empty());
    }
}
