//! `wayfinder-perception` – turns raw tracking and sensing data into a
//! stable picture of where the user is and what stands in the way.
//!
//! # Modules
//!
//! - [`smoothing`] – [`SmoothingFilter`][smoothing::SmoothingFilter]: moving
//!   average for position and circular mean for heading over the last few
//!   raw samples.
//! - [`geometry`] – stateless distance and bearing helpers between a pose and
//!   a waypoint.
//! - [`transform`] – [`Transform3D`][transform::Transform3D]: rigid-body
//!   transforms used to bring surface-mesh vertices into world space.
//! - [`source`] – the [`PerceptionSource`][source::PerceptionSource]
//!   capability the caller implements, plus
//!   [`StaticScene`][source::StaticScene], a box-world implementation for
//!   replays and tests.
//! - [`cluster`] – single-pass greedy clustering of obstacle points.
//! - [`scanner`] – [`ObstacleScanner`][scanner::ObstacleScanner]: fuses the
//!   ray grid, sparse feature points, and dense mesh into one
//!   [`ObstacleVerdict`][wayfinder_types::ObstacleVerdict].

pub mod cluster;
pub mod geometry;
pub mod scanner;
pub mod smoothing;
pub mod source;
pub mod transform;

pub use cluster::{ObstacleCluster, cluster_points};
pub use scanner::{ObstacleScanner, ScanOutcome, ScanReport};
pub use smoothing::SmoothingFilter;
pub use source::{Aabb, PerceptionSource, StaticScene, SurfaceMesh};
pub use transform::{Quaternion, Transform3D};
