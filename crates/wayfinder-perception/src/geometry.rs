//! Pose-to-waypoint geometry.
//!
//! Pure functions; a target that coincides with the pose yields zero
//! distances and a zero bearing rather than `NaN`.

use wayfinder_types::{Pose, Vec3};

/// Straight-line distance from the pose to `target` (metres).
pub fn distance_3d(pose: &Pose, target: Vec3) -> f32 {
    pose.position.distance(target)
}

/// Ground-plane distance from the pose to `target`, ignoring height.
pub fn horizontal_distance(pose: &Pose, target: Vec3) -> f32 {
    target.sub(pose.position).horizontal_length()
}

/// Absolute ground-plane bearing of `target` as seen from the pose
/// (radians, same convention as [`Pose::heading_rad`]).
pub fn bearing(pose: &Pose, target: Vec3) -> f32 {
    let d = target.sub(pose.position);
    if d.x == 0.0 && d.z == 0.0 {
        return 0.0;
    }
    d.z.atan2(d.x)
}

/// Angle from the pose's heading to `target`, in `(-180, 180]` degrees.
pub fn relative_bearing_deg(pose: &Pose, target: Vec3) -> f32 {
    normalize_degrees(bearing(pose, target).to_degrees() - pose.heading_rad.to_degrees())
}

/// Wrap an angle in degrees into `(-180, 180]`.
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}
