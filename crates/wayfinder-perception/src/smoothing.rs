//! Pose smoothing.
//!
//! Raw poses from a handheld tracker jitter by a few centimetres and a few
//! degrees every frame.  [`SmoothingFilter`] keeps the last *N* raw samples of
//! each signal and returns:
//!
//! - the **arithmetic mean** of the buffered positions, and
//! - the **circular mean** of the buffered headings:
//!
//! ```text
//! heading = atan2(Σ sin θᵢ, Σ cos θᵢ)
//! ```
//!
//! A plain arithmetic mean of angles is wrong across the ±π seam: averaging
//! 179° and −179° would give 0° instead of 180°.
//!
//! # Example
//!
//! ```rust
//! use wayfinder_perception::smoothing::SmoothingFilter;
//! use wayfinder_types::Vec3;
//!
//! let mut filter = SmoothingFilter::new(5);
//! filter.push_position(Vec3::new(1.0, 0.0, 0.0));
//! let smoothed = filter.push_position(Vec3::new(3.0, 0.0, 0.0));
//! assert!((smoothed.x - 2.0).abs() < 1e-5);
//! ```

use std::collections::VecDeque;

use wayfinder_types::{Pose, Vec3};

/// Below this resultant length the buffered headings cancel out and the
/// latest raw heading is returned instead.
const MIN_RESULTANT: f32 = 1e-6;

/// Moving-average filter over the last `window` position and heading samples.
///
/// One buffer per signal; each is FIFO and never grows past `window`.
#[derive(Debug, Clone)]
pub struct SmoothingFilter {
    window: usize,
    positions: VecDeque<Vec3>,
    headings: VecDeque<f32>,
}

impl SmoothingFilter {
    /// Create a filter averaging over `window` samples (at least 1).
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            window,
            positions: VecDeque::with_capacity(window),
            headings: VecDeque::with_capacity(window),
        }
    }

    /// Push a raw position and return the mean of the buffered positions.
    pub fn push_position(&mut self, raw: Vec3) -> Vec3 {
        push_bounded(&mut self.positions, raw, self.window);

        let sum = self
            .positions
            .iter()
            .fold(Vec3::zero(), |acc, p| acc.add(*p));
        sum.scale(1.0 / self.positions.len() as f32)
    }

    /// Push a raw heading (radians) and return the circular mean of the
    /// buffered headings, in `(-π, π]`.
    pub fn push_heading(&mut self, raw: f32) -> f32 {
        push_bounded(&mut self.headings, raw, self.window);

        let (sum_sin, sum_cos) = self
            .headings
            .iter()
            .fold((0.0_f32, 0.0_f32), |(s, c), h| (s + h.sin(), c + h.cos()));

        if sum_sin.hypot(sum_cos) < MIN_RESULTANT {
            return raw;
        }
        sum_sin.atan2(sum_cos)
    }

    /// Smooth both components of a raw pose.
    pub fn push_pose(&mut self, raw: Pose) -> Pose {
        Pose {
            position: self.push_position(raw.position),
            heading_rad: self.push_heading(raw.heading_rad),
        }
    }

    /// Drop every buffered sample.
    pub fn reset(&mut self) {
        self.positions.clear();
        self.headings.clear();
    }
}

fn push_bounded<T>(buf: &mut VecDeque<T>, value: T, window: usize) {
    buf.push_back(value);
    while buf.len() > window {
        buf.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn single_sample_passes_through() {
        let mut f = SmoothingFilter::new(5);
        let p = f.push_position(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(p, Vec3::new(1.0, 2.0, 3.0));
        let h = f.push_heading(0.7);
        assert!((h - 0.7).abs() < 1e-6);
    }

    #[test]
    fn position_is_mean_of_window() {
        let mut f = SmoothingFilter::new(5);
        for x in [1.0, 2.0, 3.0, 4.0] {
            f.push_position(Vec3::new(x, 0.0, 0.0));
        }
        let p = f.push_position(Vec3::new(5.0, 0.0, 0.0));
        assert!((p.x - 3.0).abs() < 1e-5);
    }

    #[test]
    fn oldest_sample_evicted() {
        let mut f = SmoothingFilter::new(5);
        f.push_position(Vec3::new(100.0, 0.0, 0.0));
        for _ in 0..5 {
            f.push_position(Vec3::new(1.0, 0.0, 0.0));
        }
        // The 100 m outlier has been pushed out of the window.
        let p = f.push_position(Vec3::new(1.0, 0.0, 0.0));
        assert!((p.x - 1.0).abs() < 1e-5);
        assert_eq!(f.positions.len(), 5);
    }

    #[test]
    fn heading_mean_wraps_across_pi() {
        let mut f = SmoothingFilter::new(5);
        let mut h = 0.0;
        for deg in [179.0_f32, -179.0, 179.0, -179.0, 179.0] {
            h = f.push_heading(deg.to_radians());
        }
        // Near ±180°, not near 0°.
        assert!(h.abs() > PI - 0.05, "heading = {h}");
    }

    #[test]
    fn heading_mean_of_small_angles_is_arithmetic() {
        let mut f = SmoothingFilter::new(5);
        f.push_heading(0.1);
        let h = f.push_heading(0.3);
        assert!((h - 0.2).abs() < 1e-3);
    }

    #[test]
    fn opposite_headings_fall_back_to_latest() {
        let mut f = SmoothingFilter::new(2);
        f.push_heading(0.0);
        let h = f.push_heading(PI);
        assert!((h - PI).abs() < 1e-5);
    }

    #[test]
    fn reset_clears_lag() {
        let mut f = SmoothingFilter::new(5);
        for _ in 0..5 {
            f.push_pose(Pose::new(Vec3::new(10.0, 0.0, 0.0), 1.0));
        }
        f.reset();
        assert!(f.positions.is_empty() && f.headings.is_empty());
        let p = f.push_pose(Pose::new(Vec3::zero(), 0.0));
        assert_eq!(p.position, Vec3::zero());
        assert!(p.heading_rad.abs() < 1e-6);
    }

    #[test]
    fn zero_window_treated_as_one() {
        let mut f = SmoothingFilter::new(0);
        assert_eq!(f.window, 1);
        f.push_position(Vec3::new(5.0, 0.0, 0.0));
        let p = f.push_position(Vec3::new(1.0, 0.0, 0.0));
        assert!((p.x - 1.0).abs() < 1e-6);
    }
}
