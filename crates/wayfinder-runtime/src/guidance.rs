//! Bearing zones and spoken guidance text.

use wayfinder_types::{AvoidanceSide, Direction, GuidanceConfig, TurnConvention};

/// Classification of the heading-to-target angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BearingZone {
    Straight,
    /// Small correction towards a side.
    Slight(AvoidanceSide),
    /// Firm turn towards a side.
    Turn(AvoidanceSide),
    TurnBack,
}

impl BearingZone {
    /// Classify `angle_diff_deg` (heading-to-target, `(-180, 180]`).
    ///
    /// | \|diff\| | Zone |
    /// |---|---|
    /// | `< straight_zone_deg` | `Straight` |
    /// | `< slight_zone_deg` | `Slight(side)` |
    /// | `≤ turn_back_deg` | `Turn(side)` |
    /// | otherwise | `TurnBack` |
    pub fn classify(angle_diff_deg: f32, config: &GuidanceConfig) -> Self {
        let magnitude = angle_diff_deg.abs();
        if magnitude < config.straight_zone_deg {
            return BearingZone::Straight;
        }
        let side = side_of(angle_diff_deg, config.turn_convention);
        if magnitude < config.slight_zone_deg {
            BearingZone::Slight(side)
        } else if magnitude <= config.turn_back_deg {
            BearingZone::Turn(side)
        } else {
            BearingZone::TurnBack
        }
    }

    /// The direction this zone proposes to the hysteresis gate.
    pub fn direction(self) -> Direction {
        match self {
            BearingZone::Straight => Direction::Straight,
            BearingZone::Slight(side) | BearingZone::Turn(side) => side.into(),
            BearingZone::TurnBack => Direction::TurnBack,
        }
    }
}

/// Side a non-zero angle points to under `convention`.
pub fn side_of(angle_diff_deg: f32, convention: TurnConvention) -> AvoidanceSide {
    let positive = angle_diff_deg > 0.0;
    match (convention, positive) {
        (TurnConvention::PositiveIsRight, true) | (TurnConvention::PositiveIsLeft, false) => {
            AvoidanceSide::Right
        }
        _ => AvoidanceSide::Left,
    }
}

/// Spoken message for the committed direction.
///
/// `zone` is this tick's classification; it only refines a committed turn
/// into "slightly" when both agree on the side.
pub fn route_message(
    committed: Direction,
    zone: BearingZone,
    horizontal_distance: f32,
    target_name: &str,
) -> String {
    match committed {
        Direction::Straight | Direction::None => {
            format!("Continue straight, {horizontal_distance:.1} meters")
        }
        Direction::Left | Direction::Right => {
            let side = if committed == Direction::Left {
                AvoidanceSide::Left
            } else {
                AvoidanceSide::Right
            };
            if zone == BearingZone::Slight(side) {
                format!("Bear slightly {side}")
            } else {
                format!("Turn {side}")
            }
        }
        Direction::TurnBack => "Turn around".to_string(),
        Direction::Arrived => arrival_message(target_name),
    }
}

fn arrival_message(target_name: &str) -> String {
    format!("You have arrived at {target_name}")
}
