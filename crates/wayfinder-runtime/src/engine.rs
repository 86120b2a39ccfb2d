//! [`NavigationEngine`] – the navigation state machine.
//!
//! Advances exactly once per pose tick delivered by the caller:
//!
//! 1. **Smooth** – the raw pose goes through the [`SmoothingFilter`].
//! 2. **Measure** – 3-D distance, horizontal distance, and bearing to the
//!    target.
//! 3. **Arrive** – a horizontal distance under the arrival radius ends the
//!    route.  Elevation is ignored because floor tracking drifts vertically.
//! 4. **Avoid** – the [`ObstacleScanner`] runs; a detection forces the
//!    suggested side and overrides the route bearing for this tick.
//! 5. **Orient** – otherwise the bearing is classified into a
//!    [`BearingZone`] and proposed to the [`DirectionGate`].
//! 6. **Emit** – a [`NavigationUpdate`] is returned and, when a bus is
//!    attached, published.
//!
//! ```text
//!            navigate_to            horizontal < arrival radius
//!   Idle ─────────────────▶ Navigating ─────────────────────────▶ Arrived
//!    ▲                          │                                   │
//!    └──────── stop ────────────┴──────────────── stop ─────────────┘
//! ```
//!
//! The engine assumes single-threaded access; a caller receiving poses and
//! commands on different threads must serialise them.
//!
//! # Example
//!
//! ```rust
//! use wayfinder_runtime::NavigationEngine;
//! use wayfinder_types::{Direction, NavigationConfig, Pose, Vec3, Waypoint};
//!
//! let mut engine = NavigationEngine::new(&NavigationConfig::default());
//! engine.navigate_to(Waypoint::new("Desk", Vec3::new(5.0, 0.0, 0.0)));
//!
//! let update = engine.tick(Pose::new(Vec3::zero(), 0.0), None).unwrap();
//! assert_eq!(update.direction, Direction::Straight);
//! ```

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;
use wayfinder_middleware::{EventBus, Topic};
use wayfinder_perception::geometry;
use wayfinder_perception::{ObstacleScanner, PerceptionSource, SmoothingFilter};
use wayfinder_types::{
    Direction, Event, EventPayload, GuidanceConfig, NavError, NavigationConfig, NavigationState,
    NavigationUpdate, ObstacleStatus, ObstacleVerdict, Pose, Waypoint,
};

use crate::gate::DirectionGate;
use crate::guidance::{BearingZone, route_message};
use crate::store::WaypointStore;

const EVENT_SOURCE: &str = "wayfinder-runtime::engine";

/// Below this horizontal distance the route direction is undefined.
const MIN_ROUTE_LENGTH: f32 = 1e-4;

/// Read-only view of the session state.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationSession {
    pub state: NavigationState,
    pub target: Option<Waypoint>,
    pub committed: Direction,
    pub distance: f32,
    pub horizontal_distance: f32,
    pub bearing_deg: f32,
    pub hysteresis_counter: u32,
    pub obstacle: ObstacleVerdict,
}

/// Arbitrates route guidance and obstacle avoidance into one committed
/// direction per tick.
pub struct NavigationEngine {
    guidance: GuidanceConfig,
    smoothing: SmoothingFilter,
    scanner: ObstacleScanner,
    gate: DirectionGate,
    state: NavigationState,
    target: Option<Waypoint>,
    obstacle: ObstacleVerdict,
    last_update: Option<NavigationUpdate>,
    bus: Option<EventBus>,
}

impl NavigationEngine {
    /// Build an engine and its collaborators from `config`.
    ///
    /// Use [`NavigationEngine::try_new`] to validate the configuration first.
    pub fn new(config: &NavigationConfig) -> Self {
        Self::with_components(
            config.guidance.clone(),
            SmoothingFilter::new(config.smoothing.window),
            ObstacleScanner::new(config.scanner.clone(), config.guidance.turn_convention),
        )
    }

    /// Validate `config`, then build the engine.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::Config`] when the configuration is unusable.
    pub fn try_new(config: &NavigationConfig) -> Result<Self, NavError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Build an engine around explicitly constructed collaborators.
    pub fn with_components(
        guidance: GuidanceConfig,
        smoothing: SmoothingFilter,
        scanner: ObstacleScanner,
    ) -> Self {
        let gate = DirectionGate::new(guidance.hysteresis_threshold);
        Self {
            guidance,
            smoothing,
            scanner,
            gate,
            state: NavigationState::Idle,
            target: None,
            obstacle: ObstacleVerdict::clear(),
            last_update: None,
            bus: None,
        }
    }

    /// Publish updates and session transitions on `bus`.
    pub fn with_bus(mut self, bus: EventBus) -> Self {
        self.bus = Some(bus);
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn state(&self) -> NavigationState {
        self.state
    }

    /// Snapshot of the session.
    pub fn session(&self) -> NavigationSession {
        let (distance, horizontal_distance, bearing_deg) = self
            .last_update
            .as_ref()
            .map(|u| (u.distance, u.horizontal_distance, u.bearing_deg))
            .unwrap_or_default();
        NavigationSession {
            state: self.state,
            target: self.target.clone(),
            committed: self.gate.committed(),
            distance,
            horizontal_distance,
            bearing_deg,
            hysteresis_counter: self.gate.counter(),
            obstacle: self.obstacle.clone(),
        }
    }

    // -------------------------------------------------------------------------
    // Commands
    // -------------------------------------------------------------------------

    /// Start guiding towards `waypoint`.
    ///
    /// An active or finished route is stopped first, so the smoothing
    /// buffers, hysteresis gate, and obstacle state all start fresh.
    pub fn navigate_to(&mut self, waypoint: Waypoint) {
        if self.state != NavigationState::Idle {
            self.stop();
        }

        info!(target_id = %waypoint.id, target_name = %waypoint.name, "navigation started");
        let target_id = waypoint.id;
        self.target = Some(waypoint);
        self.reset_tracking();
        self.transition(NavigationState::Navigating, Some(target_id));
    }

    /// Look `id` up in `store` and start guiding towards it.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::WaypointNotFound`] and leaves the session untouched
    /// when the store has no such waypoint.
    pub fn navigate_to_id(&mut self, store: &dyn WaypointStore, id: Uuid) -> Result<(), NavError> {
        let waypoint = store.get(id).ok_or_else(|| {
            warn!(waypoint_id = %id, "navigate_to rejected: unknown waypoint");
            NavError::WaypointNotFound(id)
        })?;
        self.navigate_to(waypoint);
        Ok(())
    }

    /// End the session.  Idempotent.
    pub fn stop(&mut self) {
        if self.state == NavigationState::Idle {
            return;
        }
        info!(state = ?self.state, "navigation stopped");
        self.target = None;
        self.last_update = None;
        self.reset_tracking();
        self.transition(NavigationState::Idle, None);
    }

    // -------------------------------------------------------------------------
    // Tick
    // -------------------------------------------------------------------------

    /// Advance the session by one raw pose.
    ///
    /// Returns `None` while Idle.  `perception` is the current frame's sensing
    /// data; `None` means the tracker had no frame and guidance falls back to
    /// the route bearing alone.
    #[instrument(level = "debug", skip_all, fields(state = ?self.state))]
    pub fn tick(
        &mut self,
        raw: Pose,
        perception: Option<&dyn PerceptionSource>,
    ) -> Option<NavigationUpdate> {
        if self.state == NavigationState::Idle {
            return None;
        }
        let target = self.target.clone()?;
        let pose = self.smoothing.push_pose(raw);

        let distance = geometry::distance_3d(&pose, target.position);
        let horizontal = geometry::horizontal_distance(&pose, target.position);
        let target_bearing_deg =
            geometry::normalize_degrees(geometry::bearing(&pose, target.position).to_degrees());
        let bearing_deg = geometry::relative_bearing_deg(&pose, target.position);

        let (direction, message) = match self.state {
            NavigationState::Arrived => (
                self.gate.committed(),
                route_message(Direction::Arrived, BearingZone::Straight, horizontal, &target.name),
            ),
            _ if horizontal < self.guidance.arrival_radius_m => {
                self.obstacle = ObstacleVerdict::clear();
                let direction = self.gate.force(Direction::Arrived);
                info!(horizontal_distance = horizontal, "target reached");
                self.transition(NavigationState::Arrived, Some(target.id));
                (
                    direction,
                    route_message(direction, BearingZone::Straight, horizontal, &target.name),
                )
            }
            _ => self.decide(&pose, &target, horizontal, bearing_deg, perception),
        };

        let update = NavigationUpdate {
            state: self.state,
            target_id: target.id,
            target_name: target.name.clone(),
            direction,
            distance,
            horizontal_distance: horizontal,
            bearing_deg,
            target_bearing_deg,
            message,
            obstacle: ObstacleStatus::from(&self.obstacle),
        };

        debug!(
            direction = %update.direction,
            distance = update.distance,
            horizontal_distance = update.horizontal_distance,
            bearing_deg = update.bearing_deg,
            obstacle = update.obstacle.detected,
            "navigation tick"
        );

        self.publish_update(&update);
        self.last_update = Some(update.clone());
        Some(update)
    }

    /// Obstacle override, then bearing classification through the gate.
    fn decide(
        &mut self,
        pose: &Pose,
        target: &Waypoint,
        horizontal: f32,
        bearing_deg: f32,
        perception: Option<&dyn PerceptionSource>,
    ) -> (Direction, String) {
        if horizontal < MIN_ROUTE_LENGTH {
            self.obstacle = ObstacleVerdict::clear();
            let direction = self.gate.offer(Direction::Straight);
            return (
                direction,
                route_message(direction, BearingZone::Straight, horizontal, &target.name),
            );
        }

        let outcome = self.scanner.scan(pose, target.position, perception);
        self.obstacle = outcome.verdict;

        if self.obstacle.has_obstacle {
            let direction = self.gate.force(self.obstacle.suggested_side.into());
            let message = self
                .obstacle
                .warning
                .clone()
                .unwrap_or_else(|| format!("Obstacle ahead, go {direction}"));
            return (direction, message);
        }

        let zone = BearingZone::classify(bearing_deg, &self.guidance);
        let direction = self.gate.offer(zone.direction());
        (
            direction,
            route_message(direction, zone, horizontal, &target.name),
        )
    }

    // -------------------------------------------------------------------------
    // Internal helpers
    // -------------------------------------------------------------------------

    fn reset_tracking(&mut self) {
        self.smoothing.reset();
        self.gate.reset();
        self.obstacle = ObstacleVerdict::clear();
    }

    fn transition(&mut self, to: NavigationState, target: Option<Uuid>) {
        let from = self.state;
        self.state = to;
        self.publish(
            Topic::Session,
            EventPayload::SessionChanged { from, to, target },
        );
    }

    fn publish_update(&self, update: &NavigationUpdate) {
        if update.obstacle.detected {
            self.publish(
                Topic::ObstacleAlerts,
                EventPayload::ObstacleAlert(update.obstacle.clone()),
            );
        }
        self.publish(Topic::Guidance, EventPayload::Navigation(update.clone()));
    }

    /// Publish on the attached bus, if any.  Topics without subscribers are
    /// not an error for the engine.
    fn publish(&self, topic: Topic, payload: EventPayload) {
        let Some(bus) = &self.bus else {
            return;
        };
        if bus.subscriber_count(topic) == 0 {
            return;
        }
        if let Err(e) = bus.publish_to(topic, Event::new(EVENT_SOURCE, payload)) {
            debug!(error = %e, ?topic, "event not delivered");
        }
    }
}
