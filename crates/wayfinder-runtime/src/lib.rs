//! `wayfinder-runtime` – the navigation decision engine.
//!
//! Turns a stream of tracked poses and perception snapshots into one spoken
//! direction per tick.
//!
//! # Modules
//!
//! - [`engine`] – [`NavigationEngine`]: the Idle / Navigating / Arrived
//!   state machine.  Owns the smoothing filter, the obstacle scanner, and the
//!   hysteresis gate, and emits a [`NavigationUpdate`][wayfinder_types::NavigationUpdate]
//!   per tick.
//! - [`gate`] – [`DirectionGate`]: commits a direction change only after it
//!   has been proposed on consecutive ticks.
//! - [`guidance`] – [`BearingZone`] classification and the guidance phrases.
//! - [`store`] – [`WaypointStore`]: the read-only lookup the engine resolves
//!   waypoint ids through.
//! - [`telemetry`] – [`init_tracing`]: console logging with an optional OTLP
//!   span exporter.

pub mod engine;
pub mod gate;
pub mod guidance;
pub mod store;
pub mod telemetry;

pub use engine::{NavigationEngine, NavigationSession};
pub use gate::DirectionGate;
pub use guidance::BearingZone;
pub use store::{InMemoryWaypointStore, WaypointStore};
pub use telemetry::{TracerProviderGuard, init_tracing};
