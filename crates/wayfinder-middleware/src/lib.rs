//! `wayfinder-middleware` – delivers engine output to its consumers.
//!
//! Speech, haptics, and UI collaborators subscribe to the topics they care
//! about; the engine publishes once per tick without knowing who listens.
//!
//! # Modules
//!
//! - [`bus`] – typed, topic-based publish/subscribe event bus built on Tokio
//!   broadcast channels.

pub mod bus;

pub use bus::{EventBus, Topic, TopicReceiver};
