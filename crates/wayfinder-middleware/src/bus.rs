//! Typed, topic-based publish/subscribe event bus.
//!
//! Uses [`tokio::sync::broadcast`] channels under the hood so that every
//! subscriber receives every message without any single subscriber blocking
//! the others.  Publishing is synchronous, so the frame-driven engine can
//! publish without a running runtime.
//!
//! # Topics
//!
//! | Topic | Typical traffic |
//! |---|---|
//! | [`Topic::Guidance`] | One `NavigationUpdate` per tick while a route is active |
//! | [`Topic::ObstacleAlerts`] | Obstacle sub-records, only on ticks with a detection |
//! | [`Topic::Session`] | Idle / Navigating / Arrived transitions |

use tokio::sync::broadcast;
use tracing::warn;
use wayfinder_types::{Event, NavError};

/// Default channel capacity (number of buffered events before old ones are
/// dropped for slow subscribers).
const DEFAULT_CAPACITY: usize = 256;

/// Routing lanes on the event bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Per-tick directional guidance.
    Guidance,
    /// Obstacle warnings, for collaborators that only react to hazards.
    ObstacleAlerts,
    /// Session lifecycle transitions.
    Session,
}

/// Shared event bus.  Clone it cheaply – all clones share the same
/// underlying broadcast channels.
#[derive(Clone, Debug)]
pub struct EventBus {
    guidance: broadcast::Sender<Event>,
    obstacle_alerts: broadcast::Sender<Event>,
    session: broadcast::Sender<Event>,
}

impl EventBus {
    /// Create a new bus with the given channel capacity.
    ///
    /// The `capacity` is applied to every topic channel independently.
    pub fn new(capacity: usize) -> Self {
        let (guidance, _) = broadcast::channel(capacity);
        let (obstacle_alerts, _) = broadcast::channel(capacity);
        let (session, _) = broadcast::channel(capacity);
        Self {
            guidance,
            obstacle_alerts,
            session,
        }
    }

    /// Publish `event` to the given [`Topic`] channel.
    ///
    /// Returns the number of active receivers that were handed the event.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::Channel`] when nobody is subscribed to `topic`.
    /// Callers that publish speculatively should treat this as benign.
    pub fn publish_to(&self, topic: Topic, event: Event) -> Result<usize, NavError> {
        self.topic_sender(topic)
            .send(event)
            .map_err(|_| NavError::Channel(format!("no subscribers for topic {topic:?}")))
    }

    /// Subscribe to a specific [`Topic`] channel.
    pub fn subscribe_to(&self, topic: Topic) -> TopicReceiver {
        TopicReceiver {
            topic,
            receiver: self.topic_sender(topic).subscribe(),
        }
    }

    /// Number of live subscribers on `topic`.
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.topic_sender(topic).receiver_count()
    }

    fn topic_sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Guidance => &self.guidance,
            Topic::ObstacleAlerts => &self.obstacle_alerts,
            Topic::Session => &self.session,
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Topic-bound receiver
// ---------------------------------------------------------------------------

/// A receiver bound to a single [`Topic`] channel.
///
/// Obtained via [`EventBus::subscribe_to`].
pub struct TopicReceiver {
    topic: Topic,
    receiver: broadcast::Receiver<Event>,
}

impl TopicReceiver {
    /// Wait for the next event on this topic.
    ///
    /// Returns:
    /// * `Ok(event)` – a successfully received event.
    /// * `Err(broadcast::error::RecvError::Lagged(n))` – the subscriber fell
    ///   behind and `n` messages were dropped.
    /// * `Err(broadcast::error::RecvError::Closed)` – the bus has shut down.
    pub async fn recv(&mut self) -> Result<Event, broadcast::error::RecvError> {
        self.receiver.recv().await
    }

    /// Drain every event currently buffered, without waiting.
    ///
    /// Lagged gaps are logged and skipped.
    pub fn drain(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(event) => events.push(event),
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    warn!(topic = ?self.topic, lagged_by = n, "topic receiver lagged");
                }
                Err(_) => return events,
            }
        }
    }
}
