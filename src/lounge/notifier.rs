//! Real-time notifications to connected dashboards.

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;
use uuid::Uuid;

use crate::models::Session;

/// An event pushed to subscribers when the floor changes.
///
/// Serializes as `{"event": "session:started", "payload": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "payload")]
pub enum LoungeEvent {
    /// A session was started at the counter.
    #[serde(rename = "session:started")]
    SessionStarted(Session),
    /// Time, people or payments were added to a session.
    #[serde(rename = "session:updated")]
    SessionUpdated(Session),
    /// A session was closed out.
    #[serde(rename = "session:completed")]
    SessionCompleted(Session),
    /// A booking reached its start time and became a session.
    #[serde(rename = "booking:converted")]
    BookingConverted {
        /// The booking that was consumed.
        booking_id: Uuid,
        /// The session created from it.
        session: Session,
    },
}

impl LoungeEvent {
    /// Returns the wire name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            LoungeEvent::SessionStarted(_) => "session:started",
            LoungeEvent::SessionUpdated(_) => "session:updated",
            LoungeEvent::SessionCompleted(_) => "session:completed",
            LoungeEvent::BookingConverted { .. } => "booking:converted",
        }
    }
}

/// Sink for [`LoungeEvent`]s.
pub trait NotificationPublisher: Send + Sync {
    /// Publishes an event. Delivery is best effort.
    fn publish(&self, event: LoungeEvent);

    /// Returns a receiver for subsequent events, or `None` if this
    /// publisher cannot be listened to.
    fn events(&self) -> Option<broadcast::Receiver<LoungeEvent>> {
        None
    }
}

/// Fans events out to every subscriber through a tokio broadcast channel.
#[derive(Debug, Clone)]
pub struct BroadcastPublisher {
    sender: broadcast::Sender<LoungeEvent>,
}

impl BroadcastPublisher {
    /// Creates a publisher buffering up to `capacity` events per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Returns a new receiver for subsequent events.
    pub fn subscribe(&self) -> broadcast::Receiver<LoungeEvent> {
        self.sender.subscribe()
    }
}

impl NotificationPublisher for BroadcastPublisher {
    fn publish(&self, event: LoungeEvent) {
        let name = event.name();
        match self.sender.send(event) {
            Ok(receivers) => debug!(event = name, receivers, "Event published"),
            Err(_) => debug!(event = name, "No subscribers for event"),
        }
    }

    fn events(&self) -> Option<broadcast::Receiver<LoungeEvent>> {
        Some(self.subscribe())
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPublisher;

impl NotificationPublisher for NullPublisher {
    fn publish(&self, _event: LoungeEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DeviceSelection, SessionStatus};
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use std::sync::Arc;

    fn session() -> Session {
        let start = Utc.with_ymd_and_hms(2026, 1, 13, 10, 0, 0).unwrap();
        Session {
            id: Uuid::new_v4(),
            customer_name: "Dev".to_string(),
            contact_number: String::new(),
            duration_hours: 1.0,
            people_count: 1,
            snacks: String::new(),
            devices: DeviceSelection::new(),
            price: Decimal::new(90, 0),
            paid_amount: Decimal::ZERO,
            paid_people: 0,
            remaining_amount: Decimal::new(90, 0),
            status: SessionStatus::Active,
            start_time: start,
            created_at: start,
            updated_at: None,
            completed_at: None,
            members: vec![],
            original_booking_id: None,
        }
    }

    #[test]
    fn test_event_serializes_with_wire_name() {
        let event = LoungeEvent::SessionStarted(session());
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "session:started");
        assert_eq!(json["payload"]["customer_name"], "Dev");
    }

    #[test]
    fn test_converted_event_payload() {
        let booking_id = Uuid::new_v4();
        let event = LoungeEvent::BookingConverted {
            booking_id,
            session: session(),
        };
        assert_eq!(event.name(), "booking:converted");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["payload"]["booking_id"], booking_id.to_string());
    }

    #[tokio::test]
    async fn test_broadcast_reaches_subscriber() {
        let publisher = BroadcastPublisher::new(8);
        let mut receiver = publisher.subscribe();

        let event = LoungeEvent::SessionCompleted(session());
        publisher.publish(event.clone());

        assert_eq!(receiver.recv().await.unwrap(), event);
    }

    #[tokio::test]
    async fn test_events_hook_through_trait_object() {
        let publisher: Arc<dyn NotificationPublisher> = Arc::new(BroadcastPublisher::new(8));
        let mut receiver = publisher.events().unwrap();

        publisher.publish(LoungeEvent::SessionStarted(session()));
        assert_eq!(receiver.recv().await.unwrap().name(), "session:started");

        assert!(NullPublisher.events().is_none());
    }

    #[test]
    fn test_publish_without_subscribers_is_silent() {
        let publisher = BroadcastPublisher::new(8);
        publisher.publish(LoungeEvent::SessionUpdated(session()));
        NullPublisher.publish(LoungeEvent::SessionUpdated(session()));
    }
}
