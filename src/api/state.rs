//! Application state for the lounge API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::config::ConfigLoader;
use crate::lounge::{LoungeEvent, LoungeService, LoungeStore, NotificationPublisher};

/// Shared application state.
///
/// Holds the loaded lounge configuration, the front-desk service built
/// on top of it and the publisher its events go to.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    service: Arc<LoungeService>,
    publisher: Arc<dyn NotificationPublisher>,
}

impl AppState {
    /// Creates the state, wiring a [`LoungeService`] over `store` and
    /// `publisher`.
    pub fn new(
        config: ConfigLoader,
        store: Arc<dyn LoungeStore>,
        publisher: Arc<dyn NotificationPublisher>,
    ) -> Self {
        let config = Arc::new(config);
        let service = Arc::new(LoungeService::new(
            config.clone(),
            store,
            publisher.clone(),
        ));
        Self {
            config,
            service,
            publisher,
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the front-desk service.
    pub fn service(&self) -> &LoungeService {
        &self.service
    }

    /// Returns a shared handle to the service, for background tasks.
    pub fn service_handle(&self) -> Arc<LoungeService> {
        self.service.clone()
    }

    /// Subscribes to floor events, if the publisher supports listeners.
    pub fn subscribe_events(&self) -> Option<broadcast::Receiver<LoungeEvent>> {
        self.publisher.events()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lounge::{BroadcastPublisher, InMemoryStore, NullPublisher};

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_clones_share_the_service() {
        let config = ConfigLoader::load("./config/lounge").unwrap();
        let state = AppState::new(config, Arc::new(InMemoryStore::new()), Arc::new(NullPublisher));
        let other = state.clone();
        assert!(Arc::ptr_eq(&state.service_handle(), &other.service_handle()));
        assert_eq!(other.config().lounge().currency, "INR");
    }

    #[test]
    fn test_event_subscription_follows_publisher() {
        let config = ConfigLoader::load("./config/lounge").unwrap();
        let silent = AppState::new(
            config.clone(),
            Arc::new(InMemoryStore::new()),
            Arc::new(NullPublisher),
        );
        assert!(silent.subscribe_events().is_none());

        let live = AppState::new(
            config,
            Arc::new(InMemoryStore::new()),
            Arc::new(BroadcastPublisher::new(4)),
        );
        assert!(live.subscribe_events().is_some());
    }
}
