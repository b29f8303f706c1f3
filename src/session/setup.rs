//! Session setup and initialization

use crate::auth::{UserSession, current_session};
use crate::config::Config;
use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
use crate::donations::{DonationClient, DonationService, InMemoryDonationService};
use crate::environment::Environment;
use crate::events::Event;
use crate::runtime::LiveFeeds;
use crate::workers::core::EventSender;
use crate::workers::dispatcher::ActionDispatcher;
use std::error::Error;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};

/// Session data for both TUI and headless modes
pub struct SessionData {
    /// Event receiver for feed and action events
    pub event_receiver: mpsc::Receiver<Event>,
    /// Shutdown sender to stop all workers
    pub shutdown_sender: broadcast::Sender<()>,
    /// Running feed subscriptions
    pub feeds: LiveFeeds,
    /// Claim and create actions
    pub dispatcher: ActionDispatcher,
    /// The signed-in user, if any
    pub user: Option<UserSession>,
    pub environment: Environment,
    /// Whether the session runs against the in-memory demo service
    pub demo: bool,
}

/// Picks the donation service backing a session.
pub fn donation_service(
    env: &Environment,
    user: Option<&UserSession>,
    demo: bool,
) -> Result<Arc<dyn DonationService>, Box<dyn Error>> {
    if demo {
        let user_id = user.map(|u| u.id.as_str());
        return Ok(Arc::new(InMemoryDonationService::with_sample_data(user_id)));
    }
    Ok(Arc::new(DonationClient::new(env.clone())?))
}

/// Sets up a dashboard session
///
/// This function handles all the common setup required for both TUI and headless modes:
/// 1. Resolves the user session from the config
/// 2. Creates the donation service
/// 3. Sets up the event and shutdown channels
/// 4. Subscribes the live feeds
///
/// Must be called from within the tokio runtime.
pub fn setup_session(
    config: Option<&Config>,
    env: Environment,
    demo: bool,
) -> Result<SessionData, Box<dyn Error>> {
    let user = current_session(config);
    let service = donation_service(&env, user.as_ref(), demo)?;

    let (sender, event_receiver) = mpsc::channel::<Event>(EVENT_QUEUE_SIZE);
    let events = EventSender::new(sender);

    // Create shutdown channel - only one shutdown signal needed
    let (shutdown_sender, _) = broadcast::channel(1);

    let feeds = LiveFeeds::start(
        service.clone(),
        user.clone(),
        events.clone(),
        shutdown_sender.clone(),
    );
    let dispatcher = ActionDispatcher::new(service, events);

    Ok(SessionData {
        event_receiver,
        shutdown_sender,
        feeds,
        dispatcher,
        user,
        environment: env,
        demo,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::events::{EventType, Worker};
    use crate::feed::FeedId;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn test_demo_session_streams_both_feeds_for_donor() {
        let config = Config::new(
            "donor-1".to_string(),
            Role::Donor,
            None,
            Environment::Local,
        );
        let mut session = setup_session(Some(&config), Environment::Local, true).unwrap();
        assert_eq!(session.user.as_ref().map(|u| u.id.as_str()), Some("donor-1"));

        let mut seen = Vec::new();
        while seen.len() < 4 {
            let event = timeout(Duration::from_secs(2), session.event_receiver.recv())
                .await
                .expect("timed out waiting for feed updates")
                .expect("channel closed");
            assert_eq!(event.event_type, EventType::FeedUpdate);
            seen.push(event.worker);
        }
        assert!(seen.contains(&Worker::Feed(FeedId::Global)));
        assert!(seen.contains(&Worker::Feed(FeedId::Mine)));

        drop(session.event_receiver);
        session.feeds.stop().await;
    }
}
