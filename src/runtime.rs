//! Lifecycle of the dashboard's live feed subscriptions

use crate::auth::UserSession;
use crate::donations::DonationService;
use crate::error_classifier::LogLevel;
use crate::events::{Event, EventType, Worker};
use crate::feed::{FeedId, FeedSubscription, subscribe_donations};
use crate::workers::core::EventSender;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

/// The running feed subscriptions of one dashboard session.
pub struct LiveFeeds {
    service: Arc<dyn DonationService>,
    user: Option<UserSession>,
    events: EventSender,
    shutdown_sender: broadcast::Sender<()>,
    subscriptions: HashMap<FeedId, FeedSubscription>,
}

impl LiveFeeds {
    /// Subscribes the global feed, and the user feed when someone is signed in.
    /// Must be called from within the tokio runtime.
    pub fn start(
        service: Arc<dyn DonationService>,
        user: Option<UserSession>,
        events: EventSender,
        shutdown_sender: broadcast::Sender<()>,
    ) -> Self {
        let mut feeds = Self {
            service,
            user,
            events,
            shutdown_sender,
            subscriptions: HashMap::new(),
        };
        feeds.reload_all();
        feeds
    }

    /// Whether `feed` has a subscription that is still running.
    pub fn is_subscribed(&self, feed: FeedId) -> bool {
        self.subscriptions
            .get(&feed)
            .is_some_and(|subscription| !subscription.is_finished())
    }

    /// Replaces one feed's subscription, leaving the other untouched.
    /// The new subscription starts over from a loading snapshot.
    pub fn resubscribe(&mut self, feed: FeedId) {
        if let Some(previous) = self.subscriptions.remove(&feed) {
            log::debug!("Unsubscribing {}", previous.feed());
            previous.cancel();
            self.events.try_send_event(Event::new(
                Worker::Feed(feed),
                format!("Reconnecting {}", feed),
                EventType::Refresh,
                LogLevel::Info,
            ));
        }
        let Some(filter) = feed.filter(self.user.as_ref()) else {
            return;
        };
        log::debug!("Subscribing {}", feed);
        let subscription = subscribe_donations(
            self.service.clone(),
            feed,
            filter,
            self.events.clone(),
            self.shutdown_sender.subscribe(),
        );
        self.subscriptions.insert(feed, subscription);
    }

    /// Re-creates every subscription, the equivalent of reloading the page.
    pub fn reload_all(&mut self) {
        for feed in [FeedId::Global, FeedId::Mine] {
            self.resubscribe(feed);
        }
    }

    /// Stops all subscriptions and waits for them to end.
    pub async fn stop(mut self) {
        for (_, subscription) in self.subscriptions.drain() {
            subscription.unsubscribe().await;
        }
    }
}
