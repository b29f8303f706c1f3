//! Live feed subscriptions.
//!
//! Each subscription is a background task that pushes whole [`FeedState`]
//! snapshots to the UI. Subscriptions are independent: one failing or being
//! re-created never touches the other.

use super::{FeedId, FeedState};
use crate::consts::cli_consts::feeds;
use crate::donations::{Donation, DonationFilter, DonationService};
use crate::error_classifier::ErrorClassifier;
use crate::workers::core::EventSender;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Handle to a running feed subscription.
#[derive(Debug)]
pub struct FeedSubscription {
    feed: FeedId,
    stop_sender: broadcast::Sender<()>,
    handle: JoinHandle<()>,
}

impl FeedSubscription {
    pub fn feed(&self) -> FeedId {
        self.feed
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stops this subscription only and waits for its task to end.
    /// Dropping the handle stops it as well.
    pub async fn unsubscribe(self) {
        let _ = self.stop_sender.send(());
        let _ = self.handle.await;
    }

    /// Stops this subscription without waiting.
    pub fn cancel(&self) {
        let _ = self.stop_sender.send(());
    }
}

/// Starts a live subscription for `feed`.
///
/// The first snapshot published is always a loading one. The task ends on
/// global shutdown or when the returned handle is unsubscribed.
pub fn subscribe_donations(
    service: Arc<dyn DonationService>,
    feed: FeedId,
    filter: DonationFilter,
    events: EventSender,
    shutdown: broadcast::Receiver<()>,
) -> FeedSubscription {
    subscribe_with_interval(
        service,
        feed,
        filter,
        events,
        shutdown,
        feeds::poll_interval(),
    )
}

/// Same as [`subscribe_donations`] with a custom polling interval.
pub fn subscribe_with_interval(
    service: Arc<dyn DonationService>,
    feed: FeedId,
    filter: DonationFilter,
    events: EventSender,
    mut shutdown: broadcast::Receiver<()>,
    poll_interval: Duration,
) -> FeedSubscription {
    let (stop_sender, mut stop) = broadcast::channel(1);
    let handle = tokio::spawn(async move {
        let classifier = ErrorClassifier::new();
        let mut changes = service.change_notifier();
        let mut last_items: Vec<Donation> = Vec::new();

        events.send_feed_update(feed, FeedState::loading()).await;

        loop {
            let state = match service.list_donations(&filter).await {
                Ok(donations) => {
                    last_items = donations.clone();
                    FeedState::loaded(donations)
                }
                Err(e) => {
                    let level: log::Level = classifier.classify_feed_error(&e).into();
                    log::log!(level, "Failed to refresh {}: {}", feed, e);
                    FeedState::failed(last_items.clone(), e.to_string())
                }
            };
            // A stopped subscription never publishes, even if it was already
            // waiting on a full queue when its successor started.
            tokio::select! {
                biased;
                _ = stop.recv() => break,
                _ = shutdown.recv() => break,
                _ = events.send_feed_update(feed, state) => {}
            }

            tokio::select! {
                _ = shutdown.recv() => break,
                _ = stop.recv() => break,
                _ = next_refresh(&mut changes, poll_interval) => {}
            }
        }
    });

    FeedSubscription {
        feed,
        stop_sender,
        handle,
    }
}

/// Resolves when the feed should be fetched again: on the service's change
/// signal when it has one, otherwise after `poll_interval`.
async fn next_refresh(changes: &mut Option<watch::Receiver<u64>>, poll_interval: Duration) {
    let closed = match changes.as_mut() {
        Some(receiver) => receiver.changed().await.is_err(),
        None => {
            sleep(poll_interval).await;
            return;
        }
    };
    if closed {
        // The service stopped pushing; keep the feed alive by polling.
        *changes = None;
        sleep(poll_interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::donations::{
        DonationDraft, InMemoryDonationService, MockDonationService, ServiceError,
    };
    use crate::events::{Event, EventType, Worker};
    use crate::feed::tests::donation;
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    async fn next_state(receiver: &mut mpsc::Receiver<Event>) -> (FeedId, FeedState<Donation>) {
        let event = timeout(Duration::from_secs(2), receiver.recv())
            .await
            .expect("timed out waiting for feed update")
            .expect("event channel closed");
        assert_eq!(event.event_type, EventType::FeedUpdate);
        let feed = match event.worker {
            Worker::Feed(feed) => feed,
            other => panic!("unexpected worker {:?}", other),
        };
        (feed, event.feed_state.expect("feed update without state"))
    }

    #[tokio::test]
    async fn test_first_snapshot_is_loading_then_items() {
        let service = Arc::new(InMemoryDonationService::with_sample_data(Some("me")));
        let (sender, mut receiver) = mpsc::channel(10);
        let (_shutdown_sender, shutdown) = broadcast::channel(1);

        let subscription = subscribe_donations(
            service,
            FeedId::Global,
            DonationFilter::global(6),
            EventSender::new(sender),
            shutdown,
        );

        let (feed, first) = next_state(&mut receiver).await;
        assert_eq!(feed, FeedId::Global);
        assert_eq!(first, FeedState::loading());

        let (_, second) = next_state(&mut receiver).await;
        assert!(!second.loading);
        assert_eq!(second.items.len(), 6);

        subscription.unsubscribe().await;
    }

    #[tokio::test]
    async fn test_change_signal_pushes_new_snapshot() {
        let service = Arc::new(InMemoryDonationService::default());
        let (sender, mut receiver) = mpsc::channel(10);
        let (_shutdown_sender, shutdown) = broadcast::channel(1);

        let subscription = subscribe_with_interval(
            service.clone(),
            FeedId::Mine,
            DonationFilter::owned_by("me", 3),
            EventSender::new(sender),
            shutdown,
            Duration::from_secs(3600),
        );
        next_state(&mut receiver).await;
        let (_, empty) = next_state(&mut receiver).await;
        assert!(empty.items.is_empty());

        let draft = DonationDraft::parse("Idli", "2", "").unwrap();
        service.create_donation("me", &draft).await.unwrap();

        let (feed, updated) = next_state(&mut receiver).await;
        assert_eq!(feed, FeedId::Mine);
        assert_eq!(updated.items.len(), 1);
        assert_eq!(updated.items[0].title, "Idli");

        subscription.unsubscribe().await;
    }

    #[tokio::test]
    async fn test_failure_lands_in_error_slot_and_keeps_items() {
        let mut mock = MockDonationService::new();
        let mut calls = 0;
        mock.expect_list_donations().returning(move |_| {
            calls += 1;
            if calls == 1 {
                Ok(vec![donation("d1", "u1", 2.0)])
            } else {
                Err(ServiceError::Http {
                    status: 503,
                    message: "unavailable".to_string(),
                })
            }
        });
        mock.expect_change_notifier().returning(|| None);

        let (sender, mut receiver) = mpsc::channel(10);
        let (_shutdown_sender, shutdown) = broadcast::channel(1);
        let subscription = subscribe_with_interval(
            Arc::new(mock),
            FeedId::Global,
            DonationFilter::global(6),
            EventSender::new(sender),
            shutdown,
            Duration::from_millis(10),
        );

        next_state(&mut receiver).await;
        let (_, loaded) = next_state(&mut receiver).await;
        assert_eq!(loaded.error, None);

        let (_, failed) = next_state(&mut receiver).await;
        assert!(!failed.loading);
        assert!(failed.error.unwrap().contains("503"));
        assert_eq!(failed.items.len(), 1);

        drop(receiver);
        subscription.unsubscribe().await;
    }

    #[tokio::test]
    async fn test_unsubscribe_stops_only_one_feed() {
        let service: Arc<dyn DonationService> = Arc::new(InMemoryDonationService::default());
        let (sender, _receiver) = mpsc::channel(100);
        let (_shutdown_sender, shutdown) = broadcast::channel(1);
        let events = EventSender::new(sender);

        let global = subscribe_donations(
            service.clone(),
            FeedId::Global,
            DonationFilter::global(6),
            events.clone(),
            shutdown.resubscribe(),
        );
        let mine = subscribe_donations(
            service,
            FeedId::Mine,
            DonationFilter::owned_by("me", 3),
            events,
            shutdown,
        );

        global.unsubscribe().await;
        sleep(Duration::from_millis(20)).await;
        assert!(!mine.is_finished());
        mine.unsubscribe().await;
    }

    #[tokio::test]
    async fn test_cancelled_subscription_drops_pending_snapshot() {
        let service = Arc::new(InMemoryDonationService::with_sample_data(None));
        // Room for the loading snapshot only; the next send has to wait
        let (sender, mut receiver) = mpsc::channel(1);
        let (_shutdown_sender, shutdown) = broadcast::channel(1);

        let subscription = subscribe_donations(
            service,
            FeedId::Global,
            DonationFilter::global(6),
            EventSender::new(sender),
            shutdown,
        );
        sleep(Duration::from_millis(50)).await;

        timeout(Duration::from_secs(2), subscription.unsubscribe())
            .await
            .expect("subscription blocked on a full queue did not stop");

        let (_, first) = next_state(&mut receiver).await;
        assert_eq!(first, FeedState::loading());
        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_global_shutdown_ends_subscription() {
        let service = Arc::new(InMemoryDonationService::default());
        let (sender, _receiver) = mpsc::channel(100);
        let (shutdown_sender, shutdown) = broadcast::channel(1);

        let subscription = subscribe_donations(
            service,
            FeedId::Global,
            DonationFilter::global(6),
            EventSender::new(sender),
            shutdown,
        );
        sleep(Duration::from_millis(20)).await;
        shutdown_sender.send(()).unwrap();
        timeout(Duration::from_secs(2), async {
            while !subscription.is_finished() {
                sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("subscription did not stop on shutdown");
    }
}
