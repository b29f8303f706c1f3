//! Core worker utilities

use crate::donations::Donation;
use crate::error_classifier::LogLevel;
use crate::events::{Event, EventType};
use crate::feed::{FeedId, FeedState};
use tokio::sync::mpsc;

/// Common event sending utilities for workers
#[derive(Clone, Debug)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Send a generic event
    pub async fn send_event(&self, event: Event) {
        let _ = self.sender.send(event).await;
    }

    /// Queue an event without waiting, for callers outside async context.
    /// Dropped if the UI queue is full.
    pub fn try_send_event(&self, event: Event) {
        if let Err(e) = self.sender.try_send(event) {
            log::warn!("Dropping event: {}", e);
        }
    }

    pub async fn send_feed_update(&self, feed: FeedId, state: FeedState<Donation>) {
        self.send_event(Event::feed_update(feed, state)).await;
    }

    pub async fn send_claim_event(
        &self,
        donation_id: &str,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        self.send_event(Event::claim_with_level(
            donation_id,
            message,
            event_type,
            log_level,
        ))
        .await;
    }

    pub async fn send_creation_event(
        &self,
        request_id: u64,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        self.send_event(Event::creation_with_level(
            request_id, message, event_type, log_level,
        ))
        .await;
    }
}
