//! Event System
//!
//! Types and implementations for worker events: feed snapshots, action
//! outcomes and the notices shown to the user.

use crate::donations::Donation;
use crate::error_classifier::LogLevel;
use crate::feed::{FeedId, FeedState};
use crate::logging::ActivityFilter;
use chrono::Local;
use std::fmt::Display;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Worker {
    /// Background subscription keeping one feed up to date.
    Feed(FeedId),
    /// Claim-donation dispatches.
    Claims,
    /// Create-donation dispatches.
    Creations,
}

impl Worker {
    /// RUST_LOG target the worker's events are filtered under.
    pub fn target(&self) -> &'static str {
        match self {
            Worker::Feed(_) => "foodshare::feeds",
            Worker::Claims => "foodshare::claims",
            Worker::Creations => "foodshare::creations",
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
    /// A new feed snapshot. Applied to state, never shown in the log.
    FeedUpdate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub worker: Worker,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
    /// Donation the event is about, for claim outcomes.
    pub donation_id: Option<String>,
    /// Editor request a create outcome answers.
    pub request_id: Option<u64>,
    /// The complete snapshot, for feed updates.
    pub feed_state: Option<FeedState<Donation>>,
}

impl Event {
    pub fn new(worker: Worker, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            worker,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
            donation_id: None,
            request_id: None,
            feed_state: None,
        }
    }

    pub fn feed_update(feed: FeedId, state: FeedState<Donation>) -> Self {
        let msg = match (&state.error, state.loading) {
            (Some(error), _) => format!("{} unavailable: {}", feed, error),
            (None, true) => format!("{} loading", feed),
            (None, false) => format!("{} updated ({} donations)", feed, state.items.len()),
        };
        Self {
            feed_state: Some(state),
            ..Self::new(
                Worker::Feed(feed),
                msg,
                EventType::FeedUpdate,
                LogLevel::Debug,
            )
        }
    }

    pub fn claim_with_level(
        donation_id: &str,
        msg: String,
        event_type: EventType,
        log_level: LogLevel,
    ) -> Self {
        Self {
            donation_id: Some(donation_id.to_string()),
            ..Self::new(Worker::Claims, msg, event_type, log_level)
        }
    }

    pub fn creation_with_level(
        request_id: u64,
        msg: String,
        event_type: EventType,
        log_level: LogLevel,
    ) -> Self {
        Self {
            request_id: Some(request_id),
            ..Self::new(Worker::Creations, msg, event_type, log_level)
        }
    }

    pub fn should_display(&self) -> bool {
        // Snapshots are rendered by the feed sections, not the log
        if self.event_type == EventType::FeedUpdate {
            return false;
        }
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        ActivityFilter::from_env().allows(self.worker.target(), self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.event_type, self.timestamp, self.msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_updates_are_never_displayed() {
        let event = Event::feed_update(FeedId::Global, FeedState::loaded(vec![]));
        assert_eq!(event.event_type, EventType::FeedUpdate);
        assert_eq!(event.worker, Worker::Feed(FeedId::Global));
        assert!(!event.should_display());
        assert_eq!(event.msg, "Live Donations Feed updated (0 donations)");
    }

    #[test]
    fn test_workers_have_distinct_log_targets() {
        assert_eq!(Worker::Feed(FeedId::Mine).target(), "foodshare::feeds");
        assert_eq!(Worker::Claims.target(), "foodshare::claims");
        assert_ne!(Worker::Claims.target(), Worker::Creations.target());
    }

    #[test]
    fn test_notices_are_displayed() {
        let notice = Event::claim_with_level(
            "d1",
            "Failed to claim donation".to_string(),
            EventType::Error,
            LogLevel::Warn,
        );
        assert!(notice.should_display());
        assert_eq!(notice.donation_id.as_deref(), Some("d1"));

        let success = Event::creation_with_level(
            7,
            "Created".to_string(),
            EventType::Success,
            LogLevel::Debug,
        );
        assert!(success.should_display());
        assert_eq!(success.request_id, Some(7));
    }
}
