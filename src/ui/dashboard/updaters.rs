//! Dashboard state update logic
//!
//! Contains all methods for updating dashboard state from events

use super::state::DashboardState;

use crate::error_classifier::LogLevel;
use crate::events::{Event as WorkerEvent, EventType, Worker};

impl DashboardState {
    /// Advance the animation tick and apply queued events.
    pub fn update(&mut self) {
        self.tick = self.tick.wrapping_add(1);

        while let Some(event) = self.pending_events.pop_front() {
            self.process_event(event);
        }
    }

    /// Process a single event and update relevant state
    fn process_event(&mut self, event: WorkerEvent) {
        match event.worker {
            Worker::Feed(feed) => {
                if let Some(state) = event.feed_state.clone() {
                    self.set_feed(feed, state);
                }
            }
            Worker::Claims => {}
            Worker::Creations => self.handle_creation_event(&event),
        }

        if event.event_type != EventType::FeedUpdate {
            self.add_to_activity_log(event);
        }
    }

    /// A successful create closes the editor that submitted it; a failed one
    /// unlocks it for edits. Outcomes for any other editor are only logged.
    fn handle_creation_event(&mut self, event: &WorkerEvent) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        if event.request_id != Some(editor.request_id) {
            return;
        }
        match event.event_type {
            EventType::Success => self.editor = None,
            EventType::Error if event.log_level >= LogLevel::Warn => editor.submitting = false,
            _ => {}
        }
    }
}
