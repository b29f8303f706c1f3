//! Dashboard state management
//!
//! Holds the latest snapshot of each feed, the selection cursor and the
//! activity log. Everything rendered is derived from this struct.

use crate::auth::UserSession;
use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::donations::Donation;
use crate::environment::Environment;
use crate::events::Event as WorkerEvent;
use crate::feed::{FeedId, FeedState, FeedView, reconcile};
use crate::impact::{CommunityStats, ImpactMetrics};
use crate::ui::editor::DonationEditor;

use std::collections::VecDeque;

#[derive(Debug)]
pub struct DashboardState {
    /// The signed-in user, if any. Passed explicitly to every rule that needs it.
    pub user: Option<UserSession>,
    /// The environment in which the application is running.
    pub environment: Environment,
    /// Whether to paint a background color.
    pub with_background_color: bool,

    /// Latest snapshot of the community feed.
    pub global_feed: FeedState<Donation>,
    /// Latest snapshot of the user's own feed.
    pub my_feed: FeedState<Donation>,
    /// Feed the selection cursor is in.
    pub focus: FeedId,
    global_selected: usize,
    my_selected: usize,

    /// Open create-donation modal.
    pub editor: Option<DonationEditor>,
    /// Request id handed to the next editor.
    next_request_id: u64,

    /// Queue of events waiting to be processed
    pub pending_events: VecDeque<WorkerEvent>,
    /// Notices and worker messages for the notifications panel
    pub activity_logs: VecDeque<WorkerEvent>,
    /// Animation tick counter
    pub tick: usize,
}

impl DashboardState {
    pub fn new(
        user: Option<UserSession>,
        environment: Environment,
        with_background_color: bool,
    ) -> Self {
        // Without a session there is no user feed to wait for.
        let my_feed = if user.is_some() {
            FeedState::loading()
        } else {
            FeedState::loaded(Vec::new())
        };
        Self {
            user,
            environment,
            with_background_color,
            global_feed: FeedState::loading(),
            my_feed,
            focus: FeedId::Global,
            global_selected: 0,
            my_selected: 0,
            editor: None,
            next_request_id: 1,
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
            tick: 0,
        }
    }

    pub fn feed(&self, feed: FeedId) -> &FeedState<Donation> {
        match feed {
            FeedId::Global => &self.global_feed,
            FeedId::Mine => &self.my_feed,
        }
    }

    /// Replaces one feed's snapshot. The other feed is never touched.
    pub fn set_feed(&mut self, feed: FeedId, state: FeedState<Donation>) {
        match feed {
            FeedId::Global => self.global_feed = state,
            FeedId::Mine => self.my_feed = state,
        }
        self.clamp_selection(feed);
    }

    /// The branch each feed section renders.
    pub fn view(&self, feed: FeedId) -> FeedView<'_> {
        reconcile(self.feed(feed), feed.page_size(), self.user.as_ref())
    }

    /// "My Recent Donations" is a donor-only section.
    pub fn shows_my_feed(&self) -> bool {
        self.user.as_ref().is_some_and(UserSession::is_donor)
    }

    /// Feeds the cursor can move between, top to bottom.
    pub fn visible_feeds(&self) -> Vec<FeedId> {
        if self.shows_my_feed() {
            vec![FeedId::Mine, FeedId::Global]
        } else {
            vec![FeedId::Global]
        }
    }

    pub fn selected_index(&self, feed: FeedId) -> usize {
        match feed {
            FeedId::Global => self.global_selected,
            FeedId::Mine => self.my_selected,
        }
    }

    pub(crate) fn set_selected_index(&mut self, feed: FeedId, index: usize) {
        match feed {
            FeedId::Global => self.global_selected = index,
            FeedId::Mine => self.my_selected = index,
        }
    }

    /// Number of cards the cursor can land on in a feed.
    pub fn selectable_len(&self, feed: FeedId) -> usize {
        match self.view(feed) {
            FeedView::Populated(cards) => cards.len(),
            _ => 0,
        }
    }

    fn clamp_selection(&mut self, feed: FeedId) {
        let len = self.selectable_len(feed);
        let index = self.selected_index(feed).min(len.saturating_sub(1));
        self.set_selected_index(feed, index);
    }

    /// Opens a fresh editor with its own request id.
    pub fn open_editor(&mut self) {
        self.editor = Some(DonationEditor::new(self.next_request_id));
        self.next_request_id += 1;
    }

    pub fn community_stats(&self) -> CommunityStats {
        CommunityStats::from_donations(&self.global_feed.items)
    }

    pub fn impact(&self) -> ImpactMetrics {
        ImpactMetrics::from_donations(&self.my_feed.items)
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: WorkerEvent) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add an event to the processing queue
    pub fn add_event(&mut self, event: WorkerEvent) {
        self.pending_events.push_back(event);
    }
}
