//! Dashboard key handling
//!
//! Keys only change local state or name an action; the app performs the
//! actions so the dashboard never talks to the service itself.

use super::state::DashboardState;
use crate::donations::DonationDraft;
use crate::feed::{FeedId, FeedView};
use crate::ui::editor::EditorOutcome;
use crossterm::event::{KeyCode, KeyEvent};

/// Something the app must do in response to a key.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardAction {
    Claim(String),
    Create {
        request_id: u64,
        draft: DonationDraft,
    },
    /// Re-subscribe these feeds only.
    Retry(Vec<FeedId>),
    /// Re-subscribe every feed.
    ReloadAll,
    Quit,
}

impl DashboardState {
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<DashboardAction> {
        if let Some(editor) = self.editor.as_mut() {
            return match editor.handle_key(key) {
                EditorOutcome::Continue => None,
                EditorOutcome::Cancel => {
                    self.editor = None;
                    None
                }
                EditorOutcome::Submit(draft) => Some(DashboardAction::Create {
                    request_id: editor.request_id,
                    draft,
                }),
            };
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(DashboardAction::Quit),
            KeyCode::Tab => {
                self.cycle_focus();
                None
            }
            KeyCode::Up => {
                self.move_selection(-1);
                None
            }
            KeyCode::Down => {
                self.move_selection(1);
                None
            }
            KeyCode::Char('c') => self.claim_selected(),
            KeyCode::Char('n') => {
                self.open_editor();
                None
            }
            KeyCode::Enter if self.view(self.focus) == FeedView::Empty => {
                self.open_editor();
                None
            }
            KeyCode::Char('r') => {
                let failed: Vec<FeedId> = self
                    .visible_feeds()
                    .into_iter()
                    .filter(|feed| self.feed(*feed).error_message().is_some())
                    .collect();
                (!failed.is_empty()).then_some(DashboardAction::Retry(failed))
            }
            KeyCode::Char('R') => Some(DashboardAction::ReloadAll),
            _ => None,
        }
    }

    fn cycle_focus(&mut self) {
        let feeds = self.visible_feeds();
        let current = feeds.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = feeds[(current + 1) % feeds.len()];
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.selectable_len(self.focus);
        if len == 0 {
            return;
        }
        let index = self.selected_index(self.focus).saturating_add_signed(delta);
        self.set_selected_index(self.focus, index.min(len - 1));
    }

    /// Anonymous visitors still get the claim dispatched so they see the login
    /// notice; signed-in users only for cards they may claim.
    fn claim_selected(&self) -> Option<DashboardAction> {
        let FeedView::Populated(cards) = self.view(self.focus) else {
            return None;
        };
        let card = cards.get(self.selected_index(self.focus))?;
        if card.can_claim || self.user.is_none() {
            Some(DashboardAction::Claim(card.donation.id.clone()))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Role, UserSession};
    use crate::environment::Environment;
    use crate::feed::FeedState;
    use crate::feed::tests::donation;
    use crossterm::event::KeyModifiers;

    fn dashboard(user: Option<UserSession>) -> DashboardState {
        DashboardState::new(user, Environment::Local, false)
    }

    fn press(state: &mut DashboardState, code: KeyCode) -> Option<DashboardAction> {
        state.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_recipient_claims_selected_card() {
        let mut state = dashboard(Some(UserSession::new("ngo-1", Role::Recipient, None)));
        state.set_feed(
            FeedId::Global,
            FeedState::loaded(vec![donation("d1", "u1", 1.0), donation("d2", "u2", 2.0)]),
        );

        press(&mut state, KeyCode::Down);
        assert_eq!(
            press(&mut state, KeyCode::Char('c')),
            Some(DashboardAction::Claim("d2".to_string()))
        );
    }

    #[test]
    fn test_donor_cannot_claim() {
        let mut state = dashboard(Some(UserSession::new("me", Role::Donor, None)));
        state.set_feed(
            FeedId::Global,
            FeedState::loaded(vec![donation("d1", "u1", 1.0)]),
        );
        assert_eq!(press(&mut state, KeyCode::Char('c')), None);
    }

    #[test]
    fn test_anonymous_claim_is_dispatched_for_login_notice() {
        let mut state = dashboard(None);
        state.set_feed(
            FeedId::Global,
            FeedState::loaded(vec![donation("d1", "u1", 1.0)]),
        );
        assert_eq!(
            press(&mut state, KeyCode::Char('c')),
            Some(DashboardAction::Claim("d1".to_string()))
        );
    }

    #[test]
    fn test_retry_targets_only_failed_feeds() {
        let mut state = dashboard(Some(UserSession::new("me", Role::Donor, None)));
        state.set_feed(FeedId::Global, FeedState::failed(vec![], "offline"));
        state.set_feed(FeedId::Mine, FeedState::loaded(vec![]));

        assert_eq!(
            press(&mut state, KeyCode::Char('r')),
            Some(DashboardAction::Retry(vec![FeedId::Global]))
        );
        state.set_feed(FeedId::Global, FeedState::loaded(vec![]));
        assert_eq!(press(&mut state, KeyCode::Char('r')), None);
        assert_eq!(
            press(&mut state, KeyCode::Char('R')),
            Some(DashboardAction::ReloadAll)
        );
    }

    #[test]
    fn test_tab_skips_hidden_user_feed() {
        let mut recipient = dashboard(Some(UserSession::new("ngo-1", Role::Recipient, None)));
        press(&mut recipient, KeyCode::Tab);
        assert_eq!(recipient.focus, FeedId::Global);

        let mut donor = dashboard(Some(UserSession::new("me", Role::Donor, None)));
        press(&mut donor, KeyCode::Tab);
        assert_eq!(donor.focus, FeedId::Mine);
    }

    #[test]
    fn test_editor_captures_keys_until_closed() {
        let mut state = dashboard(Some(UserSession::new("me", Role::Donor, None)));
        state.set_feed(FeedId::Global, FeedState::loaded(vec![]));

        // Enter on an empty feed is the create shortcut
        press(&mut state, KeyCode::Enter);
        assert!(state.editor.is_some());
        // 'q' is typed into the title, not treated as quit
        assert_eq!(press(&mut state, KeyCode::Char('q')), None);
        assert_eq!(state.editor.as_ref().unwrap().title, "q");

        press(&mut state, KeyCode::Esc);
        assert!(state.editor.is_none());
        assert_eq!(press(&mut state, KeyCode::Char('q')), Some(DashboardAction::Quit));
    }

    #[test]
    fn test_submitted_editor_stays_until_its_outcome() {
        let mut state = dashboard(Some(UserSession::new("me", Role::Donor, None)));
        press(&mut state, KeyCode::Char('n'));
        for c in "Rice".chars() {
            press(&mut state, KeyCode::Char(c));
        }
        press(&mut state, KeyCode::Tab);
        press(&mut state, KeyCode::Char('4'));

        let Some(DashboardAction::Create { request_id, draft }) = press(&mut state, KeyCode::Enter)
        else {
            panic!("expected a create action");
        };
        assert_eq!(draft.title, "Rice");
        assert_eq!(request_id, state.editor.as_ref().unwrap().request_id);

        // Esc cannot drop an editor whose create is in flight
        assert_eq!(press(&mut state, KeyCode::Esc), None);
        assert!(state.editor.is_some());

        state.editor = None;
        press(&mut state, KeyCode::Char('n'));
        assert_ne!(state.editor.as_ref().unwrap().request_id, request_id);
    }
}
