//! Live donation feeds and how the dashboard reconciles them.
//!
//! A feed snapshot carries items, a loading flag and an optional error all at
//! once. [`reconcile`] turns one snapshot into exactly one of four views, with
//! precedence error > loading > empty > populated.

pub mod subscription;

pub use subscription::{FeedSubscription, subscribe_donations};

use crate::auth::UserSession;
use crate::consts::cli_consts::feeds;
use crate::donations::{Donation, DonationFilter};

/// The two feeds shown on the dashboard.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum::Display)]
pub enum FeedId {
    /// Newest donations from everyone.
    #[strum(to_string = "Live Donations Feed")]
    Global,
    /// The signed-in donor's own recent donations.
    #[strum(to_string = "My Recent Donations")]
    Mine,
}

impl FeedId {
    /// Number of items requested, and of placeholders shown while loading.
    pub fn page_size(&self) -> usize {
        match self {
            FeedId::Global => feeds::GLOBAL_FEED_LIMIT,
            FeedId::Mine => feeds::USER_FEED_LIMIT,
        }
    }

    /// The query backing this feed. `Mine` needs a signed-in user.
    pub fn filter(&self, session: Option<&UserSession>) -> Option<DonationFilter> {
        match self {
            FeedId::Global => Some(DonationFilter::global(self.page_size())),
            FeedId::Mine => {
                session.map(|s| DonationFilter::owned_by(s.id.clone(), self.page_size()))
            }
        }
    }
}

/// One atomic snapshot of a live feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedState<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for FeedState<T> {
    fn default() -> Self {
        Self::loading()
    }
}

impl<T> FeedState<T> {
    /// State of a feed that has not delivered its first result yet.
    pub fn loading() -> Self {
        Self {
            items: Vec::new(),
            loading: true,
            error: None,
        }
    }

    pub fn loaded(items: Vec<T>) -> Self {
        Self {
            items,
            loading: false,
            error: None,
        }
    }

    /// A failed refresh. The last known items are kept in the snapshot.
    pub fn failed(items: Vec<T>, error: impl Into<String>) -> Self {
        Self {
            items,
            loading: false,
            error: Some(error.into()),
        }
    }

    /// The error message, ignoring empty strings.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().filter(|message| !message.is_empty())
    }
}

/// A donation annotated for display.
#[derive(Debug, Clone, PartialEq)]
pub struct DonationCard<'a> {
    pub donation: &'a Donation,
    pub can_claim: bool,
}

/// The single branch rendered for a feed.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedView<'a> {
    /// The feed failed; offer a retry.
    Error { message: &'a str },
    /// Waiting for data; show skeleton cards.
    Loading { placeholders: usize },
    /// Nothing to show; offer the create-donation shortcut.
    Empty,
    Populated(Vec<DonationCard<'a>>),
}

/// Whether the session may claim the donation.
///
/// Anonymous visitors and donors never can, and nobody claims their own listing.
pub fn can_claim(session: Option<&UserSession>, donation: &Donation) -> bool {
    match session {
        Some(session) => !session.is_donor() && !donation.is_owned_by(&session.id),
        None => false,
    }
}

pub fn reconcile<'a>(
    feed: &'a FeedState<Donation>,
    page_size: usize,
    session: Option<&UserSession>,
) -> FeedView<'a> {
    if let Some(message) = feed.error_message() {
        return FeedView::Error { message };
    }
    if feed.loading {
        return FeedView::Loading {
            placeholders: page_size,
        };
    }
    if feed.items.is_empty() {
        return FeedView::Empty;
    }
    FeedView::Populated(
        feed.items
            .iter()
            .map(|donation| DonationCard {
                donation,
                can_claim: can_claim(session, donation),
            })
            .collect(),
    )
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::donations::DonationStatus;
    use chrono::Utc;

    pub(crate) fn donation(id: &str, donor_id: &str, quantity: f64) -> Donation {
        Donation {
            id: id.to_string(),
            donor_id: donor_id.to_string(),
            title: format!("Donation {}", id),
            quantity,
            status: DonationStatus::Available,
            location: None,
            claimed_by: None,
            created_at: Utc::now(),
        }
    }

    fn state(items: Vec<Donation>, loading: bool, error: Option<&str>) -> FeedState<Donation> {
        FeedState {
            items,
            loading,
            error: error.map(str::to_string),
        }
    }

    fn recipient() -> UserSession {
        UserSession::new("ngo-1", Role::Recipient, None)
    }

    #[test]
    fn test_error_wins_over_loading_and_items() {
        for loading in [true, false] {
            for items in [vec![], vec![donation("d1", "u1", 1.0)]] {
                let feed = state(items, loading, Some("connection lost"));
                assert_eq!(
                    reconcile(&feed, 6, None),
                    FeedView::Error {
                        message: "connection lost"
                    }
                );
            }
        }
    }

    #[test]
    fn test_loading_wins_over_items() {
        for items in [vec![], vec![donation("d1", "u1", 1.0)]] {
            let feed = state(items, true, None);
            assert_eq!(
                reconcile(&feed, 3, None),
                FeedView::Loading { placeholders: 3 }
            );
        }
    }

    #[test]
    fn test_empty_feed_renders_empty_branch() {
        let feed = state(vec![], false, None);
        assert_eq!(reconcile(&feed, 6, None), FeedView::Empty);
        assert_eq!(reconcile(&feed, 6, Some(&recipient())), FeedView::Empty);
    }

    #[test]
    fn test_empty_error_string_is_not_an_error() {
        let feed = state(vec![], false, Some(""));
        assert_eq!(reconcile(&feed, 6, None), FeedView::Empty);
    }

    #[test]
    fn test_populated_cards_keep_order() {
        let feed = state(
            vec![donation("d1", "u1", 1.0), donation("d2", "u2", 2.0)],
            false,
            None,
        );
        match reconcile(&feed, 6, Some(&recipient())) {
            FeedView::Populated(cards) => {
                let ids: Vec<_> = cards.iter().map(|c| c.donation.id.as_str()).collect();
                assert_eq!(ids, vec!["d1", "d2"]);
                assert!(cards.iter().all(|c| c.can_claim));
            }
            other => panic!("expected populated view, got {:?}", other),
        }
    }

    #[test]
    fn test_can_claim_rules() {
        let foreign = donation("d1", "donor-9", 1.0);
        let donor = UserSession::new("donor-1", Role::Donor, None);
        let own_listing = donation("d2", "ngo-1", 1.0);

        assert!(!can_claim(None, &foreign));
        assert!(!can_claim(Some(&donor), &foreign));
        assert!(can_claim(Some(&recipient()), &foreign));
        assert!(!can_claim(Some(&recipient()), &own_listing));
    }

    #[test]
    fn test_feed_page_sizes_and_filters() {
        assert_eq!(FeedId::Global.page_size(), 6);
        assert_eq!(FeedId::Mine.page_size(), 3);

        assert_eq!(FeedId::Mine.filter(None), None);
        assert_eq!(
            FeedId::Mine.filter(Some(&recipient())),
            Some(DonationFilter::owned_by("ngo-1", 3))
        );
        assert_eq!(
            FeedId::Global.filter(None),
            Some(DonationFilter::global(6))
        );
    }
}
