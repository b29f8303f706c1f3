//! Donation records and the service that owns them.
//!
//! The dashboard never persists donations itself: it observes them through
//! [`DonationService::list_donations`] and mutates them through the claim and
//! create operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;

pub(crate) mod client;
pub mod error;
pub mod memory;

pub use client::DonationClient;
pub use error::ServiceError;
pub use memory::InMemoryDonationService;

#[cfg(test)]
use mockall::automock;

/// Whether a donation can still be picked up.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
pub enum DonationStatus {
    Available,
    Claimed,
    Expired,
}

/// A food donation as published by the donation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: String,
    /// Identifier of the donor who owns the listing.
    pub donor_id: String,
    pub title: String,
    /// Quantity in kilograms.
    pub quantity: f64,
    pub status: DonationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimed_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Donation {
    /// A donation is "mine" when the given user owns it.
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.donor_id == user_id
    }
}

/// Query of a live feed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DonationFilter {
    /// Restrict the feed to one donor's listings.
    pub owner_id: Option<String>,
    /// Maximum number of donations, newest first.
    pub limit: usize,
}

impl DonationFilter {
    pub fn global(limit: usize) -> Self {
        Self {
            owner_id: None,
            limit,
        }
    }

    pub fn owned_by(owner_id: impl Into<String>, limit: usize) -> Self {
        Self {
            owner_id: Some(owner_id.into()),
            limit,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum DraftError {
    #[error("Title must not be empty")]
    EmptyTitle,
    #[error("Quantity must be a number of kilograms, got '{0}'")]
    InvalidQuantity(String),
    #[error("Quantity must be greater than zero")]
    NonPositiveQuantity,
}

/// Input of the create-donation action.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationDraft {
    pub title: String,
    pub quantity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl DonationDraft {
    /// Validates raw editor input into a draft.
    pub fn parse(title: &str, quantity: &str, location: &str) -> Result<Self, DraftError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(DraftError::EmptyTitle);
        }
        let quantity_str = quantity.trim();
        let quantity: f64 = quantity_str
            .parse()
            .map_err(|_| DraftError::InvalidQuantity(quantity_str.to_string()))?;
        if !quantity.is_finite() {
            return Err(DraftError::InvalidQuantity(quantity_str.to_string()));
        }
        if quantity <= 0.0 {
            return Err(DraftError::NonPositiveQuantity);
        }
        let location = location.trim();
        Ok(Self {
            title: title.to_string(),
            quantity,
            location: (!location.is_empty()).then(|| location.to_string()),
        })
    }
}

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait DonationService: Send + Sync {
    /// Lists donations matching the filter, newest first.
    async fn list_donations(&self, filter: &DonationFilter)
    -> Result<Vec<Donation>, ServiceError>;

    /// Claims a donation on behalf of a recipient.
    async fn claim_donation(&self, donation_id: &str, claimant_id: &str)
    -> Result<(), ServiceError>;

    /// Publishes a new donation owned by `donor_id`.
    async fn create_donation(
        &self,
        donor_id: &str,
        draft: &DonationDraft,
    ) -> Result<Donation, ServiceError>;

    /// Signal bumped on every change, for services able to push updates.
    /// Feeds of services returning `None` fall back to polling.
    fn change_notifier(&self) -> Option<watch::Receiver<u64>>;
}
