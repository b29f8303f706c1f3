//! In-process donation service backing demo mode.
//!
//! Every mutation bumps a `watch` counter, so live feeds over this service
//! refresh as soon as something changes instead of waiting for a poll.

use crate::donations::error::ServiceError;
use crate::donations::{Donation, DonationDraft, DonationFilter, DonationService, DonationStatus};
use chrono::{Duration, Utc};
use tokio::sync::{RwLock, watch};

#[derive(Debug)]
pub struct InMemoryDonationService {
    donations: RwLock<Vec<Donation>>,
    outage: RwLock<Option<String>>,
    changes: watch::Sender<u64>,
}

impl Default for InMemoryDonationService {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl InMemoryDonationService {
    pub fn new(donations: Vec<Donation>) -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            donations: RwLock::new(donations),
            outage: RwLock::new(None),
            changes,
        }
    }

    /// A small community of donors and listings for demo mode.
    pub fn with_sample_data(current_user_id: Option<&str>) -> Self {
        let now = Utc::now();
        let me = current_user_id.unwrap_or("demo-donor");
        let listing = |id: &str, donor: &str, title: &str, quantity: f64, age_mins: i64| Donation {
            id: id.to_string(),
            donor_id: donor.to_string(),
            title: title.to_string(),
            quantity,
            status: DonationStatus::Available,
            location: Some("Campus Kitchen".to_string()),
            claimed_by: None,
            created_at: now - Duration::minutes(age_mins),
        };
        let mut donations = vec![
            listing("don-1001", "rahul", "Vegetable biryani", 6.0, 4),
            listing("don-1002", me, "Chapati and dal", 5.0, 12),
            listing("don-1003", "anita", "Fresh fruit crate", 8.5, 25),
            listing("don-1004", me, "Bakery leftovers", 3.0, 40),
            listing("don-1005", "mess-hall-b", "Paneer curry", 4.0, 65),
            listing("don-1006", "anita", "Rice (uncooked)", 10.0, 90),
        ];
        if let Some(expired) = donations.last_mut() {
            expired.status = DonationStatus::Expired;
        }
        Self::new(donations)
    }

    /// Makes every operation fail until cleared.
    #[cfg(test)]
    pub async fn set_outage(&self, message: Option<String>) {
        *self.outage.write().await = message;
        self.notify();
    }

    async fn check_outage(&self) -> Result<(), ServiceError> {
        match self.outage.read().await.as_ref() {
            Some(message) => Err(ServiceError::Http {
                status: 503,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    fn notify(&self) {
        self.changes.send_modify(|version| *version += 1);
    }
}

#[async_trait::async_trait]
impl DonationService for InMemoryDonationService {
    async fn list_donations(
        &self,
        filter: &DonationFilter,
    ) -> Result<Vec<Donation>, ServiceError> {
        self.check_outage().await?;
        let donations = self.donations.read().await;
        let mut matching: Vec<Donation> = donations
            .iter()
            .filter(|d| match &filter.owner_id {
                Some(owner) => d.is_owned_by(owner),
                None => true,
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching.truncate(filter.limit);
        Ok(matching)
    }

    async fn claim_donation(
        &self,
        donation_id: &str,
        claimant_id: &str,
    ) -> Result<(), ServiceError> {
        self.check_outage().await?;
        {
            let mut donations = self.donations.write().await;
            let donation = donations
                .iter_mut()
                .find(|d| d.id == donation_id)
                .ok_or_else(|| ServiceError::NotFound(donation_id.to_string()))?;

            if donation.status != DonationStatus::Available {
                return Err(ServiceError::Rejected(format!(
                    "donation {} is {}",
                    donation_id, donation.status
                )));
            }
            if donation.is_owned_by(claimant_id) {
                return Err(ServiceError::Rejected(
                    "donors cannot claim their own donation".to_string(),
                ));
            }
            donation.status = DonationStatus::Claimed;
            donation.claimed_by = Some(claimant_id.to_string());
        }
        self.notify();
        Ok(())
    }

    async fn create_donation(
        &self,
        donor_id: &str,
        draft: &DonationDraft,
    ) -> Result<Donation, ServiceError> {
        self.check_outage().await?;
        let donation = Donation {
            id: uuid::Uuid::new_v4().to_string(),
            donor_id: donor_id.to_string(),
            title: draft.title.clone(),
            quantity: draft.quantity,
            status: DonationStatus::Available,
            location: draft.location.clone(),
            claimed_by: None,
            created_at: Utc::now(),
        };
        self.donations.write().await.push(donation.clone());
        self.notify();
        Ok(donation)
    }

    fn change_notifier(&self) -> Option<watch::Receiver<u64>> {
        Some(self.changes.subscribe())
    }
}
