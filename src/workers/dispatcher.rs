//! Claim and create actions.
//!
//! Every dispatch runs on its own task and reports its outcome as a notice
//! event, so overlapping actions never wait on or overwrite each other.
//! Failures are logged with their cause but shown to the user generically.

use super::core::EventSender;
use crate::auth::UserSession;
use crate::donations::{DonationDraft, DonationService};
use crate::error_classifier::{ErrorClassifier, LogLevel};
use crate::events::{Event, EventType};
use std::sync::Arc;
use tokio::task::JoinHandle;

pub const CLAIM_LOGIN_REQUIRED: &str = "Please login to claim donations";
pub const CLAIM_SUCCEEDED: &str = "Donation claimed successfully!";
pub const CLAIM_FAILED: &str = "Failed to claim donation";
pub const CREATE_LOGIN_REQUIRED: &str = "Please login to create donations";
pub const CREATE_SUCCEEDED: &str = "Donation created successfully!";
pub const CREATE_FAILED: &str = "Failed to create donation";

/// Outcome of starting an action.
#[derive(Debug)]
pub enum Dispatch {
    /// Refused before reaching the service; a notice was already queued.
    Rejected,
    /// Running in the background; resolves to a notice event.
    Pending(JoinHandle<()>),
}

impl Dispatch {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Dispatch::Rejected)
    }

    pub fn is_finished(&self) -> bool {
        match self {
            Dispatch::Rejected => true,
            Dispatch::Pending(handle) => handle.is_finished(),
        }
    }

    /// Waits for a pending action to finish.
    pub async fn finished(self) {
        if let Dispatch::Pending(handle) = self {
            let _ = handle.await;
        }
    }
}

#[derive(Clone)]
pub struct ActionDispatcher {
    service: Arc<dyn DonationService>,
    events: EventSender,
    classifier: ErrorClassifier,
}

impl ActionDispatcher {
    pub fn new(service: Arc<dyn DonationService>, events: EventSender) -> Self {
        Self {
            service,
            events,
            classifier: ErrorClassifier::new(),
        }
    }

    /// Claims a donation for the signed-in user.
    ///
    /// Without a session nothing is sent to the service and the login notice
    /// is queued instead. Must be called from within the tokio runtime.
    pub fn claim(&self, donation_id: &str, session: Option<&UserSession>) -> Dispatch {
        let Some(session) = session else {
            self.events.try_send_event(Event::claim_with_level(
                donation_id,
                CLAIM_LOGIN_REQUIRED.to_string(),
                EventType::Error,
                LogLevel::Warn,
            ));
            return Dispatch::Rejected;
        };

        let service = self.service.clone();
        let events = self.events.clone();
        let classifier = self.classifier.clone();
        let donation_id = donation_id.to_string();
        let claimant_id = session.id.clone();

        Dispatch::Pending(tokio::spawn(async move {
            match service.claim_donation(&donation_id, &claimant_id).await {
                Ok(()) => {
                    events
                        .send_claim_event(
                            &donation_id,
                            CLAIM_SUCCEEDED.to_string(),
                            EventType::Success,
                            LogLevel::Info,
                        )
                        .await;
                }
                Err(e) => {
                    let level: log::Level = classifier.classify_action_error(&e).into();
                    log::log!(level, "Error claiming donation {}: {}", donation_id, e);
                    events
                        .send_claim_event(
                            &donation_id,
                            format!("Error claiming donation {}: {}", donation_id, e),
                            EventType::Error,
                            LogLevel::Debug,
                        )
                        .await;
                    events
                        .send_claim_event(
                            &donation_id,
                            CLAIM_FAILED.to_string(),
                            EventType::Error,
                            LogLevel::Warn,
                        )
                        .await;
                }
            }
        }))
    }

    /// Publishes a new donation owned by the signed-in user. Every outcome
    /// event carries `request_id` so it reaches only the editor that asked.
    pub fn create(
        &self,
        request_id: u64,
        draft: DonationDraft,
        session: Option<&UserSession>,
    ) -> Dispatch {
        let Some(session) = session else {
            self.events.try_send_event(Event::creation_with_level(
                request_id,
                CREATE_LOGIN_REQUIRED.to_string(),
                EventType::Error,
                LogLevel::Warn,
            ));
            return Dispatch::Rejected;
        };

        let service = self.service.clone();
        let events = self.events.clone();
        let classifier = self.classifier.clone();
        let donor_id = session.id.clone();

        Dispatch::Pending(tokio::spawn(async move {
            match service.create_donation(&donor_id, &draft).await {
                Ok(donation) => {
                    log::info!("Created donation {} ({} kg)", donation.id, donation.quantity);
                    events
                        .send_creation_event(
                            request_id,
                            CREATE_SUCCEEDED.to_string(),
                            EventType::Success,
                            LogLevel::Info,
                        )
                        .await;
                }
                Err(e) => {
                    let level: log::Level = classifier.classify_action_error(&e).into();
                    log::log!(level, "Error creating donation: {}", e);
                    events
                        .send_creation_event(
                            request_id,
                            format!("Error creating donation: {}", e),
                            EventType::Error,
                            LogLevel::Debug,
                        )
                        .await;
                    events
                        .send_creation_event(
                            request_id,
                            CREATE_FAILED.to_string(),
                            EventType::Error,
                            LogLevel::Warn,
                        )
                        .await;
                }
            }
        }))
    }
}
