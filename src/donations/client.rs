//! Donation API Client
//!
//! A JSON-over-HTTP client for the donation service, used for both live feeds
//! and claim/create actions.

use crate::consts::cli_consts::http;
use crate::donations::error::ServiceError;
use crate::donations::{Donation, DonationDraft, DonationFilter, DonationService};
use crate::environment::Environment;
use reqwest::{Client, ClientBuilder, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::watch;

// Build timestamp in milliseconds since epoch
const BUILD_TIMESTAMP: &str = env!("BUILD_TIMESTAMP", "Build timestamp not available");

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("foodshare-cli/", env!("CARGO_PKG_VERSION"));

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClaimRequest<'a> {
    claimant_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateRequest<'a> {
    donor_id: &'a str,
    #[serde(flatten)]
    draft: &'a DonationDraft,
}

#[derive(Debug, Clone)]
pub struct DonationClient {
    client: Client,
    environment: Environment,
}

impl DonationClient {
    pub fn new(environment: Environment) -> Result<Self, ServiceError> {
        let client = ClientBuilder::new()
            .connect_timeout(http::timeout())
            .timeout(http::timeout())
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            environment,
        })
    }

    /// Appends `segments` to the API base, percent-encoding each one so ids
    /// can never change the route.
    fn build_url(&self, segments: &[&str]) -> Result<Url, ServiceError> {
        let base = self.environment.api_url();
        let invalid = || ServiceError::InvalidUrl(base.clone());
        let mut url = Url::parse(&base).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn query_params(filter: &DonationFilter) -> Vec<(&'static str, String)> {
        let mut params = vec![("limit", filter.limit.to_string())];
        if let Some(owner_id) = &filter.owner_id {
            params.push(("donorId", owner_id.clone()));
        }
        params
    }

    async fn handle_response_status(response: Response) -> Result<Response, ServiceError> {
        if !response.status().is_success() {
            return Err(ServiceError::from_response(response).await);
        }
        Ok(response)
    }

    async fn decode_response<T: DeserializeOwned>(response: Response) -> Result<T, ServiceError> {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get_request<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&'static str, String)],
    ) -> Result<T, ServiceError> {
        let url = self.build_url(segments)?;
        let response = self
            .client
            .get(url)
            .header("X-Build-Timestamp", BUILD_TIMESTAMP)
            .query(query)
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        Self::decode_response(response).await
    }

    async fn post_request<B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<Response, ServiceError> {
        let url = self.build_url(segments)?;
        let response = self
            .client
            .post(url)
            .header("X-Build-Timestamp", BUILD_TIMESTAMP)
            .json(body)
            .send()
            .await?;

        Self::handle_response_status(response).await
    }
}

#[async_trait::async_trait]
impl DonationService for DonationClient {
    async fn list_donations(
        &self,
        filter: &DonationFilter,
    ) -> Result<Vec<Donation>, ServiceError> {
        self.get_request(&["v1", "donations"], &Self::query_params(filter))
            .await
    }

    async fn claim_donation(
        &self,
        donation_id: &str,
        claimant_id: &str,
    ) -> Result<(), ServiceError> {
        let segments = ["v1", "donations", donation_id, "claim"];
        match self
            .post_request(&segments, &ClaimRequest { claimant_id })
            .await
        {
            Ok(_) => Ok(()),
            Err(ServiceError::Http { status: 404, .. }) => {
                Err(ServiceError::NotFound(donation_id.to_string()))
            }
            Err(ServiceError::Http {
                status: 409,
                message,
            }) => Err(ServiceError::Rejected(message)),
            Err(e) => Err(e),
        }
    }

    async fn create_donation(
        &self,
        donor_id: &str,
        draft: &DonationDraft,
    ) -> Result<Donation, ServiceError> {
        let response = self
            .post_request(&["v1", "donations"], &CreateRequest { donor_id, draft })
            .await?;
        Self::decode_response(response).await
    }

    fn change_notifier(&self) -> Option<watch::Receiver<u64>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_joins_without_double_slash() {
        let client = DonationClient::new(Environment::Local).unwrap();
        assert_eq!(
            client.build_url(&["v1", "donations"]).unwrap().as_str(),
            "http://localhost:8787/v1/donations"
        );
    }

    #[test]
    fn test_build_url_encodes_ids_as_one_segment() {
        let client = DonationClient::new(Environment::Local).unwrap();
        let url = client
            .build_url(&["v1", "donations", "a/b?c#d", "claim"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8787/v1/donations/a%2Fb%3Fc%23d/claim"
        );
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_query_params_include_owner_only_when_scoped() {
        let params = DonationClient::query_params(&DonationFilter::global(6));
        assert_eq!(params, vec![("limit", "6".to_string())]);

        let params = DonationClient::query_params(&DonationFilter::owned_by("u1", 3));
        assert_eq!(
            params,
            vec![("limit", "3".to_string()), ("donorId", "u1".to_string())]
        );
    }

    #[test]
    fn test_create_request_flattens_draft() {
        let draft = DonationDraft::parse("Curry", "3", "Hall B").unwrap();
        let body = serde_json::to_value(CreateRequest {
            donor_id: "u1",
            draft: &draft,
        })
        .unwrap();
        assert_eq!(body["donorId"], "u1");
        assert_eq!(body["title"], "Curry");
        assert_eq!(body["quantity"], 3.0);
        assert_eq!(body["location"], "Hall B");
    }

    #[tokio::test]
    #[ignore] // This test requires a live donation API.
    /// Should list the newest donations.
    async fn test_list_donations_live() {
        let client = DonationClient::new(Environment::Staging).unwrap();
        match client.list_donations(&DonationFilter::global(6)).await {
            Ok(donations) => println!("Got {} donations", donations.len()),
            Err(e) => panic!("Failed to list donations: {}", e),
        }
    }
}
