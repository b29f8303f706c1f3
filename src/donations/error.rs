//! Error handling for the donation service

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The server answered with a body we could not decode.
    #[error("Decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    /// An error occurred while processing the request.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },

    /// The donation does not exist.
    #[error("Donation {0} not found")]
    NotFound(String),

    /// The configured API base cannot carry a path.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// The service refused the operation, e.g. claiming an already claimed donation.
    #[error("Request rejected: {0}")]
    Rejected(String),
}

impl ServiceError {
    pub async fn from_response(response: reqwest::Response) -> ServiceError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        ServiceError::Http { status, message }
    }
}
