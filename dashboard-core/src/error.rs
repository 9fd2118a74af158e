use reqwest::StatusCode;
use thiserror::Error;

/// Shown whenever a request could not complete or its body could not be read.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";

/// Everything that can go wrong while serving a user action.
///
/// None of these are fatal: components catch them where the action was issued
/// and turn them into a [`Notification`](crate::Notification).
#[derive(Debug, Error)]
pub enum DashboardError {
    /// A required field was empty. Raised before any request is sent.
    #[error("{0}")]
    Validation(String),

    /// No session token is stored, so an authenticated call cannot be made.
    #[error("Not logged in")]
    Unauthenticated,

    /// The backend answered with a non-2xx status.
    #[error("Backend rejected the request with status {status}")]
    Api {
        status: StatusCode,
        /// The `detail` field of the error body, if the backend sent one.
        message: Option<String>,
    },

    #[error("Request could not be completed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to decode backend response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Session storage failed: {0:#}")]
    Session(anyhow::Error),
}

impl DashboardError {
    /// Message to show the user, with `fallback` used when the backend
    /// rejected the request without explaining why.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            DashboardError::Validation(msg) => msg.clone(),
            DashboardError::Unauthenticated => "Please log in first".to_string(),
            DashboardError::Api { message, .. } => {
                message.clone().unwrap_or_else(|| fallback.to_string())
            }
            DashboardError::Network(_) | DashboardError::Decode(_) => {
                NETWORK_ERROR_MESSAGE.to_string()
            }
            DashboardError::Session(err) => format!("Could not access the saved session: {err}"),
        }
    }
}
