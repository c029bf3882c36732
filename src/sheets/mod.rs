// src/sheets/mod.rs

use async_trait::async_trait;

pub mod auth;
pub mod fetch;
pub mod types;

pub use auth::{CredentialProvider, GoogleCredentials, StaticToken};
pub use fetch::SheetFetcher;
pub use types::Grid;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("credential provider failed: {0}")]
    Credentials(String),

    #[error(
        "sheets api returned {status}: {}",
        .message.as_deref().unwrap_or("no message")
    )]
    Api {
        status: reqwest::StatusCode,
        message: Option<String>,
    },

    #[error("request to sheets api failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("cannot build values url from {0}")]
    Url(String),
}

impl FetchError {
    /// The message the backend supplied, if any. This is the only detail of
    /// a failure that is ever shown to clients.
    pub fn message(&self) -> Option<&str> {
        match self {
            FetchError::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Something that can produce the grid the proxy publishes.
#[async_trait]
pub trait GridSource: Send + Sync {
    async fn fetch_grid(&self) -> Result<Option<Grid>, FetchError>;
}
