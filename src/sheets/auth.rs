// src/sheets/auth.rs

use async_trait::async_trait;
use google_cloud_auth::{project::Config, token::DefaultTokenSourceProvider};
use google_cloud_token::{TokenSource, TokenSourceProvider};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::debug;

use super::FetchError;

/// Read-only access is all the proxy ever needs.
pub const SHEETS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";

const SCOPES: [&str; 1] = [SHEETS_READONLY_SCOPE];

/// Hands out a ready-to-send `Authorization` header value.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn authorization(&self) -> Result<String, FetchError>;
}

/// Application Default Credentials: the metadata server on Cloud Run, or
/// `GOOGLE_APPLICATION_CREDENTIALS` / gcloud ADC locally.
///
/// Discovery runs on the first request rather than at startup, so a broken
/// credential setup surfaces as a failed request. A failed discovery is
/// retried on the next request.
#[derive(Default)]
pub struct GoogleCredentials {
    source: OnceCell<Arc<dyn TokenSource>>,
}

impl GoogleCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    async fn token_source(&self) -> Result<&Arc<dyn TokenSource>, FetchError> {
        self.source
            .get_or_try_init(|| async {
                let config = Config::default().with_scopes(&SCOPES);
                let provider = DefaultTokenSourceProvider::new(config)
                    .await
                    .map_err(|e| FetchError::Credentials(e.to_string()))?;
                debug!(scope = SHEETS_READONLY_SCOPE, "loaded default credentials");
                Ok(provider.token_source())
            })
            .await
    }
}

#[async_trait]
impl CredentialProvider for GoogleCredentials {
    async fn authorization(&self) -> Result<String, FetchError> {
        // The token source refreshes and caches; the value already carries its
        // `Bearer` prefix.
        self.token_source()
            .await?
            .token()
            .await
            .map_err(|e| FetchError::Credentials(e.to_string()))
    }
}

/// A fixed header value, for local development against an emulator.
#[derive(Debug, Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn bearer(token: &str) -> Self {
        Self(format!("Bearer {}", token))
    }
}

#[async_trait]
impl CredentialProvider for StaticToken {
    async fn authorization(&self) -> Result<String, FetchError> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_token() {
        let token = StaticToken::bearer("abc");
        assert_eq!(token.authorization().await.unwrap(), "Bearer abc");
    }

    #[tokio::test]
    async fn test_missing_credentials_file_fails_per_request() {
        std::env::set_var(
            "GOOGLE_APPLICATION_CREDENTIALS",
            "/nonexistent/sheetproxy-test/credentials.json",
        );

        // Construction never touches the environment.
        let creds = GoogleCredentials::new();

        for _ in 0..2 {
            let err = creds.authorization().await.unwrap_err();
            assert!(matches!(err, FetchError::Credentials(_)));
            assert_eq!(err.message(), None);
        }
        assert!(creds.source.get().is_none());
    }
}
