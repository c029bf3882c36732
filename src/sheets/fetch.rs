// src/sheets/fetch.rs

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client};
use std::{sync::Arc, time::Duration};
use tracing::{debug, instrument};
use url::Url;

use super::{
    auth::CredentialProvider,
    types::{ErrorEnvelope, Grid, ValueRange},
    FetchError, GridSource,
};
use crate::config::ProxyConfig;

/// Reads one fixed spreadsheet range through the Sheets v4 values API.
pub struct SheetFetcher {
    client: Client,
    credentials: Arc<dyn CredentialProvider>,
    spreadsheet_id: String,
    range: String,
    api_base: Url,
    timeout: Option<Duration>,
}

impl SheetFetcher {
    pub fn new(
        client: Client,
        credentials: Arc<dyn CredentialProvider>,
        config: ProxyConfig,
    ) -> Self {
        Self {
            client,
            credentials,
            spreadsheet_id: config.spreadsheet_id,
            range: config.range,
            api_base: config.api_base,
            timeout: config.timeout,
        }
    }

    /// One `values.get` call, no retries. `Ok(None)` means the range was empty.
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch_range(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<Option<Grid>, FetchError> {
        let url = values_url(&self.api_base, spreadsheet_id, range)?;
        let authorization = self.credentials.authorization().await?;

        debug!(%url, "GET sheet values");
        let mut request = self.client.get(url).header(AUTHORIZATION, authorization);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let envelope = ErrorEnvelope::from_body(&body);
            if let Some(env) = &envelope {
                debug!(
                    code = ?env.error.code,
                    api_status = ?env.error.status,
                    "sheets api error body"
                );
            }
            return Err(FetchError::Api {
                status,
                message: envelope.and_then(ErrorEnvelope::into_message),
            });
        }

        let value_range: ValueRange = response.json().await?;
        debug!(
            range = ?value_range.range,
            major_dimension = ?value_range.major_dimension,
            rows = value_range.values.as_ref().map_or(0, Vec::len),
            "fetched sheet values"
        );
        Ok(value_range.values)
    }
}

#[async_trait]
impl GridSource for SheetFetcher {
    async fn fetch_grid(&self) -> Result<Option<Grid>, FetchError> {
        self.fetch_range(&self.spreadsheet_id, &self.range).await
    }
}

/// `{base}/v4/spreadsheets/{id}/values/{range}`, with id and range encoded as
/// single path segments.
fn values_url(base: &Url, spreadsheet_id: &str, range: &str) -> Result<Url, FetchError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| FetchError::Url(base.to_string()))?
        .pop_if_empty()
        .extend(["v4", "spreadsheets", spreadsheet_id, "values", range]);
    Ok(url)
}
