use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::trace;
use url::Url;

use crate::credentials::ServiceAccountKey;
use crate::errors::{Result, SheetsError};

const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com";
const OAUTH_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Permission set requested when exchanging the service account JWT.
pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// Rows-of-cells representation of spreadsheet content.
pub type ValueGrid = Vec<Vec<serde_json::Value>>;

/// Wire shape the values API uses in both directions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(rename = "majorDimension", skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<String>,
    /// Absent when the requested range holds no values. An empty range is
    /// not distinguishable from a missing one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<ValueGrid>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateValuesResponse {
    #[serde(rename = "spreadsheetId")]
    pub spreadsheet_id: Option<String>,
    #[serde(rename = "updatedRange")]
    pub updated_range: Option<String>,
    #[serde(rename = "updatedRows")]
    pub updated_rows: Option<u32>,
    #[serde(rename = "updatedColumns")]
    pub updated_columns: Option<u32>,
    #[serde(rename = "updatedCells")]
    pub updated_cells: Option<u32>,
}

#[derive(Debug)]
pub struct SheetsClientBuilder {
    base_url: String,
    token_uri: String,
    timeout: Option<Duration>,
}

impl Default for SheetsClientBuilder {
    fn default() -> Self {
        SheetsClientBuilder {
            base_url: SHEETS_API_BASE.to_string(),
            token_uri: OAUTH_TOKEN_URI.to_string(),
            timeout: None,
        }
    }
}

impl SheetsClientBuilder {
    /// Override the Sheets API base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the OAuth2 token endpoint.
    pub fn token_uri(mut self, token_uri: impl Into<String>) -> Self {
        self.token_uri = token_uri.into();
        self
    }

    #[allow(unused)]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Resolve the credential and build an authenticated client.
    ///
    /// Performs the token exchange over the network; the returned client
    /// holds a bearer token valid for roughly an hour and is meant to live
    /// for a single request sequence, not to be cached.
    pub async fn connect(self, key: &ServiceAccountKey) -> Result<SheetsClient> {
        let mut builder = reqwest::Client::builder().user_agent(APP_USER_AGENT);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        let token = key
            .fetch_access_token(&http, &self.token_uri, SPREADSHEETS_SCOPE)
            .await?;

        let base_url =
            Url::parse(&self.base_url).map_err(|e| SheetsError::UrlParseError(format!("{e}")))?;

        Ok(SheetsClient {
            http,
            base_url,
            access_token: token.access_token,
        })
    }
}

/// Client to the Sheets v4 values API.
#[derive(Debug, Clone)]
pub struct SheetsClient {
    http: reqwest::Client,
    base_url: Url,
    access_token: String,
}

impl SheetsClient {
    pub fn builder() -> SheetsClientBuilder {
        SheetsClientBuilder::default()
    }

    /// Fetch a range of values. Returns `None` when the range is empty.
    pub async fn values_get(&self, spreadsheet_id: &str, range: &str) -> Result<Option<ValueGrid>> {
        let url = self.values_url(spreadsheet_id, range)?;
        let resp = self
            .http
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(SheetsError::HttpError(resp.status()));
        }

        let body: ValueRange = resp.json().await?;
        trace!(range = ?body.range, "values.get response");
        Ok(body.values)
    }

    /// Overwrite a range with the given grid.
    ///
    /// Prior contents of the range are replaced, not merged. The
    /// USER_ENTERED input option lets the service convert numeric strings
    /// and formulas the way manual entry would, instead of storing
    /// literals.
    pub async fn values_update(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: ValueGrid,
    ) -> Result<UpdateValuesResponse> {
        let url = self.values_url(spreadsheet_id, range)?;
        let body = ValueRange {
            range: None,
            major_dimension: None,
            values: Some(values),
        };
        let resp = self
            .http
            .put(url)
            .bearer_auth(&self.access_token)
            .query(&[("valueInputOption", "USER_ENTERED")])
            .json(&body)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(SheetsError::HttpError(resp.status()));
        }

        let updated: UpdateValuesResponse = resp.json().await?;
        trace!(range = ?updated.updated_range, "values.update response");
        Ok(updated)
    }

    fn values_url(&self, spreadsheet_id: &str, range: &str) -> Result<Url> {
        self.base_url
            .join(&format!("v4/spreadsheets/{spreadsheet_id}/values/{range}"))
            .map_err(|e| SheetsError::UrlParseError(format!("{e}")))
    }
}
