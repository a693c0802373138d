//! Connector for the Google Sheets v4 values API.
//!
//! Covers service account authentication (RS256 JWT exchanged for an OAuth2
//! access token) and the two values operations this service needs: get and
//! update.

pub mod errors;

mod client;
mod credentials;

#[cfg(test)]
pub(crate) mod testutil;

pub use client::{
    SPREADSHEETS_SCOPE, SheetsClient, SheetsClientBuilder, UpdateValuesResponse, ValueGrid,
    ValueRange,
};
pub use credentials::{AccessToken, ServiceAccountKey};
