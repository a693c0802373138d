//! Server configuration.
//!
//! All Google settings are threaded through an explicit struct rather than
//! read from the process environment inside the operations, so tests can
//! point the service at a stub API.

use sheets_connector::ServiceAccountKey;

/// Range fetched by the read operation.
pub const READ_RANGE: &str = "I2:J500";

/// Range overwritten by the write operation.
pub const WRITE_RANGE: &str = "Sheet1";

#[derive(Debug, Clone)]
pub struct SheetsConfig {
    pub service_account: ServiceAccountKey,
    pub spreadsheet_id: String,
    /// Sheets API base URL override. `None` uses the connector default.
    pub api_base: Option<String>,
    /// OAuth2 token endpoint override. `None` uses the connector default.
    pub token_uri: Option<String>,
}
