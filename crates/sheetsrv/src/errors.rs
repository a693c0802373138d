use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use sheets_connector::errors::SheetsError;
use tracing::error;

/// Failure taxonomy for the sheet endpoint.
///
/// Diagnostic detail is kept in the log only. Responses carry a fixed
/// human-readable message per variant, so callers cannot distinguish
/// upstream failure causes from the response alone.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to parse request body: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid values grid: {0}")]
    InvalidGrid(String),

    #[error("authorization failed: {0}")]
    Auth(#[source] SheetsError),

    #[error("fetch failed: {0}")]
    Fetch(#[source] SheetsError),

    #[error("write failed: {0}")]
    Write(#[source] SheetsError),
}

pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            ServerError::Parse(_) | ServerError::InvalidGrid(_) => StatusCode::BAD_REQUEST,
            ServerError::Auth(_) | ServerError::Fetch(_) | ServerError::Write(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            ServerError::Parse(_) => "Invalid request body",
            ServerError::InvalidGrid(_) => "Invalid values grid",
            ServerError::Auth(_) => "Failed to authorize with Google Sheets",
            ServerError::Fetch(_) => "Failed to fetch data from Google Sheets",
            ServerError::Write(_) => "Failed to write data to Google Sheets",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        error!(error = %self, "sheet request failed");
        let body = Json(json!({ "error": self.public_message() }));
        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_grid_errors_are_client_errors() {
        let parse = ServerError::Parse(serde_json::from_str::<()>("{").unwrap_err());
        assert_eq!(parse.status(), StatusCode::BAD_REQUEST);
        assert_eq!(parse.public_message(), "Invalid request body");

        let grid = ServerError::InvalidGrid("ragged".into());
        assert_eq!(grid.status(), StatusCode::BAD_REQUEST);
        assert_eq!(grid.public_message(), "Invalid values grid");
    }

    #[test]
    fn upstream_errors_keep_fixed_messages() {
        let auth = ServerError::Auth(SheetsError::InvalidKey("missing key".into()));
        assert_eq!(auth.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            auth.public_message(),
            "Failed to authorize with Google Sheets"
        );

        let fetch = ServerError::Fetch(SheetsError::UrlParseError("bad".into()));
        assert_eq!(fetch.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            fetch.public_message(),
            "Failed to fetch data from Google Sheets"
        );

        let write = ServerError::Write(SheetsError::UrlParseError("bad".into()));
        assert_eq!(
            write.public_message(),
            "Failed to write data to Google Sheets"
        );
    }
}
