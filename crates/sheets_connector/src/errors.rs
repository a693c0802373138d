#[derive(Debug, thiserror::Error)]
pub enum SheetsError {
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),

    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    UrlParseError(String),

    #[error("Invalid private key: {0}")]
    InvalidKey(String),

    #[error("Token exchange errored with status code: {0}")]
    TokenExchange(reqwest::StatusCode),

    #[error("Request errored with status code: {0}")]
    HttpError(reqwest::StatusCode),
}

pub type Result<T, E = SheetsError> = std::result::Result<T, E>;
