use anyhow::Result;
use clap::{Parser, ValueEnum};
use sheets_connector::ServiceAccountKey;
use sheetsrv::config::SheetsConfig;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum LoggingMode {
    #[default]
    Pretty,
    Json,
    Compact,
}

impl From<LoggingMode> for logutil::LoggingMode {
    fn from(mode: LoggingMode) -> Self {
        match mode {
            LoggingMode::Pretty => logutil::LoggingMode::Pretty,
            LoggingMode::Json => logutil::LoggingMode::Json,
            LoggingMode::Compact => logutil::LoggingMode::Compact,
        }
    }
}

#[derive(Parser)]
#[clap(name = "sheetsrv")]
#[clap(version)]
#[clap(about = "HTTP proxy for a fixed Google Sheets range", long_about = None)]
struct Cli {
    /// Log verbosity.
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log output format.
    #[clap(long, value_enum)]
    log_mode: Option<LoggingMode>,

    /// TCP address to bind the HTTP interface to.
    #[clap(short, long, default_value = "0.0.0.0:8080")]
    bind: String,

    /// OAuth client id of the service account.
    #[clap(long, env = "GOOGLE_CLIENT_ID", hide_env_values = true)]
    client_id: String,

    /// Email address of the service account.
    #[clap(long, env = "GOOGLE_CLIENT_EMAIL")]
    client_email: String,

    /// PEM private key of the service account.
    ///
    /// Literal `\n` sequences are converted to real newlines, so the key
    /// can be passed through a single-line environment variable.
    #[clap(long, env = "GOOGLE_PRIVATE_KEY", hide_env_values = true)]
    private_key: String,

    /// Identifier of the target spreadsheet.
    #[clap(long, env = "SHEET_ID")]
    spreadsheet_id: String,

    /// Override the Sheets API base URL.
    ///
    /// (Internal)
    #[clap(long, hide = true)]
    api_base: Option<String>,

    /// Override the OAuth2 token endpoint.
    ///
    /// (Internal)
    #[clap(long, hide = true)]
    token_uri: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logutil::init(cli.verbose, cli.log_mode.unwrap_or_default().into());

    info!(version = env!("CARGO_PKG_VERSION"), "starting sheetsrv");

    let config = SheetsConfig {
        service_account: ServiceAccountKey::new(
            cli.client_id,
            cli.client_email,
            &cli.private_key,
        ),
        spreadsheet_id: cli.spreadsheet_id,
        api_base: cli.api_base,
        token_uri: cli.token_uri,
    };

    let app = sheetsrv::app(config)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = TcpListener::bind(cli.bind.as_str()).await?;
    info!(addr = %cli.bind, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
