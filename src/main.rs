mod api;
mod config;
mod errors;
mod history;
mod models;
mod rates;

use api::{ApiServer, AppState};
use config::{Config, LogFormat};
use history::HistoryStore;
use rates::Country;
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.log_format);

    let state = AppState::new(HistoryStore::new(config.history_capacity));

    tracing::info!(
        "Score bridge starting: countries {} on port {}, keeping last {} conversions",
        Country::valid_codes(),
        config.api_port,
        state.history.capacity()
    );

    ApiServer::new(state).run(&config).await
}
