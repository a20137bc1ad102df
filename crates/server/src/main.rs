//! # salescast-server
//!
//! Serves the prediction and forecast pages. Configuration comes from the
//! environment, with an optional `.env` file loaded first.

use server::{serve, telemetry, ServerConfig};
use tracing::error;

#[tokio::main]
async fn main() {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    telemetry::init(telemetry::DEFAULT_FILTER);

    let result = match ServerConfig::from_env() {
        Ok(config) => serve(config).await,
        Err(err) => Err(err.into()),
    };

    if let Err(err) = result {
        error!("{err}");
        std::process::exit(1);
    }
}
