//! Command-line driver for donation attestations.
//!
//! Builds yearly or single-donation attestations and thank-you letters,
//! writes them as JSON documents and flags the covered donations as sent
//! once the file exists.

mod cli;
mod render;

use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dons_shared::AppError;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dons=debug,attest=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let app = err.downcast_ref::<AppError>();
            let code = app.map_or(1, AppError::exit_code);
            error!(
                code = app.map_or("INTERNAL_ERROR", AppError::error_code),
                "{err:#}"
            );
            eprintln!("error: {err:#}");
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
