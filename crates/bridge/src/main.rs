use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::{mpsc, watch};
use tracing::{error, info};

mod config;
mod error;
mod jobs;
mod logging;
mod services;

use jobs::ProducerLoop;
use services::{Life360Client, SessionManager, Transmitter};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::load()?;

    // Initialize logging
    logging::init_logging(&config.logging);

    info!("Starting Circle Bridge v{}", env!("CARGO_PKG_VERSION"));

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.life360.request_timeout_secs))
        .build()?;

    // Authenticate once before the first cycle; a failure here is fatal.
    let session = SessionManager::new(client.clone(), &config.life360);
    let token = session.authenticate().await?;
    info!("Authenticated with location service");

    // Outbound queue: producer loop on one side, transmitter on the other.
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let transmitter = Transmitter::new(config.output.clone(), events_rx);
    let transmitter_handle = tokio::spawn(transmitter.run());

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let source = Life360Client::new(client, config.life360.base_url.clone(), &token);
    let producer = ProducerLoop::new(
        Arc::new(source),
        events_tx,
        config.poll.interval(),
        config.life360.fetch_all_circles,
        shutdown_rx,
    );
    let mut producer_handle = tokio::spawn(producer.run());

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Received interrupt, shutting down");
            let _ = shutdown_tx.send(true);
            producer_handle.await??;
        }
        result = &mut producer_handle => {
            if let Err(e) = result? {
                error!(error = %e, "Cycle failed; shutting down to avoid hammering the remote API");
                return Err(e.into());
            }
        }
    }

    // Producer gone, sender dropped: the transmitter drains and exits.
    transmitter_handle.await??;

    info!("Circle Bridge stopped");
    Ok(())
}
