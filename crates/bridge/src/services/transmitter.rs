//! Outbound event transmitter.
//!
//! Drains the outbound queue and delivers each serialized event, newline
//! terminated, to the configured sink. Delivery transport is intentionally
//! minimal: one TCP connection for the life of the process, or stdout in
//! console mode. The first I/O error is fatal, matching the producer's
//! fail-fast policy.

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info};

use crate::config::OutputConfig;
use crate::error::BridgeError;

/// Consumer half of the outbound queue.
pub struct Transmitter {
    config: OutputConfig,
    events_rx: UnboundedReceiver<Vec<u8>>,
}

impl Transmitter {
    pub fn new(config: OutputConfig, events_rx: UnboundedReceiver<Vec<u8>>) -> Self {
        Self { config, events_rx }
    }

    /// Run until the producer drops its sender.
    pub async fn run(self) -> Result<(), BridgeError> {
        match self.config.mode.as_str() {
            "tcp" => self.run_tcp().await,
            _ => self.run_console().await,
        }
    }

    /// Console mode: write events to stdout (development).
    async fn run_console(mut self) -> Result<(), BridgeError> {
        let mut stdout = tokio::io::stdout();
        while let Some(event) = self.events_rx.recv().await {
            stdout.write_all(&event).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }
        debug!("Outbound queue drained, transmitter exiting");
        Ok(())
    }

    /// TCP mode: one connection, newline-delimited events.
    async fn run_tcp(mut self) -> Result<(), BridgeError> {
        let addr = self.config.target_addr();
        let mut stream = TcpStream::connect(&addr).await?;
        info!(target = %addr, "Connected to event consumer");

        while let Some(event) = self.events_rx.recv().await {
            stream.write_all(&event).await?;
            stream.write_all(b"\n").await?;
        }
        stream.flush().await?;
        debug!("Outbound queue drained, transmitter exiting");
        Ok(())
    }
}
