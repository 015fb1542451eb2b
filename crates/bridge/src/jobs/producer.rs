//! Event producer loop.
//!
//! One logical task: resolve the circle set, project members with a known
//! location into position reports, serialize each report as a CoT event, and
//! push the events onto the outbound queue; then sleep for the poll interval
//! and repeat. Any failure anywhere in a cycle aborts the loop (and with it
//! the process) rather than retrying or skipping, to keep a misconfigured
//! deployment from spamming the remote API.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use domain::models::{CotEvent, PositionReport};
use domain::services::CircleSource;
use tokio::sync::{mpsc::UnboundedSender, watch};
use tracing::info;

use crate::error::BridgeError;

/// The repeating poll-transform-enqueue task.
pub struct ProducerLoop {
    source: Arc<dyn CircleSource>,
    events_tx: UnboundedSender<Vec<u8>>,
    poll_interval: Duration,
    fetch_all_circles: bool,
    shutdown_rx: watch::Receiver<bool>,
}

impl ProducerLoop {
    pub fn new(
        source: Arc<dyn CircleSource>,
        events_tx: UnboundedSender<Vec<u8>>,
        poll_interval: Duration,
        fetch_all_circles: bool,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            source,
            events_tx,
            poll_interval,
            fetch_all_circles,
            shutdown_rx,
        }
    }

    /// Run cycles until shutdown is signalled or a cycle fails.
    ///
    /// Cancellation is observed at the top of each cycle and at the sleep
    /// boundary; a signal arriving mid-cycle takes effect at the next
    /// boundary.
    pub async fn run(mut self) -> Result<(), BridgeError> {
        loop {
            if *self.shutdown_rx.borrow() {
                info!("Shutdown signalled, producer loop exiting");
                return Ok(());
            }

            let cycle_start = Utc::now();
            let produced = run_cycle(
                self.source.as_ref(),
                &self.events_tx,
                self.fetch_all_circles,
                self.poll_interval,
                cycle_start,
            )
            .await?;

            info!(
                members = produced,
                next_check_mins = self.poll_interval.as_secs() / 60,
                "Updated member positions"
            );

            tokio::select! {
                _ = tokio::time::sleep(self.poll_interval) => {}
                _ = self.shutdown_rx.changed() => {
                    if *self.shutdown_rx.borrow() {
                        info!("Shutdown signalled, producer loop exiting");
                        return Ok(());
                    }
                }
            }
        }
    }
}

/// Run one poll cycle; returns the number of events enqueued.
///
/// `now` is the cycle start time: every event of the cycle carries it as
/// time/start, and `now` + the poll interval as stale, so exactly one event's
/// validity window bridges to the next cycle.
pub async fn run_cycle(
    source: &dyn CircleSource,
    events_tx: &UnboundedSender<Vec<u8>>,
    fetch_all_circles: bool,
    poll_interval: Duration,
    now: DateTime<Utc>,
) -> Result<usize, BridgeError> {
    let summaries = source.list_circles().await?;

    let mut circles = Vec::new();
    if fetch_all_circles {
        for summary in &summaries {
            circles.push(source.fetch_circle(&summary.id).await?);
        }
    } else {
        let first = summaries.first().ok_or_else(|| {
            BridgeError::MalformedResponse("account belongs to no circles".to_string())
        })?;
        circles.push(source.fetch_circle(&first.id).await?);
    }

    let reports = PositionReport::collect(&circles);
    for report in &reports {
        let xml = CotEvent::from_report(report, now, poll_interval).to_xml()?;
        events_tx
            .send(xml.into_bytes())
            .map_err(|_| BridgeError::QueueClosed)?;
    }

    Ok(reports.len())
}
