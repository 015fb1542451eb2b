//! Process error taxonomy.
//!
//! The variants distinguish authentication, transport, and response-shape
//! failures so diagnostics stay precise, but the propagation policy collapses
//! them: any error during a cycle aborts the whole process. No retry or
//! backoff exists anywhere in the loop; shutting down immediately keeps a
//! misbehaving deployment from hammering the remote API.

use domain::services::SourceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Circle source error: {0}")]
    Source(#[from] SourceError),

    #[error("Event serialization failed: {0}")]
    Cot(#[from] domain::models::cot::CotError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Outbound queue closed")]
    QueueClosed,
}
