//! Circle source abstraction.
//!
//! The producer loop is written against this trait; the HTTP client in the
//! bridge crate is the production implementation, and [`MockCircleSource`]
//! serves tests and development.

use crate::models::circle::{Circle, CircleSummary};

/// Errors a circle source can surface.
///
/// The variants are distinguished for diagnostics, but the current policy
/// treats every one of them as fatal for the process: the producer loop
/// aborts on the first failure rather than retrying or skipping a cycle.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Read access to the remote location-sharing service.
#[async_trait::async_trait]
pub trait CircleSource: Send + Sync {
    /// List every circle the account belongs to.
    async fn list_circles(&self) -> Result<Vec<CircleSummary>, SourceError>;

    /// Fetch one circle's members and their current locations.
    async fn fetch_circle(&self, circle_id: &str) -> Result<Circle, SourceError>;
}

/// In-memory circle source for development and testing.
#[derive(Debug, Clone, Default)]
pub struct MockCircleSource {
    pub circles: Vec<Circle>,
    /// When set, `fetch_circle` fails for this circle id.
    pub fail_on: Option<String>,
}

impl MockCircleSource {
    /// Create a mock serving the given circles.
    pub fn new(circles: Vec<Circle>) -> Self {
        Self {
            circles,
            fail_on: None,
        }
    }

    /// Create a mock whose `fetch_circle` fails for the given circle id.
    pub fn failing_on(circles: Vec<Circle>, circle_id: &str) -> Self {
        Self {
            circles,
            fail_on: Some(circle_id.to_string()),
        }
    }
}

#[async_trait::async_trait]
impl CircleSource for MockCircleSource {
    async fn list_circles(&self) -> Result<Vec<CircleSummary>, SourceError> {
        Ok(self
            .circles
            .iter()
            .map(|c| CircleSummary {
                id: c.id.clone(),
                name: c.name.clone(),
            })
            .collect())
    }

    async fn fetch_circle(&self, circle_id: &str) -> Result<Circle, SourceError> {
        if self.fail_on.as_deref() == Some(circle_id) {
            tracing::warn!(circle_id = %circle_id, "Mock circle source simulating failure");
            return Err(SourceError::Network("simulated failure".to_string()));
        }

        self.circles
            .iter()
            .find(|c| c.id == circle_id)
            .cloned()
            .ok_or_else(|| SourceError::MalformedResponse(format!("no such circle: {circle_id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::circle::Member;

    fn circles() -> Vec<Circle> {
        vec![Circle {
            id: "c-1".to_string(),
            name: "Family".to_string(),
            members: vec![Member {
                id: "m-1".to_string(),
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                login_phone: "+15551234567".to_string(),
                location: None,
            }],
        }]
    }

    #[tokio::test]
    async fn test_mock_lists_and_fetches() {
        let source = MockCircleSource::new(circles());
        let listed = source.list_circles().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Family");

        let circle = source.fetch_circle("c-1").await.unwrap();
        assert_eq!(circle.members.len(), 1);
    }

    #[tokio::test]
    async fn test_mock_unknown_circle_is_malformed() {
        let source = MockCircleSource::new(circles());
        let err = source.fetch_circle("c-404").await.unwrap_err();
        assert!(matches!(err, SourceError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_mock_simulated_failure() {
        let source = MockCircleSource::failing_on(circles(), "c-1");
        let err = source.fetch_circle("c-1").await.unwrap_err();
        assert!(matches!(err, SourceError::Network(_)));
    }
}
