//! HTTP implementation of the circle source.

use domain::models::{Circle, CircleSummary, CirclesResponse};
use domain::services::{CircleSource, SourceError};
use reqwest::Client;

use crate::services::session::AccessToken;

const CIRCLES_ENDPOINT: &str = "circles/";

/// Authorized client for the circles endpoints.
///
/// Holds the bearer credential for the life of the process; requests are
/// issued one at a time by the producer loop.
pub struct Life360Client {
    client: Client,
    base_url: String,
    auth_header: String,
}

impl Life360Client {
    pub fn new(client: Client, base_url: String, token: &AccessToken) -> Self {
        Self {
            client,
            base_url,
            auth_header: format!("bearer {}", token.as_str()),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, SourceError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
            .header(reqwest::header::ACCEPT, "application/json")
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(SourceError::Auth(format!(
                "request to {url} rejected with status {status}"
            )));
        }
        if !status.is_success() {
            return Err(SourceError::Network(format!(
                "request to {url} failed with status {status}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| SourceError::MalformedResponse(e.to_string()))
    }
}

#[async_trait::async_trait]
impl CircleSource for Life360Client {
    async fn list_circles(&self) -> Result<Vec<CircleSummary>, SourceError> {
        let url = format!("{}{}", self.base_url, CIRCLES_ENDPOINT);
        let response: CirclesResponse = self.get_json(&url).await?;
        Ok(response.circles)
    }

    async fn fetch_circle(&self, circle_id: &str) -> Result<Circle, SourceError> {
        let url = format!("{}{}{}", self.base_url, CIRCLES_ENDPOINT, circle_id);
        self.get_json(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    async fn serve_once(status_line: &'static str, body: &'static str) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf).await;
            let response = format!(
                "{status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len(),
            );
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        });
        addr
    }

    fn client_for(addr: SocketAddr) -> Life360Client {
        Life360Client {
            client: Client::new(),
            base_url: format!("http://{addr}/"),
            auth_header: "bearer tok-123".to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_circles_parses_response() {
        let addr = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"circles": [{"id": "c-1", "name": "Family"}]}"#,
        )
        .await;
        let circles = client_for(addr).list_circles().await.unwrap();
        assert_eq!(circles.len(), 1);
        assert_eq!(circles[0].id, "c-1");
    }

    #[tokio::test]
    async fn test_missing_circles_field_is_malformed() {
        let addr = serve_once("HTTP/1.1 200 OK", r#"{"unexpected": []}"#).await;
        let err = client_for(addr).list_circles().await.unwrap_err();
        assert!(matches!(err, SourceError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_unauthorized_is_auth_failure() {
        let addr = serve_once("HTTP/1.1 401 Unauthorized", "{}").await;
        let err = client_for(addr).list_circles().await.unwrap_err();
        assert!(matches!(err, SourceError::Auth(_)));
    }

    #[tokio::test]
    async fn test_fetch_circle_parses_members() {
        let addr = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"id": "c-1", "name": "Family", "members": [
                {"id": "m-1", "firstName": "Ada", "lastName": "Lovelace",
                 "loginPhone": "+15551234567",
                 "location": {"latitude": 37.7749, "longitude": -122.4194, "battery": "88"}}
            ]}"#,
        )
        .await;
        let circle = client_for(addr).fetch_circle("c-1").await.unwrap();
        assert_eq!(circle.name, "Family");
        assert_eq!(circle.members.len(), 1);
    }
}
