use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::practicum::types::ApiResponse;
use crate::practicum::StatusSource;

pub struct PracticumClient {
    client: Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    pub fn new(endpoint: &str, token: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            token: token.to_string(),
        })
    }
}

#[async_trait]
impl StatusSource for PracticumClient {
    async fn fetch(&self, from_date: i64) -> Result<ApiResponse> {
        let from_date = if from_date == 0 {
            chrono::Utc::now().timestamp()
        } else {
            from_date
        };

        tracing::debug!(endpoint = %self.endpoint, from_date, "Requesting homework statuses");

        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(status = %status, from_date, "Homework API endpoint unavailable");
            return Err(AppError::EndpointUnavailable {
                status: status.as_u16(),
                from_date,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        let payload: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| AppError::Decoding(e.to_string()))?;

        Ok(ApiResponse::new(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const PATH: &str = "/api/user_api/homework_statuses/";

    fn client_for(server: &mockito::Server) -> PracticumClient {
        PracticumClient::new(
            &format!("{}{PATH}", server.url()),
            "secret",
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_sends_token_and_cursor() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", PATH)
            .match_header("authorization", "OAuth secret")
            .match_query(Matcher::UrlEncoded("from_date".into(), "1000".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"homeworks":[{"homework_name":"proj1","status":"approved"}],"current_date":2000}"#)
            .create_async()
            .await;

        let response = client_for(&server).fetch(1000).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.current_date, Some(2000));
        assert_eq!(response.payload["homeworks"][0]["homework_name"], "proj1");
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", PATH)
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let err = client_for(&server).fetch(1000).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::EndpointUnavailable {
                status: 503,
                from_date: 1000
            }
        ));
    }

    #[tokio::test]
    async fn test_fetch_invalid_json() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let err = client_for(&server).fetch(1000).await.unwrap_err();
        assert!(matches!(err, AppError::Decoding(_)));
    }

    #[tokio::test]
    async fn test_fetch_zero_cursor_uses_current_time() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", PATH)
            .match_query(Matcher::Regex(r"^from_date=\d{10}$".into()))
            .with_status(503)
            .create_async()
            .await;

        let before = chrono::Utc::now().timestamp();
        let err = client_for(&server).fetch(0).await.unwrap_err();
        let after = chrono::Utc::now().timestamp();

        mock.assert_async().await;
        match err {
            AppError::EndpointUnavailable { from_date, .. } => {
                assert!(from_date >= before && from_date <= after + 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_transport_error() {
        // Nothing listens on port 9 of the loopback interface.
        let client = PracticumClient::new(
            "http://127.0.0.1:9/homework_statuses/",
            "secret",
            Duration::from_secs(2),
        )
        .unwrap();

        let err = client.fetch(1000).await.unwrap_err();
        assert!(matches!(err, AppError::Transport(_)));
    }
}
