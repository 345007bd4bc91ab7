use crate::domain::model::{DispatchedResponse, PreparedRequest};
use crate::domain::ports::Dispatcher;
use crate::utils::error::{Result, RowcallError};
use async_trait::async_trait;
use reqwest::{Client, Method};

/// Sends prepared requests with reqwest. No timeout is set, so a stalled
/// server stalls the run.
#[derive(Debug, Clone, Default)]
pub struct ReqwestDispatcher {
    client: Client,
}

impl ReqwestDispatcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Dispatcher for ReqwestDispatcher {
    async fn dispatch(&self, request: &PreparedRequest) -> Result<DispatchedResponse> {
        let method = Method::from_bytes(request.method.as_bytes()).map_err(|e| {
            RowcallError::RequestBuildError {
                message: format!("invalid method '{}': {}", request.method, e),
            }
        })?;

        let mut builder = self
            .client
            .request(method, &request.url)
            .query(&request.query)
            .body(request.body.clone());

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        tracing::debug!("Response headers: {:?}", response.headers());

        let body = response.text().await?;
        Ok(DispatchedResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn request(method: &str, url: String) -> PreparedRequest {
        PreparedRequest {
            method: method.to_string(),
            url,
            headers: vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                ("Auth".to_string(), "secret".to_string()),
            ],
            query: vec![
                ("city".to_string(), "São Paulo".to_string()),
                ("id".to_string(), "7".to_string()),
            ],
            body: r#"{"name":"alice"}"#.to_string(),
        }
    }

    #[tokio::test]
    async fn test_dispatch_sends_headers_query_and_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/svc")
                .header("Auth", "secret")
                .query_param("city", "São Paulo")
                .query_param("id", "7")
                .body(r#"{"name":"alice"}"#);
            then.status(201).body("created");
        });

        let response = ReqwestDispatcher::new()
            .dispatch(&request("POST", server.url("/svc")))
            .await
            .unwrap();

        mock.assert();
        assert_eq!(response.status, 201);
        assert_eq!(response.body, "created");
    }

    #[tokio::test]
    async fn test_error_status_is_still_a_response() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/svc");
            then.status(500).body("boom");
        });

        let response = ReqwestDispatcher::new()
            .dispatch(&request("GET", server.url("/svc")))
            .await
            .unwrap();

        assert_eq!(response.status, 500);
        assert_eq!(response.body, "boom");
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let err = ReqwestDispatcher::new()
            .dispatch(&request("GET", "http://127.0.0.1:1/svc".to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, RowcallError::NetworkError(_)));
    }

    #[tokio::test]
    async fn test_invalid_method_is_rejected_before_sending() {
        let err = ReqwestDispatcher::new()
            .dispatch(&request("BAD METHOD", "http://127.0.0.1:1/svc".to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, RowcallError::RequestBuildError { .. }));
    }
}
