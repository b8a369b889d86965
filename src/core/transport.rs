use crate::core::request::ServiceRequest;
use crate::domain::ports::Transport;
use crate::utils::error::{ClientError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;

/// `Transport` over reqwest. The client is pooled and shared by every service built on it.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    headers: HashMap<String, String>,
    timeout: Option<Duration>,
}

impl HttpTransport {
    pub fn new(headers: HashMap<String, String>, timeout: Option<Duration>) -> Self {
        Self {
            client: Client::new(),
            headers,
            timeout,
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(HashMap::new(), None)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ServiceRequest) -> Result<serde_json::Value> {
        let mut builder = self.client.request(request.method, request.url);

        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }

        if let Some(body) = request.body {
            builder = builder
                .header("Content-Type", "application/json")
                .body(body);
        }

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let payload = serde_json::from_str::<serde_json::Value>(&text).unwrap_or_default();
            let error = server_error(status.as_u16(), &payload).unwrap_or_else(|| {
                ClientError::server(
                    status.as_u16(),
                    i64::from(status.as_u16()),
                    status.canonical_reason().unwrap_or("request failed"),
                )
            });
            tracing::warn!("Server answered {}: {}", status, error);
            return Err(error);
        }

        let payload: serde_json::Value = serde_json::from_str(&text)?;
        if let Some(error) = server_error(status.as_u16(), &payload) {
            tracing::warn!("Server reported a failure: {}", error);
            return Err(error);
        }

        Ok(payload)
    }
}

/// Recognizes the server's error envelope `{"succeed": false, "error": {"code", "errorMsg"}}`.
pub fn server_error(status: u16, payload: &serde_json::Value) -> Option<ClientError> {
    if payload.get("succeed").and_then(|v| v.as_bool()) != Some(false) {
        return None;
    }

    let error = payload.get("error");
    let code = error
        .and_then(|e| e.get("code"))
        .and_then(|c| c.as_i64())
        .unwrap_or_else(|| i64::from(status));
    let message = error
        .and_then(|e| e.get("errorMsg"))
        .and_then(|m| m.as_str())
        .unwrap_or("the server reported a failure without a message");

    Some(ClientError::server(status, code, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_server_error_envelope() {
        let payload = json!({"succeed": false, "error": {"code": 400, "errorMsg": "参数错误"}});
        match server_error(200, &payload) {
            Some(ClientError::Server { status, code, message }) => {
                assert_eq!(status, 200);
                assert_eq!(code, 400);
                assert_eq!(message, "参数错误");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_success_payloads_pass() {
        assert!(server_error(200, &json!({"succeed": true, "newResourceID": "abc"})).is_none());
        assert!(server_error(200, &json!({"featureCount": 0})).is_none());
        assert!(server_error(200, &json!([{"name": "World"}])).is_none());
    }

    #[test]
    fn test_envelope_without_details() {
        let error = server_error(500, &json!({"succeed": false})).unwrap();
        assert!(matches!(error, ClientError::Server { code: 500, .. }));
    }
}
