use crate::core::request::ServiceRequest;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

/// Conversion of a client object into the JSON object the server expects.
pub trait ToServerJson {
    fn to_server_json(&self) -> Result<serde_json::Value>;

    fn to_json_parameters(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_server_json()?)?)
    }
}

/// Resets every reference field. Calling it more than once is a no-op.
pub trait Destroyable {
    fn destroy(&mut self);
}

/// A parameter object that knows which server resource it targets and how the answer looks.
pub trait ServiceOperation: Send + Sync {
    type Output: DeserializeOwned + Send + 'static;

    fn build_request(&self, service_url: &Url) -> Result<ServiceRequest>;
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ServiceRequest) -> Result<serde_json::Value>;
}

/// Serializes a plain `Serialize` value; used by the style and layer types whose
/// field layout already matches the server form.
pub(crate) fn to_server_value<T: Serialize>(value: &T) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(value)?)
}
