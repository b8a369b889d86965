use crate::core::request::ServiceRequest;
use crate::core::transport::HttpTransport;
use crate::domain::model::ServerType;
use crate::domain::ports::{ServiceOperation, Transport};
use crate::utils::error::{ClientError, Result};
use crate::utils::validation::validate_url;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Settings shared by every request a service sends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceOptions {
    pub server_type: ServerType,
    pub token: Option<String>,
    pub headers: HashMap<String, String>,
    pub timeout: Option<Duration>,
}

impl ServiceOptions {
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_server_type(mut self, server_type: ServerType) -> Self {
        self.server_type = server_type;
        self
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Base URL, options and transport of one REST service. Adapters wrap it and expose one
/// method per server operation.
#[derive(Clone)]
pub struct ServiceBase {
    url: Url,
    options: ServiceOptions,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for ServiceBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceBase")
            .field("url", &self.url.as_str())
            .field("server_type", &self.options.server_type)
            .finish_non_exhaustive()
    }
}

impl ServiceBase {
    pub fn new(url: &str, options: ServiceOptions) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(options.headers.clone(), options.timeout));
        Self::with_transport(url, options, transport)
    }

    pub fn with_transport(
        url: &str,
        options: ServiceOptions,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        Ok(Self {
            url: validate_url("url", url)?,
            options,
            transport,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn options(&self) -> &ServiceOptions {
        &self.options
    }

    /// The request `execute` would send, credentials included.
    pub fn prepare<O: ServiceOperation>(&self, params: &O) -> Result<ServiceRequest> {
        let request = params.build_request(&self.url)?;
        Ok(match &self.options.token {
            Some(token) => request.with_replaced_query(self.options.server_type.credential_key(), token),
            None => request,
        })
    }

    pub async fn execute<O: ServiceOperation>(&self, params: &O) -> Result<O::Output> {
        let request = self.prepare(params)?;
        tracing::debug!("{} {}", request.method, request.url.path());

        let payload = self.transport.send(request).await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Runs `execute` on the current tokio runtime and hands the outcome to `callback`,
    /// which is called exactly once. Without a runtime the callback gets `ClientError::Runtime`.
    pub fn process_async<O, F>(&self, params: O, callback: F)
    where
        O: ServiceOperation + 'static,
        F: FnOnce(Result<O::Output>) + Send + 'static,
    {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                callback(Err(ClientError::Runtime {
                    message: e.to_string(),
                }));
                return;
            }
        };

        let service = self.clone();
        handle.spawn(async move {
            let result = service.execute(&params).await;
            callback(result);
        });
    }
}
