use crate::utils::error::{ClientError, Result};
use reqwest::Method;
use std::fmt::Display;
use url::Url;

/// A single request against a server resource, built fresh for every call.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRequest {
    pub method: Method,
    pub url: Url,
    pub body: Option<String>,
}

impl ServiceRequest {
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            body: None,
        }
    }

    pub fn post(url: Url, body: String) -> Self {
        Self {
            method: Method::POST,
            url,
            body: Some(body),
        }
    }

    pub fn with_query(mut self, key: &str, value: impl Display) -> Self {
        self.url
            .query_pairs_mut()
            .append_pair(key, &value.to_string());
        self
    }

    /// Sets `key` to `value`, dropping any earlier pairs with the same key.
    pub fn with_replaced_query(mut self, key: &str, value: impl Display) -> Self {
        let kept: Vec<(String, String)> = self
            .url
            .query_pairs()
            .filter(|(k, _)| k != key)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        self.url.set_query(None);
        if !kept.is_empty() {
            self.url.query_pairs_mut().extend_pairs(kept);
        }
        self.with_query(key, value)
    }

    /// `None` values are left out of the query string.
    pub fn with_optional_query<T: Display>(self, key: &str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.with_query(key, value),
            None => self,
        }
    }

    /// Lists go out as `[a,b,c]`, which is how the REST services read array arguments.
    pub fn with_list_query<T: Display>(self, key: &str, values: &[T]) -> Self {
        let joined = values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.with_query(key, format!("[{}]", joined))
    }

    pub fn query_value(&self, key: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }
}

/// Appends path segments to a service URL, tolerating a trailing slash on the base.
///
/// Query pairs on the base (such as `?token=...`) are kept; operation parameters follow them.
pub fn resource_url(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.set_fragment(None);
    if url.query() == Some("") {
        url.set_query(None);
    }
    url.path_segments_mut()
        .map_err(|_| ClientError::InvalidParameter {
            field: "url".to_string(),
            reason: format!("'{}' cannot be used as a service base URL", base),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Query keys that carry credentials.
pub const CREDENTIAL_KEYS: [&str; 2] = ["token", "key"];

/// Renders `url` with every credential value masked, for printing and logging.
pub fn redact_credentials(url: &Url) -> String {
    if !url.query_pairs().any(|(k, _)| CREDENTIAL_KEYS.contains(&k.as_ref())) {
        return url.to_string();
    }
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let value = if CREDENTIAL_KEYS.contains(&k.as_ref()) {
                "***".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), value)
        })
        .collect();
    let mut masked = url.clone();
    masked.set_query(None);
    masked.query_pairs_mut().extend_pairs(pairs);
    masked.to_string()
}
