//! Per-request options passed to [`SessionManager::dispatch`](super::SessionManager::dispatch).

use serde::Serialize;

use crate::Result;
use crate::error::InvalidInputError;
use crate::types::{Headers, Method};

/// Method, extra headers, query and JSON body of one dispatch.
///
/// The same options are re-sent unchanged when a request is retried after
/// a token refresh.
///
/// # Example
///
/// ```
/// use authsvc_core::RequestOptions;
///
/// # fn example() -> authsvc_core::Result<()> {
/// let options = RequestOptions::post()
///     .header("X-Request-Id", "42")
///     .json(&serde_json::json!({"website_id": "abc"}))?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    method: Method,
    headers: Vec<(String, String)>,
    query: Vec<(String, String)>,
    body: Option<String>,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn get() -> Self {
        Self::new(Method::Get)
    }

    pub fn post() -> Self {
        Self::new(Method::Post)
    }

    pub fn put() -> Self {
        Self::new(Method::Put)
    }

    pub fn patch() -> Self {
        Self::new(Method::Patch)
    }

    pub fn delete() -> Self {
        Self::new(Method::Delete)
    }

    /// Add a header. Caller headers are applied over the defaults.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add a query parameter.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Serialize `body` as the JSON request body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        let encoded = serde_json::to_string(body).map_err(|e| InvalidInputError::Body {
            message: e.to_string(),
        })?;
        self.body = Some(encoded);
        Ok(self)
    }

    /// Use an already encoded JSON body.
    pub fn raw_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub(crate) fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub(crate) fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Validated caller headers.
    pub(crate) fn caller_headers(&self) -> Result<Headers> {
        let mut headers = Headers::new();
        for (name, value) in &self.headers {
            headers.insert(name, value.clone())?;
        }
        Ok(headers)
    }
}
