//! Transport trait.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::types::{HttpRequest, HttpResponse};

/// Sends one HTTP request and returns the raw response.
///
/// Implementations must not interpret status codes: a 401 or 500 is a
/// successful exchange from the transport's point of view. Only failures
/// to obtain any response at all are reported as [`TransportError`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request).await
    }
}
