//! Core client types.
//!
//! These types enforce their invariants at construction time, so an invalid
//! base URL or header map never reaches the transport.

mod http;
mod service_url;

pub use http::{Headers, HttpRequest, HttpResponse, Method};
pub use service_url::ServiceUrl;
