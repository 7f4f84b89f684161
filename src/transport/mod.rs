//! HTTP transport for camera requests.
//!
//! The client only needs "GET this URL, give me the status and the body".
//! That is the [`Transport`] trait; [`UreqTransport`] is the production
//! implementation (ureq agent, permissive rustls config, scoped basic auth)
//! and tests substitute their own.

mod http;
mod tls;

pub use http::{TransportOptions, UreqTransport, MAX_IMAGE_BYTES};
pub use tls::accept_any_certificate_config;

use crate::error::BoxError;

/// Status line, content type and body of a completed request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Self {
            status,
            status_text: String::new(),
            content_type: None,
            body,
        }
    }
}

/// Performs a blocking HTTP GET.
///
/// Implementations return `Ok` for every response the server produced,
/// whatever its status; `Err` is reserved for failures below HTTP
/// (connect, TLS, reading the body).
pub trait Transport: Send + Sync {
    fn get(&self, url: &str) -> Result<HttpResponse, BoxError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn get(&self, url: &str) -> Result<HttpResponse, BoxError> {
        (**self).get(url)
    }
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn get(&self, url: &str) -> Result<HttpResponse, BoxError> {
        (**self).get(url)
    }
}
