use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use zeroize::Zeroizing;

use super::{accept_any_certificate_config, HttpResponse, Transport};
use crate::error::BoxError;
use crate::values::{Hostname, Password, Port, Username};
use crate::Result;

/// Upper bound on a response body. Larger bodies fail with a transport error.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Knobs for the production transport.
#[derive(Clone, Debug)]
pub struct TransportOptions {
    /// Overall timeout per request. `None` waits forever.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_TIMEOUT),
            user_agent: format!("mcam-http/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Blocking transport on a `ureq` agent.
///
/// The agent keeps a connection pool and is safe to share between threads.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Agent that accepts any server certificate and sends basic-auth
    /// credentials to `hostname:port` only.
    pub fn new(
        hostname: &Hostname,
        port: Port,
        username: &Username,
        password: &Password,
        options: &TransportOptions,
    ) -> Result<Self> {
        let tls = accept_any_certificate_config()?;
        let auth = BasicAuth::new(hostname, port, username, password);
        let mut builder = ureq::AgentBuilder::new()
            .tls_config(Arc::new(tls))
            .user_agent(&options.user_agent)
            .middleware(auth);
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            agent: builder.build(),
        })
    }

    /// Wrap an agent configured elsewhere.
    pub fn from_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, BoxError> {
        // ureq reports 4xx/5xx as errors; the client wants to see them as responses.
        let response = match self.agent.get(url).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(_, response)) => response,
            Err(err) => return Err(Box::new(err)),
        };
        let status = response.status();
        let status_text = response.status_text().to_string();
        let content_type = response.header("Content-Type").map(str::to_string);
        let mut body = Vec::new();
        response
            .into_reader()
            .take(MAX_IMAGE_BYTES as u64 + 1)
            .read_to_end(&mut body)?;
        if body.len() > MAX_IMAGE_BYTES {
            return Err(format!("response body exceeds {} bytes", MAX_IMAGE_BYTES).into());
        }
        Ok(HttpResponse {
            status,
            status_text,
            content_type,
            body,
        })
    }
}

/// Adds `Authorization: Basic ...` to requests aimed at one host and port.
struct BasicAuth {
    host: String,
    port: u16,
    header: Zeroizing<String>,
}

impl BasicAuth {
    fn new(hostname: &Hostname, port: Port, username: &Username, password: &Password) -> Self {
        Self {
            host: hostname.authority_host(),
            port: port.get(),
            header: basic_auth_header(username, password),
        }
    }

    fn in_scope(&self, host: &str, port: u16) -> bool {
        port == self.port && host.eq_ignore_ascii_case(&self.host)
    }

    /// The parsed URL drops a scheme-default port, so `:443` comes back
    /// through `port_or_known_default`.
    fn applies_to(&self, request: &ureq::Request) -> bool {
        let Ok(url) = request.request_url() else {
            return false;
        };
        url.as_url()
            .port_or_known_default()
            .is_some_and(|port| self.in_scope(url.host(), port))
    }
}

impl ureq::Middleware for BasicAuth {
    fn handle(
        &self,
        request: ureq::Request,
        next: ureq::MiddlewareNext<'_>,
    ) -> Result<ureq::Response, ureq::Error> {
        if self.applies_to(&request) {
            next.handle(request.set("Authorization", &self.header))
        } else {
            next.handle(request)
        }
    }
}

fn basic_auth_header(username: &Username, password: &Password) -> Zeroizing<String> {
    let credentials = Zeroizing::new(format!("{}:{}", username.as_str(), password.expose()));
    Zeroizing::new(format!("Basic {}", STANDARD.encode(credentials.as_bytes())))
}
