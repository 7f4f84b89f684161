//! Camera HTTP API client.
//!
//! One method per image endpoint. Every method builds a path, performs a
//! single blocking GET through the [`Transport`], classifies the status code
//! and decodes the body:
//!
//! - 200: decode and return the image
//! - 403: [`Error::CredentialsFailure`]
//! - 400: [`Error::UnsupportedOperation`]
//! - anything else: logged, then the body is decoded anyway
//!
//! For most unexpected statuses the last rule ends in [`Error::Decode`].

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use image::DynamicImage;

use crate::config::CameraConfig;
use crate::log::LogSink;
use crate::params::{EventParams, FaststreamParams, ImageParams, Size};
use crate::transport::{Transport, TransportOptions, UreqTransport};
use crate::values::{Hostname, Password, Port, Username};
use crate::{Error, Result};

const HTTP_OK: u16 = 200;
const HTTP_BAD_REQUEST: u16 = 400;
const HTTP_FORBIDDEN: u16 = 403;

pub const MIN_VIEW: i32 = -1;
pub const MAX_VIEW: i32 = 256;

/// Which fast-stream path to use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamAccess {
    /// `/cgi-bin/faststream.jpg`, open to guest users.
    Guest,
    /// `/control/faststream.jpg`, requires credentials.
    Authenticated,
}

impl StreamAccess {
    fn base_path(self) -> &'static str {
        match self {
            StreamAccess::Guest => "/cgi-bin",
            StreamAccess::Authenticated => "/control",
        }
    }
}

/// Client for one camera.
///
/// Identity is the hostname alone: two clients for the same host compare
/// equal and hash equally even when port or credentials differ.
pub struct CameraClient {
    hostname: Hostname,
    port: Port,
    transport: Box<dyn Transport>,
    log: LogSink,
}

impl CameraClient {
    /// Client on a caller-provided transport.
    pub fn with_transport(
        hostname: Hostname,
        port: Port,
        transport: Box<dyn Transport>,
        log: LogSink,
    ) -> Self {
        Self {
            hostname,
            port,
            transport,
            log,
        }
    }

    /// Production client with default transport options, logging to the
    /// process-wide `log` backend.
    ///
    /// # Security
    ///
    /// The TLS session accepts ANY server certificate and skips hostname
    /// verification, because cameras ship with self-signed certificates.
    /// Traffic is encrypted but the camera is not authenticated; only use
    /// this on networks you trust.
    pub fn connect(
        hostname: Hostname,
        port: Port,
        username: Username,
        password: Password,
    ) -> Result<Self> {
        Self::connect_with(
            hostname,
            port,
            username,
            password,
            &TransportOptions::default(),
            LogSink::global(),
        )
    }

    /// Like [`CameraClient::connect`], with explicit transport options and log sink.
    pub fn connect_with(
        hostname: Hostname,
        port: Port,
        username: Username,
        password: Password,
        options: &TransportOptions,
        log: LogSink,
    ) -> Result<Self> {
        let transport = UreqTransport::new(&hostname, port, &username, &password, options)?;
        Ok(Self::with_transport(
            hostname,
            port,
            Box::new(transport),
            log,
        ))
    }

    pub fn from_config(config: &CameraConfig, log: LogSink) -> Result<Self> {
        Self::connect_with(
            config.hostname.clone(),
            config.port,
            config.username.clone(),
            config.password.clone(),
            &config.transport_options(),
            log,
        )
    }

    pub fn hostname(&self) -> &Hostname {
        &self.hostname
    }

    pub fn port(&self) -> Port {
        self.port
    }

    /// `/record/current.jpg`
    pub fn current_image(&self) -> Result<DynamicImage> {
        self.fetch_image("/record/current.jpg")
    }

    /// `/cgi-bin/image.jpg?current`, the older snapshot path some firmware needs.
    pub fn image_current(&self) -> Result<DynamicImage> {
        self.fetch_image("/cgi-bin/image.jpg?current")
    }

    /// Preview image of `width` x `height` (0..=2048, 0..=1536).
    pub fn image_preview(&self, width: i32, height: i32) -> Result<DynamicImage> {
        let size = Size::new(width, height)?;
        self.fetch_image(&format!("/cgi-bin/image.jpg?preview&size={}", size))
    }

    pub fn image_config(&self, params: &ImageParams) -> Result<DynamicImage> {
        self.fetch_image(&format!("/cgi-bin/image.jpg?config&{}", params.url_params()))
    }

    /// Image rendered with the named image profile plus `params`.
    ///
    /// The name is form-url-encoded. An empty name is rejected with
    /// [`Error::MissingArgument`] and no request is sent.
    pub fn image_profile(&self, profile: &str, params: &ImageParams) -> Result<DynamicImage> {
        if profile.is_empty() {
            return Err(Error::MissingArgument("profile"));
        }
        let profile: String = url::form_urlencoded::byte_serialize(profile.as_bytes()).collect();
        self.fetch_image(&format!(
            "/cgi-bin/image.jpg?imgprof={}&{}",
            profile,
            params.url_params()
        ))
    }

    /// Image of view `view` (-1..=256).
    pub fn image_view(&self, view: i32, params: &ImageParams) -> Result<DynamicImage> {
        if !(MIN_VIEW..=MAX_VIEW).contains(&view) {
            return Err(Error::invalid(format!(
                "view must be {}..{}, got {}",
                MIN_VIEW, MAX_VIEW, view
            )));
        }
        self.fetch_image(&format!(
            "/cgi-bin/image.jpg?view={}&{}",
            view,
            params.url_params()
        ))
    }

    /// One fast-stream frame.
    ///
    /// The parameters are not sent: the request goes to the bare
    /// `faststream.jpg` path.
    pub fn faststream(&self, access: StreamAccess, params: &FaststreamParams) -> Result<DynamicImage> {
        self.log_unsent_params("faststream", &params.url_params());
        self.fetch_image(&format!("{}/faststream.jpg", access.base_path()))
    }

    /// Event image. The parameters are not sent.
    pub fn event(&self, params: &EventParams) -> Result<DynamicImage> {
        self.log_unsent_params("event", &params.url_params());
        self.fetch_image("/control/event.jpg")
    }

    /// Full request URL for `path` (path includes any query).
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "https://{}:{}{}",
            self.hostname.authority_host(),
            self.port,
            path
        )
    }

    fn log_unsent_params(&self, endpoint: &str, query: &str) {
        if !query.is_empty() {
            self.log.debug(format_args!(
                "{} request ignores parameters: {}",
                endpoint, query
            ));
        }
    }

    fn fetch_image(&self, path: &str) -> Result<DynamicImage> {
        let url = self.url_for(path);
        let response = self.transport.get(&url).map_err(Error::Transport)?;
        if response.status != HTTP_OK {
            self.log.debug(format_args!(
                "{} {}",
                response.status, response.status_text
            ));
            self.log
                .info(format_args!("HttpStatus: {}", response.status));
            match response.status {
                HTTP_FORBIDDEN => return Err(Error::CredentialsFailure),
                HTTP_BAD_REQUEST => return Err(Error::UnsupportedOperation),
                _ => {}
            }
        }
        self.log.debug(format_args!(
            "ContentType: {}",
            response.content_type.as_deref().unwrap_or("-")
        ));
        Ok(image::load_from_memory(&response.body)?)
    }
}

impl PartialEq for CameraClient {
    fn eq(&self, other: &Self) -> bool {
        self.hostname == other.hostname
    }
}

impl Eq for CameraClient {}

impl Hash for CameraClient {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hostname.hash(state);
    }
}

impl PartialOrd for CameraClient {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CameraClient {
    fn cmp(&self, other: &Self) -> Ordering {
        self.hostname.cmp(&other.hostname)
    }
}

impl fmt::Display for CameraClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CameraClient[hostname={}]", self.hostname)
    }
}

impl fmt::Debug for CameraClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CameraClient")
            .field("hostname", &self.hostname)
            .field("port", &self.port)
            .finish_non_exhaustive()
    }
}
