//! Client for the HTTP image API of network cameras.
//!
//! The crate has two layers:
//!
//! - `params`: query builders ([`ImageParams`], [`FaststreamParams`],
//!   [`EventParams`]) that validate every value when it is set and render a
//!   deterministic query string.
//! - `client`: [`CameraClient`], one method per image endpoint, which sends a
//!   single blocking GET over TLS with basic authentication and decodes the
//!   returned JPEG.
//!
//! ```no_run
//! use mcam_http::{CameraClient, Hostname, ImageParams, Password, Port, Username};
//!
//! let client = CameraClient::connect(
//!     Hostname::parse("192.168.1.40")?,
//!     Port::HTTPS,
//!     Username::new("admin")?,
//!     Password::new("meinsm")?,
//! )?;
//! let params = ImageParams::new().size(640, 480)?.quality(60)?;
//! let image = client.image_config(&params)?;
//! println!("{}x{}", image.width(), image.height());
//! # Ok::<(), mcam_http::Error>(())
//! ```
//!
//! # Module Structure
//!
//! - `params`: query builders and enumerated options
//! - `client`: endpoint dispatch and status handling
//! - `transport`: `Transport` trait, ureq implementation, permissive TLS config
//! - `values`: validated hostname, port, username, password
//! - `log`: injected log sink
//! - `config`: settings loaded from a JSON file and the environment

pub mod client;
pub mod config;
mod error;
pub mod log;
pub mod params;
pub mod transport;
pub mod values;

pub use client::{CameraClient, StreamAccess};
pub use config::CameraConfig;
pub use error::{BoxError, Error, Result};
pub use crate::log::LogSink;
pub use params::{
    Automatic, Camera, DisplayMode, ErrorPolicy, EventParams, FaststreamParams, ImageParams,
    Mirror, NoiseSuppress, PipPosition, Size, StreamCamera, StreamType, TextDisplay,
};
pub use transport::{HttpResponse, Transport, TransportOptions, UreqTransport};
pub use values::{Hostname, Password, Port, Username};
