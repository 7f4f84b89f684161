use thiserror::Error;

/// Boxed error produced by a [`Transport`](crate::transport::Transport).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised by the query builders and the camera client.
#[derive(Debug, Error)]
pub enum Error {
    /// A parameter lies outside its documented range or fails its pattern.
    /// Always raised before any network activity.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A required argument was empty.
    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),

    /// The camera answered 403: username/password rejected.
    #[error("credentials failure")]
    CredentialsFailure,

    /// The camera answered 400. Usually the command or parameter needs a newer firmware.
    #[error("unsupported operation: possibly a command from a newer api version")]
    UnsupportedOperation,

    /// Network level failure, passed through from the transport.
    #[error("transport failure: {0}")]
    Transport(#[source] BoxError),

    /// The response body is not a decodable image.
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// TLS client configuration could not be built.
    #[error("tls setup failed: {0}")]
    Tls(#[from] rustls::Error),
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}
