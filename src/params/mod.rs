//! Query builders for the camera image endpoints.
//!
//! Each builder starts empty, validates every value when it is set, and
//! renders the stored values into a query string on demand:
//!
//! - [`ImageParams`]: still images (`/cgi-bin/image.jpg`)
//! - [`FaststreamParams`]: fast-stream images (`faststream.jpg`)
//! - [`EventParams`]: event images (`/control/event.jpg`)
//!
//! Rendering never consumes the builder, so the same builder can be rendered
//! any number of times with identical output.

use std::fmt;

use crate::{Error, Result};

/// Declares an enumerated option with its wire token and legacy action code.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => ($token:literal, $action:literal), )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Lower-case token sent in the query string.
            pub fn wire_token(self) -> &'static str {
                match self {
                    $( $name::$variant => $token, )+
                }
            }

            /// Legacy action code. Not sent on the wire.
            pub fn action(self) -> u8 {
                match self {
                    $( $name::$variant => $action, )+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.wire_token())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::Error;

            fn from_str(s: &str) -> $crate::Result<Self> {
                let wanted = s.trim().to_lowercase();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|candidate| candidate.wire_token() == wanted)
                    .ok_or_else(|| {
                        let expected: Vec<&str> =
                            $name::ALL.iter().map(|v| v.wire_token()).collect();
                        $crate::Error::InvalidArgument(format!(
                            "unknown {} '{}'; expected one of {}",
                            stringify!($name),
                            s,
                            expected.join(", ")
                        ))
                    })
            }
        }
    };
}

mod event;
mod faststream;
mod still;

pub use event::EventParams;
pub use faststream::{FaststreamParams, StreamCamera, StreamType};
pub use still::{
    Automatic, Camera, DisplayMode, ImageParams, Mirror, NoiseSuppress, PipPosition, TextDisplay,
};

pub const MAX_WIDTH: i32 = 2048;
pub const MAX_HEIGHT: i32 = 1536;

wire_enum! {
    /// What the camera delivers when no image can be produced.
    pub enum ErrorPolicy {
        Picture => ("picture", 0),
        Empty => ("empty", 1),
        Content => ("content", 2),
        Current => ("current", 3),
    }
}

/// Image dimensions as sent in `size=` and `customsize=`.
///
/// A zero in either dimension means "not requested": the pair is accepted
/// but never rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Size {
    width: u16,
    height: u16,
}

impl Size {
    /// Validate width 0..=2048 and height 0..=1536.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        if !(0..=MAX_WIDTH).contains(&width) {
            return Err(Error::invalid(format!(
                "wrong width (0-{}): {}",
                MAX_WIDTH, width
            )));
        }
        if !(0..=MAX_HEIGHT).contains(&height) {
            return Err(Error::invalid(format!(
                "wrong height (0-{}): {}",
                MAX_HEIGHT, height
            )));
        }
        Ok(Self {
            width: width as u16,
            height: height as u16,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Both dimensions non-zero.
    pub fn is_set(&self) -> bool {
        self.width != 0 && self.height != 0
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

pub(crate) fn check_range(name: &str, value: i32, min: i32, max: i32) -> Result<i32> {
    if value < min || value > max {
        return Err(Error::invalid(format!(
            "{} must be {}..{}, got {}",
            name, min, max, value
        )));
    }
    Ok(value)
}

/// Accumulates `key=value` pairs and bare flags joined by `&`.
#[derive(Default)]
pub(crate) struct Query {
    buf: String,
}

impl Query {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn separator(&mut self) {
        if !self.buf.is_empty() {
            self.buf.push('&');
        }
    }

    pub(crate) fn pair(&mut self, key: &str, value: impl fmt::Display) {
        self.separator();
        self.buf.push_str(key);
        self.buf.push('=');
        self.buf.push_str(&value.to_string());
    }

    pub(crate) fn opt_pair<T: fmt::Display>(&mut self, key: &str, value: Option<T>) {
        if let Some(value) = value {
            self.pair(key, value);
        }
    }

    pub(crate) fn size(&mut self, key: &str, size: Size) {
        if size.is_set() {
            self.pair(key, size);
        }
    }

    /// Bare `key` when the flag is set to true.
    pub(crate) fn flag(&mut self, key: &str, value: Option<bool>) {
        if value == Some(true) {
            self.separator();
            self.buf.push_str(key);
        }
    }

    /// `key=on` / `key=off`.
    pub(crate) fn switch(&mut self, key: &str, value: Option<bool>) {
        if let Some(value) = value {
            self.pair(key, if value { "on" } else { "off" });
        }
    }

    /// Free text, form-url-encoded as UTF-8.
    pub(crate) fn text(&mut self, key: &str, value: Option<&str>) {
        if let Some(value) = value {
            let encoded: String = url::form_urlencoded::byte_serialize(value.as_bytes()).collect();
            self.pair(key, encoded);
        }
    }

    /// RGB color as `0x` followed by six upper-case hex digits.
    pub(crate) fn color(&mut self, key: &str, value: Option<u32>) {
        if let Some(value) = value {
            self.pair(key, format!("0x{:06X}", value));
        }
    }

    pub(crate) fn finish(self) -> String {
        self.buf
    }
}
