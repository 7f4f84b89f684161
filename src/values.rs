//! Validated connection values: hostname, port, username and password.

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;
use std::sync::OnceLock;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{Error, Result};

const MAX_HOSTNAME_LEN: usize = 253;
const MAX_USERNAME_LEN: usize = 64;
const MAX_PASSWORD_LEN: usize = 128;

/// A DNS hostname or an IP literal, stored in lower case.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hostname(String);

impl Hostname {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let unbracketed = trimmed
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .unwrap_or(trimmed);
        if let Ok(ip) = unbracketed.parse::<IpAddr>() {
            return Ok(Self(ip.to_string()));
        }
        if trimmed.is_empty() || trimmed.len() > MAX_HOSTNAME_LEN {
            return Err(Error::invalid(format!(
                "hostname must be 1..{} characters",
                MAX_HOSTNAME_LEN
            )));
        }
        static LABEL_RE: OnceLock<regex::Regex> = OnceLock::new();
        let re = LABEL_RE.get_or_init(|| {
            regex::Regex::new(r"^[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?$").unwrap()
        });
        let name = trimmed.strip_suffix('.').unwrap_or(trimmed);
        if name.is_empty() || !name.split('.').all(|label| re.is_match(label)) {
            return Err(Error::invalid(format!("invalid hostname '{}'", raw)));
        }
        Ok(Self(name.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_ipv6(&self) -> bool {
        matches!(self.0.parse::<IpAddr>(), Ok(IpAddr::V6(_)))
    }

    /// Host part of a URL authority (IPv6 literals bracketed).
    pub fn authority_host(&self) -> String {
        if self.is_ipv6() {
            format!("[{}]", self.0)
        } else {
            self.0.clone()
        }
    }
}

impl fmt::Display for Hostname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Hostname {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// TCP port, 1..=65535.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Port(u16);

impl Port {
    pub const HTTPS: Port = Port(443);

    pub fn new(port: u16) -> Result<Self> {
        if port == 0 {
            return Err(Error::invalid("port must be 1..65535"));
        }
        Ok(Self(port))
    }

    pub fn get(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Port {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let port: u16 = s
            .trim()
            .parse()
            .map_err(|_| Error::invalid(format!("invalid port '{}'", s)))?;
        Self::new(port)
    }
}

/// Basic-auth user name. Must not contain `:` or control characters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    pub fn new(raw: &str) -> Result<Self> {
        if raw.is_empty() || raw.len() > MAX_USERNAME_LEN {
            return Err(Error::invalid(format!(
                "username must be 1..{} bytes",
                MAX_USERNAME_LEN
            )));
        }
        if raw.contains(':') || raw.chars().any(char::is_control) {
            return Err(Error::invalid(
                "username must not contain ':' or control characters",
            ));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Basic-auth password. Wiped from memory on drop and never printed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Password(String);

impl Password {
    pub fn new(raw: &str) -> Result<Self> {
        if raw.is_empty() || raw.len() > MAX_PASSWORD_LEN {
            return Err(Error::invalid(format!(
                "password must be 1..{} bytes",
                MAX_PASSWORD_LEN
            )));
        }
        if raw.chars().any(char::is_control) {
            return Err(Error::invalid("password must not contain control characters"));
        }
        Ok(Self(raw.to_string()))
    }

    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}
