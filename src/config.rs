use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::transport::TransportOptions;
use crate::values::{Hostname, Password, Port, Username};

const DEFAULT_PORT: u16 = 443;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct CameraConfigFile {
    host: Option<String>,
    port: Option<u16>,
    username: Option<String>,
    password: Option<String>,
    timeout_secs: Option<u64>,
    user_agent: Option<String>,
}

/// Connection settings for one camera.
///
/// Loaded from the JSON file named by `MCAM_CONFIG` (optional), then
/// overridden by `MCAM_HOST`, `MCAM_PORT`, `MCAM_USERNAME`, `MCAM_PASSWORD`,
/// `MCAM_TIMEOUT_SECS` and `MCAM_USER_AGENT`.
#[derive(Debug, Clone)]
pub struct CameraConfig {
    pub hostname: Hostname,
    pub port: Port,
    pub username: Username,
    pub password: Password,
    /// `None` disables the request timeout (`timeout_secs: 0`).
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

/// Raw merged values before validation.
struct RawSettings {
    host: Option<String>,
    port: u16,
    username: Option<String>,
    password: Option<String>,
    timeout_secs: u64,
    user_agent: Option<String>,
}

impl CameraConfig {
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("MCAM_CONFIG").ok();
        let file_cfg = match config_path.as_deref() {
            Some(path) if !path.trim().is_empty() => Some(read_config_file(Path::new(path))?),
            _ => None,
        };
        let mut raw = RawSettings::from_file(file_cfg.unwrap_or_default());
        raw.apply_env()?;
        raw.validate()
    }

    pub fn transport_options(&self) -> TransportOptions {
        let defaults = TransportOptions::default();
        TransportOptions {
            timeout: self.timeout,
            user_agent: self
                .user_agent
                .clone()
                .unwrap_or(defaults.user_agent),
        }
    }
}

impl RawSettings {
    fn from_file(file: CameraConfigFile) -> Self {
        Self {
            host: file.host,
            port: file.port.unwrap_or(DEFAULT_PORT),
            username: file.username,
            password: file.password,
            timeout_secs: file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            user_agent: file.user_agent,
        }
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Some(host) = non_empty_env("MCAM_HOST") {
            self.host = Some(host);
        }
        if let Some(port) = non_empty_env("MCAM_PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| anyhow!("MCAM_PORT must be an integer port number"))?;
        }
        if let Some(username) = non_empty_env("MCAM_USERNAME") {
            self.username = Some(username);
        }
        if let Ok(password) = std::env::var("MCAM_PASSWORD") {
            if !password.is_empty() {
                self.password = Some(password);
            }
        }
        if let Some(timeout) = non_empty_env("MCAM_TIMEOUT_SECS") {
            self.timeout_secs = timeout.trim().parse().map_err(|_| {
                anyhow!("MCAM_TIMEOUT_SECS must be an integer number of seconds")
            })?;
        }
        if let Some(agent) = non_empty_env("MCAM_USER_AGENT") {
            self.user_agent = Some(agent);
        }
        Ok(())
    }

    fn validate(self) -> Result<CameraConfig> {
        let host = self
            .host
            .ok_or_else(|| anyhow!("camera host is required (config 'host' or MCAM_HOST)"))?;
        let hostname = Hostname::parse(&host).context("invalid camera host")?;
        let port = Port::new(self.port).context("invalid camera port")?;
        let username = self.username.ok_or_else(|| {
            anyhow!("camera username is required (config 'username' or MCAM_USERNAME)")
        })?;
        let username = Username::new(&username).context("invalid camera username")?;
        let password = self.password.ok_or_else(|| {
            anyhow!("camera password is required (config 'password' or MCAM_PASSWORD)")
        })?;
        let password = Password::new(&password).context("invalid camera password")?;
        let timeout = match self.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };
        Ok(CameraConfig {
            hostname,
            port,
            username,
            password,
            timeout,
            user_agent: self.user_agent,
        })
    }
}

fn read_config_file(path: &Path) -> Result<CameraConfigFile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let cfg = serde_json::from_str(&raw)
        .map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?;
    Ok(cfg)
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
}
