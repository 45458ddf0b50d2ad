//! Host configuration from environment variables.

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub port: u16,
    /// `PUBLIC_ORIGIN`; payment return URLs fall back to the request's
    /// `Origin` header when unset.
    pub public_origin: Option<String>,
}

impl HostConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when `PORT` is set but not a port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when `PORT` is set but not a port number.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT").filter(|v| !v.trim().is_empty()) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { var: "PORT", value: raw.clone() })?,
            None => DEFAULT_PORT,
        };
        let public_origin = lookup("PUBLIC_ORIGIN")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty());
        Ok(Self { port, public_origin })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
