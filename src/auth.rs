use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use thiserror::Error;

/// The protocol version spoken by the store endpoint.
pub const PROTOCOL_VERSION: u16 = 5;

/// Represents an auth header parsing error.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthParseError {
    /// Raised if the auth header is not indicating sentry auth
    #[error("non sentry auth")]
    NonSentryAuth,
    /// Raised if the timestamp value is invalid.
    #[error("invalid value for timestamp")]
    InvalidTimestamp,
    /// Raised if the version value is invalid
    #[error("invalid value for version")]
    InvalidVersion,
    /// Raised if the version is missing entirely
    #[error("no valid version defined")]
    MissingVersion,
    /// Raised if the public key is missing entirely
    #[error("missing public key in auth header")]
    MissingPublicKey,
}

/// Represents an `X-Sentry-Auth` header.
#[derive(Debug, Clone, PartialEq)]
pub struct Auth {
    timestamp: Option<DateTime<Utc>>,
    client: Option<String>,
    version: u16,
    key: String,
    secret: Option<String>,
}

impl Auth {
    pub(crate) fn new(
        timestamp: DateTime<Utc>,
        client: &str,
        key: &str,
        secret: &str,
    ) -> Auth {
        Auth {
            timestamp: Some(timestamp),
            client: Some(client.to_string()),
            version: PROTOCOL_VERSION,
            key: key.to_string(),
            secret: Some(secret.to_string()),
        }
    }

    /// Returns the time the client put into the header.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    /// Returns the protocol version the client speaks
    pub fn version(&self) -> u16 {
        self.version
    }

    /// Returns the public key
    pub fn public_key(&self) -> &str {
        &self.key
    }

    /// Returns the client's secret if it authenticated with a secret.
    pub fn secret_key(&self) -> Option<&str> {
        self.secret.as_deref()
    }

    /// Returns the client identifier.
    pub fn client_agent(&self) -> Option<&str> {
        self.client.as_deref()
    }
}

impl fmt::Display for Auth {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Sentry sentry_version={}", self.version)?;
        if let Some(ts) = self.timestamp {
            write!(f, ", sentry_timestamp={}", ts.timestamp())?;
        }
        write!(f, ", sentry_key={}", self.key)?;
        if let Some(ref client) = self.client {
            write!(f, ", sentry_client={}", client)?;
        }
        if let Some(ref secret) = self.secret {
            write!(f, ", sentry_secret={}", secret)?;
        }
        Ok(())
    }
}

impl FromStr for Auth {
    type Err = AuthParseError;

    fn from_str(s: &str) -> Result<Auth, AuthParseError> {
        let mut rv = Auth {
            timestamp: None,
            client: None,
            version: 0,
            key: String::new(),
            secret: None,
        };
        let mut base_iter = s.splitn(2, ' ');
        if !base_iter
            .next()
            .unwrap_or("")
            .eq_ignore_ascii_case("sentry")
        {
            return Err(AuthParseError::NonSentryAuth);
        }
        let items = base_iter.next().unwrap_or("");
        for item in items.split(',') {
            match item.trim().split_once('=') {
                Some(("sentry_timestamp", ts)) => {
                    let ts: i64 = ts.parse().map_err(|_| AuthParseError::InvalidTimestamp)?;
                    rv.timestamp = Some(
                        Utc.timestamp_opt(ts, 0)
                            .single()
                            .ok_or(AuthParseError::InvalidTimestamp)?,
                    );
                }
                Some(("sentry_client", client)) => {
                    rv.client = Some(client.into());
                }
                Some(("sentry_version", version)) => {
                    rv.version = version
                        .parse()
                        .map_err(|_| AuthParseError::InvalidVersion)?;
                }
                Some(("sentry_key", key)) => {
                    rv.key = key.into();
                }
                Some(("sentry_secret", secret)) => {
                    rv.secret = Some(secret.into());
                }
                _ => {}
            }
        }

        if rv.key.is_empty() {
            return Err(AuthParseError::MissingPublicKey);
        }
        if rv.version == 0 {
            return Err(AuthParseError::MissingVersion);
        }

        Ok(rv)
    }
}
