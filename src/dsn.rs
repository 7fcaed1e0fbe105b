use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::auth::Auth;

/// The reason a DSN was rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DsnParseErrorKind {
    /// raised if the scheme is not `http` or `https`
    InvalidScheme,
    /// raised if there is no `@` between credentials and host
    MissingAt,
    /// raised if there is no `/` before the project id
    NoProjectId,
    /// raised if the credentials have no `:` before the secret key
    MissingSecret,
}

impl fmt::Display for DsnParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            DsnParseErrorKind::InvalidScheme => "no valid scheme",
            DsnParseErrorKind::MissingAt => "no credentials",
            DsnParseErrorKind::NoProjectId => "no project id",
            DsnParseErrorKind::MissingSecret => "no secret key",
        })
    }
}

/// Represents a dsn parsing error.
///
/// The offending dsn is carried along so it can be logged verbatim.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unable to parse dsn: {dsn} ({kind})")]
pub struct DsnParseError {
    dsn: String,
    kind: DsnParseErrorKind,
}

impl DsnParseError {
    fn new(dsn: &str, kind: DsnParseErrorKind) -> DsnParseError {
        DsnParseError {
            dsn: dsn.to_string(),
            kind,
        }
    }

    /// Returns the dsn that failed to parse.
    pub fn dsn(&self) -> &str {
        &self.dsn
    }

    /// Returns why the dsn was rejected.
    pub fn kind(&self) -> DsnParseErrorKind {
        self.kind
    }
}

/// Represents the scheme of an url http/https.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Scheme {
    /// unencrypted HTTP scheme (should not be used)
    Http,
    /// encrypted HTTPS scheme
    Https,
}

impl Scheme {
    fn prefix(self) -> &'static str {
        match self {
            Scheme::Http => "http://",
            Scheme::Https => "https://",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match *self {
                Scheme::Https => "https",
                Scheme::Http => "http",
            }
        )
    }
}

/// Represents a Sentry dsn.
///
/// Parsing derives the store endpoint and the credential pair once, so a
/// `Dsn` value always carries a usable endpoint.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Dsn {
    raw: String,
    scheme: Scheme,
    public_key: String,
    secret_key: String,
    project_id: String,
    store_url: String,
}

impl Dsn {
    /// Returns the scheme
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Returns the public_key
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// Returns the secret_key
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    /// Returns the project id, the last path segment of the dsn.
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Returns the URL events are posted to.
    pub fn store_api_url(&self) -> &str {
        &self.store_url
    }

    /// Creates the auth header for a request sent at `timestamp`.
    pub fn to_auth(&self, client_agent: &str, timestamp: DateTime<Utc>) -> Auth {
        Auth::new(
            timestamp,
            client_agent,
            &self.public_key,
            &self.secret_key,
        )
    }
}

impl fmt::Display for Dsn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Dsn {
    type Err = DsnParseError;

    fn from_str(s: &str) -> Result<Dsn, DsnParseError> {
        let scheme = if s.starts_with(Scheme::Https.prefix()) {
            Scheme::Https
        } else if s.starts_with(Scheme::Http.prefix()) {
            Scheme::Http
        } else {
            return Err(DsnParseError::new(s, DsnParseErrorKind::InvalidScheme));
        };
        let rest = &s[scheme.prefix().len()..];

        let at = rest
            .find('@')
            .ok_or_else(|| DsnParseError::new(s, DsnParseErrorKind::MissingAt))?;
        let (credentials, location) = (&rest[..at], &rest[at + 1..]);

        // the project id is the last segment, a trailing slash is ignored
        let location = location.strip_suffix('/').unwrap_or(location);
        let last_slash = location
            .rfind('/')
            .ok_or_else(|| DsnParseError::new(s, DsnParseErrorKind::NoProjectId))?;
        let (base, project_id) = (&location[..last_slash], &location[last_slash + 1..]);

        let (public_key, secret_key) = credentials
            .split_once(':')
            .ok_or_else(|| DsnParseError::new(s, DsnParseErrorKind::MissingSecret))?;

        Ok(Dsn {
            raw: s.to_string(),
            scheme,
            public_key: public_key.to_string(),
            secret_key: secret_key.to_string(),
            project_id: project_id.to_string(),
            store_url: format!("{}{}/api/{}/store/", scheme.prefix(), base, project_id),
        })
    }
}
