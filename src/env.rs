//! The host capabilities the client depends on.
use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// The default connect and total timeout for sending an event.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(4);

/// Ambient values provided by the hosting process.
///
/// The client reads the clock, the host name, the default timeout and
/// fresh event ids only through this trait, which keeps sends
/// deterministic under test.
pub trait HostEnvironment: Send + Sync {
    /// The host name reported when an event config has no `server_name`.
    fn hostname(&self) -> &str;

    /// The timeout used when an event config has no `timeout`.
    fn default_timeout(&self) -> Duration {
        DEFAULT_TIMEOUT
    }

    /// The current time.
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    /// Generates a new event id.
    fn new_event_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// The environment of the running process.
#[derive(Clone, Debug)]
pub struct SystemEnvironment {
    hostname: String,
    default_timeout: Duration,
}

impl SystemEnvironment {
    /// Overrides the host name.
    pub fn with_hostname<S: Into<String>>(mut self, hostname: S) -> Self {
        self.hostname = hostname.into();
        self
    }

    /// Overrides the default timeout.
    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }
}

impl Default for SystemEnvironment {
    fn default() -> SystemEnvironment {
        SystemEnvironment {
            hostname: server_name().unwrap_or_else(|| "localhost".into()),
            default_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl HostEnvironment for SystemEnvironment {
    fn hostname(&self) -> &str {
        &self.hostname
    }

    fn default_timeout(&self) -> Duration {
        self.default_timeout
    }
}

/// Returns the host name of the machine, if it can be determined.
pub fn server_name() -> Option<String> {
    hostname::get().ok().and_then(|s| s.into_string().ok())
}
