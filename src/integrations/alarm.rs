use std::sync::Arc;

use crate::client::Client;
use crate::config::{ConfigError, EventConfig};
use crate::integrations::Alarm;

/// An alarm reporting its message as an event.
///
/// The directive is parsed once when the alarm is created.  A parse error
/// is returned to the host, which is expected to abort start-up.
#[derive(Debug)]
pub struct SentryAlarm {
    client: Arc<Client>,
    config: EventConfig,
}

impl SentryAlarm {
    /// Creates the alarm from its directive.
    pub fn new(client: Arc<Client>, directive: &str) -> Result<SentryAlarm, ConfigError> {
        let config = directive.parse().map_err(|err| {
            log::error!("unable to configure sentry alarm: {}", err);
            err
        })?;
        Ok(SentryAlarm { client, config })
    }

    /// Returns the parsed config.
    pub fn config(&self) -> &EventConfig {
        &self.config
    }
}

impl Alarm for SentryAlarm {
    fn fire(&self, message: &str) {
        self.client.send(&self.config, message);
    }
}
