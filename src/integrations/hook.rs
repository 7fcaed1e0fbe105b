use crate::client::Client;
use crate::config::{ConfigError, EventConfig};

/// Sends a single event described by `directive`.
///
/// A configuration error is logged and returned; it only aborts this hook.
/// A failed delivery is not an error.
pub fn run_hook(client: &Client, directive: &str) -> Result<(), ConfigError> {
    let config: EventConfig = directive.parse().map_err(|err| {
        log::error!("unable to run sentry hook: {}", err);
        err
    })?;
    client.send(&config, "");
    Ok(())
}
