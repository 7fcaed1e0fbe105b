use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use crate::config::EventConfig;
use crate::constants::USER_AGENT;
use crate::env::{HostEnvironment, SystemEnvironment};
use crate::event::{Event, EventError};
use crate::transport::{StoreRequest, Transport, TransportError};

/// The outcome of a send.
///
/// Every outcome has already been logged by the time it is returned, so
/// callers are free to ignore it.
#[derive(Debug)]
pub enum Delivery {
    /// The endpoint answered with `200`.
    Sent {
        /// the id the event was sent with
        event_id: Uuid,
    },
    /// The endpoint answered with another status.
    Rejected {
        /// the id the event was sent with
        event_id: Uuid,
        /// the HTTP status code
        status: u16,
    },
    /// No response was received.
    Failed {
        /// the id the event was sent with
        event_id: Uuid,
        /// why the request failed
        error: TransportError,
    },
    /// The event could not be serialized and was not sent.
    Dropped(EventError),
}

impl Delivery {
    /// Returns `true` if the endpoint accepted the event.
    pub fn is_sent(&self) -> bool {
        matches!(self, Delivery::Sent { .. })
    }

    /// Returns the id of the event, if it got far enough to be sent.
    pub fn event_id(&self) -> Option<Uuid> {
        match *self {
            Delivery::Sent { event_id }
            | Delivery::Rejected { event_id, .. }
            | Delivery::Failed { event_id, .. } => Some(event_id),
            Delivery::Dropped(_) => None,
        }
    }
}

/// The client sends events described by an [`EventConfig`].
///
/// A send serializes the event, builds the auth header and hands one
/// request to the transport.  Failures are logged and reported as a
/// [`Delivery`]; they never panic and are never retried.
#[derive(Clone)]
pub struct Client {
    env: Arc<dyn HostEnvironment>,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Client")
            .field("hostname", &self.env.hostname())
            .field("default_timeout", &self.env.default_timeout())
            .finish()
    }
}

impl Client {
    /// Creates a client from an environment and a transport.
    pub fn new(env: Arc<dyn HostEnvironment>, transport: Arc<dyn Transport>) -> Client {
        Client { env, transport }
    }

    /// Creates a client for the running process using the default
    /// HTTP transport.
    ///
    /// Returns `None` if the crate was compiled without a transport.
    pub fn with_default_transport() -> Option<Client> {
        crate::transports::default_transport()
            .map(|transport| Client::new(Arc::new(SystemEnvironment::default()), transport))
    }

    /// Returns the environment of this client.
    pub fn env(&self) -> &dyn HostEnvironment {
        &*self.env
    }

    /// Sends one event.
    ///
    /// `fallback_message` is reported when the config has no `message`.
    pub fn send(&self, config: &EventConfig, fallback_message: &str) -> Delivery {
        // one clock read for the auth header and the event timestamp
        let now = self.env.now();
        let event_id = self.env.new_event_id();

        let body = match Event::from_config(config, fallback_message, &*self.env, event_id, now)
            .and_then(|event| event.to_json())
        {
            Ok(body) => body,
            Err(err) => {
                log::error!("unable to serialize event for {}: {}", config.dsn.store_api_url(), err);
                return Delivery::Dropped(err);
            }
        };

        let request = StoreRequest {
            url: config.dsn.store_api_url(),
            auth: config.dsn.to_auth(&USER_AGENT, now).to_string(),
            user_agent: &USER_AGENT,
            body,
            timeout: config.timeout.unwrap_or_else(|| self.env.default_timeout()),
            verify_tls: !config.no_verify,
        };

        sentry_debug!(
            config,
            "sending {} to {}",
            String::from_utf8_lossy(&request.body),
            request.url
        );

        match self.transport.send(&request) {
            Ok(response) => {
                sentry_debug!(config, "{}", String::from_utf8_lossy(&response.body));
                if response.status == 200 {
                    Delivery::Sent { event_id }
                } else {
                    log::warn!(
                        "HTTP api returned non-200 response code: {}",
                        response.status
                    );
                    Delivery::Rejected {
                        event_id,
                        status: response.status,
                    }
                }
            }
            Err(error) => {
                log::error!(
                    "error sending request ({}): {}",
                    error,
                    String::from_utf8_lossy(&request.body)
                );
                Delivery::Failed { event_id, error }
            }
        }
    }
}
