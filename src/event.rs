//! The JSON body posted to the store endpoint.
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use thiserror::Error;
use uuid::Uuid;

use crate::config::EventConfig;
use crate::env::HostEnvironment;
use crate::kvlist::{KvList, KvListParseError};

/// The timestamp format of the `timestamp` field.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Raised if an event cannot be serialized.
#[derive(Debug, Error)]
pub enum EventError {
    /// The `tags` or `extra` list is malformed.
    #[error("invalid {field}: {source}")]
    KvList {
        /// `tags` or `extra`
        field: &'static str,
        /// the underlying parse error
        source: KvListParseError,
    },
    /// The event could not be encoded as JSON.
    #[error("unable to encode event: {0}")]
    Json(#[from] serde_json::Error),
}

/// One entry of the `exception` list.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Exception<'a> {
    /// The exception type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<&'a str>,
    /// The exception value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<&'a str>,
}

/// An event as sent to the store endpoint.
///
/// Fields serialize in declaration order and optional fields are left out
/// entirely when unset.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Event<'a> {
    /// The id of the event, 32 hex characters on the wire.
    #[serde(serialize_with = "serialize_event_id")]
    pub event_id: Uuid,
    /// The event level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<&'a str>,
    /// The logger name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logger: Option<&'a str>,
    /// The culprit of the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub culprit: Option<&'a str>,
    /// The platform the event originates from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<&'a str>,
    /// The release.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release: Option<&'a str>,
    /// Tags of the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<KvList>,
    /// Extra data of the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<KvList>,
    /// At most one exception.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exception: Vec<Exception<'a>>,
    /// The reporting host.
    pub server_name: &'a str,
    /// The time of the event, second resolution in UTC.
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    /// The event message.
    pub message: &'a str,
}

fn serialize_event_id<S: Serializer>(id: &Uuid, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&id.simple())
}

fn serialize_timestamp<S: Serializer>(
    ts: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&ts.format(TIMESTAMP_FORMAT))
}

fn parse_kv_list(field: &'static str, raw: Option<&str>) -> Result<Option<KvList>, EventError> {
    raw.map(|raw| raw.parse())
        .transpose()
        .map_err(|source| EventError::KvList { field, source })
}

impl<'a> Event<'a> {
    /// Builds the event for `config`.
    ///
    /// `fallback_message` is used when the config has no `message`, and the
    /// environment's host name when it has no `server_name`.
    pub fn from_config(
        config: &'a EventConfig,
        fallback_message: &'a str,
        env: &'a dyn HostEnvironment,
        event_id: Uuid,
        timestamp: DateTime<Utc>,
    ) -> Result<Event<'a>, EventError> {
        let tags = parse_kv_list("tags", config.tags.as_deref())?;
        let extra = parse_kv_list("extra", config.extra.as_deref())?;

        let exception = match (&config.exception_type, &config.exception_value) {
            (None, None) => vec![],
            (ty, value) => vec![Exception {
                ty: ty.as_deref(),
                value: value.as_deref(),
            }],
        };

        Ok(Event {
            event_id,
            level: config.level.as_deref(),
            logger: config.logger.as_deref(),
            culprit: config.culprit.as_deref(),
            platform: config.platform.as_deref(),
            release: config.release.as_deref(),
            tags,
            extra,
            exception,
            server_name: config
                .server_name
                .as_deref()
                .unwrap_or_else(|| env.hostname()),
            timestamp,
            message: config.message.as_deref().unwrap_or(fallback_message),
        })
    }

    /// Encodes the event as JSON.
    pub fn to_json(&self) -> Result<Vec<u8>, EventError> {
        Ok(serde_json::to_vec(self)?)
    }
}
