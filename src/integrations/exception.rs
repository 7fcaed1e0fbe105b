use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;

use crate::client::Client;
use crate::config::{ConfigError, EventConfig};
use crate::integrations::ExceptionHandler;

/// Raised if a packed exception payload is truncated.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("truncated exception payload at offset {offset}")]
pub struct PayloadParseError {
    offset: usize,
}

/// The fields of an exception report the handler cares about.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExceptionPayload {
    /// The exception class, reported as the exception type.
    pub class: Option<String>,
    /// The exception message, reported as the exception value.
    pub msg: Option<String>,
    /// The printable form of the exception, reported as the message.
    pub repr: Option<String>,
}

fn is_field_name(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

impl ExceptionPayload {
    /// Parses the text form `class=Foo;msg=bad thing;repr=Foo: bad thing`.
    ///
    /// A `;` that is not followed by `name=` belongs to the current value.
    /// Unknown fields are ignored.
    pub fn parse_text(s: &str) -> ExceptionPayload {
        let mut fields: Vec<(&str, String)> = Vec::new();
        for segment in s.split(';') {
            match segment.split_once('=') {
                Some((key, value)) if is_field_name(key) => {
                    fields.push((key, value.to_string()));
                }
                _ => {
                    if let Some((_, value)) = fields.last_mut() {
                        value.push(';');
                        value.push_str(segment);
                    }
                }
            }
        }

        let mut rv = ExceptionPayload::default();
        for (key, value) in fields {
            rv.set(key, value);
        }
        rv
    }

    /// Parses the packed form: a sequence of little endian `u16` length
    /// prefixed keys and values.
    pub fn parse_packed(buf: &[u8]) -> Result<ExceptionPayload, PayloadParseError> {
        fn chunk(buf: &[u8], offset: &mut usize) -> Result<String, PayloadParseError> {
            let err = PayloadParseError { offset: *offset };
            let len = buf
                .get(*offset..*offset + 2)
                .ok_or_else(|| err.clone())?;
            let len = u16::from_le_bytes([len[0], len[1]]) as usize;
            let start = *offset + 2;
            let data = buf.get(start..start + len).ok_or(err)?;
            *offset = start + len;
            Ok(String::from_utf8_lossy(data).into_owned())
        }

        let mut rv = ExceptionPayload::default();
        let mut offset = 0;
        while offset < buf.len() {
            let key = chunk(buf, &mut offset)?;
            let value = chunk(buf, &mut offset)?;
            rv.set(&key, value);
        }
        Ok(rv)
    }

    fn set(&mut self, key: &str, value: String) {
        match key {
            "class" => self.class = Some(value),
            "msg" => self.msg = Some(value),
            "repr" => self.repr = Some(value),
            _ => {}
        }
    }

    /// Copies the present fields onto `config`, leaving the others as is.
    pub fn apply(&self, config: &mut EventConfig) {
        if let Some(ref class) = self.class {
            config.exception_type = Some(class.clone());
        }
        if let Some(ref msg) = self.msg {
            config.exception_value = Some(msg.clone());
        }
        if let Some(ref repr) = self.repr {
            config.message = Some(repr.clone());
        }
    }
}

#[derive(Debug)]
enum HandlerState {
    Unconfigured,
    Configured(Arc<EventConfig>),
}

/// An exception handler reporting exceptions as events.
///
/// The directive is parsed on the first exception and cached.  If that
/// fails the handler stays unconfigured and tries again next time.
///
/// The payload is applied to a copy of the cached config for each report.
/// The cached config itself is never written to, so a `class` or `repr`
/// from one exception does not stick to a later report that lacks it.
#[derive(Debug)]
pub struct SentryExceptionHandler {
    client: Arc<Client>,
    directive: String,
    state: Mutex<HandlerState>,
}

impl SentryExceptionHandler {
    /// Creates an unconfigured handler for `directive`.
    pub fn new(client: Arc<Client>, directive: &str) -> SentryExceptionHandler {
        SentryExceptionHandler {
            client,
            directive: directive.to_string(),
            state: Mutex::new(HandlerState::Unconfigured),
        }
    }

    /// Returns `true` once the directive was parsed successfully.
    pub fn is_configured(&self) -> bool {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        matches!(*state, HandlerState::Configured(_))
    }

    fn config(&self) -> Result<Arc<EventConfig>, ConfigError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match *state {
            HandlerState::Configured(ref config) => Ok(config.clone()),
            HandlerState::Unconfigured => {
                let config = Arc::new(self.directive.parse::<EventConfig>()?);
                *state = HandlerState::Configured(config.clone());
                Ok(config)
            }
        }
    }
}

impl ExceptionHandler for SentryExceptionHandler {
    fn handle(&self, payload: &ExceptionPayload) -> Result<(), ConfigError> {
        let config = self.config().map_err(|err| {
            log::error!("unable to configure sentry exception handler: {}", err);
            err
        })?;

        let mut config = EventConfig::clone(&config);
        payload.apply(&mut config);
        self.client.send(&config, "");
        Ok(())
    }
}
