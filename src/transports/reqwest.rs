use ::reqwest::blocking::Client as ReqwestClient;

use crate::transport::{Response, StoreRequest, Transport, TransportError};

/// A [`Transport`] that sends events via the [`reqwest`] blocking client.
///
/// This is the default transport and is enabled by the `reqwest` feature
/// flag.  Every request gets its own client since timeout and TLS settings
/// come from the event config.
///
/// [`reqwest`]: https://crates.io/crates/reqwest
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpTransport {
    _private: (),
}

impl ReqwestHttpTransport {
    /// Creates a new Transport.
    pub fn new() -> Self {
        Self::default()
    }

    fn client(request: &StoreRequest<'_>) -> Result<ReqwestClient, TransportError> {
        // a zero timeout means no limit, as with curl
        let mut builder = ReqwestClient::builder().timeout(None);
        if !request.timeout.is_zero() {
            builder = builder
                .timeout(request.timeout)
                .connect_timeout(request.timeout);
        }
        if !request.verify_tls {
            #[cfg(any(feature = "native-tls", feature = "rustls"))]
            {
                builder = builder.danger_accept_invalid_certs(true);
            }
            #[cfg(feature = "native-tls")]
            {
                builder = builder.danger_accept_invalid_hostnames(true);
            }
        }
        Ok(builder.build()?)
    }
}

impl Transport for ReqwestHttpTransport {
    fn send(&self, request: &StoreRequest<'_>) -> Result<Response, TransportError> {
        let client = Self::client(request)?;
        let mut builder = client.post(request.url);
        for (name, value) in request.headers() {
            // hyper never negotiates `100-continue`; the empty value only
            // matters to curl
            if value.is_empty() {
                continue;
            }
            builder = builder.header(name, value);
        }

        let response = builder.body(request.body.clone()).send()?;
        let status = response.status().as_u16();
        let body = response.bytes()?.to_vec();
        Ok(Response { status, body })
    }
}

impl From<::reqwest::Error> for TransportError {
    fn from(err: ::reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}
