use ::curl::easy::{Easy as CurlClient, List};

use crate::transport::{Response, StoreRequest, Transport, TransportError};

/// A [`Transport`] that sends events via the [`curl`] library.
///
/// This is enabled by the `curl` feature flag.  Every request uses a fresh
/// easy handle which is cleaned up when it goes out of scope.
///
/// [`curl`]: https://crates.io/crates/curl
#[derive(Clone, Debug, Default)]
pub struct CurlHttpTransport {
    _private: (),
}

impl CurlHttpTransport {
    /// Creates a new Transport.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for CurlHttpTransport {
    fn send(&self, request: &StoreRequest<'_>) -> Result<Response, TransportError> {
        let mut handle = CurlClient::new();
        handle.url(request.url)?;
        handle.post(true)?;
        handle.post_fields_copy(&request.body)?;
        handle.timeout(request.timeout)?;
        handle.connect_timeout(request.timeout)?;
        if !request.verify_tls {
            handle.ssl_verify_peer(false)?;
            handle.ssl_verify_host(false)?;
        }

        let mut headers = List::new();
        for (name, value) in request.headers() {
            // `Name:` without a value removes a header curl would add itself
            if value.is_empty() {
                headers.append(&format!("{}:", name))?;
            } else {
                headers.append(&format!("{}: {}", name, value))?;
            }
        }
        handle.http_headers(headers)?;

        let mut body = Vec::new();
        {
            let mut transfer = handle.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = handle.response_code()?;
        Ok(Response {
            status: status as u16,
            body,
        })
    }
}

impl From<::curl::Error> for TransportError {
    fn from(err: ::curl::Error) -> TransportError {
        if err.is_operation_timedout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_couldnt_connect() || err.is_couldnt_resolve_host() {
            TransportError::Connect(err.to_string())
        } else if err.is_ssl_connect_error()
            || err.is_peer_failed_verification()
            || err.is_ssl_cacert()
        {
            TransportError::Tls(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}
