use std::time::Duration;

use thiserror::Error;

/// Raised if a request did not produce an HTTP response.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The endpoint could not be reached.
    #[error("connection failed: {0}")]
    Connect(String),
    /// The request did not finish within the timeout.
    #[error("request timed out: {0}")]
    Timeout(String),
    /// The TLS handshake or certificate verification failed.
    #[error("tls error: {0}")]
    Tls(String),
    /// Any other failure.
    #[error("request failed: {0}")]
    Other(String),
}

/// A single POST to the store endpoint.
///
/// Transports receive a fully prepared request and only have to put it on
/// the wire with the given timeout and TLS settings.
#[derive(Clone, Debug, PartialEq)]
pub struct StoreRequest<'a> {
    /// The store endpoint.
    pub url: &'a str,
    /// The value of the `X-Sentry-Auth` header.
    pub auth: String,
    /// The value of the `User-Agent` header.
    pub user_agent: &'a str,
    /// The JSON encoded event.
    pub body: Vec<u8>,
    /// Used for both the connect and the total timeout, zero means no limit.
    pub timeout: Duration,
    /// Verify the peer certificate and host name.
    pub verify_tls: bool,
}

impl StoreRequest<'_> {
    /// Returns the headers of the request in order.
    ///
    /// The empty `Expect` header turns off `100-continue` negotiation.
    pub fn headers(&self) -> [(&'static str, &str); 4] {
        [
            ("X-Sentry-Auth", self.auth.as_str()),
            ("Content-Type", "application/json"),
            ("Expect", ""),
            ("User-Agent", self.user_agent),
        ]
    }
}

/// The status and raw body of a response.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The response body, never parsed.
    pub body: Vec<u8>,
}

/// The trait for transports.
///
/// A transport performs one blocking request per call and never retries.
pub trait Transport: Send + Sync + 'static {
    /// Sends the request and returns the response, whatever its status.
    fn send(&self, request: &StoreRequest<'_>) -> Result<Response, TransportError>;
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_request_headers() {
        let request = StoreRequest {
            url: "https://sentry.example.com/api/7/store/",
            auth: "Sentry sentry_version=5".into(),
            user_agent: "sentry-store/1.0",
            body: b"{}".to_vec(),
            timeout: Duration::from_secs(1),
            verify_tls: true,
        };
        assert_eq!(
            request.headers(),
            [
                ("X-Sentry-Auth", "Sentry sentry_version=5"),
                ("Content-Type", "application/json"),
                ("Expect", ""),
                ("User-Agent", "sentry-store/1.0"),
            ]
        );
    }
}
