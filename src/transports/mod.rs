//! The provided transports.
//!
//! This module exposes all transports that are compiled into the crate.
//! The `reqwest` and `curl` features turn on these transports.

use std::sync::Arc;

use crate::Transport;

#[cfg(feature = "reqwest")]
mod reqwest;
#[cfg(feature = "reqwest")]
pub use self::reqwest::ReqwestHttpTransport;

#[cfg(feature = "curl")]
mod curl;
#[cfg(feature = "curl")]
pub use self::curl::CurlHttpTransport;

#[cfg(feature = "reqwest")]
type DefaultTransport = ReqwestHttpTransport;

#[cfg(all(feature = "curl", not(feature = "reqwest")))]
type DefaultTransport = CurlHttpTransport;

/// The default http transport.
#[cfg(any(feature = "reqwest", feature = "curl"))]
pub type HttpTransport = DefaultTransport;

/// Creates the default HTTP transport.
///
/// Returns `None` if the crate was compiled without a transport.
pub fn default_transport() -> Option<Arc<dyn Transport>> {
    #[cfg(any(feature = "reqwest", feature = "curl"))]
    {
        Some(Arc::new(HttpTransport::default()))
    }
    #[cfg(not(any(feature = "reqwest", feature = "curl")))]
    {
        None
    }
}
