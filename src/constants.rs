/// The version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

lazy_static::lazy_static! {
    /// Sent as `User-Agent` and as `sentry_client` in the auth header.
    pub static ref USER_AGENT: String = format!("sentry-store/{}", VERSION);
}
