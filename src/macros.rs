/// Logs through `log::info!` when the given config has `debug` enabled.
///
/// The first argument is anything with a `debug: bool` field, usually an
/// [`EventConfig`](crate::EventConfig).
macro_rules! sentry_debug {
    ($config:expr, $($arg:tt)*) => {
        if $config.debug {
            log::info!($($arg)*);
        }
    };
}
