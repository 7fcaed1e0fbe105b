//! Event sources a host process can plug the client into.
//!
//! Four backends are provided, all configured with directive strings:
//!
//! * [`SentryAlarm`]: configured once at start-up, sends on every firing.
//! * [`run_hook`]: a one-shot send, e.g. on start-up or shutdown.
//! * [`SentryRouter`]: a routing action sending once per matched request.
//! * [`SentryExceptionHandler`]: configured lazily, sends the details of
//!   an exception report.
//!
//! [`register`] installs all of them on a host [`Registry`].
use std::sync::Arc;

use crate::client::Client;
use crate::config::ConfigError;

mod alarm;
mod exception;
mod hook;
mod router;

pub use self::alarm::SentryAlarm;
pub use self::exception::{ExceptionPayload, PayloadParseError, SentryExceptionHandler};
pub use self::hook::run_hook;
pub use self::router::{RouteAction, SentryRouter, Substitute};

/// The name all backends are registered under.
pub const BACKEND_NAME: &str = "sentry";

/// An alarm backend, fired with the alarm message.
pub trait Alarm: Send + Sync {
    /// Reports `message`.
    fn fire(&self, message: &str);
}

/// A routing action backend.
pub trait Router: Send + Sync {
    /// Runs the action for one request.
    fn route(&self, vars: &dyn Substitute) -> RouteAction;
}

/// An exception handler backend.
pub trait ExceptionHandler: Send + Sync {
    /// Reports one exception.
    fn handle(&self, payload: &ExceptionPayload) -> Result<(), ConfigError>;
}

/// Creates an alarm from its directive; an error must abort start-up.
pub type AlarmFactory = Box<dyn Fn(&str) -> Result<Box<dyn Alarm>, ConfigError> + Send + Sync>;
/// Runs a hook with its directive.
pub type HookFn = Box<dyn Fn(&str) -> Result<(), ConfigError> + Send + Sync>;
/// Creates a routing action from its directive template.
pub type RouterFactory = Box<dyn Fn(&str) -> Box<dyn Router> + Send + Sync>;
/// Creates an exception handler from its directive.
pub type ExceptionHandlerFactory = Box<dyn Fn(&str) -> Box<dyn ExceptionHandler> + Send + Sync>;

/// The registration points of a host process.
pub trait Registry {
    /// Registers an alarm backend.
    fn register_alarm(&mut self, name: &'static str, factory: AlarmFactory);
    /// Registers a hook.
    fn register_hook(&mut self, name: &'static str, hook: HookFn);
    /// Registers a routing action.
    fn register_router(&mut self, name: &'static str, factory: RouterFactory);
    /// Registers an exception handler backend.
    fn register_exception_handler(&mut self, name: &'static str, factory: ExceptionHandlerFactory);
}

/// Registers all backends under [`BACKEND_NAME`].
pub fn register<R: Registry + ?Sized>(registry: &mut R, client: Arc<Client>) {
    let alarm_client = client.clone();
    registry.register_alarm(
        BACKEND_NAME,
        Box::new(move |arg| {
            SentryAlarm::new(alarm_client.clone(), arg)
                .map(|alarm| Box::new(alarm) as Box<dyn Alarm>)
        }),
    );

    let hook_client = client.clone();
    registry.register_hook(BACKEND_NAME, Box::new(move |arg| run_hook(&hook_client, arg)));

    let router_client = client.clone();
    registry.register_router(
        BACKEND_NAME,
        Box::new(move |arg| Box::new(SentryRouter::new(router_client.clone(), arg))),
    );

    registry.register_exception_handler(
        BACKEND_NAME,
        Box::new(move |arg| Box::new(SentryExceptionHandler::new(client.clone(), arg))),
    );
}
