use std::collections::HashMap;
use std::hash::BuildHasher;
use std::sync::Arc;

use crate::client::Client;
use crate::config::EventConfig;
use crate::integrations::Router;

/// What the routing engine should do after an action ran.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum RouteAction {
    /// Go on with the next rule.
    Continue,
}

/// Expands request variables in a routing template.
pub trait Substitute {
    /// Returns the expanded template, or `None` if it cannot be expanded.
    fn substitute(&self, template: &str) -> Option<String>;
}

/// `${NAME}` is replaced by the variable, unknown variables expand to
/// nothing and an unterminated `${` fails the expansion.
impl<S: BuildHasher> Substitute for HashMap<String, String, S> {
    fn substitute(&self, template: &str) -> Option<String> {
        let mut rv = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(start) = rest.find("${") {
            rv.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let end = after.find('}')?;
            if let Some(value) = self.get(&after[..end]) {
                rv.push_str(value);
            }
            rest = &after[end + 1..];
        }
        rv.push_str(rest);
        Some(rv)
    }
}

/// A routing action sending one event per matched request.
///
/// The directive is a template: request variables are substituted before
/// it is parsed, so every request is configured anew.
#[derive(Debug)]
pub struct SentryRouter {
    client: Arc<Client>,
    template: String,
}

impl SentryRouter {
    /// Creates the action from its directive template.
    pub fn new(client: Arc<Client>, template: &str) -> SentryRouter {
        SentryRouter {
            client,
            template: template.to_string(),
        }
    }
}

impl Router for SentryRouter {
    fn route(&self, vars: &dyn Substitute) -> RouteAction {
        let directive = match vars.substitute(&self.template) {
            Some(directive) => directive,
            None => {
                log::error!("unable to expand sentry route: {}", self.template);
                return RouteAction::Continue;
            }
        };
        match directive.parse::<EventConfig>() {
            Ok(config) => {
                self.client.send(&config, "");
            }
            Err(err) => log::error!("unable to configure sentry route: {}", err),
        }
        RouteAction::Continue
    }
}
