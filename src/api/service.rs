//! Service - command handler registry and dispatch.
//!
//! `Service<S>` owns a [`ReportingEngine`] over store `S`, the
//! [`Authenticator`] and a set of named command handlers. Each handler
//! receives a `Context<S>` and returns `Result<Value, HandlerError>`.
//!
//! ## Example
//!
//! ```ignore
//! use scoreline::api::{Service, Session};
//! use serde_json::json;
//!
//! let service = Service::new(InMemoryStore::new(), authenticator).command_guarded(
//!     "team.count",
//!     |_| true,
//!     |ctx| Ok(json!({ "teams": ctx.engine().roster().list_teams()?.len() })),
//! );
//!
//! let result = service.dispatch("team.count", json!({}), Session::bearer(&token));
//! ```

use std::collections::{HashMap, HashSet};

use serde_json::Value;

use super::auth::{Authenticator, Claims};
use super::context::Context;
use super::error::HandlerError;
use super::session::Session;
use crate::engine::ReportingEngine;
use crate::store::EntityStore;

type Guard<S> = Box<dyn Fn(&Context<S>) -> bool + Send + Sync>;
type Handle<S> = Box<dyn Fn(&Context<S>) -> Result<Value, HandlerError> + Send + Sync>;

struct CommandHandler<S> {
    guard: Guard<S>,
    handle: Handle<S>,
}

/// Routes commands to handler functions. Every command requires a valid
/// bearer token unless it was registered with [`Service::allow_anonymous`].
pub struct Service<S> {
    engine: ReportingEngine<S>,
    auth: Authenticator,
    anonymous: HashSet<String>,
    handlers: HashMap<String, CommandHandler<S>>,
}

impl<S: EntityStore + 'static> Service<S> {
    pub fn new(store: S, auth: Authenticator) -> Self {
        Self {
            engine: ReportingEngine::new(store),
            auth,
            anonymous: HashSet::new(),
            handlers: HashMap::new(),
        }
    }

    /// Register a command handler with a guard function.
    ///
    /// The guard runs before the handler. If it returns `false`, the
    /// command is rejected with `HandlerError::GuardRejected`.
    pub fn command_guarded<G, F>(mut self, name: &str, guard: G, handler: F) -> Self
    where
        G: Fn(&Context<S>) -> bool + Send + Sync + 'static,
        F: Fn(&Context<S>) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        self.handlers.insert(
            name.to_string(),
            CommandHandler {
                guard: Box::new(guard),
                handle: Box::new(handler),
            },
        );
        self
    }

    /// Let `name` run without a bearer token.
    pub fn allow_anonymous(mut self, name: &str) -> Self {
        self.anonymous.insert(name.to_string());
        self
    }

    /// Dispatch a command by name: look it up, authenticate the session
    /// unless the command is anonymous, run the guard, then the handler.
    pub fn dispatch(
        &self,
        command: &str,
        input: Value,
        session: Session,
    ) -> Result<Value, HandlerError> {
        let handler = self
            .handlers
            .get(command)
            .ok_or_else(|| HandlerError::UnknownCommand(command.to_string()))?;

        if !self.anonymous.contains(command) {
            let claims = self.authenticate(&session)?;
            tracing::debug!(command, username = %claims.username, "authenticated");
        }

        let ctx = Context::new(input, &self.engine, &self.auth);

        if !(handler.guard)(&ctx) {
            tracing::debug!(command, "guard rejected command");
            return Err(HandlerError::GuardRejected(command.to_string()));
        }

        (handler.handle)(&ctx)
    }

    fn authenticate(&self, session: &Session) -> Result<Claims, HandlerError> {
        let token = session
            .bearer_token()
            .ok_or_else(|| HandlerError::Unauthorized("missing bearer token".into()))?;
        self.auth.verify(token)
    }

    /// Registered command names, sorted.
    pub fn commands(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn engine(&self) -> &ReportingEngine<S> {
        &self.engine
    }
}
