//! api - command dispatch over the reporting engine.
//!
//! Commands are registered on a [`Service`] by name. The request [`Session`]
//! carries the bearer token; each handler receives a [`Context`] with the
//! JSON input and the [`ReportingEngine`](crate::engine::ReportingEngine).
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use chrono::Duration;
//! use scoreline::{api, InMemoryStore};
//! use serde_json::json;
//!
//! let auth = api::Authenticator::new(
//!     "signing-secret",
//!     Duration::hours(24),
//!     api::Credentials::new("admin", "s3cret"),
//! );
//! let service = Arc::new(api::service(InMemoryStore::new(), auth));
//!
//! // Log in, then dispatch with the token
//! let login = service.dispatch(
//!     "auth.login",
//!     json!({ "username": "admin", "password": "s3cret" }),
//!     api::Session::new(),
//! )?;
//! let team = service.dispatch(
//!     "team.create",
//!     json!({ "name": "Persija" }),
//!     api::Session::bearer(login["token"].as_str().unwrap_or_default()),
//! )?;
//!
//! // HTTP transport (requires "http" feature)
//! // api::serve(service, listener, shutdown).await?;
//! ```
//!
//! ## Handler Convention
//!
//! ```ignore
//! pub mod report {
//!     pub const COMMAND: &str = "match.report";
//!
//!     pub fn guard<S>(ctx: &Context<S>) -> bool {
//!         ctx.has_field("match_id")
//!     }
//!
//!     pub fn handle<S: EntityStore>(ctx: &Context<S>) -> Result<Value, HandlerError> {
//!         let match_id = ctx.field::<u64>("match_id")?;
//!         Ok(serde_json::to_value(ctx.engine().get_report(match_id)?)?)
//!     }
//! }
//! ```

mod auth;
mod context;
mod error;
pub mod handlers;
mod service;
mod session;

pub use auth::{Authenticator, Claims, Credentials, IssuedToken};
pub use context::Context;
pub use error::HandlerError;
pub use service::Service;
pub use session::Session;

#[cfg(feature = "http")]
mod http;
#[cfg(feature = "http")]
pub use http::{router, serve};

use crate::store::EntityStore;

/// A service over `store` with every scoreline command registered.
pub fn service<S: EntityStore + 'static>(store: S, auth: Authenticator) -> Service<S> {
    handlers::register(Service::new(store, auth))
}

/// Register handler modules with a service using the convention pattern.
///
/// Each handler module must export:
/// - `COMMAND: &str` - the command name
/// - `guard(ctx) -> bool` - input validation
/// - `handle(ctx) -> Result<Value, HandlerError>` - the handler
///
/// # Example
/// ```ignore
/// let service = scoreline::register_handlers!(
///     api::Service::new(InMemoryStore::new(), auth),
///     handlers::teams::create,
///     handlers::fixtures::report,
/// );
/// ```
#[macro_export]
macro_rules! register_handlers {
    ($service:expr, $( $($seg:ident)::+ ),+ $(,)?) => {
        $service
        $(
            .command_guarded(
                $($seg)::+::COMMAND,
                $($seg)::+::guard,
                $($seg)::+::handle,
            )
        )+
    };
}
