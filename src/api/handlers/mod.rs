//! Command handlers, one module per command.
//!
//! Each module exports `COMMAND`, `guard` and `handle`, and is wired up by
//! [`register`] through [`register_handlers!`](crate::register_handlers).

pub mod auth;
pub mod fixtures;
pub mod players;
pub mod teams;

use super::service::Service;
use crate::store::EntityStore;

/// Register every scoreline command on `service`. Only `auth.login` runs
/// without a token.
pub fn register<S: EntityStore + 'static>(service: Service<S>) -> Service<S> {
    crate::register_handlers!(
        service,
        auth::login,
        teams::create,
        teams::list,
        teams::get,
        teams::update,
        teams::delete,
        players::create,
        players::list,
        players::update,
        players::delete,
        fixtures::create,
        fixtures::get,
        fixtures::report_result,
        fixtures::report,
    )
    .allow_anonymous(auth::login::COMMAND)
}
