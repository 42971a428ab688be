//! Context passed to command handlers.
//!
//! Carries the parsed input and references to the engine and the
//! authenticator. Handlers reach everything they need through it.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::auth::Authenticator;
use super::error::HandlerError;
use crate::engine::ReportingEngine;

pub struct Context<'a, S> {
    input: Value,
    engine: &'a ReportingEngine<S>,
    auth: &'a Authenticator,
}

impl<'a, S> Context<'a, S> {
    pub(crate) fn new(input: Value, engine: &'a ReportingEngine<S>, auth: &'a Authenticator) -> Self {
        Self {
            input,
            engine,
            auth,
        }
    }

    /// Deserialize the input payload into a typed struct.
    pub fn input<T: DeserializeOwned>(&self) -> Result<T, HandlerError> {
        serde_json::from_value(self.input.clone())
            .map_err(|e| HandlerError::DecodeFailed(e.to_string()))
    }

    /// Deserialize one field of the input payload.
    pub fn field<T: DeserializeOwned>(&self, field: &str) -> Result<T, HandlerError> {
        let value = self
            .input
            .get(field)
            .cloned()
            .ok_or_else(|| HandlerError::DecodeFailed(format!("missing field `{}`", field)))?;
        serde_json::from_value(value)
            .map_err(|e| HandlerError::DecodeFailed(format!("field `{}`: {}", field, e)))
    }

    pub fn engine(&self) -> &ReportingEngine<S> {
        self.engine
    }

    pub fn auth(&self) -> &Authenticator {
        self.auth
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.input.get(field).is_some_and(|value| !value.is_null())
    }

    pub fn has_fields(&self, fields: &[&str]) -> bool {
        fields.iter().all(|f| self.has_field(f))
    }
}
