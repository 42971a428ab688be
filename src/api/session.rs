//! Session - request headers seen by a command.

use std::collections::HashMap;

/// Header values from the incoming request, keyed by lowercased name.
#[derive(Debug, Clone, Default)]
pub struct Session {
    variables: HashMap<String, String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys must already be lowercase, as HTTP header names are.
    pub fn from_map(variables: HashMap<String, String>) -> Self {
        Self { variables }
    }

    /// Session carrying `authorization: Bearer <token>`.
    pub fn bearer(token: &str) -> Self {
        let mut session = Self::new();
        session.set("authorization", format!("Bearer {}", token));
        session
    }

    /// Token from an `authorization: Bearer <token>` header.
    pub fn bearer_token(&self) -> Option<&str> {
        let header = self.get("authorization")?;
        let (scheme, token) = header.split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("bearer") {
            return None;
        }
        let token = token.trim();
        (!token.is_empty()).then_some(token)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(|v| v.as_str())
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into().to_ascii_lowercase(), value.into());
    }
}
