pub mod login {
    use serde_json::Value;

    use crate::api::{Context, Credentials, HandlerError};

    pub const COMMAND: &str = "auth.login";

    pub fn guard<S>(ctx: &Context<S>) -> bool {
        ctx.has_fields(&["username", "password"])
    }

    pub fn handle<S>(ctx: &Context<S>) -> Result<Value, HandlerError> {
        let attempt = ctx.input::<Credentials>()?;
        Ok(serde_json::to_value(ctx.auth().login(&attempt)?)?)
    }
}
