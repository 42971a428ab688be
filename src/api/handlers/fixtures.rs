pub mod create {
    use serde_json::Value;

    use crate::api::{Context, HandlerError};
    use crate::domain::NewMatch;
    use crate::store::EntityStore;

    pub const COMMAND: &str = "match.create";

    pub fn guard<S>(ctx: &Context<S>) -> bool {
        ctx.has_fields(&["home_team_id", "away_team_id", "scheduled_at"])
    }

    pub fn handle<S: EntityStore>(ctx: &Context<S>) -> Result<Value, HandlerError> {
        let new = ctx.input::<NewMatch>()?;
        Ok(serde_json::to_value(ctx.engine().roster().create_match(new)?)?)
    }
}

pub mod get {
    use serde_json::Value;

    use crate::api::{Context, HandlerError};
    use crate::store::EntityStore;

    pub const COMMAND: &str = "match.get";

    pub fn guard<S>(ctx: &Context<S>) -> bool {
        ctx.has_field("id")
    }

    pub fn handle<S: EntityStore>(ctx: &Context<S>) -> Result<Value, HandlerError> {
        let id = ctx.field::<u64>("id")?;
        Ok(serde_json::to_value(ctx.engine().roster().get_match(id)?)?)
    }
}

/// Final score plus goals. A goalless draw may omit `goals`.
pub mod report_result {
    use serde_json::Value;

    use crate::api::{Context, HandlerError};
    use crate::domain::ResultReport;
    use crate::store::EntityStore;

    pub const COMMAND: &str = "match.report_result";

    pub fn guard<S>(ctx: &Context<S>) -> bool {
        ctx.has_fields(&["match_id", "home_score", "away_score"])
    }

    pub fn handle<S: EntityStore>(ctx: &Context<S>) -> Result<Value, HandlerError> {
        let match_id = ctx.field::<u64>("match_id")?;
        let report = ctx.input::<ResultReport>()?;
        let completed = ctx.engine().report_result(match_id, &report)?;
        Ok(serde_json::to_value(completed)?)
    }
}

pub mod report {
    use serde_json::Value;

    use crate::api::{Context, HandlerError};
    use crate::store::EntityStore;

    pub const COMMAND: &str = "match.report";

    pub fn guard<S>(ctx: &Context<S>) -> bool {
        ctx.has_field("match_id")
    }

    pub fn handle<S: EntityStore>(ctx: &Context<S>) -> Result<Value, HandlerError> {
        let match_id = ctx.field::<u64>("match_id")?;
        Ok(serde_json::to_value(ctx.engine().get_report(match_id)?)?)
    }
}
