pub mod create {
    use serde_json::Value;

    use crate::api::{Context, HandlerError};
    use crate::domain::NewTeam;
    use crate::store::EntityStore;

    pub const COMMAND: &str = "team.create";

    pub fn guard<S>(ctx: &Context<S>) -> bool {
        ctx.has_field("name")
    }

    pub fn handle<S: EntityStore>(ctx: &Context<S>) -> Result<Value, HandlerError> {
        let new = ctx.input::<NewTeam>()?;
        let team = ctx.engine().roster().create_team(new)?;
        Ok(serde_json::to_value(team)?)
    }
}

pub mod list {
    use serde_json::{json, Value};

    use crate::api::{Context, HandlerError};
    use crate::store::EntityStore;

    pub const COMMAND: &str = "team.list";

    pub fn guard<S>(_ctx: &Context<S>) -> bool {
        true
    }

    pub fn handle<S: EntityStore>(ctx: &Context<S>) -> Result<Value, HandlerError> {
        let teams = ctx.engine().roster().list_teams()?;
        Ok(json!({ "teams": teams }))
    }
}

pub mod get {
    use serde_json::Value;

    use crate::api::{Context, HandlerError};
    use crate::store::EntityStore;

    pub const COMMAND: &str = "team.get";

    pub fn guard<S>(ctx: &Context<S>) -> bool {
        ctx.has_field("id")
    }

    pub fn handle<S: EntityStore>(ctx: &Context<S>) -> Result<Value, HandlerError> {
        let id = ctx.field::<u64>("id")?;
        Ok(serde_json::to_value(ctx.engine().roster().get_team(id)?)?)
    }
}

pub mod update {
    use serde_json::Value;

    use crate::api::{Context, HandlerError};
    use crate::domain::TeamPatch;
    use crate::store::EntityStore;

    pub const COMMAND: &str = "team.update";

    pub fn guard<S>(ctx: &Context<S>) -> bool {
        ctx.has_field("id")
    }

    pub fn handle<S: EntityStore>(ctx: &Context<S>) -> Result<Value, HandlerError> {
        let id = ctx.field::<u64>("id")?;
        let patch = ctx.input::<TeamPatch>()?;
        Ok(serde_json::to_value(ctx.engine().roster().update_team(id, patch)?)?)
    }
}

pub mod delete {
    use serde_json::{json, Value};

    use crate::api::{Context, HandlerError};
    use crate::store::EntityStore;

    pub const COMMAND: &str = "team.delete";

    pub fn guard<S>(ctx: &Context<S>) -> bool {
        ctx.has_field("id")
    }

    pub fn handle<S: EntityStore>(ctx: &Context<S>) -> Result<Value, HandlerError> {
        let id = ctx.field::<u64>("id")?;
        ctx.engine().roster().delete_team(id)?;
        Ok(json!({ "id": id, "deleted": true }))
    }
}
