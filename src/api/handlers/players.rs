pub mod create {
    use serde_json::Value;

    use crate::api::{Context, HandlerError};
    use crate::domain::NewPlayer;
    use crate::store::EntityStore;

    pub const COMMAND: &str = "player.create";

    pub fn guard<S>(ctx: &Context<S>) -> bool {
        ctx.has_fields(&["team_id", "name", "position", "jersey_number"])
    }

    pub fn handle<S: EntityStore>(ctx: &Context<S>) -> Result<Value, HandlerError> {
        let new = ctx.input::<NewPlayer>()?;
        let player = ctx.engine().roster().create_player(new)?;
        Ok(serde_json::to_value(player)?)
    }
}

pub mod list {
    use serde_json::{json, Value};

    use crate::api::{Context, HandlerError};
    use crate::store::EntityStore;

    pub const COMMAND: &str = "player.list";

    pub fn guard<S>(ctx: &Context<S>) -> bool {
        ctx.has_field("team_id")
    }

    pub fn handle<S: EntityStore>(ctx: &Context<S>) -> Result<Value, HandlerError> {
        let team_id = ctx.field::<u64>("team_id")?;
        let players = ctx.engine().roster().list_players(team_id)?;
        Ok(json!({ "team_id": team_id, "players": players }))
    }
}

pub mod update {
    use serde_json::Value;

    use crate::api::{Context, HandlerError};
    use crate::domain::PlayerPatch;
    use crate::store::EntityStore;

    pub const COMMAND: &str = "player.update";

    pub fn guard<S>(ctx: &Context<S>) -> bool {
        ctx.has_field("id")
    }

    pub fn handle<S: EntityStore>(ctx: &Context<S>) -> Result<Value, HandlerError> {
        let id = ctx.field::<u64>("id")?;
        let patch = ctx.input::<PlayerPatch>()?;
        Ok(serde_json::to_value(ctx.engine().roster().update_player(id, patch)?)?)
    }
}

pub mod delete {
    use serde_json::{json, Value};

    use crate::api::{Context, HandlerError};
    use crate::store::EntityStore;

    pub const COMMAND: &str = "player.delete";

    pub fn guard<S>(ctx: &Context<S>) -> bool {
        ctx.has_field("id")
    }

    pub fn handle<S: EntityStore>(ctx: &Context<S>) -> Result<Value, HandlerError> {
        let id = ctx.field::<u64>("id")?;
        ctx.engine().roster().delete_player(id)?;
        Ok(json!({ "id": id, "deleted": true }))
    }
}
