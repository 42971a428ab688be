use chrono::{Duration, Utc};
use scoreline::api::{HandlerError, Session};
use serde_json::json;

use crate::support::{authenticator, call, seed, service, token, ADMIN, PASSWORD, SECRET};

#[test]
fn registers_every_command() {
    let service = service();
    assert_eq!(
        service.commands(),
        [
            "auth.login",
            "match.create",
            "match.get",
            "match.report",
            "match.report_result",
            "player.create",
            "player.delete",
            "player.list",
            "player.update",
            "team.create",
            "team.delete",
            "team.get",
            "team.list",
            "team.update",
        ]
    );
}

#[test]
fn commands_require_a_token() {
    let service = service();

    let missing = service.dispatch("team.list", json!({}), Session::new());
    assert!(matches!(missing, Err(HandlerError::Unauthorized(_))));

    let wrong = service.dispatch("team.list", json!({}), Session::bearer("guess"));
    assert_eq!(wrong.unwrap_err().status_code(), 401);

    assert!(service
        .dispatch("team.list", json!({}), Session::bearer(&token()))
        .is_ok());
}

#[test]
fn login_then_use_the_token() {
    let service = service();
    let login = service
        .dispatch(
            "auth.login",
            json!({ "username": ADMIN, "password": PASSWORD }),
            Session::new(),
        )
        .unwrap();
    assert_eq!(login["token_type"], "Bearer");
    assert!(login["expires_at"].is_string());

    let token = login["token"].as_str().unwrap();
    let teams = service
        .dispatch("team.list", json!({}), Session::bearer(token))
        .unwrap();
    assert!(teams["teams"].as_array().unwrap().is_empty());
}

#[test]
fn login_with_wrong_credentials_is_401() {
    let service = service();
    let err = service
        .dispatch(
            "auth.login",
            json!({ "username": ADMIN, "password": "offside" }),
            Session::new(),
        )
        .unwrap_err();
    assert_eq!(err.status_code(), 401);
    assert_eq!(err.to_string(), "unauthorized: wrong username or password");

    let err = service
        .dispatch("auth.login", json!({ "username": ADMIN }), Session::new())
        .unwrap_err();
    assert!(matches!(err, HandlerError::GuardRejected(_)));
}

#[test]
fn expired_tokens_are_401() {
    let service = service();
    let stale = authenticator(SECRET)
        .issue_at(ADMIN, Utc::now() - Duration::hours(25))
        .unwrap()
        .token;
    let err = service
        .dispatch("team.list", json!({}), Session::bearer(&stale))
        .unwrap_err();
    assert_eq!(err.status_code(), 401);
    assert!(err.to_string().contains("expired"));
}

#[test]
fn tampered_tokens_are_401() {
    let service = service();

    let foreign = authenticator("someone-elses-secret")
        .issue_at(ADMIN, Utc::now())
        .unwrap()
        .token;
    let err = service
        .dispatch("team.list", json!({}), Session::bearer(&foreign))
        .unwrap_err();
    assert_eq!(err.status_code(), 401);

    // flip a character of the signature
    let mut altered = token();
    let last = altered.pop().unwrap();
    altered.push(if last == 'A' { 'B' } else { 'A' });
    let err = service
        .dispatch("team.list", json!({}), Session::bearer(&altered))
        .unwrap_err();
    assert_eq!(err.status_code(), 401);
}

#[test]
fn unknown_command() {
    let err = call(&service(), "match.abandon", json!({})).unwrap_err();
    assert!(matches!(err, HandlerError::UnknownCommand(ref name) if name == "match.abandon"));
    assert_eq!(err.status_code(), 404);
}

#[test]
fn guard_rejects_missing_fields() {
    let service = service();
    let err = call(&service, "player.create", json!({ "name": "Nobody" })).unwrap_err();
    assert!(matches!(err, HandlerError::GuardRejected(_)));
    assert_eq!(err.status_code(), 400);

    let err = call(&service, "match.report_result", json!({ "match_id": 1 })).unwrap_err();
    assert!(matches!(err, HandlerError::GuardRejected(_)));
}

#[test]
fn bad_payload_fails_to_decode() {
    let service = service();
    let err = call(
        &service,
        "player.create",
        json!({ "team_id": 1, "name": "X", "position": "sweeper", "jersey_number": 5 }),
    )
    .unwrap_err();
    assert!(matches!(err, HandlerError::DecodeFailed(_)));
}

#[test]
fn report_result_then_report() {
    let service = service();
    let (match_id, home_forward, away_forward) = seed(&service);

    let completed = call(
        &service,
        "match.report_result",
        json!({
            "match_id": match_id,
            "home_score": 1,
            "away_score": 2,
            "goals": [
                { "player_id": away_forward, "minute": 9 },
                { "player_id": home_forward, "minute": 50 },
                { "player_id": away_forward, "minute": 90 }
            ]
        }),
    )
    .unwrap();
    assert_eq!(completed["status"], "completed");

    let report = call(&service, "match.report", json!({ "match_id": match_id })).unwrap();
    assert_eq!(
        report,
        json!({
            "schedule": "2024-09-21T12:30:00Z",
            "home_team": "Arema",
            "away_team": "PSM Makassar",
            "final_score": "1-2",
            "match_result": "away win",
            "top_scorer_in_match": "Yakob Sayuri (2 goals)",
            "home_team_total_wins": 0,
            "away_team_total_wins": 1
        })
    );

    let detail = call(&service, "match.get", json!({ "id": match_id })).unwrap();
    assert_eq!(detail["goals"].as_array().unwrap().len(), 3);
}

#[test]
fn domain_errors_keep_their_status() {
    let service = service();
    let (match_id, home_forward, _) = seed(&service);

    let inconsistent = call(
        &service,
        "match.report_result",
        json!({ "match_id": match_id, "home_score": 2, "away_score": 0, "goals": [] }),
    )
    .unwrap_err();
    assert_eq!(inconsistent.status_code(), 422);
    assert!(inconsistent.to_string().contains("total score is 2"));

    let late = call(
        &service,
        "match.report_result",
        json!({
            "match_id": match_id,
            "home_score": 1,
            "away_score": 0,
            "goals": [{ "player_id": home_forward, "minute": 121 }]
        }),
    )
    .unwrap_err();
    assert_eq!(late.status_code(), 400);

    call(
        &service,
        "match.report_result",
        json!({ "match_id": match_id, "home_score": 0, "away_score": 0 }),
    )
    .unwrap();
    let again = call(
        &service,
        "match.report_result",
        json!({ "match_id": match_id, "home_score": 0, "away_score": 0 }),
    )
    .unwrap_err();
    assert_eq!(again.status_code(), 409);

    let missing = call(&service, "match.report", json!({ "match_id": 999 })).unwrap_err();
    assert_eq!(missing.status_code(), 404);
}

#[test]
fn team_and_player_commands() {
    let service = service();
    let team = call(&service, "team.create", json!({ "name": "Borneo FC", "founded_year": 2014 }))
        .unwrap();
    let id = team["id"].clone();

    let updated = call(
        &service,
        "team.update",
        json!({ "id": id, "founded_year": null, "headquarters_city": "Samarinda" }),
    )
    .unwrap();
    assert_eq!(updated["founded_year"], json!(null));
    assert_eq!(updated["headquarters_city"], "Samarinda");

    let keeper = call(
        &service,
        "player.create",
        json!({ "team_id": id, "name": "Nadeo Argawinata", "position": "goalkeeper", "jersey_number": 1 }),
    )
    .unwrap();
    call(
        &service,
        "player.update",
        json!({ "id": keeper["id"], "weight_kg": 78 }),
    )
    .unwrap();

    let listed = call(&service, "player.list", json!({ "team_id": id })).unwrap();
    assert_eq!(listed["players"][0]["weight_kg"], 78);

    call(&service, "player.delete", json!({ "id": keeper["id"] })).unwrap();
    let listed = call(&service, "player.list", json!({ "team_id": id })).unwrap();
    assert!(listed["players"].as_array().unwrap().is_empty());

    call(&service, "team.delete", json!({ "id": id })).unwrap();
    let gone = call(&service, "team.get", json!({ "id": id })).unwrap_err();
    assert_eq!(gone.status_code(), 404);
    let teams = call(&service, "team.list", json!({})).unwrap();
    assert!(teams["teams"].as_array().unwrap().is_empty());
}
