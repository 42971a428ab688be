//! HTTP transport integration tests.
//!
//! Starts an axum server and exercises it with reqwest.

use std::sync::Arc;

use scoreline::api::{self, Service};
use scoreline::InMemoryStore;
use serde_json::{json, Value};

use chrono::{Duration, Utc};

use crate::support::{authenticator, seed, service, token, ADMIN, PASSWORD, SECRET};

/// Bind to port 0 and return the base URL.
async fn start_server(service: Arc<Service<InMemoryStore>>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        api::serve(service, listener, std::future::pending()).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn health_needs_no_token() {
    let base = start_server(Arc::new(service())).await;
    let resp = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);
    let commands = body["commands"].as_array().unwrap();
    assert!(commands.iter().any(|c| c == "match.report_result"));
}

#[tokio::test]
async fn commands_without_token_are_401() {
    let base = start_server(Arc::new(service())).await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/team.list"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("unauthorized"));
}

#[tokio::test]
async fn report_over_http() {
    let service = Arc::new(service());
    let (match_id, home_forward, _) = seed(&service);
    let base = start_server(service).await;
    let client = reqwest::Client::new();
    let token = token();

    let resp = client
        .post(format!("{base}/match.report_result"))
        .bearer_auth(&token)
        .json(&json!({
            "match_id": match_id,
            "home_score": 1,
            "away_score": 0,
            "goals": [{ "player_id": home_forward, "minute": 33 }]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = client
        .post(format!("{base}/match.report"))
        .bearer_auth(&token)
        .json(&json!({ "match_id": match_id }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let report: Value = resp.json().await.unwrap();
    assert_eq!(report["final_score"], "1-0");
    assert_eq!(report["match_result"], "home win");
    assert_eq!(report["top_scorer_in_match"], "Dedik Setiawan (1 goal)");

    let resp = client
        .post(format!("{base}/match.report_result"))
        .bearer_auth(&token)
        .json(&json!({ "match_id": match_id, "home_score": 0, "away_score": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);
}

#[tokio::test]
async fn validation_errors_map_to_status_codes() {
    let service = Arc::new(service());
    let (match_id, _, _) = seed(&service);
    let base = start_server(service).await;
    let client = reqwest::Client::new();
    let token = token();

    let resp = client
        .post(format!("{base}/match.report_result"))
        .bearer_auth(&token)
        .json(&json!({ "match_id": match_id, "home_score": 3, "away_score": 0, "goals": [] }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("inconsistent score"));

    let resp = client
        .post(format!("{base}/team.get"))
        .bearer_auth(&token)
        .json(&json!({ "id": 404 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn login_over_http() {
    let base = start_server(Arc::new(service())).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/auth.login"))
        .json(&json!({ "username": ADMIN, "password": PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let token = body["token"].as_str().unwrap().to_string();

    let resp = client
        .post(format!("{base}/team.create"))
        .bearer_auth(&token)
        .json(&json!({ "name": "Madura United" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = client
        .post(format!("{base}/auth.login"))
        .json(&json!({ "username": ADMIN, "password": "handball" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "unauthorized: wrong username or password");
}

#[tokio::test]
async fn expired_and_forged_tokens_are_401() {
    let base = start_server(Arc::new(service())).await;
    let client = reqwest::Client::new();

    let expired = authenticator(SECRET)
        .issue_at(ADMIN, Utc::now() - Duration::hours(30))
        .unwrap()
        .token;
    let forged = authenticator("not-our-secret")
        .issue_at(ADMIN, Utc::now())
        .unwrap()
        .token;

    for bad in [expired, forged] {
        let resp = client
            .post(format!("{base}/team.list"))
            .bearer_auth(&bad)
            .json(&json!({}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 401);
    }
}
