mod common;

use axum::http::StatusCode;
use std::time::{Duration, Instant};

use common::{test_app, test_app_with, TestClient};
use graphlex_backend::{config::SessionLimits, state::AppState};
use serde_json::{json, Value};

fn client() -> TestClient {
    let (app, _) = test_app();
    TestClient::new(app)
}

async fn open(client: &TestClient, index: usize) -> (String, Value) {
    let response = client
        .post_json("/api/v1/sessions", json!({ "slug": "activity-1", "index": index }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    let id = body["sessionId"].as_str().expect("session id").to_string();
    (id, body["view"].clone())
}

async fn act(client: &TestClient, id: &str, interaction: Value) -> Value {
    let response = client
        .post_json(&format!("/api/v1/sessions/{id}/interact"), interaction)
        .await;
    response.assert_status(StatusCode::OK);
    response.json()
}

#[tokio::test]
async fn test_health_check() {
    let response = client().get("/api/v1/health").await;
    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn test_list_activities() {
    let response = client().get("/api/v1/activities").await;
    response.assert_status(StatusCode::OK);

    let body: Value = response.json();
    let list = body.as_array().expect("array of summaries");
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["slug"], "activity-1");
    assert_eq!(list[0]["exercise_count"], 18);
    assert_eq!(list[1]["slug"], "activity-2");
    assert_eq!(list[1]["difficulty"], "Intermediate");
}

#[tokio::test]
async fn test_get_activity_content() {
    let response = client().get("/api/v1/activities/activity-1").await;
    response.assert_status(StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["title"], "Line Graph Activity");
    assert_eq!(body["exercises"][4]["kind"], "drag_drop_table");
    assert_eq!(body["exercises"][7]["kind"], "interactive_draw");
}

#[tokio::test]
async fn test_unknown_activity_is_not_found() {
    let response = client().get("/api/v1/activities/activity-42").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["error"], "activity_not_found");
    assert_eq!(body["home"], "/");
    assert_eq!(body["available"], json!(["activity-1", "activity-2"]));
}

#[tokio::test]
async fn test_explanation_cannot_open_session() {
    let response = client()
        .post_json("/api/v1/sessions", json!({ "slug": "activity-1", "index": 0 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "not_interactive");
}

#[tokio::test]
async fn test_exercise_index_out_of_range() {
    let response = client()
        .post_json("/api/v1/sessions", json!({ "slug": "activity-1", "index": 99 }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_drag_drop_session_grades_on_submit() {
    let client = client();
    let (id, view) = open(&client, 5).await;
    assert_eq!(view["kind"], "drag_drop");
    assert_eq!(view["available"].as_array().map(Vec::len), Some(10));
    assert_eq!(view["can_submit"], false);

    // adverb labels carry no trend term, so every zone is wrong
    for (label, zone) in [
        ("item-1", "cell-1"),
        ("item-2", "cell-2"),
        ("item-3", "cell-3"),
        ("item-4", "cell-4"),
        ("item-5", "cell-5"),
    ] {
        act(&client, &id, json!({ "action": "start_drag", "label_id": label })).await;
        let out = act(&client, &id, json!({ "action": "drop_on", "zone_id": zone })).await;
        assert_eq!(out["applied"], true);
    }

    let out = act(&client, &id, json!({ "action": "submit" })).await;
    assert_eq!(out["applied"], true);
    assert_eq!(out["view"]["progress"], "submitted");
    assert_eq!(out["view"]["result"]["correct_count"], 0);
    assert_eq!(out["view"]["result"]["total_zones"], 5);
    assert_eq!(out["view"]["zones"][0]["verdict"], false);

    // frozen after submission
    act(&client, &id, json!({ "action": "start_drag", "label_id": "item-6" })).await;
    let out = act(&client, &id, json!({ "action": "drop_on", "zone_id": "cell-1" })).await;
    assert_eq!(out["applied"], false);

    let out = act(&client, &id, json!({ "action": "reset" })).await;
    assert_eq!(out["view"]["progress"], "in_progress");
    assert_eq!(out["view"]["placed"], 0);
}

#[tokio::test]
async fn test_drawing_session_scores_exact_trace() {
    let client = client();
    let (id, view) = open(&client, 7).await;
    assert_eq!(view["kind"], "drawing");
    assert_eq!(view["phase"], "empty");
    assert!(view["reference"].is_null());

    let revealed = act(&client, &id, json!({ "action": "reveal_answers" })).await;
    let reference = revealed["view"]["reference"].as_array().expect("reference shown").clone();
    assert_eq!(reference.len(), 5);
    act(&client, &id, json!({ "action": "hide_answers" })).await;

    let first = &reference[0];
    act(&client, &id, json!({ "action": "pointer_down", "x": first["x"], "y": first["y"] })).await;
    for p in &reference[1..] {
        act(&client, &id, json!({ "action": "pointer_move", "x": p["x"], "y": p["y"] })).await;
    }
    let out = act(&client, &id, json!({ "action": "pointer_up" })).await;
    assert_eq!(out["view"]["phase"], "drawn");

    let out = act(&client, &id, json!({ "action": "submit" })).await;
    assert_eq!(out["view"]["phase"], "submitted");
    let accuracy = out["view"]["accuracy"].as_f64().expect("scored");
    assert!(accuracy > 99.99, "accuracy was {accuracy}");
}

#[tokio::test]
async fn test_drawing_outside_plot_is_ignored() {
    let client = client();
    let (id, _) = open(&client, 7).await;

    // left padding is 80px
    let out = act(&client, &id, json!({ "action": "pointer_down", "x": 10.0, "y": 100.0 })).await;
    assert_eq!(out["applied"], false);
    assert_eq!(out["view"]["can_submit"], false);
}

#[tokio::test]
async fn test_question_session_reveals_answer_on_submit() {
    let client = client();
    let (id, view) = open(&client, 9).await;
    assert_eq!(view["kind"], "question");
    assert!(view["expected"].is_null());

    act(&client, &id, json!({ "action": "set_answer", "index": 0, "value": "  UPWARD " })).await;
    let out = act(&client, &id, json!({ "action": "submit" })).await;
    assert_eq!(out["view"]["correct"], true);
    assert_eq!(out["view"]["show_answer"], true);
    assert_eq!(out["view"]["expected"], "upward");
}

#[tokio::test]
async fn test_check_answer_endpoint() {
    let client = client();

    let response = client
        .post_json(
            "/api/v1/activities/activity-1/exercises/16/check",
            json!({ "answers": "In order to" }),
        )
        .await;
    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["correct"], true);

    let response = client
        .post_json(
            "/api/v1/activities/activity-1/exercises/10/check",
            json!({ "answers": ["stood at", "a peak"] }),
        )
        .await;
    let body: Value = response.json();
    assert_eq!(body["correct"], false);
    assert_eq!(body["expected"].as_array().map(Vec::len), Some(5));

    let response = client
        .post_json(
            "/api/v1/activities/activity-1/exercises/4/check",
            json!({ "answers": "surge" }),
        )
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_close_session() {
    let (app, state) = test_app();
    let client = TestClient::new(app);
    let (id, _) = open(&client, 4).await;
    assert_eq!(state.session_count().await, 1);

    let response = client.delete(&format!("/api/v1/sessions/{id}")).await;
    response.assert_status(StatusCode::NO_CONTENT);
    assert_eq!(state.session_count().await, 0);

    let response = client.get(&format!("/api/v1/sessions/{id}")).await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "session_not_found");
}

#[tokio::test]
async fn test_abandoned_session_expires() {
    let limits = SessionLimits {
        ttl: Duration::from_secs(300),
        max_sessions: 50,
    };
    let (app, state) = test_app_with(AppState::default().with_session_limits(limits));
    let client = TestClient::new(app);
    let (id, _) = open(&client, 7).await;

    // the browser navigated away without a DELETE
    let removed = state.expire_idle(Instant::now() + Duration::from_secs(301)).await;
    assert_eq!(removed, 1);

    let response = client.get(&format!("/api/v1/sessions/{id}")).await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "session_not_found");
}

#[tokio::test]
async fn test_session_store_stays_bounded() {
    let limits = SessionLimits {
        ttl: Duration::from_secs(300),
        max_sessions: 20,
    };
    let (app, state) = test_app_with(AppState::default().with_session_limits(limits));
    let client = TestClient::new(app);
    for _ in 0..100 {
        open(&client, 4).await;
    }
    assert_eq!(state.session_count().await, 20);
}
