//! ---
//! mv_section: "15-testing-qa"
//! mv_subsection: "integration-tests"
//! mv_type: "source"
//! mv_scope: "code"
//! mv_description: "HTTP client tests against an in-process mock API."
//! mv_version: "v0.1.0"
//! mv_owner: "tbd"
//! ---
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use megaverse_api::{
    ClientSettings, ComethDirection, MegaverseApi, MegaverseClient, MegaverseError, Position,
    SoloonColor,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

const CANDIDATE: &str = "candidate-42";

#[derive(Debug, Clone)]
struct Recorded {
    method: Method,
    path: String,
    query: Option<String>,
    body: Option<Value>,
    received_at: Instant,
}

#[derive(Clone)]
struct MockApi {
    requests: Arc<Mutex<Vec<Recorded>>>,
    fail_status: Option<StatusCode>,
}

impl MockApi {
    fn recorded(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

async fn record(State(state): State<MockApi>, method: Method, uri: Uri, body: Bytes) -> Response {
    let parsed = if body.is_empty() {
        None
    } else {
        serde_json::from_slice(&body).ok()
    };
    state.requests.lock().unwrap().push(Recorded {
        method,
        path: uri.path().to_owned(),
        query: uri.query().map(str::to_owned),
        body: parsed,
        received_at: Instant::now(),
    });

    if let Some(status) = state.fail_status {
        return (status, Json(json!({ "error": "Too Many Requests" }))).into_response();
    }
    if uri.path().ends_with("/goal") {
        return Json(json!({
            "goal": [["POLYANET", "SPACE"], ["BLUE_SOLOON", "UP_COMETH"]]
        }))
        .into_response();
    }
    Json(json!({})).into_response()
}

async fn spawn_mock(fail_status: Option<StatusCode>) -> (String, MockApi) {
    let state = MockApi {
        requests: Arc::new(Mutex::new(Vec::new())),
        fail_status,
    };
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = Router::new().fallback(record).with_state(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (format!("http://{addr}/api"), state)
}

fn client(base_url: &str, interval: Duration) -> MegaverseClient {
    MegaverseClient::new(ClientSettings {
        base_url: base_url.to_owned(),
        candidate_id: CANDIDATE.to_owned(),
        min_request_interval: interval,
        request_timeout: Duration::from_secs(5),
    })
    .unwrap()
}

#[tokio::test]
async fn mutating_calls_carry_candidate_in_body() {
    let (base, mock) = spawn_mock(None).await;
    let client = client(&base, Duration::from_millis(5));

    client.create_polyanet(Position::new(1, 2)).await.unwrap();
    client
        .create_soloon(Position::new(3, 4), SoloonColor::Purple)
        .await
        .unwrap();
    client
        .create_cometh(Position::new(5, 6), ComethDirection::Left)
        .await
        .unwrap();
    client.delete_soloon(Position::new(3, 4)).await.unwrap();

    let recorded = mock.recorded();
    assert_eq!(recorded.len(), 4);

    assert_eq!(recorded[0].method, Method::POST);
    assert_eq!(recorded[0].path, "/api/polyanets");
    assert_eq!(
        recorded[0].body,
        Some(json!({ "row": 1, "column": 2, "candidateId": CANDIDATE }))
    );

    assert_eq!(recorded[1].path, "/api/soloons");
    assert_eq!(
        recorded[1].body,
        Some(json!({ "row": 3, "column": 4, "color": "purple", "candidateId": CANDIDATE }))
    );

    assert_eq!(recorded[2].path, "/api/comeths");
    assert_eq!(recorded[2].body.as_ref().unwrap()["direction"], "left");

    assert_eq!(recorded[3].method, Method::DELETE);
    assert_eq!(recorded[3].path, "/api/soloons");
    assert_eq!(
        recorded[3].body,
        Some(json!({ "row": 3, "column": 4, "candidateId": CANDIDATE }))
    );
    assert!(recorded.iter().all(|r| r.query.is_none()));
}

#[tokio::test]
async fn goal_map_uses_query_parameter() {
    let (base, mock) = spawn_mock(None).await;
    let client = client(&base, Duration::from_millis(5));

    let goal = client.goal_map().await.unwrap();
    assert_eq!(goal.goal[1][0], "BLUE_SOLOON");

    let recorded = mock.recorded();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].method, Method::GET);
    assert_eq!(recorded[0].path, format!("/api/map/{CANDIDATE}/goal"));
    assert_eq!(
        recorded[0].query.as_deref(),
        Some(format!("candidateId={CANDIDATE}").as_str())
    );
    assert!(recorded[0].body.is_none());
}

#[tokio::test]
async fn goal_path_escapes_candidate_id() {
    let (base, mock) = spawn_mock(None).await;
    let client = MegaverseClient::new(ClientSettings {
        base_url: base,
        candidate_id: "team a/b".to_owned(),
        min_request_interval: Duration::from_millis(5),
        request_timeout: Duration::from_secs(5),
    })
    .unwrap();

    client.goal_map().await.unwrap();

    let recorded = mock.recorded();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].path, "/api/map/team%20a%2Fb/goal");
}

#[tokio::test]
async fn error_status_and_body_are_surfaced() {
    let (base, _mock) = spawn_mock(Some(StatusCode::TOO_MANY_REQUESTS)).await;
    let client = client(&base, Duration::from_millis(5));

    let err = client.delete_cometh(Position::new(0, 0)).await.unwrap_err();
    assert!(matches!(err, MegaverseError::Http { .. }));
    assert_eq!(err.status(), Some(429));
    assert_eq!(err.body().unwrap()["error"], "Too Many Requests");
    assert!(err.to_string().contains("429"));
}

#[tokio::test]
async fn requests_are_spaced_by_minimum_interval() {
    let interval = Duration::from_millis(80);
    let (base, mock) = spawn_mock(None).await;
    let client = client(&base, interval);

    client.create_polyanet(Position::new(0, 0)).await.unwrap();
    client.delete_polyanet(Position::new(0, 0)).await.unwrap();
    client.goal_map().await.unwrap();

    let recorded = mock.recorded();
    assert_eq!(recorded.len(), 3);
    for pair in recorded.windows(2) {
        let gap = pair[1].received_at - pair[0].received_at;
        assert!(gap >= interval, "gap {:?} shorter than {:?}", gap, interval);
    }
}

#[tokio::test]
async fn failed_requests_still_hold_the_interval() {
    let interval = Duration::from_millis(80);
    let (base, mock) = spawn_mock(Some(StatusCode::INTERNAL_SERVER_ERROR)).await;
    let client = client(&base, interval);

    assert!(client.create_polyanet(Position::new(0, 0)).await.is_err());
    assert!(client.create_polyanet(Position::new(0, 1)).await.is_err());

    let recorded = mock.recorded();
    assert_eq!(recorded.len(), 2);
    assert!(recorded[1].received_at - recorded[0].received_at >= interval);
}
