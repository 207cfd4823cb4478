#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use edu_minimodels::planning::{GraphSource, PrerequisiteGraph};
use edu_minimodels::services::mastery_store::MasteryStore;
use edu_minimodels::state::AppState;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub fn diamond_graph() -> PrerequisiteGraph {
    PrerequisiteGraph::from_adjacency([
        ("A", vec!["B", "C"]),
        ("B", vec!["D"]),
        ("C", vec!["D", "E"]),
        ("D", vec![]),
        ("E", vec![]),
    ])
}

pub fn create_test_app() -> Router {
    let graph = GraphSource::from_graph(diamond_graph(), "knowledge_graph.json");
    edu_minimodels::build_app(AppState::new(graph, MasteryStore::in_memory()))
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}
