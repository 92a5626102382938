// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::http::StatusCode;
use serde_json::Value;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::helpers::{create_test_app, fixture, FakeLauncher};

async fn serve_search_page(upstream: &MockServer, query: &str, page: String) {
    Mock::given(method("GET"))
        .and(path("/results"))
        .and(query_param("search_query", query))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_body_string(page),
        )
        .mount(upstream)
        .await;
}

#[tokio::test]
async fn test_query_required() {
    let upstream = MockServer::start().await;
    let app = create_test_app(&upstream.uri(), FakeLauncher::default());

    let response = app.server.get("/api/ytsearch").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "Query parameter is required");
}

#[tokio::test]
async fn test_initial_data_results_capped_at_three() {
    let upstream = MockServer::start().await;
    serve_search_page(&upstream, "rust tutorial", fixture("search_initial_data.html")).await;
    let app = create_test_app(&upstream.uri(), FakeLauncher::default());

    let response = app
        .server
        .get("/api/ytsearch")
        .add_query_param("query", "rust tutorial")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], true);
    assert_eq!(body["query"], "rust tutorial");
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));

    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    let ids: Vec<&str> = results.iter().map(|r| r["videoId"].as_str().unwrap()).collect();
    assert_eq!(ids, ["INIT001", "INIT002", "INIT003"]);
    for r in results {
        assert!(!r["title"].as_str().unwrap().is_empty());
        assert!(!r["url"].as_str().unwrap().is_empty());
    }
    assert_eq!(
        results[0]["url"],
        format!("{}/watch?v=INIT001", upstream.uri())
    );
    assert_eq!(results[0]["thumbnailUrl"], "https://i.ytimg.com/vi/INIT001/hq720.jpg");
    assert_eq!(results[0]["viewsText"], "1,234 views");

    // No browser involved
    assert_eq!(app.launcher.opened(), 0);
}

#[tokio::test]
async fn test_markup_results_first_three() {
    let upstream = MockServer::start().await;
    serve_search_page(&upstream, "rust", fixture("search_markup.html")).await;
    let app = create_test_app(&upstream.uri(), FakeLauncher::default());

    let response = app
        .server
        .get("/api/ytsearch")
        .add_query_param("query", "rust")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let titles: Vec<&str> = body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["Rust Tutorial 1", "Rust Tutorial 2", "Rust Tutorial 3"]);
}

#[tokio::test]
async fn test_no_results_is_404() {
    let upstream = MockServer::start().await;
    serve_search_page(&upstream, "zzzz", fixture("empty.html")).await;
    let app = create_test_app(&upstream.uri(), FakeLauncher::default());

    let response = app
        .server
        .get("/api/ytsearch")
        .add_query_param("query", "zzzz")
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["status"], false);
    assert_eq!(
        body["error"],
        "No results found or unable to parse YouTube results"
    );
}

#[tokio::test]
async fn test_upstream_error_is_500() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/results"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&upstream)
        .await;
    let app = create_test_app(&upstream.uri(), FakeLauncher::default());

    let response = app
        .server
        .get("/api/ytsearch")
        .add_query_param("query", "rust")
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>()["status"], false);
}
