// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::http::StatusCode;
use serde_json::{json, Value};
use wiremock::MockServer;

use super::helpers::{create_test_app, FakeLauncher, CREATOR};

#[tokio::test]
async fn test_info_lists_categories_in_load_order() {
    let upstream = MockServer::start().await;
    let app = create_test_app(&upstream.uri(), FakeLauncher::default());

    let response = app.server.get("/api/info").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["creator"], CREATOR);
    assert!(body.get("status").is_none());

    let categories = body["categories"].as_array().unwrap();
    let names: Vec<&str> = categories
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Downloader", "Social", "downloader"]);

    assert_eq!(
        categories[0]["items"],
        json!([{
            "name": "Youtube",
            "desc": "API to search YouTube or scrape detailed information from YouTube video pages",
            "path": "/api/youtube?query=&url=",
            "author": "Mr-Perfect",
            "method": "get"
        }])
    );
    assert_eq!(categories[1]["items"][0]["path"], "/api/ytsearch?query=");
    assert_eq!(categories[2]["items"][0]["name"], "CapCutDownloader");
    assert_eq!(categories[2]["items"][0]["path"], "/api/capcut?url=");
}

#[tokio::test]
async fn test_unknown_path_is_json_404() {
    let upstream = MockServer::start().await;
    let app = create_test_app(&upstream.uri(), FakeLauncher::default());

    let response = app.server.get("/api/does-not-exist").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(
        body,
        json!({ "status": false, "creator": CREATOR, "error": "Not Found" })
    );
}

#[tokio::test]
async fn test_wrong_method_is_not_served() {
    let upstream = MockServer::start().await;
    let app = create_test_app(&upstream.uri(), FakeLauncher::default());

    let response = app.server.post("/api/ytsearch").await;
    assert!(response.status_code().is_client_error());
    assert_eq!(app.launcher.opened(), 0);
}
