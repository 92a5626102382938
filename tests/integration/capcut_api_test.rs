// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::http::StatusCode;
use regex::Regex;
use serde_json::Value;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::helpers::{create_test_app, FakeLauncher};

const TEMPLATE_URL: &str = "https://www.capcut.com/template-detail/7299999999999999999";
const MEDIA: &[u8] = b"\x00\x00\x00\x18ftypmp42fake-media";

fn mirror_page(media_url: &str) -> String {
    format!(
        r#"<html><body>
        <div class="result"><a href="{media_url}">Download</a></div>
        <script>document.getElementById('dl').innerHTML = '<a href="{media_url}">Download</a>';</script>
        </body></html>"#
    )
}

#[tokio::test]
async fn test_url_required() {
    let upstream = MockServer::start().await;
    let app = create_test_app(&upstream.uri(), FakeLauncher::default());

    let response = app.server.get("/api/capcut").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "URL parameter is required");
}

#[tokio::test]
async fn test_download_saved_and_served() {
    let upstream = MockServer::start().await;
    let media_url = format!("{}/files/template.mp4", upstream.uri());

    Mock::given(method("GET"))
        .and(path("/capcut-video-downloader/"))
        .and(query_param("url", TEMPLATE_URL))
        .respond_with(ResponseTemplate::new(200).set_body_string(mirror_page(&media_url)))
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/template.mp4"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "video/mp4")
                .set_body_bytes(MEDIA),
        )
        .mount(&upstream)
        .await;

    let app = create_test_app(&upstream.uri(), FakeLauncher::default());
    let response = app
        .server
        .get("/api/capcut")
        .add_query_param("url", TEMPLATE_URL)
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], true);
    let download_url = body["downloadUrl"].as_str().unwrap();
    let pattern = Regex::new(r"^http://localhost:4000/downloads/(\d+\.mp4)$").unwrap();
    let file_name = pattern
        .captures(download_url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .expect("timestamp-named file");

    let saved = std::fs::read(app.downloads.path().join(&file_name)).unwrap();
    assert_eq!(saved, MEDIA);

    let served = app.server.get(&format!("/downloads/{}", file_name)).await;
    served.assert_status_ok();
    assert_eq!(served.as_bytes().as_ref(), MEDIA);
}

#[tokio::test]
async fn test_missing_link_is_500() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/capcut-video-downloader/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><script>var nothing;</script></html>"))
        .mount(&upstream)
        .await;

    let app = create_test_app(&upstream.uri(), FakeLauncher::default());
    let response = app
        .server
        .get("/api/capcut")
        .add_query_param("url", TEMPLATE_URL)
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = response.json();
    assert_eq!(body["status"], false);
    assert_eq!(body["error"], "Download link not found");
}

#[tokio::test]
async fn test_failed_media_download_leaves_no_file() {
    let upstream = MockServer::start().await;
    let media_url = format!("{}/files/gone.mp4", upstream.uri());
    Mock::given(method("GET"))
        .and(path("/capcut-video-downloader/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(mirror_page(&media_url)))
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/gone.mp4"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&upstream)
        .await;

    let app = create_test_app(&upstream.uri(), FakeLauncher::default());
    let response = app
        .server
        .get("/api/capcut")
        .add_query_param("url", TEMPLATE_URL)
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>()["error"], "Failed to download video");

    let leftovers = std::fs::read_dir(app.downloads.path()).unwrap().count();
    assert_eq!(leftovers, 0);
}
