
use gallery_backend::{
    client::image_api::{ImageApi, ImageApiClient, LIST_FALLBACK_ERROR},
    entities::data_url::DataUrl,
    settings::AppConfig,
    ui::{
        driver::ModalDriver,
        gallery::GalleryView,
        modal::{Effect, ModalEvent, Tab},
        upload::FileCandidate,
    },
};
use reqwest::StatusCode;
use serde_json::{json, Value};
use test_utils::*;

#[actix_rt::test]
async fn create_returns_201_with_generated_fields() {
    let app = TestApp::spawn().await;

    let response = app.post_url("https://example.com/cat.png").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.unwrap();
    let image = &body["image"];
    assert!(!image["id"].as_str().unwrap().is_empty());
    assert!(image["createdAt"].as_str().is_some());
    assert_eq!(image["url"], "https://example.com/cat.png");

    let (status, list) = app.list().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["images"][0]["id"], image["id"]);
}

#[actix_rt::test]
async fn blank_url_is_rejected_without_creating_a_row() {
    let app = TestApp::spawn().await;

    for body in [json!({ "url": "" }), json!({ "url": "   \n" }), json!({})] {
        let response = app.post_json(body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "url is required");
    }

    assert_eq!(app.repo.count(), 0);
}

#[actix_rt::test]
async fn empty_table_lists_as_empty_array() {
    let app = TestApp::spawn().await;

    let (status, body) = app.list().await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "images": [] }));
}

#[actix_rt::test]
async fn listing_is_newest_first() {
    let app = TestApp::spawn().await;
    let urls: Vec<String> = (0..5).map(|i| format!("https://example.com/{i}.png")).collect();

    for url in &urls {
        assert_eq!(app.post_url(url).await.status(), StatusCode::CREATED);
    }

    let (_, body) = app.list().await;
    let listed: Vec<&str> = body["images"]
        .as_array()
        .unwrap()
        .iter()
        .map(|image| image["url"].as_str().unwrap())
        .collect();

    let expected: Vec<&str> = urls.iter().rev().map(String::as_str).collect();
    assert_eq!(listed, expected);
}

#[actix_rt::test]
async fn data_urls_are_validated() {
    let app = TestApp::spawn().await;

    let response = app.post_url("data:text/html;base64,PGgxPmhpPC9oMT4=").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("image MIME type"));

    let valid = DataUrl::encode("image/gif", b"GIF89a\x01\x00\x01\x00\x00\x00\x00;");
    assert_eq!(app.post_url(&valid).await.status(), StatusCode::CREATED);

    let svg = DataUrl::encode(
        "image/svg+xml",
        br#"<?xml version="1.0" encoding="UTF-8"?><svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"/>"#,
    );
    assert_eq!(app.post_url(&svg).await.status(), StatusCode::CREATED);
    assert_eq!(app.repo.count(), 2);
}

#[actix_rt::test]
async fn oversized_uploads_get_413() {
    let app = TestApp::spawn_with(AppConfig {
        max_upload_bytes: 64,
        ..test_config()
    })
    .await;

    let url = DataUrl::encode("image/png", &vec![7u8; 4096]);
    let response = app.post_url(&url).await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
    assert_eq!(app.repo.count(), 0);
}

#[actix_rt::test]
async fn malformed_json_is_a_client_error() {
    let app = TestApp::spawn().await;

    let response = app.client
        .post(app.images_url())
        .header("content-type", "application/json")
        .body("{\"url\": ")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[actix_rt::test]
async fn storage_failures_are_generic_500s() {
    let app = TestApp::spawn().await;
    app.repo.set_failing(true);

    let (status, body) = app.list().await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch images");

    let response = app.post_url("https://example.com/cat.png").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Failed to save image");
}

#[actix_rt::test]
async fn trailing_slash_is_normalized() {
    let app = TestApp::spawn().await;

    let response = app.client
        .get(format!("{}/api/images/", app.address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn health_reports_database_status() {
    let app = TestApp::spawn().await;

    let response = app.client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert!(body["database"].is_string());
}

#[actix_rt::test]
async fn health_cache_is_per_server() {
    let healthy = TestApp::spawn().await;
    let body: Value = healthy.client
        .get(format!("{}/health", healthy.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["database"], "OK");

    let broken = TestApp::spawn().await;
    broken.repo.set_failing(true);
    let body: Value = broken.client
        .get(format!("{}/health", broken.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["database"], "Unavailable");
}

#[actix_rt::test]
async fn client_round_trip_and_error_messages() {
    let app = TestApp::spawn().await;
    let client = ImageApiClient::new(&app.address);

    let created = client.create_image("https://example.com/dog.png").await.unwrap();
    let listed = client.list_images().await.unwrap();
    assert_eq!(listed, vec![created]);

    let err = client.create_image("   ").await.unwrap_err();
    assert_eq!(err.message, "url is required");

    app.repo.set_failing(true);
    let err = client.list_images().await.unwrap_err();
    assert_eq!(err.message, "Failed to fetch images");
    assert_ne!(err.message, LIST_FALLBACK_ERROR);
}

#[actix_rt::test]
async fn modal_upload_flow_against_live_server() {
    let app = TestApp::spawn().await;
    let mut driver = ModalDriver::new(ImageApiClient::new(&app.address));

    let host = driver.dispatch(ModalEvent::Open).await;
    assert_eq!(host, vec![Effect::ScheduleEnterAnimation]);
    driver.dispatch(ModalEvent::EnterAnimationStarted).await;

    let gif = FileCandidate::new("dot.gif", "image/gif", b"GIF89a\x01\x00\x01\x00\x00\x00\x00;".to_vec());
    driver.dispatch(ModalEvent::Dropped(vec![gif.clone()])).await;
    assert_eq!(driver.modal().upload().selected.as_deref(), Some(gif.to_data_url().as_str()));

    driver.dispatch(ModalEvent::UploadClicked).await;

    let modal = driver.modal();
    assert_eq!(modal.active_tab(), Tab::Gallery);
    match modal.gallery().view() {
        GalleryView::Items(images) => {
            assert_eq!(images.len(), 1);
            assert_eq!(images[0].url, gif.to_data_url());
        }
        other => panic!("unexpected gallery view: {:?}", other),
    }
}
