use serde_json::json;

use crate::common::{PASSWORD, PNG_BYTES, TestApp, key_of, routes};

async fn upload_avatar(app: &TestApp, token: &str) -> String {
    let res = app
        .upload_with_token(routes::AVATAR, "me.png", "image/png", PNG_BYTES.to_vec(), token)
        .await;
    assert_eq!(res.status, 200, "avatar upload failed: {}", res.text);
    res.body["avatar_url"]
        .as_str()
        .expect("avatar_url")
        .to_string()
}

#[tokio::test]
async fn new_user_has_no_avatar() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("alice").await;

    let res = app.get_with_token(routes::AVATAR, &token).await;

    assert_eq!(res.status, 200);
    assert!(res.body["avatar_url"].is_null());
}

#[tokio::test]
async fn uploaded_avatar_is_named_after_the_user_and_served_publicly() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("alice").await;
    let user_id = app.user_id("alice").await;

    let url = upload_avatar(&app, &token).await;
    let key = key_of(&url);
    assert!(key.starts_with(&format!("{user_id}_")), "{key}");
    assert!(key.ends_with(".png"));

    let current = app.get_with_token(routes::AVATAR, &token).await;
    assert_eq!(current.body["avatar_url"], url.as_str());

    let file = app.get_without_token(&routes::avatar_file(&key)).await;
    assert_eq!(file.status, 200);
    assert_eq!(file.bytes, PNG_BYTES);
}

#[tokio::test]
async fn replacing_an_avatar_removes_the_previous_file() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("alice").await;

    let old_key = key_of(&upload_avatar(&app, &token).await);
    let new_key = key_of(&upload_avatar(&app, &token).await);

    assert_ne!(old_key, new_key);
    let old = app.get_without_token(&routes::avatar_file(&old_key)).await;
    assert_eq!(old.status, 404);
    let new = app.get_without_token(&routes::avatar_file(&new_key)).await;
    assert_eq!(new.status, 200);
}

#[tokio::test]
async fn login_reports_the_avatar_url() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("alice").await;
    let url = upload_avatar(&app, &token).await;

    let res = app
        .post_without_token(
            routes::LOGIN,
            &json!({"username": "alice", "password": PASSWORD}),
        )
        .await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["avatar_url"], url.as_str());
}

#[tokio::test]
async fn deleting_the_avatar_clears_it() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("alice").await;
    let key = key_of(&upload_avatar(&app, &token).await);

    let res = app.delete_with_token(routes::AVATAR, &token).await;
    assert_eq!(res.status, 204, "{}", res.text);

    let current = app.get_with_token(routes::AVATAR, &token).await;
    assert!(current.body["avatar_url"].is_null());
    let file = app.get_without_token(&routes::avatar_file(&key)).await;
    assert_eq!(file.status, 404);
}

#[tokio::test]
async fn deleting_without_an_avatar_is_a_validation_error() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("alice").await;

    let res = app.delete_with_token(routes::AVATAR, &token).await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn non_image_avatar_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("alice").await;

    let res = app
        .upload_with_token(
            routes::AVATAR,
            "doc.pdf",
            "application/pdf",
            b"%PDF-1.4".to_vec(),
            &token,
        )
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn avatar_endpoints_require_authentication() {
    let app = TestApp::spawn().await;

    let res = app.get_without_token(routes::AVATAR).await;

    assert_eq!(res.status, 401);
    assert_eq!(res.body["code"], "TOKEN_MISSING");
}
