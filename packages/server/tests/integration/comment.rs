use common::UserRole;
use serde_json::json;

use crate::common::{TestApp, routes};

async fn published_content(app: &TestApp, token: &str, slug: &str) -> i32 {
    let body = app.create_content(token, slug, "PUBLISHED").await;
    body["id"].as_i64().expect("content id") as i32
}

mod posting {
    use super::*;

    #[tokio::test]
    async fn anonymous_comment_starts_pending() {
        let app = TestApp::spawn().await;
        let alice = app.create_authenticated_user("alice").await;
        let id = published_content(&app, &alice, "post").await;

        let res = app
            .post_without_token(
                &routes::content_comments(id),
                &json!({"author_name": "guest", "author_email": "g@example.com", "body": "Nice"}),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["status"], "PENDING");
        assert_eq!(res.body["author_name"], "guest");
        assert!(res.body["author_id"].is_null());
        assert_eq!(res.body["content_id"], id);
    }

    #[tokio::test]
    async fn anonymous_comment_requires_a_name() {
        let app = TestApp::spawn().await;
        let alice = app.create_authenticated_user("alice").await;
        let id = published_content(&app, &alice, "post").await;

        let res = app
            .post_without_token(&routes::content_comments(id), &json!({"body": "Nice"}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn signed_in_comment_uses_the_username() {
        let app = TestApp::spawn().await;
        let alice = app.create_authenticated_user("alice").await;
        let bob = app.create_authenticated_user("bob").await;
        let id = published_content(&app, &alice, "post").await;

        let res = app
            .post_with_token(
                &routes::content_comments(id),
                &json!({"author_name": "someone else", "body": "Hi"}),
                &bob,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["author_name"], "bob");
        assert_eq!(res.body["author_id"], app.user_id("bob").await);
    }

    #[tokio::test]
    async fn cannot_comment_on_someone_elses_draft() {
        let app = TestApp::spawn().await;
        let alice = app.create_authenticated_user("alice").await;
        let draft = app.create_content(&alice, "draft", "DRAFT").await;
        let id = draft["id"].as_i64().unwrap() as i32;

        let res = app
            .post_without_token(
                &routes::content_comments(id),
                &json!({"author_name": "guest", "body": "Hi"}),
            )
            .await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn empty_body_is_rejected() {
        let app = TestApp::spawn().await;
        let alice = app.create_authenticated_user("alice").await;
        let id = published_content(&app, &alice, "post").await;

        let res = app
            .post_with_token(&routes::content_comments(id), &json!({"body": "   "}), &alice)
            .await;

        assert_eq!(res.status, 400);
    }
}

mod moderation {
    use super::*;

    #[tokio::test]
    async fn only_approved_comments_are_listed_publicly() {
        let app = TestApp::spawn().await;
        let alice = app.create_authenticated_user("alice").await;
        let editor = app.create_user_with_role("ed", UserRole::Editor).await;
        let id = published_content(&app, &alice, "post").await;

        let first = app
            .post_without_token(
                &routes::content_comments(id),
                &json!({"author_name": "a", "body": "first"}),
            )
            .await
            .id();
        app.post_without_token(
            &routes::content_comments(id),
            &json!({"author_name": "b", "body": "second"}),
        )
        .await;

        let before = app.get_without_token(&routes::content_comments(id)).await;
        assert_eq!(before.status, 200);
        assert_eq!(before.body.as_array().map(Vec::len), Some(0));

        let approved = app
            .patch_with_token(
                &routes::comment_status(first),
                &json!({"status": "APPROVED"}),
                &editor,
            )
            .await;
        assert_eq!(approved.status, 200, "{}", approved.text);
        assert_eq!(approved.body["status"], "APPROVED");

        let public = app.get_without_token(&routes::content_comments(id)).await;
        let listed = public.body.as_array().expect("comment array");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["body"], "first");

        let staff = app
            .get_with_token(&routes::content_comments(id), &editor)
            .await;
        assert_eq!(staff.body.as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn author_cannot_moderate_comments() {
        let app = TestApp::spawn().await;
        let alice = app.create_authenticated_user("alice").await;
        let id = published_content(&app, &alice, "post").await;
        let comment = app
            .post_without_token(
                &routes::content_comments(id),
                &json!({"author_name": "a", "body": "spam"}),
            )
            .await
            .id();

        let res = app
            .patch_with_token(
                &routes::comment_status(comment),
                &json!({"status": "APPROVED"}),
                &alice,
            )
            .await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
    }

    #[tokio::test]
    async fn unknown_status_is_rejected() {
        let app = TestApp::spawn().await;
        let alice = app.create_authenticated_user("alice").await;
        let editor = app.create_user_with_role("ed", UserRole::Editor).await;
        let id = published_content(&app, &alice, "post").await;
        let comment = app
            .post_without_token(
                &routes::content_comments(id),
                &json!({"author_name": "a", "body": "hi"}),
            )
            .await
            .id();

        let res = app
            .patch_with_token(
                &routes::comment_status(comment),
                &json!({"status": "SHOUTED"}),
                &editor,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn editor_can_delete_a_comment() {
        let app = TestApp::spawn().await;
        let alice = app.create_authenticated_user("alice").await;
        let editor = app.create_user_with_role("ed", UserRole::Editor).await;
        let id = published_content(&app, &alice, "post").await;
        let comment = app
            .post_without_token(
                &routes::content_comments(id),
                &json!({"author_name": "a", "body": "bye"}),
            )
            .await
            .id();

        let res = app.delete_with_token(&routes::comment(comment), &editor).await;
        assert_eq!(res.status, 204, "{}", res.text);

        let again = app.delete_with_token(&routes::comment(comment), &editor).await;
        assert_eq!(again.status, 404);
    }
}
