use serde_json::json;

use crate::common::{PNG_BYTES, TestApp, key_of, routes};

mod upload {
    use super::*;

    #[tokio::test]
    async fn image_upload_stores_file_and_metadata() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice").await;

        let res = app
            .upload_with_token(routes::MEDIA, "Holiday.PNG", "image/png", PNG_BYTES.to_vec(), &token)
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["success"], true);
        let media = &res.body["media"];
        assert_eq!(media["original_filename"], "Holiday.PNG");
        assert_eq!(media["mime_type"], "image/png");
        assert_eq!(media["file_size"], PNG_BYTES.len());
        assert_eq!(media["uploaded_by"]["username"], "alice");
        let filename = media["filename"].as_str().expect("filename");
        assert!(filename.ends_with(".png"));
        assert_ne!(filename, "Holiday.PNG");
        let url = media["file_url"].as_str().expect("file_url");
        assert!(url.ends_with(filename));
    }

    #[tokio::test]
    async fn uploaded_file_is_served_back_publicly() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice").await;
        let media = app.upload_png(&token).await;
        let key = key_of(media["file_url"].as_str().expect("file_url"));

        let res = app.get_without_token(&routes::media_file(&key)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.content_type.as_deref(), Some("image/png"));
        assert_eq!(res.bytes, PNG_BYTES);
    }

    #[tokio::test]
    async fn same_original_name_gets_distinct_keys() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice").await;

        let first = app.upload_png(&token).await;
        let second = app
            .upload_with_token(routes::MEDIA, "photo.png", "image/png", b"other".to_vec(), &token)
            .await;
        assert_eq!(second.status, 201, "{}", second.text);
        let second = &second.body["media"];

        assert_eq!(first["original_filename"], second["original_filename"]);
        assert_ne!(first["filename"], second["filename"]);

        let a = app
            .get_without_token(&routes::media_file(first["filename"].as_str().unwrap()))
            .await;
        let b = app
            .get_without_token(&routes::media_file(second["filename"].as_str().unwrap()))
            .await;
        assert_eq!(a.bytes, PNG_BYTES);
        assert_eq!(b.bytes, b"other");
    }

    #[tokio::test]
    async fn non_image_type_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice").await;

        let res = app
            .upload_with_token(routes::MEDIA, "notes.txt", "text/plain", b"hello".to_vec(), &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn image_type_with_wrong_extension_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice").await;

        let res = app
            .upload_with_token(routes::MEDIA, "script.sh", "image/png", PNG_BYTES.to_vec(), &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn empty_file_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice").await;

        let res = app
            .upload_with_token(routes::MEDIA, "empty.png", "image/png", Vec::new(), &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn oversized_file_is_rejected_with_the_limit_in_the_message() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice").await;
        let too_big = vec![0u8; app.config.media.max_size as usize + 1];

        let res = app
            .upload_with_token(routes::MEDIA, "big.png", "image/png", too_big, &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert!(
            res.body["message"]
                .as_str()
                .is_some_and(|m| m.contains("1MB")),
            "{}",
            res.text
        );
    }

    #[tokio::test]
    async fn upload_requires_authentication() {
        let app = TestApp::spawn().await;
        let part = reqwest::multipart::Part::bytes(PNG_BYTES.to_vec())
            .file_name("a.png")
            .mime_str("image/png")
            .unwrap();

        let res = app
            .client
            .post(format!("http://{}{}", app.addr, routes::MEDIA))
            .multipart(reqwest::multipart::Form::new().part("file", part))
            .send()
            .await
            .expect("Failed to send request");

        assert_eq!(res.status().as_u16(), 401);
    }
}

mod retrieval {
    use super::*;

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .get_without_token(&routes::media_file("00000000-0000-0000-0000-000000000000.png"))
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn key_with_traversal_characters_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(&routes::media_file("..%5Csecret")).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn metadata_is_available_to_signed_in_users() {
        let app = TestApp::spawn().await;
        let alice = app.create_authenticated_user("alice").await;
        let bob = app.create_authenticated_user("bob").await;
        let media = app.upload_png(&alice).await;
        let id = media["id"].as_i64().unwrap() as i32;

        let res = app.get_with_token(&routes::media_info(id), &bob).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["id"], id);

        let anon = app.get_without_token(&routes::media_info(id)).await;
        assert_eq!(anon.status, 401);
    }

    #[tokio::test]
    async fn my_uploads_lists_only_the_callers_files_newest_first() {
        let app = TestApp::spawn().await;
        let alice = app.create_authenticated_user("alice").await;
        let bob = app.create_authenticated_user("bob").await;
        let first = app.upload_png(&alice).await;
        let second = app.upload_png(&alice).await;
        app.upload_png(&bob).await;

        let res = app.get_with_token(routes::MY_UPLOADS, &alice).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["total"], 2);
        let data = res.body["data"].as_array().expect("data array");
        assert_eq!(data[0]["id"], second["id"]);
        assert_eq!(data[1]["id"], first["id"]);
    }
}

mod deletion {
    use super::*;

    #[tokio::test]
    async fn uploader_can_delete_and_the_file_is_gone() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice").await;
        let media = app.upload_png(&token).await;
        let id = media["id"].as_i64().unwrap() as i32;
        let key = key_of(media["file_url"].as_str().unwrap());

        let res = app.delete_with_token(&routes::media(id), &token).await;
        assert_eq!(res.status, 204, "{}", res.text);

        let file = app.get_without_token(&routes::media_file(&key)).await;
        assert_eq!(file.status, 404);
        let info = app.get_with_token(&routes::media_info(id), &token).await;
        assert_eq!(info.status, 404);
    }

    #[tokio::test]
    async fn other_user_cannot_delete() {
        let app = TestApp::spawn().await;
        let alice = app.create_authenticated_user("alice").await;
        let bob = app.create_authenticated_user("bob").await;
        let media = app.upload_png(&alice).await;
        let id = media["id"].as_i64().unwrap() as i32;

        let res = app.delete_with_token(&routes::media(id), &bob).await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
    }

    #[tokio::test]
    async fn deleting_a_featured_image_clears_it_from_content() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice").await;
        let media = app.upload_png(&token).await;
        let id = media["id"].as_i64().unwrap() as i32;
        let created = app
            .post_with_token(
                routes::CONTENTS,
                &json!({
                    "title": "Illustrated",
                    "slug": "illustrated",
                    "body": "b",
                    "status": "PUBLISHED",
                    "featured_image_id": id,
                }),
                &token,
            )
            .await;
        assert_eq!(created.status, 201, "{}", created.text);
        assert_eq!(created.body["featured_image"]["id"], id);

        let res = app.delete_with_token(&routes::media(id), &token).await;
        assert_eq!(res.status, 204, "{}", res.text);

        let story = app
            .get_without_token(&routes::content_by_slug("illustrated"))
            .await;
        assert_eq!(story.status, 200);
        assert!(story.body["featured_image"].is_null());
    }

    #[tokio::test]
    async fn deleting_unknown_media_is_not_found() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice").await;

        let res = app.delete_with_token(&routes::media(9999), &token).await;

        assert_eq!(res.status, 404);
    }
}
