use crate::common::{MAX_PHOTO_SIZE, TestApp, routes};

mod upload_photo {
    use super::*;

    #[tokio::test]
    async fn stores_file_and_records_url() {
        let app = TestApp::spawn().await;
        let id = app.create_contact("Ana").await;
        let data = b"\xFF\xD8\xFF\xE0fake-jpeg".to_vec();

        let res = app.upload_photo(&id, Some("pic.JPG"), data.clone()).await;

        assert_eq!(res.status, 200, "{}", res.text);
        let url = res.text.clone();
        assert!(
            url.ends_with(&format!("/contacts/image/{id}.JPG")),
            "unexpected url {url}"
        );
        assert!(url.starts_with(&format!("http://{}", app.addr)));
        assert_eq!(std::fs::read(app.photo_dir.join(format!("{id}.JPG"))).unwrap(), data);

        let contact = app.get(&routes::contact(&id)).await;
        assert_eq!(contact.body["photoUrl"], url.as_str());
        assert_eq!(contact.body["name"], "Ana");
        assert_eq!(contact.body["email"], "ana@example.com");
    }

    #[tokio::test]
    async fn configured_public_url_ignores_host_header() {
        let app = TestApp::spawn_with_public_url(Some("https://contacts.example.com/api/")).await;
        let id = app.create_contact("Ana").await;

        let form = reqwest::multipart::Form::new().part(
            "file",
            reqwest::multipart::Part::bytes(b"png".to_vec()).file_name("pic.png"),
        );
        let res = app
            .client
            .put(app.url(&routes::photo_upload(&id)))
            .header(reqwest::header::HOST, "attacker.example")
            .multipart(form)
            .send()
            .await
            .unwrap();

        assert_eq!(res.status().as_u16(), 200);
        let url = res.text().await.unwrap();
        assert_eq!(
            url,
            format!("https://contacts.example.com/api/contacts/image/{id}.png")
        );

        let contact = app.get(&routes::contact(&id)).await;
        assert_eq!(contact.body["photoUrl"], url.as_str());
    }

    #[tokio::test]
    async fn uploaded_bytes_round_trip_through_image_route() {
        let app = TestApp::spawn().await;
        let id = app.create_contact("Ana").await;
        let data: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();

        let url = app.upload_photo(&id, Some("avatar.jpg"), data.clone()).await.text;
        let image = app.get_url(&url).await;

        assert_eq!(image.status, 200);
        assert_eq!(image.bytes, data);
        assert_eq!(image.content_type.as_deref(), Some("image/jpeg"));
    }

    #[tokio::test]
    async fn name_without_dot_defaults_to_png() {
        let app = TestApp::spawn().await;
        let id = app.create_contact("Ana").await;

        let res = app.upload_photo(&id, Some("picture"), b"png".to_vec()).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert!(res.text.ends_with(&format!("/contacts/image/{id}.png")));

        let image = app.get(&routes::image(&format!("{id}.png"))).await;
        assert_eq!(image.status, 200);
        assert_eq!(image.content_type.as_deref(), Some("image/png"));
        assert_eq!(image.bytes, b"png");
    }

    #[tokio::test]
    async fn missing_filename_defaults_to_png() {
        let app = TestApp::spawn().await;
        let id = app.create_contact("Ana").await;

        let res = app.upload_photo(&id, None, b"png".to_vec()).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert!(app.photo_dir.join(format!("{id}.png")).exists());
    }

    #[tokio::test]
    async fn reupload_overwrites_previous_file() {
        let app = TestApp::spawn().await;
        let id = app.create_contact("Ana").await;

        app.upload_photo(&id, Some("a.png"), b"first".to_vec()).await;
        let res = app.upload_photo(&id, Some("b.png"), b"second".to_vec()).await;
        assert_eq!(res.status, 200);

        let image = app.get(&routes::image(&format!("{id}.png"))).await;
        assert_eq!(image.bytes, b"second");
    }

    #[tokio::test]
    async fn recreates_deleted_photo_directory() {
        let app = TestApp::spawn().await;
        let id = app.create_contact("Ana").await;
        std::fs::remove_dir_all(&app.photo_dir).unwrap();

        let res = app.upload_photo(&id, Some("pic.png"), b"data".to_vec()).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert!(app.photo_dir.join(format!("{id}.png")).exists());
    }

    #[tokio::test]
    async fn file_at_size_limit_is_accepted() {
        let app = TestApp::spawn().await;
        let id = app.create_contact("Ana").await;
        let data = vec![7u8; MAX_PHOTO_SIZE as usize];

        let res = app.upload_photo(&id, Some("big.png"), data.clone()).await;

        assert_eq!(res.status, 200, "{}", res.text);
        let stored = std::fs::read(app.photo_dir.join(format!("{id}.png"))).unwrap();
        assert_eq!(stored.len(), data.len());
    }

    #[tokio::test]
    async fn file_over_size_limit_is_rejected() {
        let app = TestApp::spawn().await;
        let id = app.create_contact("Ana").await;
        let data = vec![7u8; MAX_PHOTO_SIZE as usize + 1];

        let res = app.upload_photo(&id, Some("big.png"), data).await;

        assert_eq!(res.status, 400, "{}", res.text);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert!(!app.photo_dir.join(format!("{id}.png")).exists());

        let contact = app.get(&routes::contact(&id)).await;
        assert!(contact.body["photoUrl"].is_null());
    }

    #[tokio::test]
    async fn unknown_contact_is_404_and_writes_nothing() {
        let app = TestApp::spawn().await;

        let res = app
            .upload_photo("no-such-contact", Some("pic.png"), b"data".to_vec())
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
        assert!(!app.photo_dir.join("no-such-contact.png").exists());
    }

    #[tokio::test]
    async fn missing_file_field_is_validation_error() {
        let app = TestApp::spawn().await;
        let id = app.create_contact("Ana").await;

        let form = reqwest::multipart::Form::new().text("note", "no file here");
        let res = app
            .client
            .put(app.url(&routes::photo_upload(&id)))
            .multipart(form)
            .send()
            .await
            .unwrap();

        assert_eq!(res.status().as_u16(), 400);
    }

    #[tokio::test]
    async fn missing_id_is_validation_error() {
        let app = TestApp::spawn().await;

        let form = reqwest::multipart::Form::new()
            .part("file", reqwest::multipart::Part::bytes(b"x".to_vec()));
        let res = app
            .client
            .put(app.url("/contacts/photo"))
            .multipart(form)
            .send()
            .await
            .unwrap();

        assert_eq!(res.status().as_u16(), 400);
    }
}

mod get_photo {
    use super::*;

    #[tokio::test]
    async fn missing_image_is_404() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::image("nobody.png")).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn encoded_traversal_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get("/contacts/image/..%2Fsecret.png").await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn photo_survives_contact_deletion() {
        let app = TestApp::spawn().await;
        let id = app.create_contact("Ana").await;
        app.upload_photo(&id, Some("pic.png"), b"kept".to_vec()).await;

        assert_eq!(app.delete(&routes::contact(&id)).await.status, 200);

        let image = app.get(&routes::image(&format!("{id}.png"))).await;
        assert_eq!(image.status, 200);
        assert_eq!(image.bytes, b"kept");
    }
}
