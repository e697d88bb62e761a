use crate::fixtures::test_app::TestApp;

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn configured_origins_are_allowed_and_others_are_not() {
    let app = TestApp::spawn_with_settings(|s| {
        s.app.cors_origins = vec!["https://members.example.org".to_string()];
    })
    .await;

    let resp = app
        .client
        .get(app.url("/health"))
        .header("Origin", "https://members.example.org")
        .send()
        .await
        .unwrap();
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("https://members.example.org")
    );

    let resp = app
        .client
        .get(app.url("/health"))
        .header("Origin", "https://elsewhere.example.org")
        .send()
        .await
        .unwrap();
    assert!(resp.headers().get("access-control-allow-origin").is_none());
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn empty_origin_list_stays_permissive() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .get(app.url("/health"))
        .header("Origin", "https://anywhere.example.org")
        .send()
        .await
        .unwrap();
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
