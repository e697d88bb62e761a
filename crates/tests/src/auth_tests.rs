use crate::fixtures::test_app::TestApp;
use serde_json::Value;

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn register_creates_user_and_returns_tokens() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .post(app.url("/api/auth/register"))
        .json(&serde_json::json!({
            "email": "alice@test.com",
            "display_name": "Alice",
            "password": "Password123!",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 201);

    let json: Value = resp.json().await.unwrap();
    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert_eq!(json["user"]["email"], "alice@test.com");
    assert_eq!(json["user"]["display_name"], "Alice");
    // New sign-ups never start with elevated access
    assert_eq!(json["user"]["role"], "member");
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn register_duplicate_email_fails() {
    let app = TestApp::spawn().await;

    app.register_user("dup@test.com", "User 1").await;

    let resp = app
        .client
        .post(app.url("/api/auth/register"))
        .json(&serde_json::json!({
            "email": "dup@test.com",
            "display_name": "User 2",
            "password": "Password123!",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 409);
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn login_with_valid_credentials_succeeds() {
    let app = TestApp::spawn().await;
    app.register_user("login@test.com", "Login User").await;

    let resp = app
        .client
        .post(app.url("/api/auth/login"))
        .json(&serde_json::json!({
            "email": "login@test.com",
            "password": "Password123!",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    let json: Value = resp.json().await.unwrap();
    assert!(json["access_token"].is_string());
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn login_with_wrong_password_fails() {
    let app = TestApp::spawn().await;
    app.register_user("wrong@test.com", "Wrong Pass").await;

    let resp = app
        .client
        .post(app.url("/api/auth/login"))
        .json(&serde_json::json!({
            "email": "wrong@test.com",
            "password": "not-the-password",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 401);
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn me_returns_current_user() {
    let app = TestApp::spawn().await;
    let user = app.register_user("me@test.com", "Me").await;

    let resp = app
        .auth_get("/api/auth/me", &user.access_token)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["email"], "me@test.com");
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn admin_routes_reject_plain_members() {
    let app = TestApp::spawn().await;
    let user = app.register_user("plain@test.com", "Plain").await;

    let resp = app
        .auth_get("/api/registration", &user.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 403);

    let resp = app
        .auth_get("/api/dashboard", &user.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 403);
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn role_change_applies_without_new_token() {
    let app = TestApp::spawn().await;
    let admin = app.register_admin("boss@test.com").await;
    let user = app.register_user("promotee@test.com", "Promotee").await;

    // Denied before promotion
    let resp = app
        .auth_get("/api/registration", &user.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 403);

    let resp = app
        .auth_put(&format!("/api/user/{}/role", user.id), &admin.access_token)
        .json(&serde_json::json!({ "role": "admin" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 204);

    // Same token now passes the admin check
    let resp = app
        .auth_get("/api/registration", &user.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
}
