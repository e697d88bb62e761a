use bson::doc;
use crate::fixtures::test_app::TestApp;
use serde_json::Value;

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn list_supports_search_by_name_and_number() {
    let app = TestApp::spawn().await;
    let admin = app.register_admin("admin@test.com").await;

    let target = app
        .seed_member(&admin, "Yusuf Khan", "yusuf@test.com", "North Ward")
        .await;
    app.seed_member(&admin, "Fatima Ali", "fatima@test.com", "North Ward")
        .await;

    let resp = app
        .auth_get("/api/member?search=yusuf", &admin.access_token)
        .send()
        .await
        .unwrap();
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["total"], 1);
    assert_eq!(json["items"][0]["full_name"], "Yusuf Khan");

    // Member number substring matches too
    let resp = app
        .auth_get(
            &format!("/api/member?search={}", target.member_number),
            &admin.access_token,
        )
        .send()
        .await
        .unwrap();
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["total"], 1);
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn list_honors_explicit_page_and_per_page() {
    let app = TestApp::spawn().await;
    let admin = app.register_admin("admin@test.com").await;

    app.seed_member(&admin, "Page One A", "p1a@test.com", "North Ward")
        .await;
    app.seed_member(&admin, "Page One B", "p1b@test.com", "North Ward")
        .await;
    app.seed_member(&admin, "Page Two", "p2@test.com", "North Ward")
        .await;

    let resp = app
        .auth_get("/api/member?page=2&per_page=2", &admin.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);

    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["total"], 3);
    assert_eq!(json["page"], 2);
    assert_eq!(json["per_page"], 2);
    assert_eq!(json["total_pages"], 2);
    assert_eq!(json["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn update_changes_only_provided_fields() {
    let app = TestApp::spawn().await;
    let admin = app.register_admin("admin@test.com").await;
    let member = app
        .seed_member(&admin, "Partial Update", "partial@test.com", "North Ward")
        .await;

    let resp = app
        .auth_put(&format!("/api/member/{}", member.id), &admin.access_token)
        .json(&serde_json::json!({ "town": "Derby" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 204);

    let resp = app
        .auth_get(&format!("/api/member/{}", member.id), &admin.access_token)
        .send()
        .await
        .unwrap();
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["town"], "Derby");
    assert_eq!(json["full_name"], "Partial Update");
    assert_eq!(json["member_number"], member.member_number.as_str());
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn revoke_archives_into_registrations_and_deletes() {
    let app = TestApp::spawn().await;
    let admin = app.register_admin("admin@test.com").await;
    let member = app
        .seed_member(&admin, "Leaving Member", "leaving@test.com", "North Ward")
        .await;

    let resp = app
        .auth_post(
            &format!("/api/member/{}/revoke", member.id),
            &admin.access_token,
        )
        .json(&serde_json::json!({ "reason": "moved away" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 204);

    // Gone from members
    let resp = app
        .auth_get(&format!("/api/member/{}", member.id), &admin.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);

    // Archived as a revoked registration carrying the member number
    let archived = app
        .db
        .collection::<bson::Document>("registrations")
        .find_one(doc! { "email": "leaving@test.com", "status": "revoked" })
        .await
        .unwrap()
        .expect("revoked archive should exist");
    assert_eq!(
        archived.get_str("member_number").unwrap(),
        member.member_number
    );
    assert_eq!(archived.get_str("revocation_reason").unwrap(), "moved away");
    assert!(archived.get_datetime("revoked_at").is_ok());
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn reinstate_restores_verified_flag() {
    let app = TestApp::spawn().await;
    let admin = app.register_admin("admin@test.com").await;
    let member = app
        .seed_member(&admin, "Lapsed Member", "lapsed@test.com", "North Ward")
        .await;

    // Simulate a lapsed member
    let id = bson::oid::ObjectId::parse_str(&member.id).unwrap();
    app.db
        .collection::<bson::Document>("members")
        .update_one(doc! { "_id": id }, doc! { "$set": { "verified": false } })
        .await
        .unwrap();

    let resp = app
        .auth_post(
            &format!("/api/member/{}/reinstate", member.id),
            &admin.access_token,
        )
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 204);

    let resp = app
        .auth_get(&format!("/api/member/{}", member.id), &admin.access_token)
        .send()
        .await
        .unwrap();
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["verified"], true);
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn payment_records_member_number_snapshot() {
    let app = TestApp::spawn().await;
    let admin = app.register_admin("admin@test.com").await;
    let member = app
        .seed_member(&admin, "Paying Member", "paying@test.com", "North Ward")
        .await;

    let resp = app
        .auth_post(
            &format!("/api/member/{}/payment", member.id),
            &admin.access_token,
        )
        .json(&serde_json::json!({ "amount": 25.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 201);

    let payment = app
        .db
        .collection::<bson::Document>("payments")
        .find_one(doc! { "member_number": &member.member_number })
        .await
        .unwrap()
        .expect("payment should exist");
    assert_eq!(payment.get_f64("amount").unwrap(), 25.0);
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn note_requires_existing_member() {
    let app = TestApp::spawn().await;
    let admin = app.register_admin("admin@test.com").await;

    let missing = bson::oid::ObjectId::new().to_hex();
    let resp = app
        .auth_post(&format!("/api/member/{missing}/note"), &admin.access_token)
        .json(&serde_json::json!({ "content": "orphan note" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);

    let member = app
        .seed_member(&admin, "Noted Member", "noted@test.com", "North Ward")
        .await;
    let resp = app
        .auth_post(
            &format!("/api/member/{}/note", member.id),
            &admin.access_token,
        )
        .json(&serde_json::json!({ "content": "spoke at the AGM" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 201);
}
