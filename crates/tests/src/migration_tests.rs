use bson::doc;
use crate::fixtures::test_app::TestApp;
use welfare_services::dao::MemberDao;
use welfare_services::migration;

async fn seed_member_doc(app: &TestApp, full_name: &str, number: Option<&str>) {
    let now = bson::DateTime::now();
    app.db
        .collection::<bson::Document>("members")
        .insert_one(doc! {
            "full_name": full_name,
            "email": format!("{}@test.com", full_name.to_lowercase().replace(' ', ".")),
            "member_number": number,
            "old_member_number": bson::Bson::Null,
            "verified": true,
            "collector": "North Ward",
            "dependants": [],
            "spouses": [],
            "created_at": now,
            "updated_at": now,
        })
        .await
        .unwrap();
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn run_renumbers_every_member_and_keeps_old_numbers() {
    let app = TestApp::spawn().await;
    let dao = MemberDao::new(&app.db);

    seed_member_doc(&app, "Legacy One", Some("OLD-1")).await;
    seed_member_doc(&app, "Legacy Two", Some("OLD-2")).await;
    seed_member_doc(&app, "Legacy Three", None).await;

    let report = migration::run(&dao, "AB", 3).await.unwrap();
    assert_eq!(report.total, 3);
    assert_eq!(report.rewritten, 3);

    let members = dao.find_all_in_id_order().await.unwrap();
    let numbers: Vec<_> = members
        .iter()
        .map(|m| m.member_number.clone().unwrap())
        .collect();
    assert_eq!(numbers, vec!["AB3001", "AB3002", "AB3003"]);
    assert_eq!(members[0].old_member_number.as_deref(), Some("OLD-1"));
    assert_eq!(members[2].old_member_number, None);
}

#[tokio::test]
#[ignore = "requires MongoDB"]
async fn rerun_after_interleaved_insert_shifts_sequences() {
    let app = TestApp::spawn().await;
    let dao = MemberDao::new(&app.db);

    seed_member_doc(&app, "Early Member", None).await;
    seed_member_doc(&app, "Late Member", None).await;
    migration::run(&dao, "AB", 3).await.unwrap();

    // A member inserted between runs lands in the middle of nothing: `_id`
    // order puts it last, so existing members keep their sequence here. A
    // second run is still a full rewrite, not a resume.
    seed_member_doc(&app, "Newest Member", None).await;
    let report = migration::run(&dao, "AB", 3).await.unwrap();
    assert_eq!(report.rewritten, 3);

    let members = dao.find_all_in_id_order().await.unwrap();
    let numbers: Vec<_> = members
        .iter()
        .map(|m| m.member_number.clone().unwrap())
        .collect();
    assert_eq!(numbers, vec!["AB3001", "AB3002", "AB3003"]);
    // The rewrite clobbers the audit trail: the old number is now the
    // previous run's output, not the original.
    assert_eq!(members[0].old_member_number.as_deref(), Some("AB3001"));
}
