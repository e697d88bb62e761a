use bson::doc;
use serde_json::Value;

use super::test_app::TestApp;

pub struct SeededUser {
    pub id: String,
    pub email: String,
    pub access_token: String,
}

pub struct SeededMember {
    pub id: String,
    pub member_number: String,
    pub registration_id: String,
}

impl TestApp {
    /// Register a user and return their auth info.
    pub async fn register_user(&self, email: &str, display_name: &str) -> SeededUser {
        let resp = self
            .client
            .post(self.url("/api/auth/register"))
            .json(&serde_json::json!({
                "email": email,
                "display_name": display_name,
                "password": "Password123!",
            }))
            .send()
            .await
            .expect("Register request failed");
        assert_eq!(resp.status().as_u16(), 201, "register should succeed");

        let json: Value = resp.json().await.unwrap();
        SeededUser {
            id: json["user"]["id"].as_str().unwrap().to_string(),
            email: email.to_string(),
            access_token: json["access_token"].as_str().unwrap().to_string(),
        }
    }

    /// Register a user and promote them to admin directly in the database.
    /// The first admin cannot be created through the API (promotion requires
    /// an existing admin), so tests bootstrap one this way.
    pub async fn register_admin(&self, email: &str) -> SeededUser {
        let user = self.register_user(email, "Test Admin").await;

        let id = bson::oid::ObjectId::parse_str(&user.id).unwrap();
        self.db
            .collection::<bson::Document>("users")
            .update_one(doc! { "_id": id }, doc! { "$set": { "role": "admin" } })
            .await
            .expect("Failed to promote admin");

        user
    }

    /// Submit a public intake form and return the registration id.
    pub async fn submit_intake(&self, full_name: &str, email: &str, collector: &str) -> String {
        let resp = self
            .client
            .post(self.url("/api/registration"))
            .json(&serde_json::json!({
                "full_name": full_name,
                "email": email,
                "collector": collector,
            }))
            .send()
            .await
            .expect("Intake request failed");
        assert_eq!(resp.status().as_u16(), 201, "intake should succeed");

        let json: Value = resp.json().await.unwrap();
        json["id"].as_str().unwrap().to_string()
    }

    /// Intake plus approval: the standard path to a verified member.
    pub async fn seed_member(
        &self,
        admin: &SeededUser,
        full_name: &str,
        email: &str,
        collector: &str,
    ) -> SeededMember {
        let registration_id = self.submit_intake(full_name, email, collector).await;

        let resp = self
            .auth_post(
                &format!("/api/registration/{registration_id}/approve"),
                &admin.access_token,
            )
            .send()
            .await
            .expect("Approve request failed");
        assert_eq!(resp.status().as_u16(), 200, "approve should succeed");

        let json: Value = resp.json().await.unwrap();
        SeededMember {
            id: json["member_id"].as_str().unwrap().to_string(),
            member_number: json["member_number"].as_str().unwrap().to_string(),
            registration_id,
        }
    }
}
