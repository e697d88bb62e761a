use bson::{DateTime, doc, oid::ObjectId};
use mongodb::Database;
use welfare_db::models::{Role, User};

use super::base::{BaseDao, DaoError, DaoResult};

pub struct UserDao {
    pub base: BaseDao<User>,
}

impl UserDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, User::COLLECTION),
        }
    }

    pub async fn create(
        &self,
        email: String,
        display_name: String,
        password_hash: String,
        role: Role,
    ) -> DaoResult<User> {
        let now = DateTime::now();
        let user = User {
            id: None,
            email,
            display_name,
            password_hash: Some(password_hash),
            role,
            created_at: now,
            updated_at: now,
        };

        let id = self.base.insert_one(&user).await?;
        self.base.find_by_id(id).await
    }

    pub async fn find_by_email(&self, email: &str) -> DaoResult<User> {
        self.base
            .find_one(doc! { "email": email })
            .await?
            .ok_or(DaoError::NotFound)
    }

    /// Resolve the role claim for a principal. Loaded per request rather
    /// than baked into the token so role edits take effect immediately.
    pub async fn role_of(&self, user_id: ObjectId) -> DaoResult<Role> {
        Ok(self.base.find_by_id(user_id).await?.role)
    }

    pub async fn set_role(&self, user_id: ObjectId, role: Role) -> DaoResult<bool> {
        let role = bson::to_bson(&role)?;
        self.base
            .update_by_id(user_id, doc! { "$set": { "role": role } })
            .await
    }

    pub async fn list(&self) -> DaoResult<Vec<User>> {
        self.base.find_many(doc! {}, Some(doc! { "email": 1 })).await
    }
}
