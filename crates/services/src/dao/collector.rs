use bson::{DateTime, doc, oid::ObjectId};
use mongodb::Database;
use welfare_db::models::Collector;

use super::base::{BaseDao, DaoError, DaoResult};

pub struct CollectorDao {
    pub base: BaseDao<Collector>,
}

impl CollectorDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Collector::COLLECTION),
        }
    }

    pub async fn create(
        &self,
        name: String,
        email: Option<String>,
        contact_number: Option<String>,
        address: Option<String>,
    ) -> DaoResult<Collector> {
        let now = DateTime::now();
        let collector = Collector {
            id: None,
            name,
            email,
            contact_number,
            address,
            created_at: now,
            updated_at: now,
        };

        let id = self.base.insert_one(&collector).await?;
        self.base.find_by_id(id).await
    }

    pub async fn list(&self) -> DaoResult<Vec<Collector>> {
        self.base.find_many(doc! {}, Some(doc! { "name": 1 })).await
    }

    pub async fn find_by_name(&self, name: &str) -> DaoResult<Option<Collector>> {
        self.base.find_one(doc! { "name": name }).await
    }

    /// Commit a rename on the collector document and return the previous
    /// name so the caller can propagate it to the members collection. The
    /// propagation is a separate, independent write.
    pub async fn rename(&self, id: ObjectId, new_name: &str) -> DaoResult<String> {
        let existing = self.base.find_by_id(id).await?;
        self.base
            .update_by_id(id, doc! { "$set": { "name": new_name } })
            .await?;
        Ok(existing.name)
    }

    pub async fn delete(&self, id: ObjectId) -> DaoResult<()> {
        if !self.base.delete_by_id(id).await? {
            return Err(DaoError::NotFound);
        }
        Ok(())
    }
}
