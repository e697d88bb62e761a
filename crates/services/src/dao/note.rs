use bson::{doc, oid::ObjectId};
use chrono::Utc;
use mongodb::Database;
use welfare_db::models::Note;

use super::base::{BaseDao, DaoResult};

pub struct NoteDao {
    pub base: BaseDao<Note>,
}

impl NoteDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Note::COLLECTION),
        }
    }

    pub async fn create(&self, member_id: ObjectId, content: String) -> DaoResult<Note> {
        let note = Note {
            id: None,
            member_id,
            content,
            date: Utc::now().to_rfc3339(),
        };

        let id = self.base.insert_one(&note).await?;
        self.base.find_by_id(id).await
    }

    pub async fn list_for_member(&self, member_id: ObjectId) -> DaoResult<Vec<Note>> {
        self.base
            .find_many(doc! { "member_id": member_id }, Some(doc! { "date": -1 }))
            .await
    }
}
