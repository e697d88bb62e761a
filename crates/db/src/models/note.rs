use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub member_id: ObjectId,
    pub content: String,
    /// ISO 8601 date string.
    pub date: String,
}

impl Note {
    pub const COLLECTION: &'static str = "notes";
}
