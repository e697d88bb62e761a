use bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// An authentication principal. The `role` lives here, in a side document
/// keyed by the principal id, rather than inside the JWT; admin checks load
/// it per request so role changes take effect without re-issuing tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    #[serde(default)]
    pub role: Role,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Collector,
    #[default]
    Member,
}

impl User {
    pub const COLLECTION: &'static str = "users";
}
