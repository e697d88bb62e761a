use bson::{Bson, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// An association expense. `amount` follows the same lenient encoding rules
/// as `Payment::amount`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub amount: Bson,
    pub description: String,
    /// ISO 8601 date string.
    pub date: String,
    pub user_id: Option<ObjectId>,
}

impl Expense {
    pub const COLLECTION: &'static str = "expenses";
}
