use bson::{Bson, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// A membership fee payment.
///
/// `amount` stays as raw BSON: legacy documents hold doubles, ints, plain
/// numeric strings, and occasionally a JSON-encoded object with a nested
/// `amount` field. Coercion lives in `welfare_services::finance`.
///
/// Both `member_id` and `member_number` may be present and inconsistent;
/// neither is forced to win here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub amount: Bson,
    /// ISO 8601 date string.
    pub date: String,
    pub member_id: Option<ObjectId>,
    pub member_number: Option<String>,
}

impl Payment {
    pub const COLLECTION: &'static str = "payments";
}
