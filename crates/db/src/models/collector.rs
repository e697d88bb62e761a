use bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// A volunteer responsible for a subset of members.
///
/// The collector's ordinal rank is derived from current membership counts at
/// read time and never persisted as authoritative; editing a name does not
/// recompute it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collector {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: Option<String>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Collector {
    pub const COLLECTION: &'static str = "collectors";
}
