use bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// A verified member of the association.
///
/// `collector` is the collector's *display name*, denormalized onto every
/// member document. It is the grouping key for the collector roster, so a
/// collector rename must be propagated here (see `CollectorDao::rename`) and
/// any typo silently creates a new group. Known limitation carried over from
/// the original data model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Human-facing identifier persisted at approval or by the migration
    /// tool. Distinct from the display number recomputed by the grouping
    /// view; the two may disagree.
    pub member_number: Option<String>,
    /// Previous number, kept for audit when the migration tool rewrites
    /// `member_number`.
    pub old_member_number: Option<String>,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub collector: String,
    pub address: Option<String>,
    pub post_code: Option<String>,
    pub town: Option<String>,
    pub date_of_birth: Option<String>,
    pub place_of_birth: Option<String>,
    pub gender: Option<String>,
    pub marital_status: Option<String>,
    pub mobile_no: Option<String>,
    pub next_of_kin_name: Option<String>,
    pub next_of_kin_address: Option<String>,
    pub next_of_kin_phone: Option<String>,
    #[serde(default)]
    pub dependants: Vec<Dependant>,
    #[serde(default)]
    pub spouses: Vec<Spouse>,
    pub membership_info: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// Embedded sub-record; no identity of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dependant {
    pub name: String,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spouse {
    pub name: String,
    pub date_of_birth: Option<String>,
}

impl Member {
    pub const COLLECTION: &'static str = "members";
}
