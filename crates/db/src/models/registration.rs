use bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// A pending application, promoted to `Member` on admin approval.
///
/// The collection doubles as the archive for revoked members: revoking copies
/// the member document here with `status: Revoked` before deleting it from
/// `members`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub status: RegistrationStatus,
    pub collector: Option<String>,
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
    pub dependants: Vec<super::Dependant>,
    #[serde(default)]
    pub spouses: Vec<super::Spouse>,
    /// Member number carried over when the entry is a revoked-member archive.
    pub member_number: Option<String>,
    pub revoked_at: Option<DateTime>,
    pub revocation_reason: Option<String>,
    pub created_at: DateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    #[default]
    Pending,
    Approved,
    Revoked,
}

impl Registration {
    pub const COLLECTION: &'static str = "registrations";
}
