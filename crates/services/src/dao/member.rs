use bson::{DateTime, doc, oid::ObjectId};
use mongodb::Database;
use welfare_db::models::{Member, Registration};

use super::base::{BaseDao, DaoError, DaoResult};

pub struct MemberDao {
    pub base: BaseDao<Member>,
}

impl MemberDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Member::COLLECTION),
        }
    }

    /// Promote an approved registration into a member, persisting the
    /// generated member number.
    pub async fn create_from_registration(
        &self,
        registration: &Registration,
        member_number: String,
    ) -> DaoResult<Member> {
        let now = DateTime::now();
        let member = Member {
            id: None,
            member_number: Some(member_number),
            old_member_number: None,
            full_name: registration.full_name.clone(),
            email: registration.email.clone(),
            verified: true,
            collector: registration.collector.clone().unwrap_or_default(),
            address: registration.address.clone(),
            post_code: registration.post_code.clone(),
            town: registration.town.clone(),
            date_of_birth: registration.date_of_birth.clone(),
            place_of_birth: registration.place_of_birth.clone(),
            gender: registration.gender.clone(),
            marital_status: registration.marital_status.clone(),
            mobile_no: registration.mobile_no.clone(),
            next_of_kin_name: registration.next_of_kin_name.clone(),
            next_of_kin_address: registration.next_of_kin_address.clone(),
            next_of_kin_phone: registration.next_of_kin_phone.clone(),
            dependants: registration.dependants.clone(),
            spouses: registration.spouses.clone(),
            membership_info: None,
            created_at: now,
            updated_at: now,
        };

        let id = self.base.insert_one(&member).await?;
        self.base.find_by_id(id).await
    }

    pub async fn find_verified(&self) -> DaoResult<Vec<Member>> {
        self.base.find_many(doc! { "verified": true }, None).await
    }

    /// Full member set in `_id` order. The migration tool relies on this
    /// being a stable enumeration across runs when no inserts interleave.
    pub async fn find_all_in_id_order(&self) -> DaoResult<Vec<Member>> {
        self.base
            .find_many(doc! {}, Some(doc! { "_id": 1 }))
            .await
    }

    pub async fn count_by_collector(&self, collector: &str) -> DaoResult<u64> {
        self.base
            .count(doc! { "collector": collector, "verified": true })
            .await
    }

    /// Re-tag every member referencing the old collector name. One bulk
    /// write, but independent of the collector-document update it follows —
    /// a failure in between leaves the two out of step.
    pub async fn retag_collector(&self, old_name: &str, new_name: &str) -> DaoResult<u64> {
        self.base
            .update_many(
                doc! { "collector": old_name },
                doc! { "$set": { "collector": new_name } },
            )
            .await
    }

    /// Rewrite a member's number, preserving the previous value for audit.
    pub async fn assign_number(
        &self,
        id: ObjectId,
        new_number: &str,
        old_number: Option<&str>,
    ) -> DaoResult<bool> {
        self.base
            .update_by_id(
                id,
                doc! { "$set": {
                    "member_number": new_number,
                    "old_member_number": old_number,
                } },
            )
            .await
    }

    pub async fn reinstate(&self, id: ObjectId) -> DaoResult<bool> {
        self.base
            .update_by_id(id, doc! { "$set": { "verified": true } })
            .await
    }

    pub async fn update_fields(&self, id: ObjectId, fields: bson::Document) -> DaoResult<bool> {
        if fields.is_empty() {
            return Ok(false);
        }
        self.base.update_by_id(id, doc! { "$set": fields }).await
    }

    pub async fn delete(&self, id: ObjectId) -> DaoResult<()> {
        if !self.base.delete_by_id(id).await? {
            return Err(DaoError::NotFound);
        }
        Ok(())
    }
}
