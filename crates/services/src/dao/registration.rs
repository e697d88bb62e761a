use bson::{DateTime, doc, oid::ObjectId};
use mongodb::Database;
use welfare_db::models::{Member, Registration, RegistrationStatus};

use super::base::{BaseDao, DaoResult};

pub struct RegistrationDao {
    pub base: BaseDao<Registration>,
}

impl RegistrationDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Registration::COLLECTION),
        }
    }

    pub async fn create(&self, mut registration: Registration) -> DaoResult<Registration> {
        registration.id = None;
        registration.status = RegistrationStatus::Pending;
        registration.created_at = DateTime::now();

        let id = self.base.insert_one(&registration).await?;
        self.base.find_by_id(id).await
    }

    pub async fn list(&self) -> DaoResult<Vec<Registration>> {
        self.base
            .find_many(doc! {}, Some(doc! { "created_at": -1 }))
            .await
    }

    pub async fn list_by_status(&self, status: RegistrationStatus) -> DaoResult<Vec<Registration>> {
        let status = bson::to_bson(&status)?;
        self.base
            .find_many(doc! { "status": status }, Some(doc! { "created_at": -1 }))
            .await
    }

    pub async fn mark_approved(&self, id: ObjectId) -> DaoResult<bool> {
        let status = bson::to_bson(&RegistrationStatus::Approved)?;
        self.base
            .update_by_id(id, doc! { "$set": { "status": status } })
            .await
    }

    /// Archive a member being revoked. This is the first of the two
    /// independent writes in the revoke sequence; the member delete follows
    /// separately with no rollback if it fails.
    pub async fn archive_revoked(
        &self,
        member: &Member,
        reason: Option<String>,
    ) -> DaoResult<ObjectId> {
        let archive = Registration {
            id: None,
            full_name: member.full_name.clone(),
            email: member.email.clone(),
            status: RegistrationStatus::Revoked,
            collector: Some(member.collector.clone()),
            address: member.address.clone(),
            post_code: member.post_code.clone(),
            town: member.town.clone(),
            date_of_birth: member.date_of_birth.clone(),
            place_of_birth: member.place_of_birth.clone(),
            gender: member.gender.clone(),
            marital_status: member.marital_status.clone(),
            mobile_no: member.mobile_no.clone(),
            next_of_kin_name: member.next_of_kin_name.clone(),
            next_of_kin_address: member.next_of_kin_address.clone(),
            next_of_kin_phone: member.next_of_kin_phone.clone(),
            dependants: member.dependants.clone(),
            spouses: member.spouses.clone(),
            member_number: member.member_number.clone(),
            revoked_at: Some(DateTime::now()),
            revocation_reason: reason,
            created_at: DateTime::now(),
        };

        self.base.insert_one(&archive).await
    }
}
