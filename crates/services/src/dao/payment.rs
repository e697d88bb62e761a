use bson::{Bson, doc, oid::ObjectId};
use mongodb::Database;
use welfare_db::models::Payment;

use super::base::{BaseDao, DaoResult};

pub struct PaymentDao {
    pub base: BaseDao<Payment>,
}

impl PaymentDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Payment::COLLECTION),
        }
    }

    pub async fn create(
        &self,
        member_id: ObjectId,
        member_number: Option<String>,
        amount: f64,
        date: String,
    ) -> DaoResult<Payment> {
        let payment = Payment {
            id: None,
            amount: Bson::Double(amount),
            date,
            member_id: Some(member_id),
            member_number,
        };

        let id = self.base.insert_one(&payment).await?;
        self.base.find_by_id(id).await
    }

    pub async fn list(&self) -> DaoResult<Vec<Payment>> {
        self.base.find_many(doc! {}, None).await
    }

    pub async fn list_for_member(&self, member_id: ObjectId) -> DaoResult<Vec<Payment>> {
        self.base
            .find_many(doc! { "member_id": member_id }, None)
            .await
    }
}
