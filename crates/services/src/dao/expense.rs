use bson::{Bson, doc, oid::ObjectId};
use mongodb::Database;
use welfare_db::models::Expense;

use super::base::{BaseDao, DaoResult};

pub struct ExpenseDao {
    pub base: BaseDao<Expense>,
}

impl ExpenseDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, Expense::COLLECTION),
        }
    }

    pub async fn create(
        &self,
        amount: f64,
        description: String,
        date: String,
        user_id: Option<ObjectId>,
    ) -> DaoResult<Expense> {
        let expense = Expense {
            id: None,
            amount: Bson::Double(amount),
            description,
            date,
            user_id,
        };

        let id = self.base.insert_one(&expense).await?;
        self.base.find_by_id(id).await
    }

    pub async fn list(&self) -> DaoResult<Vec<Expense>> {
        self.base.find_many(doc! {}, None).await
    }
}
