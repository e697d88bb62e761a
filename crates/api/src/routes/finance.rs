use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use welfare_services::finance;

use crate::{error::ApiError, extractors::auth::AdminUser, state::AppState};

#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub id: String,
    /// Coerced amount; the raw stored value may be a string or legacy blob.
    pub amount: f64,
    pub date: String,
    pub member_id: Option<String>,
    pub member_number: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    pub id: String,
    pub amount: f64,
    pub description: String,
    pub date: String,
}

#[derive(Debug, Serialize)]
pub struct FinanceOverview {
    pub account_balance: f64,
    pub total_payments: f64,
    pub total_expenses: f64,
    pub payments: Vec<PaymentResponse>,
    pub expenses: Vec<ExpenseResponse>,
}

/// Finance section: running balance plus both ledgers, newest first.
pub async fn overview(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<FinanceOverview>, ApiError> {
    let (mut payments, mut expenses) = tokio::try_join!(
        async { state.payments.list().await.map_err(ApiError::from) },
        async { state.expenses.list().await.map_err(ApiError::from) },
    )?;

    finance::sort_recent_first(&mut payments);
    finance::sort_recent_first(&mut expenses);

    let total_payments = finance::total(payments.iter().map(|p| &p.amount));
    let total_expenses = finance::total(expenses.iter().map(|e| &e.amount));

    Ok(Json(FinanceOverview {
        account_balance: total_payments - total_expenses,
        total_payments,
        total_expenses,
        payments: payments
            .iter()
            .map(|p| PaymentResponse {
                id: p.id.map(|id| id.to_hex()).unwrap_or_default(),
                amount: finance::coerce_amount(&p.amount),
                date: p.date.clone(),
                member_id: p.member_id.map(|id| id.to_hex()),
                member_number: p.member_number.clone(),
            })
            .collect(),
        expenses: expenses
            .iter()
            .map(|e| ExpenseResponse {
                id: e.id.map(|id| id.to_hex()).unwrap_or_default(),
                amount: finance::coerce_amount(&e.amount),
                description: e.description.clone(),
                date: e.date.clone(),
            })
            .collect(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct AddExpenseRequest {
    pub amount: f64,
    pub description: String,
    pub date: Option<String>,
}

pub async fn add_expense(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(body): Json<AddExpenseRequest>,
) -> Result<StatusCode, ApiError> {
    if body.description.is_empty() {
        return Err(ApiError::Validation("Description is required".to_string()));
    }

    let date = body
        .date
        .unwrap_or_else(|| chrono::Utc::now().to_rfc3339());
    state
        .expenses
        .create(body.amount, body.description, date, Some(admin.user.user_id))
        .await?;

    Ok(StatusCode::CREATED)
}
