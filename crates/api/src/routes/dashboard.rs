use std::collections::BTreeMap;

use axum::{Json, extract::State};
use serde::Serialize;
use welfare_services::{finance, grouping};

use crate::{error::ApiError, extractors::auth::AdminUser, state::AppState};

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub account_balance: f64,
    pub collections: Vec<CollectionCount>,
    pub collectors: Vec<CollectorSummary>,
    pub registration_chart: Vec<ChartPoint>,
}

#[derive(Debug, Serialize)]
pub struct CollectionCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct CollectorSummary {
    pub name: String,
    pub rank: String,
    pub member_count: usize,
}

/// One month of intake history: registrations received that month and the
/// running member total.
#[derive(Debug, Serialize)]
pub struct ChartPoint {
    pub date: String,
    pub registrations: usize,
    pub total_members: i64,
}

/// Admin landing view. All collections are fetched concurrently with an
/// all-or-nothing join: one failed fetch fails the whole dashboard and no
/// partial results are used.
pub async fn overview(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<DashboardResponse>, ApiError> {
    let (members, registrations, collectors, payments, expenses, notes, users) = tokio::try_join!(
        async { state.members.find_verified().await.map_err(ApiError::from) },
        async { state.registrations.list().await.map_err(ApiError::from) },
        async { state.collectors.list().await.map_err(ApiError::from) },
        async { state.payments.list().await.map_err(ApiError::from) },
        async { state.expenses.list().await.map_err(ApiError::from) },
        async { state.notes.base.count(bson::doc! {}).await.map_err(ApiError::from) },
        async { state.users.base.count(bson::doc! {}).await.map_err(ApiError::from) },
    )?;

    let account_balance = finance::balance(&payments, &expenses);

    let collections = vec![
        CollectionCount { name: "members".into(), count: members.len() },
        CollectionCount { name: "registrations".into(), count: registrations.len() },
        CollectionCount { name: "collectors".into(), count: collectors.len() },
        CollectionCount { name: "payments".into(), count: payments.len() },
        CollectionCount { name: "expenses".into(), count: expenses.len() },
        CollectionCount { name: "notes".into(), count: notes as usize },
        CollectionCount { name: "users".into(), count: users as usize },
    ];

    let registration_chart = registration_chart(
        registrations
            .iter()
            .map(|r| r.created_at.to_chrono())
            .collect(),
        members.len(),
    );

    let collector_summaries = grouping::group_by_collector(members)
        .iter()
        .map(|g| CollectorSummary {
            name: g.name.clone(),
            rank: g.rank_label(),
            member_count: g.members.len(),
        })
        .collect();

    Ok(Json(DashboardResponse {
        account_balance,
        collections,
        collectors: collector_summaries,
        registration_chart,
    }))
}

/// Group registrations by calendar month, accumulate a running total, and
/// shift the totals so the final point matches the current member count
/// (registrations that were never approved or were revoked would otherwise
/// inflate it). Only the last 12 months are kept.
fn registration_chart(
    created_at: Vec<chrono::DateTime<chrono::Utc>>,
    current_members: usize,
) -> Vec<ChartPoint> {
    let mut by_month: BTreeMap<String, usize> = BTreeMap::new();
    for dt in created_at {
        *by_month.entry(dt.format("%Y-%m").to_string()).or_default() += 1;
    }

    let mut running = 0usize;
    let mut points: Vec<ChartPoint> = by_month
        .into_iter()
        .map(|(date, count)| {
            running += count;
            ChartPoint {
                date,
                registrations: count,
                total_members: running as i64,
            }
        })
        .collect();

    let adjustment = current_members as i64 - running as i64;
    for point in &mut points {
        point.total_members += adjustment;
    }

    if points.len() > 12 {
        points.drain(..points.len() - 12);
    }
    points
}
