//! Payment/expense aggregation for the finance dashboard.
//!
//! Legacy documents carry amounts as BSON doubles, ints, numeric strings, or
//! double-encoded JSON blobs, so everything funnels through [`coerce_amount`]
//! before summing. One unparseable record never aborts an aggregation; it
//! contributes zero.

use bson::Bson;
use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;
use welfare_db::models::{Expense, Payment};

/// Coerce a raw amount value to a float.
///
/// Policy, in order: numeric BSON is used as-is; strings get a direct float
/// parse; failing that the string is JSON-decoded and a nested `amount`
/// field extracted (double-encoded legacy data); anything else is 0.0.
pub fn coerce_amount(raw: &Bson) -> f64 {
    match raw {
        Bson::Double(d) => *d,
        Bson::Int32(i) => f64::from(*i),
        Bson::Int64(i) => *i as f64,
        Bson::String(s) => {
            if let Ok(parsed) = s.trim().parse::<f64>() {
                return parsed;
            }
            if let Ok(value) = serde_json::from_str::<serde_json::Value>(s) {
                if let Some(amount) = nested_amount(&value) {
                    return amount;
                }
            }
            debug!(raw = %s, "Unparseable amount, counting as zero");
            0.0
        }
        other => {
            debug!(?other, "Non-numeric amount, counting as zero");
            0.0
        }
    }
}

fn nested_amount(value: &serde_json::Value) -> Option<f64> {
    match value.get("amount")? {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Sum a sequence of raw amounts under the coercion policy.
pub fn total<'a, I>(amounts: I) -> f64
where
    I: IntoIterator<Item = &'a Bson>,
{
    amounts.into_iter().map(coerce_amount).sum()
}

/// Account balance: payments in, expenses out.
pub fn balance(payments: &[Payment], expenses: &[Expense]) -> f64 {
    total(payments.iter().map(|p| &p.amount)) - total(expenses.iter().map(|e| &e.amount))
}

/// Anything carrying an ISO date string, for display ordering.
pub trait Dated {
    fn date(&self) -> &str;
}

impl Dated for Payment {
    fn date(&self) -> &str {
        &self.date
    }
}

impl Dated for Expense {
    fn date(&self) -> &str {
        &self.date
    }
}

/// Parse an ISO 8601 date string; accepts full RFC 3339 timestamps and bare
/// `YYYY-MM-DD` dates.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Sort records newest-first for display. Unparseable dates are pinned to
/// sort as the earliest, i.e. they land at the end of the list.
pub fn sort_recent_first<T: Dated>(records: &mut [T]) {
    records.sort_by(|a, b| parse_date(b.date()).cmp(&parse_date(a.date())));
}
