//! One-shot member-number migration.
//!
//! A run applies a single fixed (initials, order) pair to the entire member
//! collection, assigning sequences 1..N. Enumeration is pinned to `_id`
//! ascending so a re-run over an unchanged set produces identical numbering;
//! insertions between runs shift every later sequence, which makes the job
//! explicitly NOT idempotent across runs — old numbers survive in
//! `old_member_number` for audit.
//!
//! There is no checkpointing: any store error aborts the run and members
//! already rewritten keep their new numbers.

use bson::oid::ObjectId;
use thiserror::Error;
use tracing::{info, warn};
use welfare_db::models::Member;

use crate::dao::MemberDao;
use crate::dao::base::DaoError;
use crate::member_number;

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Store error: {0}")]
    Dao(#[from] DaoError),
    #[error("Member {0} has no id")]
    MissingId(String),
}

/// One planned rewrite: which member, what it gets, what it had.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberAssignment {
    pub member_id: ObjectId,
    pub new_number: String,
    pub old_number: Option<String>,
}

#[derive(Debug, Default)]
pub struct MigrationReport {
    pub total: usize,
    pub rewritten: usize,
}

/// Compute the full set of assignments for a member list, in the order
/// given. Pure; the store is only touched by [`run`].
pub fn plan(
    members: &[Member],
    initials: &str,
    order: u32,
) -> Result<Vec<NumberAssignment>, MigrationError> {
    members
        .iter()
        .enumerate()
        .map(|(i, member)| {
            let sequence = i as u32 + 1;
            if member_number::exceeds_capacity(sequence) {
                warn!(
                    sequence,
                    member = %member.full_name,
                    "Sequence past 3-digit capacity; number widens"
                );
            }
            Ok(NumberAssignment {
                member_id: member
                    .id
                    .ok_or_else(|| MigrationError::MissingId(member.full_name.clone()))?,
                new_number: member_number::generate(initials, order, sequence),
                old_number: member.member_number.clone(),
            })
        })
        .collect()
}

/// Execute the migration against the store: fetch all members in `_id`
/// order, then rewrite each one's number, preserving the previous value
/// under `old_member_number`. Writes are sequential and independent; the
/// first failure aborts with everything before it already applied.
pub async fn run(
    members: &MemberDao,
    initials: &str,
    order: u32,
) -> Result<MigrationReport, MigrationError> {
    let all = members.find_all_in_id_order().await?;
    let assignments = plan(&all, initials, order)?;

    let mut report = MigrationReport {
        total: assignments.len(),
        rewritten: 0,
    };

    for assignment in &assignments {
        members
            .assign_number(
                assignment.member_id,
                &assignment.new_number,
                assignment.old_number.as_deref(),
            )
            .await?;
        report.rewritten += 1;
    }

    info!(
        total = report.total,
        rewritten = report.rewritten,
        initials,
        order,
        "Member number migration complete"
    );
    Ok(report)
}
