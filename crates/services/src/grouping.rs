//! Collector roster derived from the flat member list.
//!
//! Members are grouped by the raw `collector` name string, case-sensitive and
//! exact. This is a documented limitation inherited from the data model: a
//! rename breaks the association for anything not yet re-tagged, and a typo
//! silently opens a new group. The fix lives in rename propagation
//! (`sanitize_collector_name` + `MemberDao::retag_collector`), not here.

use welfare_db::models::Member;

use crate::member_number;

/// One collector's slice of the membership, with its derived rank.
#[derive(Debug, Clone)]
pub struct CollectorGroup {
    pub name: String,
    /// 1-based dense rank by descending member count. Never persisted.
    pub rank: u32,
    pub members: Vec<Member>,
}

impl CollectorGroup {
    /// Rank formatted the way the roster displays it: 2-digit zero-padded.
    pub fn rank_label(&self) -> String {
        format!("{:02}", self.rank)
    }

    /// Ephemeral display number for the member at `position` (0-based) in
    /// this group.
    ///
    /// Computed from the collector *name* and the current rank, so it can
    /// disagree with the `member_number` persisted at approval or by the
    /// migration tool. Both numbering sources are intentionally kept; which
    /// one is authoritative is an open stakeholder question (see DESIGN.md).
    pub fn display_number(&self, position: usize) -> String {
        member_number::generate(
            &member_number::initials_from_name(&self.name),
            self.rank,
            position as u32 + 1,
        )
    }
}

/// Group members by collector name and rank the groups by descending member
/// count. Members with an empty collector field are excluded.
///
/// Ties keep first-encounter order (stable sort), which makes rank
/// assignment deterministic for a given input order.
pub fn group_by_collector(members: Vec<Member>) -> Vec<CollectorGroup> {
    let mut groups: Vec<CollectorGroup> = Vec::new();

    for member in members {
        if member.collector.is_empty() {
            continue;
        }
        match groups.iter_mut().find(|g| g.name == member.collector) {
            Some(group) => group.members.push(member),
            None => groups.push(CollectorGroup {
                name: member.collector.clone(),
                rank: 0,
                members: vec![member],
            }),
        }
    }

    groups.sort_by_key(|g| std::cmp::Reverse(g.members.len()));
    for (i, group) in groups.iter_mut().enumerate() {
        group.rank = i as u32 + 1;
    }

    groups
}

/// Sanitize a collector name before a rename commit: collapse runs of
/// whitespace, trim, and replace `/` with `-` (slashes read as path
/// separators in the admin UI routes).
pub fn sanitize_collector_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('/', "-")
}
