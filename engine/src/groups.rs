// Age groups: which group a birth date falls into, and group summaries.
use shared::date::Date;
use shared::format::format_birth_date;
use shared::models::{AgeGroup, GroupId, ParticipantExt, ParticipantStatus};
use std::collections::HashMap;
use tracing::debug;

pub type AgeGroups = HashMap<GroupId, AgeGroup>;

/// Groups by ascending cutoff, ties broken by id. Groups without a cutoff
/// can hold nobody and are left out.
pub fn sorted_groups(groups: &AgeGroups) -> Vec<&AgeGroup> {
    let mut sorted: Vec<&AgeGroup> = groups.values().filter(|g| !g.end.is_zero()).collect();
    sorted.sort_by_key(|g| (g.end, g.id));
    sorted
}

/// Returns the first group (in `sorted` order) whose cutoff is on or after
/// `birth`.
///
/// An unset birth date belongs to no group: it is reported as missing
/// instead of being counted in the youngest-cutoff group, where its
/// `0001-01-01` value would otherwise sort.
pub fn find_group(sorted: &[&AgeGroup], birth: Date) -> Option<GroupId> {
    if birth.is_zero() {
        return None;
    }
    sorted.iter().find(|g| birth <= g.end).map(|g| g.id)
}

/// Human readable birth date span of each group. Groups without a cutoff
/// get no entry.
pub fn group_ranges(groups: &AgeGroups) -> HashMap<GroupId, String> {
    let sorted = sorted_groups(groups);
    let mut out = HashMap::with_capacity(sorted.len());

    let mut previous: Option<&AgeGroup> = None;
    for group in sorted {
        let label = match previous {
            // the first group starts at -infinity
            None => format!("né avant le {}", format_birth_date(group.end)),
            Some(prev) => format!(
                "né entre le {} et le {}",
                format_birth_date(prev.end.add_days(1)),
                format_birth_date(group.end)
            ),
        };
        out.insert(group.id, label);
        previous = Some(group);
    }
    out
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupSizes {
    pub sizes: HashMap<GroupId, usize>,
    /// An enrolled participant matched no group.
    pub is_missing: bool,
}

/// Counts enrolled participants per group.
pub fn group_sizes(groups: &AgeGroups, participants: &[ParticipantExt]) -> GroupSizes {
    let sorted = sorted_groups(groups);
    let mut out = GroupSizes::default();

    for p in participants {
        if p.participant.status != ParticipantStatus::Enrolled {
            continue;
        }
        match find_group(&sorted, p.person.birth_date) {
            Some(id) => *out.sizes.entry(id).or_insert(0) += 1,
            None => {
                debug!(participant = p.participant.id, birth_date = %p.person.birth_date, "No group for participant");
                out.is_missing = true;
            }
        }
    }
    out
}
