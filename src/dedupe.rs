// 🔍 Deduplicator - One surviving staff record per EMPLID
// Transitional statuses are remapped to canonical codes first, then a
// strict precedence order picks the survivor of each duplicate group.

use crate::record::StaffRecord;
use crate::summary::CondenseStats;
use tracing::warn;

/// Survivor selection order: first status with a match wins
pub const STATUS_PRECEDENCE: [&str; 7] = ["D", "A", "R", "W", "L", "S", "T"];

/// Canonical status for a possibly-transitional code.
///
/// P→L, Q→R, X→R, U→T, V→T, ""→A, B→A; anything else passes through.
pub fn remap_status(status: &str) -> &str {
    match status {
        "P" => "L",
        "Q" => "R",
        "X" => "R",
        "U" => "T",
        "V" => "T",
        "" => "A",
        "B" => "A",
        other => other,
    }
}

/// Remap every record's status in place. This runs before survivor
/// selection so precedence only ever sees canonical codes, and it applies
/// to single-record keys too (conflict resolution and classification both
/// read the post-remap status).
pub fn remap_statuses(records: &mut [StaffRecord]) {
    for record in records {
        let canonical = remap_status(&record.empl_status);
        if canonical != record.empl_status {
            record.empl_status = canonical.to_string();
        }
    }
}

/// Pick the surviving record of a duplicate group by status precedence.
///
/// Returns the index of the first record carrying the winning status, or
/// `None` when no candidate matches any precedence tier (an unresolved
/// duplicate — the caller logs and drops the group).
pub fn select_survivor(group: &[StaffRecord]) -> Option<usize> {
    for status in STATUS_PRECEDENCE {
        if let Some(index) = group
            .iter()
            .position(|record| record.empl_status == status)
        {
            return Some(index);
        }
    }
    None
}

/// Collapse a key-sorted record list to one record per EMPLID.
///
/// Single-record keys pass through without invoking precedence logic.
/// Unresolved duplicate groups are logged with full candidate detail and
/// dropped; the run continues.
pub fn dedupe_staff(records: Vec<StaffRecord>, stats: &mut CondenseStats) -> Vec<StaffRecord> {
    let mut survivors: Vec<StaffRecord> = Vec::with_capacity(records.len());
    let mut group: Vec<StaffRecord> = Vec::new();

    for record in records {
        if group.last().is_some_and(|last| last.emplid != record.emplid) {
            flush_group(std::mem::take(&mut group), &mut survivors, stats);
        }
        group.push(record);
    }
    flush_group(group, &mut survivors, stats);

    survivors
}

fn flush_group(
    group: Vec<StaffRecord>,
    survivors: &mut Vec<StaffRecord>,
    stats: &mut CondenseStats,
) {
    match group.len() {
        0 => {}
        1 => survivors.extend(group),
        _ => match select_survivor(&group) {
            Some(index) => {
                stats.duplicates_collapsed += group.len() - 1;
                let mut group = group;
                survivors.push(group.swap_remove(index));
            }
            None => {
                for candidate in &group {
                    warn!(
                        "Unresolved duplicate: EMPLID {} status {}",
                        candidate.emplid, candidate.empl_status
                    );
                }
                stats.unresolved_dropped += 1;
            }
        },
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::staff_record;

    fn dedupe(records: Vec<StaffRecord>) -> (Vec<StaffRecord>, CondenseStats) {
        let mut stats = CondenseStats::default();
        let survivors = dedupe_staff(records, &mut stats);
        (survivors, stats)
    }

    #[test]
    fn test_remap_covers_every_transitional_code() {
        assert_eq!(remap_status("P"), "L");
        assert_eq!(remap_status("Q"), "R");
        assert_eq!(remap_status("X"), "R");
        assert_eq!(remap_status("U"), "T");
        assert_eq!(remap_status("V"), "T");
        assert_eq!(remap_status(""), "A");
        assert_eq!(remap_status("B"), "A");
        assert_eq!(remap_status("A"), "A");
        assert_eq!(remap_status("Z"), "Z");
    }

    #[test]
    fn test_single_record_key_passes_through() {
        let (survivors, stats) = dedupe(vec![staff_record("100", "A", "2")]);
        assert_eq!(survivors.len(), 1);
        assert_eq!(stats.duplicates_collapsed, 0);
    }

    #[test]
    fn test_precedence_d_beats_a() {
        let (survivors, _) = dedupe(vec![
            staff_record("100", "A", "2"),
            staff_record("100", "D", "2"),
            staff_record("100", "T", "2"),
        ]);
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].empl_status, "D");
    }

    #[test]
    fn test_precedence_is_deterministic_under_shuffling() {
        let statuses = ["T", "S", "L", "W", "R", "A"];
        // try several orderings of the same candidate statuses
        for rotation in 0..statuses.len() {
            let mut rotated = statuses.to_vec();
            rotated.rotate_left(rotation);
            let records: Vec<StaffRecord> = rotated
                .iter()
                .map(|status| staff_record("100", status, "2"))
                .collect();
            let (survivors, _) = dedupe(records);
            assert_eq!(survivors[0].empl_status, "A", "rotation {rotation}");
        }
    }

    #[test]
    fn test_survivor_status_is_always_canonical() {
        // remap-then-select: transitional codes never reach precedence
        let mut records = vec![
            staff_record("100", "P", "2"),
            staff_record("100", "U", "2"),
        ];
        remap_statuses(&mut records);
        let (survivors, _) = dedupe(records);
        assert_eq!(survivors.len(), 1);
        // P→L outranks U→T
        assert_eq!(survivors[0].empl_status, "L");
    }

    #[test]
    fn test_unresolved_group_is_dropped_not_guessed() {
        let (survivors, stats) = dedupe(vec![
            staff_record("100", "Z", "2"),
            staff_record("100", "9", "2"),
        ]);
        assert!(survivors.is_empty());
        assert_eq!(stats.unresolved_dropped, 1);
    }

    #[test]
    fn test_groups_are_independent() {
        let (survivors, stats) = dedupe(vec![
            staff_record("100", "A", "2"),
            staff_record("100", "T", "2"),
            staff_record("200", "W", "2"),
            staff_record("300", "Z", "2"),
            staff_record("300", "Z", "2"),
        ]);
        let ids: Vec<&str> = survivors.iter().map(|r| r.emplid.as_str()).collect();
        assert_eq!(ids, vec!["100", "200"]);
        assert_eq!(stats.duplicates_collapsed, 1);
        assert_eq!(stats.unresolved_dropped, 1);
    }

    #[test]
    fn test_ties_on_winning_status_keep_first_in_extract_order() {
        let mut first = staff_record("100", "A", "2");
        first.last_name = "First".to_string();
        let mut second = staff_record("100", "A", "2");
        second.last_name = "Second".to_string();

        let (survivors, _) = dedupe(vec![first, second]);
        assert_eq!(survivors[0].last_name, "First");
    }
}
