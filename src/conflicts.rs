// ⚔️ Conflict Resolver - No EMPLID survives in both populations
// Staff conflicts resolve first against the unfiltered student key set;
// student conflicts then resolve against the already-filtered staff keys.

use crate::record::{ExtractRecord, RecordSet, StaffRecord, StudentRecord};
use crate::summary::ConflictStats;
use tracing::info;

/// Remove cross-population duplicates.
///
/// A staff record with post-remap status T or S whose EMPLID also appears
/// among the students is removed (such a person is now primarily a
/// student). A student whose EMPLID appears in the remaining staff set is
/// removed (staff affiliation wins once staff conflicts are settled).
/// Order matters and is fixed: staff first, then students.
///
/// When either working set is empty there is nothing to compare and both
/// sets pass through untouched.
pub fn resolve_conflicts(
    staff: RecordSet<StaffRecord>,
    students: RecordSet<StudentRecord>,
) -> (RecordSet<StaffRecord>, RecordSet<StudentRecord>, ConflictStats) {
    let mut stats = ConflictStats {
        staff_remaining: staff.len(),
        students_remaining: students.len(),
        ..ConflictStats::default()
    };

    if staff.is_empty() || students.is_empty() {
        info!("No record comparison necessary, a load file contains no records");
        return (staff, students, stats);
    }

    info!("Beginning student/staff record comparison...");

    let student_ids = students.key_set();
    let mut staff_records = staff.into_vec();
    staff_records.retain(|record| {
        let conflicted = matches!(record.empl_status.as_str(), "T" | "S")
            && student_ids.contains(record.emplid());
        if conflicted {
            stats.staff_removed += 1;
        }
        !conflicted
    });
    drop(student_ids);
    stats.staff_remaining = staff_records.len();

    info!(
        "Staff records removed: {}, remaining: {}",
        stats.staff_removed, stats.staff_remaining
    );

    let staff = RecordSet::from_sorted(staff_records);
    let staff_ids = staff.key_set();
    let mut student_records = students.into_vec();
    student_records.retain(|record| {
        let conflicted = staff_ids.contains(record.emplid());
        if conflicted {
            stats.students_removed += 1;
        }
        !conflicted
    });
    drop(staff_ids);
    stats.students_remaining = student_records.len();

    info!(
        "Student records removed: {}, remaining: {}",
        stats.students_removed, stats.students_remaining
    );

    (staff, RecordSet::from_sorted(student_records), stats)
}

// ============================================================================
// TESTS
// ============================================================================
