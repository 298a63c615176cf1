// 🗜️ Condenser - Eligibility filtering per population
// Staff additionally get status remapping and duplicate-identity
// resolution; students only need a barcode.

use crate::dedupe::{dedupe_staff, remap_statuses};
use crate::record::{RecordSet, StaffRecord, StudentRecord};
use crate::summary::CondenseStats;
use tracing::info;

/// Staff classes eligible for a library account
pub const ALLOWED_STAFF_CLASSES: [&str; 10] = ["0", "1", "2", "3", "4", "5", "7", "S", "B", "#"];

/// Contingent-employee category excluded even within class "#"
const EXCLUDED_CONTINGENT_CATEGORY: &str = "CNTEM";

/// A staff record is eligible when its class is allowed, it has a barcode,
/// and it is not a class-"#" contingent employee.
pub fn staff_eligible(record: &StaffRecord) -> bool {
    ALLOWED_STAFF_CLASSES.contains(&record.empl_class.as_str())
        && !record.barcode.is_empty()
        && !(record.empl_class == "#" && record.nens_cat_code == EXCLUDED_CONTINGENT_CATEGORY)
}

/// Filter the staff extract to eligible records, remap transitional
/// statuses, and collapse duplicate EMPLIDs to one survivor each.
pub fn condense_staff(set: RecordSet<StaffRecord>) -> (RecordSet<StaffRecord>, CondenseStats) {
    info!("Condensing Staff records...");
    let mut stats = CondenseStats {
        read: set.len(),
        ..CondenseStats::default()
    };

    let mut eligible: Vec<StaffRecord> = set
        .into_vec()
        .into_iter()
        .filter(|record| staff_eligible(record))
        .collect();
    stats.eligible = eligible.len();
    stats.skipped = stats.read - stats.eligible;

    remap_statuses(&mut eligible);
    let survivors = dedupe_staff(eligible, &mut stats);
    stats.condensed = survivors.len();

    info!(
        "Staff condensed: {} saved, {} skipped",
        stats.condensed, stats.skipped
    );
    // filtering and grouping preserve the extract's key order
    (RecordSet::from_sorted(survivors), stats)
}

/// Filter the student extract to records holding a barcode. Students have
/// no duplicate-identity pass.
pub fn condense_students(
    set: RecordSet<StudentRecord>,
) -> (RecordSet<StudentRecord>, CondenseStats) {
    info!("Condensing Student records...");
    let mut stats = CondenseStats {
        read: set.len(),
        ..CondenseStats::default()
    };

    let kept: Vec<StudentRecord> = set
        .into_vec()
        .into_iter()
        .filter(|record| !record.barcode.is_empty())
        .collect();
    stats.eligible = kept.len();
    stats.skipped = stats.read - stats.eligible;
    stats.condensed = kept.len();

    info!(
        "Students condensed: {} saved, {} skipped",
        stats.condensed, stats.skipped
    );
    (RecordSet::from_sorted(kept), stats)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{staff_record, student_record};

    #[test]
    fn test_staff_class_gate() {
        assert!(staff_eligible(&staff_record("100", "A", "2")));
        assert!(staff_eligible(&staff_record("100", "A", "S")));
        assert!(!staff_eligible(&staff_record("100", "A", "6")));
        assert!(!staff_eligible(&staff_record("100", "A", "X")));
    }

    #[test]
    fn test_staff_without_barcode_is_skipped() {
        let mut record = staff_record("100", "A", "2");
        record.barcode = String::new();
        assert!(!staff_eligible(&record));
    }

    #[test]
    fn test_contingent_employees_excluded_only_within_hash_class() {
        let mut contingent = staff_record("100", "A", "#");
        contingent.nens_cat_code = "CNTEM".to_string();
        assert!(!staff_eligible(&contingent));

        // same category code outside class "#" stays eligible
        let mut other_class = staff_record("100", "A", "2");
        other_class.nens_cat_code = "CNTEM".to_string();
        assert!(staff_eligible(&other_class));

        // class "#" with another category stays eligible
        let mut other_code = staff_record("100", "A", "#");
        other_code.nens_cat_code = "OTHER".to_string();
        assert!(staff_eligible(&other_code));
    }

    #[test]
    fn test_condense_staff_remaps_and_dedupes() {
        let set = RecordSet::new(vec![
            staff_record("100", "P", "2"), // transitional: P→L
            staff_record("200", "A", "2"),
            staff_record("200", "D", "3"),
        ]);

        let (condensed, stats) = condense_staff(set);
        assert_eq!(stats.read, 3);
        assert_eq!(stats.eligible, 3);
        assert_eq!(stats.duplicates_collapsed, 1);
        assert_eq!(condensed.len(), 2);
        assert_eq!(condensed.records()[0].empl_status, "L");
        assert_eq!(condensed.records()[1].empl_status, "D");
    }

    #[test]
    fn test_condense_students_only_needs_barcode() {
        let mut no_barcode = student_record("100", &[("UGRD", "BA", "Fall2024")]);
        no_barcode.barcode = String::new();
        let with_barcode = student_record("200", &[]);

        let (condensed, stats) = condense_students(RecordSet::new(vec![no_barcode, with_barcode]));
        assert_eq!(stats.read, 2);
        assert_eq!(stats.skipped, 1);
        assert_eq!(condensed.len(), 1);
        assert_eq!(condensed.records()[0].emplid, "200");
    }
}
