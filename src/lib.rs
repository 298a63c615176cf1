// Patron Load Pipeline - Core Library
// Reconciles the staff and student extracts against the previous snapshot,
// resolves duplicate and cross-population identities, classifies each
// survivor, and emits the normalized patron record stream.

pub mod changes;
pub mod classify;
pub mod condense;
pub mod config;
pub mod conflicts;
pub mod dedupe;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod project;
pub mod record;
pub mod snapshot;
pub mod summary;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use changes::{detect_changes, TailPolicy};
pub use classify::{
    classify_staff, classify_student, two_years_out, Semester, StaffClassification,
    StudentClassification, TermDate,
};
pub use condense::{condense_staff, condense_students, staff_eligible, ALLOWED_STAFF_CLASSES};
pub use config::{update_config_field, LoadConfig};
pub use conflicts::resolve_conflicts;
pub use dedupe::{dedupe_staff, remap_status, select_survivor, STATUS_PRECEDENCE};
pub use error::{LoadError, Result};
pub use extract::read_extract;
pub use pipeline::PatronLoad;
pub use project::{project_staff, project_student, InstitutionContext, OutputPatron};
pub use record::{ExtractRecord, RecordSet, StaffRecord, StudentRecord};
pub use snapshot::{
    log_path, output_path, snapshot_path, write_patron_file, write_snapshot, SnapshotStage,
};
pub use summary::{ChangeStats, CondenseStats, ConflictStats, ConvertStats, RunSummary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
