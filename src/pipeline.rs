// 🚂 Pipeline Driver - One patron load, condense through projection
// Owns every working RecordSet for the duration of a run; each stage
// returns its result instead of mutating shared state.

use crate::changes::{detect_changes, TailPolicy};
use crate::classify::{classify_staff, classify_student};
use crate::condense::{condense_staff, condense_students};
use crate::config::{update_config_field, LoadConfig};
use crate::conflicts::resolve_conflicts;
use crate::error::Result;
use crate::extract::read_extract;
use crate::project::{project_staff, project_student, InstitutionContext, OutputPatron};
use crate::record::{RecordSet, StaffRecord, StudentRecord};
use crate::snapshot::{output_path, snapshot_path, write_patron_file, write_snapshot, SnapshotStage};
use crate::summary::{ConvertStats, RunSummary};
use chrono::{DateTime, Local};
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Drives one full or incremental load.
///
/// Construction reads every input the run needs; `run` consumes the driver
/// and produces the run summary plus all on-disk artifacts.
pub struct PatronLoad {
    config: LoadConfig,
    config_path: Option<PathBuf>,
    started: DateTime<Local>,
    staff: RecordSet<StaffRecord>,
    students: RecordSet<StudentRecord>,
    previous_staff: RecordSet<StaffRecord>,
    previous_students: RecordSet<StudentRecord>,
}

impl PatronLoad {
    /// Read the current extracts (and, for incremental loads, the previous
    /// condensed snapshots) up front. Any missing file aborts here.
    pub fn new(config: LoadConfig, started: DateTime<Local>) -> Result<PatronLoad> {
        info!("Initializing patron data load...");
        let staff = read_extract::<StaffRecord>(&config.staff_file_name)?;
        let students = read_extract::<StudentRecord>(&config.student_file_name)?;

        let (previous_staff, previous_students) = if config.full_load {
            (RecordSet::empty(), RecordSet::empty())
        } else {
            let staff_path = config.previous_staff_condense.as_deref();
            let student_path = config.previous_student_condense.as_deref();
            // validate() guarantees both paths for incremental loads
            let previous_staff = match staff_path {
                Some(path) => read_extract::<StaffRecord>(path)?,
                None => RecordSet::empty(),
            };
            let previous_students = match student_path {
                Some(path) => read_extract::<StudentRecord>(path)?,
                None => RecordSet::empty(),
            };
            (previous_staff, previous_students)
        };

        Ok(PatronLoad {
            config,
            config_path: None,
            started,
            staff,
            students,
            previous_staff,
            previous_students,
        })
    }

    /// Rewrite `previous*Condense` in this config file after each condense
    /// step so the next incremental run picks up the new snapshots.
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    /// Run the whole load: condense, (incremental) change detection,
    /// conflict resolution, classification, projection, output.
    pub fn run(self) -> Result<RunSummary> {
        let PatronLoad {
            config,
            config_path,
            started,
            staff,
            students,
            previous_staff,
            previous_students,
        } = self;

        fs::create_dir_all(&config.load_process_directory)?;
        fs::create_dir_all(&config.staff_destination_folder)?;
        fs::create_dir_all(&config.student_destination_folder)?;

        let mut summary = RunSummary::default();
        let institution = InstitutionContext {
            name: config.institution_name.clone(),
            domain: config.institution_domain.clone(),
        };
        let tail_policy = if config.drain_trailing_changes {
            TailPolicy::DrainNew
        } else {
            TailPolicy::Stop
        };

        // Condense both populations and persist the condensed snapshots
        let (staff, staff_condense) = condense_staff(staff);
        summary.staff_condense = staff_condense;
        let staff_snapshot = snapshot_path(
            &config.load_process_directory,
            "Staff",
            SnapshotStage::Condensed,
            &started,
        );
        write_snapshot(&staff_snapshot, staff.records())?;
        if let Some(path) = &config_path {
            update_config_field(
                path,
                "previousStaffCondense",
                &staff_snapshot.to_string_lossy(),
            )?;
        }
        log_elapsed(&started);

        let (students, student_condense) = condense_students(students);
        summary.student_condense = student_condense;
        let student_snapshot = snapshot_path(
            &config.load_process_directory,
            "Student",
            SnapshotStage::Condensed,
            &started,
        );
        write_snapshot(&student_snapshot, students.records())?;
        if let Some(path) = &config_path {
            update_config_field(
                path,
                "previousStudentCondense",
                &student_snapshot.to_string_lossy(),
            )?;
        }
        log_elapsed(&started);

        // Incremental loads keep only new or changed records
        let (staff, students) = if config.full_load {
            (staff, students)
        } else {
            let (staff, staff_changes) = detect_changes(&previous_staff, &staff, tail_policy);
            write_snapshot(
                &snapshot_path(
                    &config.load_process_directory,
                    "Staff",
                    SnapshotStage::OldNewCompare,
                    &started,
                ),
                staff.records(),
            )?;
            summary.staff_changes = Some(staff_changes);

            let (students, student_changes) =
                detect_changes(&previous_students, &students, tail_policy);
            write_snapshot(
                &snapshot_path(
                    &config.load_process_directory,
                    "Student",
                    SnapshotStage::OldNewCompare,
                    &started,
                ),
                students.records(),
            )?;
            summary.student_changes = Some(student_changes);
            log_elapsed(&started);

            (staff, students)
        };

        // Cross-population conflicts, then audit snapshots of both sets
        let (staff, students, conflicts) = resolve_conflicts(staff, students);
        summary.conflicts = conflicts;
        write_snapshot(
            &snapshot_path(
                &config.load_process_directory,
                "Staff",
                SnapshotStage::IntraFileCompared,
                &started,
            ),
            staff.records(),
        )?;
        write_snapshot(
            &snapshot_path(
                &config.load_process_directory,
                "Student",
                SnapshotStage::IntraFileCompared,
                &started,
            ),
            students.records(),
        )?;
        log_elapsed(&started);

        // Classification + projection, students first
        let today = started.date_naive();

        let mut student_patrons: Vec<OutputPatron> = Vec::with_capacity(students.len());
        let mut student_stats = ConvertStats::default();
        for record in students.iter() {
            let classification = classify_student(record, today);
            if classification.defaulted {
                student_stats.defaulted += 1;
            }
            student_stats.malformed_terms += classification.malformed_terms;
            student_patrons.push(project_student(record, &classification, &institution));
        }
        student_stats.written = student_patrons.len();
        write_patron_file(
            &output_path(&config.student_destination_folder, "students", &started),
            &student_patrons,
        )?;
        summary.student_convert = student_stats;
        log_elapsed(&started);

        let mut staff_patrons: Vec<OutputPatron> = Vec::with_capacity(staff.len());
        let mut staff_stats = ConvertStats::default();
        for record in staff.iter() {
            let classification = classify_staff(record, today);
            if !classification.active && config.full_load {
                // full loads drop terminated/deceased staff outright
                staff_stats.dropped_inactive += 1;
                continue;
            }
            if classification.defaulted {
                staff_stats.defaulted += 1;
            }
            if record.barcode.is_empty() {
                staff_stats.no_barcode += 1;
            }
            staff_patrons.push(project_staff(record, &classification, &institution));
        }
        staff_stats.written = staff_patrons.len();
        write_patron_file(
            &output_path(&config.staff_destination_folder, "staff", &started),
            &staff_patrons,
        )?;
        summary.staff_convert = staff_stats;
        log_elapsed(&started);

        info!("Patron load complete");
        Ok(summary)
    }
}

fn log_elapsed(started: &DateTime<Local>) {
    info!(
        "Total elapsed time (seconds): {}",
        (Local::now() - *started).num_seconds()
    );
}

// ============================================================================
// TESTS
// ============================================================================
