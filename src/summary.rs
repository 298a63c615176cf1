// 📊 Run Summary - End-of-run statistics
// These counters are part of the observable contract: every skipped,
// deduped, changed, removed and defaulted record is accounted for.

use serde::Serialize;
use tracing::info;

/// Condense-stage counts for one population
#[derive(Debug, Default, Clone, Serialize)]
pub struct CondenseStats {
    /// Rows read from the extract
    pub read: usize,
    /// Rows passing the eligibility rules
    pub eligible: usize,
    /// Rows failing eligibility (counted, not retained)
    pub skipped: usize,
    /// Duplicate rows collapsed into their group survivor
    pub duplicates_collapsed: usize,
    /// Duplicate groups dropped because no candidate matched a precedence
    /// tier
    pub unresolved_dropped: usize,
    /// Records surviving the stage
    pub condensed: usize,
}

/// Change-detection counts for one population (incremental mode only)
#[derive(Debug, Default, Clone, Serialize)]
pub struct ChangeStats {
    /// Current records with no previous counterpart
    pub new: usize,
    /// Current records differing from their previous version
    pub updated: usize,
    /// Current records identical to their previous version (dropped)
    pub unchanged: usize,
    /// Current records past the first exhausted stream, dropped under the
    /// stop-at-exhaustion rule
    pub trailing_dropped: usize,
}

impl ChangeStats {
    pub fn emitted(&self) -> usize {
        self.new + self.updated
    }
}

/// Cross-population conflict resolution counts
#[derive(Debug, Default, Clone, Serialize)]
pub struct ConflictStats {
    pub staff_removed: usize,
    pub staff_remaining: usize,
    pub students_removed: usize,
    pub students_remaining: usize,
}

/// Classification + projection counts for one population
#[derive(Debug, Default, Clone, Serialize)]
pub struct ConvertStats {
    /// Output records written
    pub written: usize,
    /// Records falling back to the default patron group
    pub defaulted: usize,
    /// Candidate term strings excluded as malformed
    pub malformed_terms: usize,
    /// Staff records with an empty barcode at conversion time
    pub no_barcode: usize,
    /// Terminated/deceased staff dropped outright (full loads only)
    pub dropped_inactive: usize,
}

/// Everything one load run did, stage by stage
#[derive(Debug, Default, Clone, Serialize)]
pub struct RunSummary {
    pub staff_condense: CondenseStats,
    pub student_condense: CondenseStats,
    pub staff_changes: Option<ChangeStats>,
    pub student_changes: Option<ChangeStats>,
    pub conflicts: ConflictStats,
    pub staff_convert: ConvertStats,
    pub student_convert: ConvertStats,
}

impl RunSummary {
    /// Log the whole summary at info level
    pub fn log(&self) {
        info!("===== Run summary =====");
        log_condense("Staff", &self.staff_condense);
        log_condense("Student", &self.student_condense);
        if let Some(changes) = &self.staff_changes {
            log_changes("Staff", changes);
        }
        if let Some(changes) = &self.student_changes {
            log_changes("Student", changes);
        }
        info!(
            "Conflicts: staff removed {} / remaining {}, students removed {} / remaining {}",
            self.conflicts.staff_removed,
            self.conflicts.staff_remaining,
            self.conflicts.students_removed,
            self.conflicts.students_remaining,
        );
        log_convert("Staff", &self.staff_convert);
        log_convert("Student", &self.student_convert);
    }
}

fn log_condense(population: &str, stats: &CondenseStats) {
    info!(
        "{population} condense: read {}, eligible {}, skipped {}, duplicates collapsed {}, unresolved groups dropped {}, condensed {}",
        stats.read,
        stats.eligible,
        stats.skipped,
        stats.duplicates_collapsed,
        stats.unresolved_dropped,
        stats.condensed,
    );
}

fn log_changes(population: &str, stats: &ChangeStats) {
    info!(
        "{population} changes: new {}, updated {}, unchanged {}, trailing dropped {}",
        stats.new, stats.updated, stats.unchanged, stats.trailing_dropped,
    );
}

fn log_convert(population: &str, stats: &ConvertStats) {
    info!(
        "{population} convert: written {}, defaulted {}, malformed terms {}, no barcode {}, dropped inactive {}",
        stats.written,
        stats.defaulted,
        stats.malformed_terms,
        stats.no_barcode,
        stats.dropped_inactive,
    );
}
