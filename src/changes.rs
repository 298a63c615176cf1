// 🔀 Change Detector - Sorted-merge diff of previous vs current snapshots
// Two-pointer merge-join over two key-sorted record sets; emits the
// current version of every new or materially-changed record.

use crate::record::{ExtractRecord, RecordSet};
use crate::summary::ChangeStats;
use std::cmp::Ordering;
use tracing::{debug, info};

/// What to do with current records left after the previous stream runs dry
/// mid-merge.
///
/// The legacy loader stopped at the first exhausted stream, silently
/// dropping the current tail. That behavior is preserved as the default
/// pending a product-owner decision; `DrainNew` classifies the tail as new.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TailPolicy {
    /// Stop when either stream ends; trailing current records are dropped
    Stop,
    /// Emit trailing current records as new
    DrainNew,
}

/// Compare a previous and a current record set, both sorted ascending by
/// identity key (a precondition — violating it corrupts the result).
///
/// Returns the subset of current records that are new or changed, plus the
/// change counts. Previous-only records are deletions upstream and produce
/// no output. Empty inputs short-circuit: an empty current set yields
/// nothing; an empty previous set marks every current record as new.
pub fn detect_changes<R>(
    previous: &RecordSet<R>,
    current: &RecordSet<R>,
    policy: TailPolicy,
) -> (RecordSet<R>, ChangeStats)
where
    R: ExtractRecord + Clone,
{
    info!("Comparing old and new {} files...", R::POPULATION);
    let mut stats = ChangeStats::default();
    let mut emitted: Vec<R> = Vec::new();

    if current.is_empty() {
        return (RecordSet::empty(), stats);
    }
    if previous.is_empty() {
        stats.new = current.len();
        return (current.clone(), stats);
    }

    let old = previous.records();
    let new = current.records();
    let mut old_index = 0;
    let mut new_index = 0;

    while old_index < old.len() && new_index < new.len() {
        let old_record = &old[old_index];
        let new_record = &new[new_index];

        match old_record.emplid().cmp(new_record.emplid()) {
            Ordering::Less => {
                // deleted upstream; deletions are implicit downstream
                old_index += 1;
            }
            Ordering::Greater => {
                stats.new += 1;
                emitted.push(new_record.clone());
                new_index += 1;
            }
            Ordering::Equal => {
                if let Some(field) = old_record.first_mismatch(new_record) {
                    debug!(
                        "Mismatched field {field} for {} EMPLID {}",
                        R::POPULATION,
                        new_record.emplid()
                    );
                    stats.updated += 1;
                    emitted.push(new_record.clone());
                } else {
                    stats.unchanged += 1;
                }
                old_index += 1;
                new_index += 1;
            }
        }
    }

    let trailing = new.len() - new_index;
    if trailing > 0 {
        match policy {
            TailPolicy::Stop => stats.trailing_dropped = trailing,
            TailPolicy::DrainNew => {
                stats.new += trailing;
                emitted.extend(new[new_index..].iter().cloned());
            }
        }
    }

    info!(
        "{} changes found: {} updated, {} new",
        R::POPULATION,
        stats.updated,
        stats.new
    );
    // emitted records keep the current set's key order
    (RecordSet::from_sorted(emitted), stats)
}

// ============================================================================
// TESTS
// ============================================================================
