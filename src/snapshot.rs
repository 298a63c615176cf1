// 💾 Snapshot Artifacts - Timestamped intermediate and output files
// Condensed and audit snapshots persist as pipe-delimited text so the next
// incremental run can read them back exactly like an extract; the patron
// output is newline-delimited JSON.

use crate::error::Result;
use crate::project::OutputPatron;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Pipeline stages that persist a snapshot artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotStage {
    Condensed,
    OldNewCompare,
    IntraFileCompared,
}

impl SnapshotStage {
    fn file_label(self) -> &'static str {
        match self {
            SnapshotStage::Condensed => "Condensed",
            SnapshotStage::OldNewCompare => "Old-New-Compare",
            SnapshotStage::IntraFileCompared => "Intra-File-Compared",
        }
    }
}

/// Run timestamp used by every artifact of one load
pub fn timestamp(time: &DateTime<Local>) -> String {
    time.format("%Y-%m-%d--%H-%M-%S").to_string()
}

/// `<dir>/<Population>-<Stage>--<ts>.csv`
pub fn snapshot_path(
    dir: &Path,
    population: &str,
    stage: SnapshotStage,
    time: &DateTime<Local>,
) -> PathBuf {
    dir.join(format!(
        "{population}-{}--{}.csv",
        stage.file_label(),
        timestamp(time)
    ))
}

/// `<dir>/<prefix>--<ts>.json`
pub fn output_path(dir: &Path, prefix: &str, time: &DateTime<Local>) -> PathBuf {
    dir.join(format!("{prefix}--{}.json", timestamp(time)))
}

/// `<dir>/<ts>.log`
pub fn log_path(dir: &Path, time: &DateTime<Local>) -> PathBuf {
    dir.join(format!("{}.log", timestamp(time)))
}

/// Write records as a pipe-delimited snapshot with a header row. An empty
/// record list produces an empty file, which reads back as an empty set.
pub fn write_snapshot<R: Serialize>(path: &Path, records: &[R]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b'|').from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    info!("Snapshot saved to {}", path.display());
    Ok(())
}

/// Write the patron output: one JSON object per line, nothing else.
pub fn write_patron_file(path: &Path, patrons: &[OutputPatron]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for patron in patrons {
        serde_json::to_writer(&mut writer, patron)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    info!("{} records saved to {}", patrons.len(), path.display());
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::read_extract;
    use crate::record::StaffRecord;
    use crate::test_support::staff_record;
    use chrono::TimeZone;

    fn run_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 10, 14, 30, 5).unwrap()
    }

    #[test]
    fn test_artifact_paths_carry_the_run_timestamp() {
        let time = run_time();
        assert_eq!(
            snapshot_path(Path::new("/tmp"), "Staff", SnapshotStage::Condensed, &time),
            PathBuf::from("/tmp/Staff-Condensed--2025-03-10--14-30-05.csv")
        );
        assert_eq!(
            output_path(Path::new("/tmp"), "students", &time),
            PathBuf::from("/tmp/students--2025-03-10--14-30-05.json")
        );
        assert_eq!(
            log_path(Path::new("/tmp"), &time),
            PathBuf::from("/tmp/2025-03-10--14-30-05.log")
        );
    }

    #[test]
    fn test_snapshot_round_trips_as_an_extract() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Staff-Condensed--test.csv");

        let records = vec![staff_record("100", "A", "2"), staff_record("200", "L", "3")];
        write_snapshot(&path, &records).unwrap();

        let read_back = read_extract::<StaffRecord>(&path).unwrap();
        assert_eq!(read_back.len(), 2);
        assert_eq!(read_back.records()[0].emplid, "100");
        assert_eq!(read_back.records()[1].empl_status, "L");
    }

    #[test]
    fn test_empty_snapshot_reads_back_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Staff-Condensed--empty.csv");

        write_snapshot::<StaffRecord>(&path, &[]).unwrap();
        let read_back = read_extract::<StaffRecord>(&path).unwrap();
        assert!(read_back.is_empty());
    }

    #[test]
    fn test_patron_file_is_one_json_object_per_line() {
        use crate::classify::classify_staff;
        use crate::project::{project_staff, InstitutionContext};
        use chrono::NaiveDate;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("staff--test.json");
        let institution = InstitutionContext {
            name: "Example University".to_string(),
            domain: "example.edu".to_string(),
        };
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

        let patrons: Vec<_> = [staff_record("100", "A", "2"), staff_record("200", "A", "1")]
            .iter()
            .map(|r| project_staff(r, &classify_staff(r, today), &institution))
            .collect();
        write_patron_file(&path, &patrons).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(value.get("externalSystemId").is_some());
        }
    }
}
