// ⚙️ Load Configuration - Explicit value object, constructed once at startup
// Replaces ambient environment lookup: the config is loaded from a JSON
// file, validated, and passed by value into the pipeline driver.

use crate::error::{LoadError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Keys every config file must carry, listed when loading fails
const REQUIRED_KEYS: &[&str] = &[
    "staffFileName",
    "studentFileName",
    "fullLoad",
    "loadProcessDirectory",
    "staffDestinationFolder",
    "studentDestinationFolder",
    "logFileDirectory",
    "institutionName",
    "institutionDomain",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadConfig {
    /// Current staff extract path
    pub staff_file_name: PathBuf,

    /// Current student extract path
    pub student_file_name: PathBuf,

    /// Previous condensed staff snapshot; required for incremental loads
    #[serde(default)]
    pub previous_staff_condense: Option<PathBuf>,

    /// Previous condensed student snapshot; required for incremental loads
    #[serde(default)]
    pub previous_student_condense: Option<PathBuf>,

    /// Full load: no change detection, terminated/deceased staff dropped
    pub full_load: bool,

    /// Directory receiving condensed and audit snapshots
    pub load_process_directory: PathBuf,

    pub staff_destination_folder: PathBuf,
    pub student_destination_folder: PathBuf,
    pub log_file_directory: PathBuf,

    /// Fills `customFields.institution` on every output record
    pub institution_name: String,

    /// Domain for `<EMPLID>@<domain>` identities and fallback emails
    pub institution_domain: String,

    /// Emit current records past the first exhausted stream as new during
    /// change detection (default keeps the legacy stop-at-exhaustion rule)
    #[serde(default)]
    pub drain_trailing_changes: bool,
}

impl LoadConfig {
    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<LoadConfig> {
        let text = fs::read_to_string(path).map_err(|e| {
            LoadError::Config(format!("cannot read config file {}: {e}", path.display()))
        })?;

        let config: LoadConfig = serde_json::from_str(&text).map_err(|e| {
            LoadError::Config(format!(
                "config file {} is invalid ({e}); required keys are: {}",
                path.display(),
                REQUIRED_KEYS.join(", ")
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Cross-field validation: incremental loads need both previous
    /// snapshot paths.
    pub fn validate(&self) -> Result<()> {
        if !self.full_load {
            if self.previous_staff_condense.is_none() {
                return Err(LoadError::Config(
                    "previousStaffCondense is required for incremental loads".to_string(),
                ));
            }
            if self.previous_student_condense.is_none() {
                return Err(LoadError::Config(
                    "previousStudentCondense is required for incremental loads".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Rewrite one string field of the config file on disk, preserving all
/// other keys. Used to point `previous*Condense` at the snapshot a
/// condense step just produced.
pub fn update_config_field(path: &Path, field: &str, value: &str) -> Result<()> {
    let text = fs::read_to_string(path).map_err(|e| {
        LoadError::Config(format!("cannot read config file {}: {e}", path.display()))
    })?;
    let mut doc: serde_json::Value = serde_json::from_str(&text)?;

    let object = doc.as_object_mut().ok_or_else(|| {
        LoadError::Config(format!("config file {} is not a JSON object", path.display()))
    })?;
    object.insert(
        field.to_string(),
        serde_json::Value::String(value.to_string()),
    );

    fs::write(path, serde_json::to_string_pretty(&doc)?)?;
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config_json(full_load: bool, with_previous: bool) -> String {
        let previous = if with_previous {
            r#""previousStaffCondense": "/tmp/prev-staff.csv",
               "previousStudentCondense": "/tmp/prev-student.csv","#
        } else {
            ""
        };
        format!(
            r#"{{
                "staffFileName": "/tmp/staff.txt",
                "studentFileName": "/tmp/student.txt",
                {previous}
                "fullLoad": {full_load},
                "loadProcessDirectory": "/tmp/process",
                "staffDestinationFolder": "/tmp/out",
                "studentDestinationFolder": "/tmp/out",
                "logFileDirectory": "/tmp/logs",
                "institutionName": "Example University",
                "institutionDomain": "example.edu"
            }}"#
        )
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_full_config() {
        let file = write_config(&config_json(true, false));
        let config = LoadConfig::load(file.path()).unwrap();
        assert!(config.full_load);
        assert_eq!(config.institution_domain, "example.edu");
        assert!(!config.drain_trailing_changes);
    }

    #[test]
    fn test_missing_required_key_is_fatal() {
        let file = write_config(r#"{"staffFileName": "/tmp/staff.txt"}"#);
        let err = LoadConfig::load(file.path()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("required keys"));
    }

    #[test]
    fn test_incremental_requires_previous_snapshots() {
        let file = write_config(&config_json(false, false));
        let err = LoadConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("previousStaffCondense"));

        let file = write_config(&config_json(false, true));
        assert!(LoadConfig::load(file.path()).is_ok());
    }

    #[test]
    fn test_update_config_field_round_trip() {
        let file = write_config(&config_json(true, false));
        update_config_field(file.path(), "previousStaffCondense", "/tmp/new-staff.csv").unwrap();

        let config = LoadConfig::load(file.path()).unwrap();
        assert_eq!(
            config.previous_staff_condense,
            Some(PathBuf::from("/tmp/new-staff.csv"))
        );
        // untouched keys survive the rewrite
        assert_eq!(config.institution_name, "Example University");
    }
}
