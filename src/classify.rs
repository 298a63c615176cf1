// 🎓 Classifier - Patron group + expiration/graduation anchor dates
// Students classify from the three positional academic slots; staff from
// an EmplClass lookup with a flat two-year expiration.

use crate::record::{StaffRecord, StudentRecord};
use chrono::{Datelike, NaiveDate};
use tracing::warn;

pub const GROUP_GRADUATE: &str = "Graduate";
pub const GROUP_UNDERGRADUATE: &str = "Undergraduate";
pub const GROUP_FACULTY: &str = "Faculty";
pub const GROUP_STAFF: &str = "Staff";

// ============================================================================
// SEMESTERS & TERM DATES
// ============================================================================

/// Semester of a term descriptor, ordered by selection preference.
///
/// The rank order (Sprng > Summr > Fall > Wintr) is a deliberate business
/// rule and does NOT follow the calendar; it only breaks ties between
/// candidate terms of the same year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Semester {
    Wintr = 1,
    Fall = 2,
    Summr = 3,
    Sprng = 4,
}

impl Semester {
    pub fn parse(name: &str) -> Option<Semester> {
        match name {
            "Wintr" => Some(Semester::Wintr),
            "Fall" => Some(Semester::Fall),
            "Summr" => Some(Semester::Summr),
            "Sprng" => Some(Semester::Sprng),
            _ => None,
        }
    }

    /// Human-readable season for the graduation anchor label
    pub fn label(self) -> &'static str {
        match self {
            Semester::Wintr => "Winter",
            Semester::Fall => "Fall",
            Semester::Summr => "Summer",
            Semester::Sprng => "Spring",
        }
    }
}

/// A parsed term descriptor: `<SemesterName><Year>`, the year being the
/// last four characters (any whitespace between name and year tolerated).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermDate {
    pub year: i32,
    pub semester: Semester,
}

impl TermDate {
    /// Parse a term descriptor, `None` when the shape is wrong (the caller
    /// logs and excludes the candidate).
    pub fn parse(raw: &str) -> Option<TermDate> {
        if raw.len() < 5 || !raw.is_char_boundary(raw.len() - 4) {
            return None;
        }
        let (name, year) = raw.split_at(raw.len() - 4);
        let year: i32 = year.parse().ok()?;
        let semester = Semester::parse(name.trim_end())?;
        Some(TermDate { year, semester })
    }

    /// Account expiration horizon for a graduation in this term
    pub fn expiration(&self) -> NaiveDate {
        match self.semester {
            Semester::Wintr => fixed_date(self.year + 1, 2, 15),
            Semester::Fall => fixed_date(self.year + 1, 1, 15),
            Semester::Summr => fixed_date(self.year, 9, 15),
            Semester::Sprng => fixed_date(self.year, 6, 5),
        }
    }

    /// Graduation anchor label, e.g. "Spring 2024"
    pub fn graduation_label(&self) -> String {
        format!("{} {}", self.semester.label(), self.year)
    }
}

/// Calendar date with a known-valid month/day pair
fn fixed_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixed calendar date")
}

/// Today advanced by exactly two calendar years. When that date does not
/// exist (Feb 29), advance by the elapsed-day span between the two Jan 1
/// anchors instead.
pub fn two_years_out(today: NaiveDate) -> NaiveDate {
    match NaiveDate::from_ymd_opt(today.year() + 2, today.month(), today.day()) {
        Some(date) => date,
        None => {
            let span = fixed_date(today.year() + 2, 1, 1) - fixed_date(today.year(), 1, 1);
            today + span
        }
    }
}

// ============================================================================
// STUDENT CLASSIFICATION
// ============================================================================

#[derive(Debug, Clone)]
pub struct StudentClassification {
    pub patron_group: &'static str,
    /// False only when no academic-program evidence exists at all
    pub active: bool,
    pub expiration_date: NaiveDate,
    /// "Season Year" of the selected term, or "UNKNOWN" without one
    pub graduation_date: String,
    /// No candidate slot matched; the group fell back to Undergraduate
    pub defaulted: bool,
    /// Candidate term strings excluded as malformed
    pub malformed_terms: usize,
}

/// Classify one student from their academic slots.
///
/// Each slot is judged on its own (career, program) pair and contributes
/// its term to the graduate or undergraduate candidate set. Graduate
/// evidence wins outright; only the winning set's terms take part in
/// disambiguation (max year, then max semester rank within that year).
pub fn classify_student(record: &StudentRecord, today: NaiveDate) -> StudentClassification {
    let mut graduate_terms: Vec<&str> = Vec::new();
    let mut undergraduate_terms: Vec<&str> = Vec::new();

    for (career, program, term) in record.academic_slots() {
        if is_graduate_slot(career, program) {
            graduate_terms.push(term);
        } else if is_undergraduate_slot(career, program) {
            undergraduate_terms.push(term);
        }
    }

    let (patron_group, candidate_terms, defaulted) = if !graduate_terms.is_empty() {
        (GROUP_GRADUATE, graduate_terms, false)
    } else if !undergraduate_terms.is_empty() {
        (GROUP_UNDERGRADUATE, undergraduate_terms, false)
    } else {
        (GROUP_UNDERGRADUATE, Vec::new(), true)
    };
    let active = !defaulted;

    let mut malformed_terms = 0;
    let mut best: Option<TermDate> = None;
    for raw in candidate_terms.iter().filter(|raw| !raw.is_empty()) {
        match TermDate::parse(raw) {
            Some(term) => {
                let better = match best {
                    None => true,
                    Some(current) => {
                        (term.year, term.semester) > (current.year, current.semester)
                    }
                };
                if better {
                    best = Some(term);
                }
            }
            None => {
                warn!(
                    "Malformed term descriptor \"{raw}\" for EMPLID {}",
                    record.emplid
                );
                malformed_terms += 1;
            }
        }
    }

    let (expiration_date, graduation_date) = match best {
        Some(term) => (term.expiration(), term.graduation_label()),
        None => (two_years_out(today), "UNKNOWN".to_string()),
    };

    StudentClassification {
        patron_group,
        active,
        expiration_date,
        graduation_date,
        defaulted,
        malformed_terms,
    }
}

fn is_graduate_slot(career: &str, program: &str) -> bool {
    career == "GRAD" || (career == "ND" && program == "ND-GR")
}

fn is_undergraduate_slot(career: &str, program: &str) -> bool {
    match career {
        "UGRD" => true,
        "ND" => matches!(program, "ND-ST" | "ND-UG" | "ND-CE"),
        "NC" => program == "NC-LL",
        _ => false,
    }
}

// ============================================================================
// STAFF CLASSIFICATION
// ============================================================================

#[derive(Debug, Clone)]
pub struct StaffClassification {
    pub patron_group: &'static str,
    /// False iff post-remap status is T or D
    pub active: bool,
    pub expiration_date: NaiveDate,
    /// EmplClass outside the Faculty/Staff lookup fell back to Staff
    pub defaulted: bool,
}

/// Classify one staff record from its employee class and status.
pub fn classify_staff(record: &StaffRecord, today: NaiveDate) -> StaffClassification {
    let (patron_group, defaulted) = match record.empl_class.as_str() {
        "0" | "1" => (GROUP_FACULTY, false),
        "S" | "2" | "3" | "4" | "5" | "7" => (GROUP_STAFF, false),
        _ => (GROUP_STAFF, true),
    };

    StaffClassification {
        patron_group,
        active: !matches!(record.empl_status.as_str(), "T" | "D"),
        expiration_date: two_years_out(today),
        defaulted,
    }
}

// ============================================================================
// TESTS
// ============================================================================
