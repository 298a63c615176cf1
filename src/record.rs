// 📇 Extract Records - Typed person records for both populations
// Field names mirror the pipe-delimited extract headers exactly

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ============================================================================
// EXTRACT RECORD TRAIT
// ============================================================================

/// Common surface over the two extract record types.
///
/// Every record is keyed by EMPLID (unique per physical person, NOT unique
/// per raw extract row). `first_mismatch` drives change detection: it walks
/// the population's fixed comparison field list and reports the first field
/// whose value differs.
pub trait ExtractRecord {
    /// Population label used in snapshot names and log lines
    const POPULATION: &'static str;

    /// Identity key
    fn emplid(&self) -> &str;

    /// Library barcode (empty = not issued)
    fn barcode(&self) -> &str;

    /// First compared field that differs between two records, by name
    fn first_mismatch(&self, other: &Self) -> Option<&'static str>;
}

/// Borrowed view of one extract address block (mailing or permanent)
#[derive(Debug, Clone, Copy)]
pub struct AddressBlock<'a> {
    pub country: &'a str,
    pub city: &'a str,
    pub state: &'a str,
    pub zip: &'a str,
    pub add1: &'a str,
    pub add2: &'a str,
    pub add3: &'a str,
    pub add4: &'a str,
}

// ============================================================================
// STAFF RECORD (population B)
// ============================================================================

/// One row of the staff extract.
///
/// Business fields (EMPLID, class, status, category code, barcode) must be
/// present as columns or the extract fails to parse; free-text fields
/// default to empty string when their column is absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffRecord {
    #[serde(rename = "EMPLID")]
    pub emplid: String,

    #[serde(rename = "EmplClass")]
    pub empl_class: String,

    #[serde(rename = "EmplStatus")]
    pub empl_status: String,

    #[serde(rename = "um_nens_cat_code")]
    pub nens_cat_code: String,

    #[serde(rename = "barcode")]
    pub barcode: String,

    #[serde(rename = "LastName", default)]
    pub last_name: String,

    #[serde(rename = "FirstName", default)]
    pub first_name: String,

    #[serde(rename = "MiddleName", default)]
    pub middle_name: String,

    #[serde(rename = "Email_Address", default)]
    pub email_address: String,

    #[serde(rename = "WorkPhone", default)]
    pub work_phone: String,

    #[serde(rename = "MailCountry", default)]
    pub mail_country: String,
    #[serde(rename = "MailCity", default)]
    pub mail_city: String,
    #[serde(rename = "MailState", default)]
    pub mail_state: String,
    #[serde(rename = "MailZip", default)]
    pub mail_zip: String,
    #[serde(rename = "MailAdd1", default)]
    pub mail_add1: String,
    #[serde(rename = "MailAdd2", default)]
    pub mail_add2: String,
    #[serde(rename = "MailAdd3", default)]
    pub mail_add3: String,
    #[serde(rename = "MailAdd4", default)]
    pub mail_add4: String,

    #[serde(rename = "PermCountry", default)]
    pub perm_country: String,
    #[serde(rename = "PermCity", default)]
    pub perm_city: String,
    #[serde(rename = "PermState", default)]
    pub perm_state: String,
    #[serde(rename = "PermZip", default)]
    pub perm_zip: String,
    #[serde(rename = "PermAdd1", default)]
    pub perm_add1: String,
    #[serde(rename = "PermAdd2", default)]
    pub perm_add2: String,
    #[serde(rename = "PermAdd3", default)]
    pub perm_add3: String,
    #[serde(rename = "PermAdd4", default)]
    pub perm_add4: String,
}

impl StaffRecord {
    pub fn mail_address(&self) -> AddressBlock<'_> {
        AddressBlock {
            country: &self.mail_country,
            city: &self.mail_city,
            state: &self.mail_state,
            zip: &self.mail_zip,
            add1: &self.mail_add1,
            add2: &self.mail_add2,
            add3: &self.mail_add3,
            add4: &self.mail_add4,
        }
    }

    pub fn perm_address(&self) -> AddressBlock<'_> {
        AddressBlock {
            country: &self.perm_country,
            city: &self.perm_city,
            state: &self.perm_state,
            zip: &self.perm_zip,
            add1: &self.perm_add1,
            add2: &self.perm_add2,
            add3: &self.perm_add3,
            add4: &self.perm_add4,
        }
    }
}

impl ExtractRecord for StaffRecord {
    const POPULATION: &'static str = "Staff";

    fn emplid(&self) -> &str {
        &self.emplid
    }

    fn barcode(&self) -> &str {
        &self.barcode
    }

    fn first_mismatch(&self, other: &Self) -> Option<&'static str> {
        let compared: [(&'static str, &str, &str); 24] = [
            ("EmplClass", &self.empl_class, &other.empl_class),
            ("EmplStatus", &self.empl_status, &other.empl_status),
            ("LastName", &self.last_name, &other.last_name),
            ("FirstName", &self.first_name, &other.first_name),
            ("MiddleName", &self.middle_name, &other.middle_name),
            ("Email_Address", &self.email_address, &other.email_address),
            ("MailCountry", &self.mail_country, &other.mail_country),
            ("MailCity", &self.mail_city, &other.mail_city),
            ("MailState", &self.mail_state, &other.mail_state),
            ("MailZip", &self.mail_zip, &other.mail_zip),
            ("MailAdd1", &self.mail_add1, &other.mail_add1),
            ("MailAdd2", &self.mail_add2, &other.mail_add2),
            ("MailAdd3", &self.mail_add3, &other.mail_add3),
            ("MailAdd4", &self.mail_add4, &other.mail_add4),
            ("PermCountry", &self.perm_country, &other.perm_country),
            ("PermCity", &self.perm_city, &other.perm_city),
            ("PermState", &self.perm_state, &other.perm_state),
            ("PermZip", &self.perm_zip, &other.perm_zip),
            ("PermAdd1", &self.perm_add1, &other.perm_add1),
            ("PermAdd2", &self.perm_add2, &other.perm_add2),
            ("PermAdd3", &self.perm_add3, &other.perm_add3),
            ("PermAdd4", &self.perm_add4, &other.perm_add4),
            ("WorkPhone", &self.work_phone, &other.work_phone),
            ("barcode", &self.barcode, &other.barcode),
        ];
        compared
            .iter()
            .find(|(_, ours, theirs)| ours != theirs)
            .map(|(name, _, _)| *name)
    }
}

// ============================================================================
// STUDENT RECORD (population A)
// ============================================================================

/// One row of the student extract.
///
/// The three academic slots are positional: `AcadCareer2`, `AcadProg2` and
/// `TermDescr2` all describe the same academic record. A student may have
/// 0-3 populated slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentRecord {
    #[serde(rename = "EMPLID")]
    pub emplid: String,

    #[serde(rename = "AcadCareer1")]
    pub acad_career1: String,
    #[serde(rename = "AcadCareer2")]
    pub acad_career2: String,
    #[serde(rename = "AcadCareer3")]
    pub acad_career3: String,

    #[serde(rename = "AcadProg1")]
    pub acad_prog1: String,
    #[serde(rename = "AcadProg2")]
    pub acad_prog2: String,
    #[serde(rename = "AcadProg3")]
    pub acad_prog3: String,

    #[serde(rename = "TermDescr1")]
    pub term_descr1: String,
    #[serde(rename = "TermDescr2")]
    pub term_descr2: String,
    #[serde(rename = "TermDescr3")]
    pub term_descr3: String,

    #[serde(rename = "barcode")]
    pub barcode: String,

    #[serde(rename = "LastName", default)]
    pub last_name: String,

    #[serde(rename = "FirstName", default)]
    pub first_name: String,

    #[serde(rename = "MiddleName", default)]
    pub middle_name: String,

    #[serde(rename = "Email_Address", default)]
    pub email_address: String,

    #[serde(rename = "LoclPhone", default)]
    pub locl_phone: String,

    #[serde(rename = "PermPhone", default)]
    pub perm_phone: String,

    #[serde(rename = "Phone_Pref", default)]
    pub phone_pref: String,

    #[serde(rename = "MailCountry", default)]
    pub mail_country: String,
    #[serde(rename = "MailCity", default)]
    pub mail_city: String,
    #[serde(rename = "MailState", default)]
    pub mail_state: String,
    #[serde(rename = "MailZip", default)]
    pub mail_zip: String,
    #[serde(rename = "MailAdd1", default)]
    pub mail_add1: String,
    #[serde(rename = "MailAdd2", default)]
    pub mail_add2: String,
    #[serde(rename = "MailAdd3", default)]
    pub mail_add3: String,
    #[serde(rename = "MailAdd4", default)]
    pub mail_add4: String,

    #[serde(rename = "PermCountry", default)]
    pub perm_country: String,
    #[serde(rename = "PermCity", default)]
    pub perm_city: String,
    #[serde(rename = "PermState", default)]
    pub perm_state: String,
    #[serde(rename = "PermZip", default)]
    pub perm_zip: String,
    #[serde(rename = "PermAdd1", default)]
    pub perm_add1: String,
    #[serde(rename = "PermAdd2", default)]
    pub perm_add2: String,
    #[serde(rename = "PermAdd3", default)]
    pub perm_add3: String,
    #[serde(rename = "PermAdd4", default)]
    pub perm_add4: String,
}

impl StudentRecord {
    /// The three positional academic slots as (career, program, term)
    pub fn academic_slots(&self) -> [(&str, &str, &str); 3] {
        [
            (&self.acad_career1, &self.acad_prog1, &self.term_descr1),
            (&self.acad_career2, &self.acad_prog2, &self.term_descr2),
            (&self.acad_career3, &self.acad_prog3, &self.term_descr3),
        ]
    }

    pub fn mail_address(&self) -> AddressBlock<'_> {
        AddressBlock {
            country: &self.mail_country,
            city: &self.mail_city,
            state: &self.mail_state,
            zip: &self.mail_zip,
            add1: &self.mail_add1,
            add2: &self.mail_add2,
            add3: &self.mail_add3,
            add4: &self.mail_add4,
        }
    }

    pub fn perm_address(&self) -> AddressBlock<'_> {
        AddressBlock {
            country: &self.perm_country,
            city: &self.perm_city,
            state: &self.perm_state,
            zip: &self.perm_zip,
            add1: &self.perm_add1,
            add2: &self.perm_add2,
            add3: &self.perm_add3,
            add4: &self.perm_add4,
        }
    }
}

impl ExtractRecord for StudentRecord {
    const POPULATION: &'static str = "Student";

    fn emplid(&self) -> &str {
        &self.emplid
    }

    fn barcode(&self) -> &str {
        &self.barcode
    }

    fn first_mismatch(&self, other: &Self) -> Option<&'static str> {
        let compared: [(&'static str, &str, &str); 31] = [
            ("AcadCareer1", &self.acad_career1, &other.acad_career1),
            ("AcadCareer2", &self.acad_career2, &other.acad_career2),
            ("AcadCareer3", &self.acad_career3, &other.acad_career3),
            ("AcadProg1", &self.acad_prog1, &other.acad_prog1),
            ("AcadProg2", &self.acad_prog2, &other.acad_prog2),
            ("AcadProg3", &self.acad_prog3, &other.acad_prog3),
            ("LastName", &self.last_name, &other.last_name),
            ("FirstName", &self.first_name, &other.first_name),
            ("MiddleName", &self.middle_name, &other.middle_name),
            ("Email_Address", &self.email_address, &other.email_address),
            ("MailCountry", &self.mail_country, &other.mail_country),
            ("MailCity", &self.mail_city, &other.mail_city),
            ("MailState", &self.mail_state, &other.mail_state),
            ("MailZip", &self.mail_zip, &other.mail_zip),
            ("MailAdd1", &self.mail_add1, &other.mail_add1),
            ("MailAdd2", &self.mail_add2, &other.mail_add2),
            ("MailAdd3", &self.mail_add3, &other.mail_add3),
            ("MailAdd4", &self.mail_add4, &other.mail_add4),
            ("PermCountry", &self.perm_country, &other.perm_country),
            ("PermCity", &self.perm_city, &other.perm_city),
            ("PermState", &self.perm_state, &other.perm_state),
            ("PermZip", &self.perm_zip, &other.perm_zip),
            ("PermAdd1", &self.perm_add1, &other.perm_add1),
            ("PermAdd2", &self.perm_add2, &other.perm_add2),
            ("PermAdd3", &self.perm_add3, &other.perm_add3),
            ("PermAdd4", &self.perm_add4, &other.perm_add4),
            ("TermDescr1", &self.term_descr1, &other.term_descr1),
            ("TermDescr2", &self.term_descr2, &other.term_descr2),
            ("TermDescr3", &self.term_descr3, &other.term_descr3),
            ("LoclPhone", &self.locl_phone, &other.locl_phone),
            ("barcode", &self.barcode, &other.barcode),
        ];
        compared
            .iter()
            .find(|(_, ours, theirs)| ours != theirs)
            .map(|(name, _, _)| *name)
    }
}

// ============================================================================
// RECORD SET
// ============================================================================

/// An ordered, EMPLID-keyed collection of records from one population.
///
/// Construction sorts ascending by key; every merge stage downstream relies
/// on that ordering.
#[derive(Debug, Clone)]
pub struct RecordSet<R> {
    records: Vec<R>,
}

impl<R: ExtractRecord> RecordSet<R> {
    /// Build a set from unordered records, sorting by identity key
    pub fn new(mut records: Vec<R>) -> Self {
        records.sort_by(|a, b| a.emplid().cmp(b.emplid()));
        RecordSet { records }
    }

    /// Build a set from records already sorted by identity key
    pub fn from_sorted(records: Vec<R>) -> Self {
        RecordSet { records }
    }

    pub fn empty() -> Self {
        RecordSet {
            records: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    pub fn into_vec(self) -> Vec<R> {
        self.records
    }

    /// All identity keys in the set
    pub fn key_set(&self) -> HashSet<&str> {
        self.records.iter().map(|r| r.emplid()).collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{staff_record, student_record};

    #[test]
    fn test_record_set_sorts_by_emplid() {
        let set = RecordSet::new(vec![
            staff_record("300", "A", "2"),
            staff_record("100", "A", "2"),
            staff_record("200", "A", "2"),
        ]);

        let keys: Vec<&str> = set.iter().map(|r| r.emplid()).collect();
        assert_eq!(keys, vec!["100", "200", "300"]);
    }

    #[test]
    fn test_key_set_contains_all_ids() {
        let set = RecordSet::new(vec![
            staff_record("100", "A", "2"),
            staff_record("200", "A", "2"),
        ]);

        let keys = set.key_set();
        assert!(keys.contains("100"));
        assert!(keys.contains("200"));
        assert!(!keys.contains("300"));
    }

    #[test]
    fn test_staff_first_mismatch_reports_field_name() {
        let a = staff_record("100", "A", "2");
        let mut b = a.clone();
        assert_eq!(a.first_mismatch(&b), None);

        b.mail_city = "Springfield".to_string();
        assert_eq!(a.first_mismatch(&b), Some("MailCity"));
    }

    #[test]
    fn test_staff_mismatch_order_follows_compare_list() {
        let a = staff_record("100", "A", "2");
        let mut b = a.clone();
        b.empl_status = "T".to_string();
        b.work_phone = "555-0000".to_string();

        // EmplStatus comes before WorkPhone in the comparison list
        assert_eq!(a.first_mismatch(&b), Some("EmplStatus"));
    }

    #[test]
    fn test_student_first_mismatch_covers_academic_slots() {
        let a = student_record("100", &[("UGRD", "BA", "Sprng2024")]);
        let mut b = a.clone();
        b.acad_career1 = "GRAD".to_string();
        assert_eq!(a.first_mismatch(&b), Some("AcadCareer1"));
    }

    #[test]
    fn test_academic_slots_are_positionally_aligned() {
        let s = student_record("100", &[("UGRD", "BA", "Fall2023"), ("GRAD", "MS", "Sprng2025")]);
        let slots = s.academic_slots();
        assert_eq!(slots[0], ("UGRD", "BA", "Fall2023"));
        assert_eq!(slots[1], ("GRAD", "MS", "Sprng2025"));
        assert_eq!(slots[2], ("", "", ""));
    }
}
