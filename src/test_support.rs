// Shared record constructors for unit tests

use crate::record::{StaffRecord, StudentRecord};

/// Staff record with sensible contact defaults and a barcode derived from
/// the EMPLID
pub fn staff_record(emplid: &str, status: &str, class: &str) -> StaffRecord {
    StaffRecord {
        emplid: emplid.to_string(),
        empl_class: class.to_string(),
        empl_status: status.to_string(),
        nens_cat_code: String::new(),
        barcode: format!("B{emplid}"),
        last_name: "Doe".to_string(),
        first_name: "Sam".to_string(),
        middle_name: String::new(),
        email_address: format!("{emplid}@example.edu"),
        work_phone: "413-555-0100".to_string(),
        mail_country: "USA".to_string(),
        mail_city: "Amherst".to_string(),
        mail_state: "MA".to_string(),
        mail_zip: "01003".to_string(),
        mail_add1: "1 Campus Way".to_string(),
        mail_add2: String::new(),
        mail_add3: String::new(),
        mail_add4: String::new(),
        perm_country: "USA".to_string(),
        perm_city: "Boston".to_string(),
        perm_state: "MA".to_string(),
        perm_zip: "02101".to_string(),
        perm_add1: "9 Home St".to_string(),
        perm_add2: String::new(),
        perm_add3: String::new(),
        perm_add4: String::new(),
    }
}

/// Student record with up to three academic slots as (career, program, term)
pub fn student_record(emplid: &str, slots: &[(&str, &str, &str)]) -> StudentRecord {
    let slot = |i: usize| -> (&str, &str, &str) { slots.get(i).copied().unwrap_or(("", "", "")) };
    let (c1, p1, t1) = slot(0);
    let (c2, p2, t2) = slot(1);
    let (c3, p3, t3) = slot(2);

    StudentRecord {
        emplid: emplid.to_string(),
        acad_career1: c1.to_string(),
        acad_career2: c2.to_string(),
        acad_career3: c3.to_string(),
        acad_prog1: p1.to_string(),
        acad_prog2: p2.to_string(),
        acad_prog3: p3.to_string(),
        term_descr1: t1.to_string(),
        term_descr2: t2.to_string(),
        term_descr3: t3.to_string(),
        barcode: format!("B{emplid}"),
        last_name: "Doe".to_string(),
        first_name: "Pat".to_string(),
        middle_name: String::new(),
        email_address: format!("{emplid}@example.edu"),
        locl_phone: "413-555-0200".to_string(),
        perm_phone: "617-555-0300".to_string(),
        phone_pref: String::new(),
        mail_country: "USA".to_string(),
        mail_city: "Amherst".to_string(),
        mail_state: "MA".to_string(),
        mail_zip: "01003".to_string(),
        mail_add1: "2 Dorm Rd".to_string(),
        mail_add2: String::new(),
        mail_add3: String::new(),
        mail_add4: String::new(),
        perm_country: "USA".to_string(),
        perm_city: "Boston".to_string(),
        perm_state: "MA".to_string(),
        perm_zip: "02101".to_string(),
        perm_add1: "9 Home St".to_string(),
        perm_add2: String::new(),
        perm_add3: String::new(),
        perm_add4: String::new(),
    }
}
