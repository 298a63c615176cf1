// 📤 Record Projector - Fixed output schema for downstream ingestion
// Pure mapping from a resolved, classified record into an OutputPatron;
// all defaults are settled upstream.

use crate::classify::{StaffClassification, StudentClassification};
use crate::record::{AddressBlock, StaffRecord, StudentRecord};
use serde::Serialize;

// ============================================================================
// OUTPUT SCHEMA
// ============================================================================

/// The terminal, immutable output record. Serializes to the exact JSON
/// shape the downstream loader ingests, one object per line.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputPatron {
    pub username: String,
    pub external_system_id: String,
    pub barcode: String,
    pub active: bool,
    pub patron_group: String,
    pub departments: Vec<String>,
    pub personal: Personal,
    pub expiration_date: String,
    pub custom_fields: CustomFields,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Personal {
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub email: String,
    pub phone: String,
    pub addresses: Vec<Address>,
    pub preferred_contact_type_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub country_id: String,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub region: String,
    pub postal_code: String,
    pub address_type_id: String,
    pub primary_address: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFields {
    pub institution: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graduation_date: Option<String>,
}

/// Identity values shared by every projection of one run
#[derive(Debug, Clone)]
pub struct InstitutionContext {
    pub name: String,
    pub domain: String,
}

impl InstitutionContext {
    pub fn external_system_id(&self, emplid: &str) -> String {
        format!("{emplid}@{}", self.domain)
    }
}

// ============================================================================
// PROJECTION
// ============================================================================

/// Project a classified student into the output schema.
pub fn project_student(
    record: &StudentRecord,
    classification: &StudentClassification,
    institution: &InstitutionContext,
) -> OutputPatron {
    OutputPatron {
        username: record.email_address.clone(),
        external_system_id: institution.external_system_id(&record.emplid),
        barcode: record.barcode.clone(),
        active: classification.active,
        patron_group: classification.patron_group.to_string(),
        departments: Vec::new(),
        personal: Personal {
            last_name: record.last_name.clone(),
            first_name: record.first_name.clone(),
            middle_name: record.middle_name.clone(),
            email: record.email_address.clone(),
            phone: preferred_phone(record),
            addresses: vec![
                primary_address(record.mail_address()),
                secondary_address(record.perm_address()),
            ],
            preferred_contact_type_id: "Email".to_string(),
        },
        expiration_date: classification.expiration_date.format("%Y-%m-%d").to_string(),
        custom_fields: CustomFields {
            institution: institution.name.clone(),
            graduation_date: Some(classification.graduation_date.clone()),
        },
    }
}

/// Project a classified staff record into the output schema. The email
/// fallback (`<EMPLID>@<domain>`) fills both username and contact email.
pub fn project_staff(
    record: &StaffRecord,
    classification: &StaffClassification,
    institution: &InstitutionContext,
) -> OutputPatron {
    let email = if record.email_address.is_empty() {
        institution.external_system_id(&record.emplid)
    } else {
        record.email_address.clone()
    };

    OutputPatron {
        username: email.clone(),
        external_system_id: institution.external_system_id(&record.emplid),
        barcode: record.barcode.clone(),
        active: classification.active,
        patron_group: classification.patron_group.to_string(),
        departments: Vec::new(),
        personal: Personal {
            last_name: record.last_name.clone(),
            first_name: record.first_name.clone(),
            middle_name: record.middle_name.clone(),
            email,
            phone: record.work_phone.clone(),
            addresses: vec![
                primary_address(record.mail_address()),
                secondary_address(record.perm_address()),
            ],
            preferred_contact_type_id: "Email".to_string(),
        },
        expiration_date: classification.expiration_date.format("%Y-%m-%d").to_string(),
        custom_fields: CustomFields {
            institution: institution.name.clone(),
            graduation_date: None,
        },
    }
}

/// Student phone by declared preference: LOCL and PERM select their
/// number, an empty preference falls back to the local number, any other
/// value yields no phone.
fn preferred_phone(record: &StudentRecord) -> String {
    match record.phone_pref.as_str() {
        "LOCL" | "" => record.locl_phone.clone(),
        "PERM" => record.perm_phone.clone(),
        _ => String::new(),
    }
}

fn primary_address(block: AddressBlock<'_>) -> Address {
    build_address(block, "Primary", true)
}

fn secondary_address(block: AddressBlock<'_>) -> Address {
    build_address(block, "Secondary", false)
}

fn build_address(block: AddressBlock<'_>, type_id: &str, primary: bool) -> Address {
    Address {
        country_id: block.country.to_string(),
        address_line1: block.add1.to_string(),
        // single-space join, empty components preserved
        address_line2: format!("{} {} {}", block.add2, block.add3, block.add4),
        city: block.city.to_string(),
        region: block.state.to_string(),
        postal_code: block.zip.to_string(),
        address_type_id: type_id.to_string(),
        primary_address: primary,
    }
}

// ============================================================================
// TESTS
// ============================================================================
