#![deny(unsafe_code)]

use crate::manifest::{ManifestFile, Pins};
use crate::registry::VerifySummary;

pub const DOCTOR_SCHEMA: &str = "dq.reference-doctor";

#[derive(Debug, Clone, serde::Serialize)]
pub struct DoctorReport {
    pub schema: String,
    pub schema_version: u32,
    pub pins: Pins,
    pub files: Vec<ManifestFile>,
    pub counts: DoctorCounts,
    /// Codes in the rule file that the catalog does not know.
    pub unknown_rule_codes: Vec<String>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct DoctorCounts {
    pub files: usize,
    pub rules: usize,
    pub addresses: usize,
    pub first_names: usize,
    pub surnames: usize,
    pub email_domains: usize,
}

impl DoctorReport {
    pub fn from_verify_summary(
        summary: &VerifySummary,
        files: Vec<ManifestFile>,
        unknown_rule_codes: Vec<String>,
    ) -> Self {
        Self {
            schema: DOCTOR_SCHEMA.to_string(),
            schema_version: 1,
            pins: summary.manifest_pins.clone(),
            files,
            counts: DoctorCounts {
                files: summary.file_count,
                rules: summary.rule_count,
                addresses: summary.address_count,
                first_names: summary.first_name_count,
                surnames: summary.surname_count,
                email_domains: summary.email_domain_count,
            },
            unknown_rule_codes,
        }
    }
}
