#![deny(unsafe_code)]

pub mod csv;
pub mod doctor;
pub mod error;
pub mod hash;
pub mod manifest;
pub mod normalize;
pub mod paths;
pub mod reference;
pub mod registry;
pub mod rules;

pub use crate::doctor::DoctorReport;
pub use crate::error::StandardsError;
pub use crate::reference::{AddressRegistry, DomainAllowList, NameFrequencyTable};
pub use crate::registry::{ReferenceRegistry, VerifySummary};
pub use crate::rules::{RuleConfig, RuleSetting};
