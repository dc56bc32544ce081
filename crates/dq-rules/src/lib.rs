//! Field detectors and correctors.
//!
//! Every field kind has a `detect` and a `correct` function. [`detect`] and
//! [`correct`] dispatch on [`Field`].

#![deny(unsafe_code)]

pub mod city;
pub mod context;
pub mod email;
pub mod eval;
pub mod house_number;
pub mod name;
pub mod phone;
pub mod postal_code;
pub mod street;
pub mod text;

use dq_model::{CodeSet, CorrectionResult, Field};

pub use crate::context::RuleContext;
pub use crate::name::NameCodes;

/// Detected codes for one field value.
pub fn detect(field: Field, value: Option<&str>, ctx: &RuleContext<'_>) -> CodeSet {
    match field {
        Field::FirstName => name::detect(value, NameCodes::FIRST_NAME, ctx),
        Field::LastName => name::detect(value, NameCodes::LAST_NAME, ctx),
        Field::Street => street::detect(value, ctx),
        Field::HouseNumber => house_number::detect(value, ctx),
        Field::PostalCode => postal_code::detect(value, ctx),
        Field::City => city::detect(value, ctx),
        Field::Email => email::detect(value, ctx),
        Field::Phone => phone::detect(value, ctx),
    }
}

/// Correct one field value given its detected codes.
pub fn correct(
    field: Field,
    value: Option<&str>,
    detected: &CodeSet,
    ctx: &RuleContext<'_>,
) -> CorrectionResult {
    match field {
        Field::FirstName => name::correct(value, detected, NameCodes::FIRST_NAME, ctx),
        Field::LastName => name::correct(value, detected, NameCodes::LAST_NAME, ctx),
        Field::Street => street::correct(value, detected, ctx),
        Field::HouseNumber => house_number::correct(value, detected, ctx),
        Field::PostalCode => postal_code::correct(value, detected, ctx),
        Field::City => city::correct(value, detected, ctx),
        Field::Email => email::correct(value, detected, ctx),
        Field::Phone => phone::correct(value, detected, ctx),
    }
}
