//! The fixed catalog of data-quality error codes.
//!
//! Every code is a four-digit token. The first two digits name the field
//! (see [`Field::code_prefix`]), the last two the rule. `xx01` is always
//! the missing-data rule of its field.
//!
//! The variants are declared in ascending code order, so the derived
//! `Ord` sorts codes the same way their string tokens sort.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;
use crate::field::Field;

/// Broad class of a data-quality rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    Missing,
    Whitespace,
    InvalidCharacters,
    Formatting,
    Abbreviation,
    Duplication,
    Structure,
}

impl RuleCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Missing => "Missing",
            Self::Whitespace => "Whitespace",
            Self::InvalidCharacters => "Invalid characters",
            Self::Formatting => "Formatting",
            Self::Abbreviation => "Abbreviation",
            Self::Duplication => "Duplication",
            Self::Structure => "Structure",
        }
    }
}

macro_rules! error_codes {
    ($( $variant:ident = $code:literal, $field:ident, $category:ident, $fixable:literal, $message:literal; )+) => {
        /// A single rule of the catalog.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum ErrorCode {
            $( $variant, )+
        }

        impl ErrorCode {
            /// Every code, in ascending order.
            pub const ALL: &'static [ErrorCode] = &[ $( ErrorCode::$variant, )+ ];

            /// The four-digit token.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( ErrorCode::$variant => $code, )+
                }
            }

            pub const fn field(self) -> Field {
                match self {
                    $( ErrorCode::$variant => Field::$field, )+
                }
            }

            pub const fn category(self) -> RuleCategory {
                match self {
                    $( ErrorCode::$variant => RuleCategory::$category, )+
                }
            }

            /// Whether the catalog defines a deterministic correction.
            pub const fn is_fixable(self) -> bool {
                match self {
                    $( ErrorCode::$variant => $fixable, )+
                }
            }

            /// Default human-readable message.
            pub const fn message(self) -> &'static str {
                match self {
                    $( ErrorCode::$variant => $message, )+
                }
            }
        }
    };
}

error_codes! {
    FirstNameMissing = "1101", FirstName, Missing, true, "First name is missing";
    FirstNameWhitespace = "1102", FirstName, Whitespace, true, "First name has leading, trailing or repeated whitespace";
    FirstNameInvalidCharacters = "1103", FirstName, InvalidCharacters, true, "First name contains invalid characters";
    FirstNameInitialsOnly = "1104", FirstName, Structure, false, "First name consists of initials only";
    FirstNameTwoNames = "1105", FirstName, Structure, false, "First name field contains two names";
    FirstNameDuplicateWords = "1106", FirstName, Duplication, true, "First name repeats a word";
    FirstNameFormatting = "1107", FirstName, Formatting, true, "First name is not in title case";

    LastNameMissing = "1201", LastName, Missing, true, "Last name is missing";
    LastNameWhitespace = "1202", LastName, Whitespace, true, "Last name has leading, trailing or repeated whitespace";
    LastNameInvalidCharacters = "1203", LastName, InvalidCharacters, true, "Last name contains invalid characters";
    LastNameInitialsOnly = "1204", LastName, Structure, false, "Last name consists of initials only";
    LastNameTwoNames = "1205", LastName, Structure, false, "Last name field contains two names";
    LastNameDuplicateWords = "1206", LastName, Duplication, true, "Last name repeats a word";
    LastNameFormatting = "1207", LastName, Formatting, true, "Last name is not in title case";

    EmailMissing = "2101", Email, Missing, true, "Email is missing";
    EmailWhitespace = "2102", Email, Whitespace, true, "Email contains whitespace";
    EmailPossiblyTwoEmails = "2103", Email, Structure, false, "Email field possibly contains two addresses";
    EmailInvalidCharacters = "2104", Email, InvalidCharacters, true, "Email contains invalid characters";
    EmailMissingAt = "2105", Email, Structure, false, "Email has no @";
    EmailMultipleAt = "2106", Email, Structure, false, "Email has more than one @";
    EmailMalformedLocalPart = "2107", Email, Formatting, true, "Email local part is malformed";
    EmailMalformedDomainPart = "2108", Email, Formatting, true, "Email domain part is malformed";
    EmailInvalidDomainShape = "2109", Email, Structure, false, "Email domain has an invalid shape";
    EmailUncommonDomain = "2110", Email, Structure, true, "Email domain is not a common domain";

    PhoneMissing = "3101", Phone, Missing, true, "Phone number is missing";
    PhoneWhitespace = "3102", Phone, Whitespace, true, "Phone number contains whitespace";
    PhoneMultipleNumbers = "3103", Phone, Structure, false, "Phone field contains more than one number";
    PhoneNonDigitCharacters = "3104", Phone, InvalidCharacters, true, "Phone number contains non-digit characters";
    PhoneTooFewDigits = "3105", Phone, Structure, false, "Phone number has too few digits for its prefix";
    PhoneTooManyDigits = "3106", Phone, Structure, false, "Phone number has too many digits for its prefix";
    PhoneMalformedPrefix = "3107", Phone, Formatting, true, "Phone number has a malformed national prefix";
    PhoneNonCanonicalPrefix = "3108", Phone, Formatting, true, "Phone number is not in 00386 format";

    StreetMissing = "4101", Street, Missing, true, "Street is missing";
    StreetWhitespace = "4102", Street, Whitespace, true, "Street has leading, trailing or repeated whitespace";
    StreetHouseNumberPlaceholder = "4103", Street, Structure, true, "Street contains a BŠ placeholder";
    StreetInvalidCharacters = "4104", Street, InvalidCharacters, true, "Street contains invalid characters";
    StreetInvalidAbbreviation = "4105", Street, Abbreviation, true, "Street uses an abbreviation";
    StreetNoSpaceAfterPeriod = "4106", Street, Formatting, true, "Street has no space after a period";
    StreetStartsWithDigit = "4107", Street, Structure, false, "Street starts with a digit";
    StreetOnlyDigits = "4108", Street, Structure, false, "Street consists of digits only";
    StreetTrailingDigit = "4109", Street, Structure, true, "Street ends with digits glued to a word";
    StreetContainsHouseNumber = "4110", Street, Structure, true, "Street contains a house number";
    StreetDuplicateWords = "4111", Street, Duplication, true, "Street repeats a word";
    StreetFormatting = "4112", Street, Formatting, true, "Street is not in sentence case";

    HouseNumberMissing = "4201", HouseNumber, Missing, true, "House number is missing";
    HouseNumberWhitespace = "4202", HouseNumber, Whitespace, true, "House number has leading, trailing or repeated whitespace";
    HouseNumberPlaceholderOnly = "4203", HouseNumber, Structure, true, "House number is only a BŠ placeholder";
    HouseNumberPlaceholderWithDigits = "4204", HouseNumber, Structure, true, "House number combines a BŠ placeholder with digits";
    HouseNumberLeadingZero = "4205", HouseNumber, Formatting, true, "House number has a leading zero";
    HouseNumberTrailingPeriod = "4206", HouseNumber, Formatting, true, "House number ends with a period";
    HouseNumberRomanNumeral = "4207", HouseNumber, Structure, false, "House number contains a roman numeral";
    HouseNumberMultipleGroups = "4208", HouseNumber, Structure, false, "House number has more than one numeric group";
    HouseNumberExcessDigits = "4209", HouseNumber, Structure, false, "House number has too many digits";
    HouseNumberInvalidSpacing = "4210", HouseNumber, Formatting, true, "House number separates digits and letters";
    HouseNumberStructure = "4211", HouseNumber, Structure, false, "House number does not match digits with an optional letter suffix";

    PostalCodeMissing = "4301", PostalCode, Missing, true, "Postal code is missing";
    PostalCodeWhitespace = "4302", PostalCode, Whitespace, true, "Postal code contains whitespace";
    PostalCodeNonDigit = "4303", PostalCode, InvalidCharacters, true, "Postal code contains non-digit characters";
    PostalCodeTooShort = "4304", PostalCode, Structure, false, "Postal code has fewer than 4 digits";
    PostalCodeTooLong = "4305", PostalCode, Structure, false, "Postal code has more than 4 digits";
    PostalCodeOutOfRange = "4306", PostalCode, Structure, false, "Postal code is outside the national range";

    CityMissing = "4401", City, Missing, true, "City is missing";
    CityWhitespace = "4402", City, Whitespace, true, "City has leading, trailing or repeated whitespace";
    CityContainsDigits = "4403", City, InvalidCharacters, true, "City contains digits";
    CityInvalidCharacters = "4404", City, InvalidCharacters, true, "City contains invalid characters";
    CityInvalidAbbreviation = "4405", City, Abbreviation, true, "City uses an abbreviation";
    CityDuplicateWords = "4406", City, Duplication, true, "City repeats a word";
    CityFormatting = "4407", City, Formatting, true, "City is not in sentence case";
}

impl ErrorCode {
    /// The missing-data code of a field.
    pub const fn missing(field: Field) -> ErrorCode {
        match field {
            Field::FirstName => ErrorCode::FirstNameMissing,
            Field::LastName => ErrorCode::LastNameMissing,
            Field::Street => ErrorCode::StreetMissing,
            Field::HouseNumber => ErrorCode::HouseNumberMissing,
            Field::PostalCode => ErrorCode::PostalCodeMissing,
            Field::City => ErrorCode::CityMissing,
            Field::Email => ErrorCode::EmailMissing,
            Field::Phone => ErrorCode::PhoneMissing,
        }
    }

    /// All codes belonging to one field.
    pub fn for_field(field: Field) -> impl Iterator<Item = ErrorCode> {
        Self::ALL
            .iter()
            .copied()
            .filter(move |code| code.field() == field)
    }

    pub fn is_missing(self) -> bool {
        self.category() == RuleCategory::Missing
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorCode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|code| code.as_str() == trimmed)
            .ok_or_else(|| ModelError::UnknownCode(trimmed.to_string()))
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ErrorCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
