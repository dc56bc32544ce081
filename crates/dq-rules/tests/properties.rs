// Property tests for detection and correction.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use dq_model::{CodeSet, ErrorCode, Field};
use dq_rules::{RuleContext, correct, detect};
use dq_standards::{DomainAllowList, RuleConfig};
use proptest::prelude::*;

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

fn with_context<T>(rules: &RuleConfig, f: impl FnOnce(&RuleContext<'_>) -> T) -> T {
    let domains = DomainAllowList::from_domains(["gmail.com", "siol.net"]);
    f(&RuleContext::new(rules, &domains))
}

fn arb_field() -> impl Strategy<Value = Field> {
    prop::sample::select(Field::ALL.to_vec())
}

/// Mostly name-like text with the usual data-entry noise.
fn arb_name() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => r"[A-Za-zčšžČŠŽ]{1,8}( [A-Za-zčšžČŠŽ]{1,8}){0,2}",
        2 => r"[ A-Za-zčšžČŠŽ.'\-,&0-9]{1,24}",
        1 => r"[A-Za-z]\. ?[A-Za-z]\.",
    ]
}

fn arb_phone() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => r"(\+386|00386|386|0)?[ ]?[0-9]{2}[ /\-]?[0-9]{3}[ \-]?[0-9]{3}",
        2 => r"[0-9 +/()\-]{1,20}",
        1 => r"0[0-9]{8} (ali|in) 0[0-9]{8}",
    ]
}

fn arb_street() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => r"[A-Za-zčšžČŠŽ]{2,10} (ulica|cesta|c\.|ul\.|Ul\.)( [0-9]{1,3}[a-c]?)?",
        2 => r"[ A-Za-zčšžČŠŽ0-9.,#/\-]{1,24}",
        1 => r"(Ulica|Cesta) [0-9]{1,2}\.[a-z]{3,8}( b\.š\.| BŠ)?",
    ]
}

fn arb_house_number() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => r" ?0{0,2}[1-9][0-9]{0,2}[ \-]?[a-cA-C]?\.? ?",
        2 => r"[0-9 ./\-abcxyzABCXYZšŠ]{1,10}",
        1 => r"(BŠ|bš|b\.š\.)( [0-9]{1,3})?",
        1 => r"[0-9]{1,3} ?(I|II|IV|X)",
    ]
}

fn arb_postal_code() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => r"(SI|si)?[ \-]{0,2}[0-9]{3,5}",
        2 => r"[0-9 ABCSIsi\-.]{1,8}",
    ]
}

fn arb_city() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => r"[A-Za-zčšžČŠŽ]{2,10}( [A-Za-zčšžČŠŽ]{2,10}){0,2}",
        2 => r"[ A-Za-zčšžČŠŽ0-9.'\-!#]{1,20}",
        1 => r"(lj|LJ|mb|Mb|nm|sv|Zg)\.( ?[A-Za-z]{2,8})?",
    ]
}

fn arb_email() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => r"[a-zA-Zčšž.]{1,10}@{1,2}[a-z]{2,8}\.{1,2}[a-z]{2,4}\.?",
        2 => r"[ a-zA-Z0-9čšž.@,;/#\-_]{1,24}",
        1 => r"[a-z]{1,6}@(gmial|gmai|siol)\.(com|si|net)( ?[,;/]? ?[a-z]{1,6}@gmail\.com)?",
    ]
}

/// Any string a spreadsheet cell might hold.
fn arb_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        2 => arb_name(),
        2 => arb_phone(),
        1 => r"[ -~čšžČŠŽ@]{0,30}",
        1 => r"[a-z.]{1,8}@{1,2}[a-z.\-]{1,10}",
    ]
}

fn arb_placeholder() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        r"[ \t]{0,4}".prop_map(Some),
        r"[ ]{0,2}(/|x|X|-|nan|NULL|None)[ ]{0,2}".prop_map(Some),
    ]
}

/// Codes the first correction fixed must not reappear on the corrected value.
fn assert_stable(field: Field, value: &str, ctx: &RuleContext<'_>) -> Result<(), TestCaseError> {
    let detected = detect(field, Some(value), ctx);
    let result = correct(field, Some(value), &detected, ctx);
    let Some(fixed) = result.corrected_value else {
        return Ok(());
    };
    let again = detect(field, Some(&fixed), ctx);
    let reappeared: CodeSet = result
        .corrected
        .iter()
        .filter(|code| again.contains(*code))
        .collect();
    prop_assert!(
        reappeared.is_empty(),
        "{value:?} -> {fixed:?} re-detected {reappeared}"
    );
    Ok(())
}

proptest! {
    #![proptest_config(config())]

    #[test]
    fn corrected_and_uncorrected_partition_detected(field in arb_field(), value in arb_cell()) {
        let rules = RuleConfig::all_enabled();
        with_context(&rules, |ctx| {
            let detected = detect(field, Some(&value), ctx);
            let result = correct(field, Some(&value), &detected, ctx);
            prop_assert!(result.is_partition_of(&detected));
            Ok(())
        })?;
    }

    #[test]
    fn disabled_corrections_stay_uncorrected(field in arb_field(), value in arb_cell()) {
        let rules = RuleConfig::detect_only();
        with_context(&rules, |ctx| {
            let detected = detect(field, Some(&value), ctx);
            let result = correct(field, Some(&value), &detected, ctx);
            prop_assert!(result.corrected.is_empty());
            prop_assert_eq!(result.uncorrected, detected);
            prop_assert_eq!(result.corrected_value, None);
            Ok(())
        })?;
    }

    #[test]
    fn absent_values_yield_only_the_missing_code(field in arb_field(), value in arb_placeholder()) {
        let rules = RuleConfig::all_enabled();
        with_context(&rules, |ctx| {
            let detected = detect(field, value.as_deref(), ctx);
            let expected: CodeSet = [ErrorCode::missing(field)].into_iter().collect();
            prop_assert_eq!(detected, expected);
            Ok(())
        })?;
    }

    #[test]
    fn name_corrections_are_stable(value in arb_name()) {
        let rules = RuleConfig::all_enabled();
        with_context(&rules, |ctx| {
            assert_stable(Field::FirstName, &value, ctx)?;
            assert_stable(Field::LastName, &value, ctx)
        })?;
    }

    #[test]
    fn phone_corrections_are_stable(value in arb_phone()) {
        let rules = RuleConfig::all_enabled();
        with_context(&rules, |ctx| assert_stable(Field::Phone, &value, ctx))?;
    }

    #[test]
    fn street_corrections_are_stable(value in arb_street()) {
        let rules = RuleConfig::all_enabled();
        with_context(&rules, |ctx| assert_stable(Field::Street, &value, ctx))?;
    }

    #[test]
    fn house_number_corrections_are_stable(value in arb_house_number()) {
        let rules = RuleConfig::all_enabled();
        with_context(&rules, |ctx| assert_stable(Field::HouseNumber, &value, ctx))?;
    }

    #[test]
    fn postal_code_corrections_are_stable(value in arb_postal_code()) {
        let rules = RuleConfig::all_enabled();
        with_context(&rules, |ctx| assert_stable(Field::PostalCode, &value, ctx))?;
    }

    #[test]
    fn city_corrections_are_stable(value in arb_city()) {
        let rules = RuleConfig::all_enabled();
        with_context(&rules, |ctx| assert_stable(Field::City, &value, ctx))?;
    }

    #[test]
    fn email_corrections_are_stable(value in arb_email()) {
        let rules = RuleConfig::all_enabled();
        with_context(&rules, |ctx| assert_stable(Field::Email, &value, ctx))?;
    }
}
