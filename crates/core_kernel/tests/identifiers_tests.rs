//! Integration tests for fund codes
//!
//! Codes arrive from query strings, URL paths, CLI flags and database rows.

use core_kernel::FundCode;
use proptest::prelude::*;

#[test]
fn test_codes_from_query_strings_are_trimmed() {
    assert_eq!(FundCode::parse(" 000962\n").unwrap().as_str(), "000962");
}

#[test]
fn test_from_str() {
    let code: FundCode = "110022".parse().unwrap();
    assert_eq!(code.to_string(), "110022");
    assert!("".parse::<FundCode>().is_err());
}

#[test]
fn test_serde_rejects_invalid_codes() {
    let code: FundCode = serde_json::from_str("\"000962\"").unwrap();
    assert_eq!(serde_json::to_string(&code).unwrap(), "\"000962\"");
    assert!(serde_json::from_str::<FundCode>("\"00 962\"").is_err());
}

proptest! {
    #[test]
    fn prop_alphanumeric_codes_parse(raw in "[A-Za-z0-9]{1,16}") {
        let code = FundCode::parse(&raw).unwrap();
        prop_assert_eq!(code.as_str(), raw.as_str());
    }

    #[test]
    fn prop_codes_with_symbols_are_rejected(raw in "[0-9]{1,6}[-_/;' ][0-9]{1,6}") {
        prop_assert!(FundCode::parse(&raw).is_err());
    }
}
