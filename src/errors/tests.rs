//! Unit tests for the fatal error type.

use super::errors::{Error, ErrorImpl, ErrorTip};

#[test]
fn test_error_names() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: String::from("@"),
        },
        1,
    );
    assert_eq!(error.get_error_name(), "UnrecognisedToken");

    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: String::from("}"),
        },
        2,
    );
    assert_eq!(error.get_error_name(), "UnexpectedToken");

    let error = Error::new(
        ErrorImpl::NumberParseError {
            token: String::from("99999999999999999999"),
        },
        3,
    );
    assert_eq!(error.get_error_name(), "NumberParseError");
}

#[test]
fn test_error_display_includes_line() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: String::from(";"),
        },
        7,
    );
    assert_eq!(error.get_line(), 7);
    assert!(error.to_string().ends_with("on line 7"));
}

#[test]
fn test_error_tips() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: String::from("@"),
        },
        1,
    );
    assert!(matches!(error.get_tip(), ErrorTip::None));

    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: String::from("int"),
            message: String::from("expected a statement"),
        },
        1,
    );
    let ErrorTip::Suggestion(tip) = error.get_tip() else {
        panic!("expected a suggestion");
    };
    assert!(tip.contains("expected a statement"));
}
