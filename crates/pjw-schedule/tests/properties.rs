//! Property tests for the slug parser.

use proptest::prelude::*;

use pjw_schedule::{days, parse};

proptest! {
    /// The conversion law holds for every recognized unit.
    #[test]
    fn conversion_law(value in 0i64..10_000) {
        prop_assert_eq!(days(value, 'd').unwrap(), value);
        prop_assert_eq!(days(value, 'w').unwrap(), value * 7);
        prop_assert_eq!(days(value, 'm').unwrap(), value * 30);
        prop_assert_eq!(days(value, 'y').unwrap(), value * 365);
    }

    /// Units outside d/w/m/y always fail.
    #[test]
    fn unrecognized_units_are_rejected(unit in any::<char>()) {
        prop_assume!(!matches!(unit, 'd' | 'w' | 'm' | 'y'));
        prop_assert!(days(1, unit).is_err());
    }

    /// A bare alphabetic token never gains a window: no earlier rule can
    /// match a string without digits, so it lands on the terminal rule.
    #[test]
    fn bare_tokens_have_no_window(token in "[a-z-]{1,20}") {
        let parsed = parse(&token).unwrap();
        prop_assert_eq!(parsed.start_offset_days, None);
        prop_assert_eq!(parsed.end_offset_days, None);
        prop_assert_eq!(parsed.milestone_token, Some(token));
    }

    /// The parser is total over the slug alphabet: every slug either
    /// matches a rule or comes back as the defined unparseable outcome.
    /// The rule patterns only ever capture d/w/m/y as units, so the
    /// fatal unknown-unit error is unreachable from here.
    #[test]
    fn parser_is_total(slug in "[a-z0-9-]{0,12}") {
        let parsed = parse(&slug).unwrap();
        if parsed.milestone_token.is_none() {
            prop_assert!(parsed.is_unparsed());
        }
    }
}
