//! Schedule-slug parsing.
//!
//! A schedule slug encodes when an activity falls due relative to a
//! clinical milestone, e.g. `4d-2d-pre-op` ("between four and two days
//! before the operation") or `reg` ("at registration"). Slugs come in a
//! small number of historical shapes, so parsing is an ordered chain of
//! six patterns evaluated strictly first-match-wins. Order is
//! load-bearing: the two-span shapes must be tried before the single-span
//! shapes or a greedy single-span match would swallow them, and a bare
//! alphabetic token is a valid terminal case that must win over the
//! prefixed shapes.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::warn;

use crate::error::{Result, ScheduleError};

/// A slug's interpretation: signed day offsets around a milestone.
///
/// "pre" offsets are negative, "post" offsets positive, at-milestone
/// offsets zero. All three fields are `None` together when no pattern
/// matched the slug.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedWindow {
    pub start_offset_days: Option<i64>,
    pub end_offset_days: Option<i64>,
    pub milestone_token: Option<String>,
}

impl ParsedWindow {
    /// The defined "unparseable" outcome: all fields null.
    pub fn unparsed() -> Self {
        Self::default()
    }

    pub fn is_unparsed(&self) -> bool {
        self.start_offset_days.is_none()
            && self.end_offset_days.is_none()
            && self.milestone_token.is_none()
    }
}

/// Convert a `(value, unit)` pair to days.
///
/// Months are a 30-day calendar approximation and years ignore leap
/// days, matching how the slugs were authored. An unrecognized unit is a
/// fatal error, not a null result.
pub fn days(value: i64, unit: char) -> Result<i64> {
    match unit {
        'd' => Ok(value),
        'w' => Ok(value * 7),
        'm' => Ok(value * 30),
        'y' => Ok(value * 365),
        other => Err(ScheduleError::UnknownUnit(other)),
    }
}

type RuleHandler = fn(&Captures<'_>) -> Result<ParsedWindow>;

/// The ordered rule chain. A slice, never a map: evaluation order is part
/// of the contract.
static RULES: LazyLock<Vec<(Regex, RuleHandler)>> = LazyLock::new(|| {
    vec![
        // 1. Two spans with a unit-suffixed trailing token, e.g. `1d-pre-1dpo`.
        (
            rule(r"^(\d+)([dwmy])-([a-z-]+)-(\d+)([dwmy])([a-z-]+)"),
            suffixed_span_pair as RuleHandler,
        ),
        // 2. Two spans before a milestone token, e.g. `4d-2d-pre-op`.
        (rule(r"^(\d+)([dwmy])-(\d+)([dwmy])-([a-z-]+)"), span_pair),
        // 3. A bare alphabetic token, e.g. `reg`, `inv`. Whole-input match
        //    only: a digit anywhere (e.g. `reg-d0`) falls through.
        (rule(r"^([a-z-]+)$"), bare_token),
        // 4. A discarded prefix before one span, e.g. `op-10d-post-op`.
        (rule(r"^([a-z-]+)-(\d+)([dwmy])-([a-z-]+)"), prefixed_span),
        // 5. One span before two tokens, e.g. `3m-post-op` or `4d-op-pre-op`.
        (rule(r"^(\d+)([dwmy])-([a-z-]+)-([a-z-]+)"), single_span),
    ]
});

fn rule(pattern: &str) -> Regex {
    Regex::new(pattern).expect("invalid slug rule pattern")
}

/// Parse a schedule slug into its time window.
///
/// Tries each rule in order and returns the first handler's result. When
/// nothing matches (rule 6), the slug is logged at warning level and the
/// row carries a null window instead of being dropped.
pub fn parse(slug: &str) -> Result<ParsedWindow> {
    for (pattern, handler) in RULES.iter() {
        if let Some(captures) = pattern.captures(slug) {
            return handler(&captures);
        }
    }
    warn!(slug = %slug, "unable to parse schedule slug");
    Ok(ParsedWindow::unparsed())
}

fn capture_days(captures: &Captures<'_>, value_group: usize, unit_group: usize) -> Result<i64> {
    let value: i64 = captures[value_group].parse()?;
    let unit = captures[unit_group]
        .chars()
        .next()
        .expect("unit capture is one character");
    days(value, unit)
}

/// Rule 1: start runs forward, the suffixed end span runs backward. The
/// middle text is discarded.
fn suffixed_span_pair(captures: &Captures<'_>) -> Result<ParsedWindow> {
    let start = capture_days(captures, 1, 2)?;
    let end = capture_days(captures, 4, 5)?;
    Ok(ParsedWindow {
        start_offset_days: Some(start),
        end_offset_days: Some(-end),
        milestone_token: Some(captures[6].to_string()),
    })
}

/// Rule 2: both spans flip sign when the milestone token says "pre".
fn span_pair(captures: &Captures<'_>) -> Result<ParsedWindow> {
    let mut start = capture_days(captures, 1, 2)?;
    let mut end = capture_days(captures, 3, 4)?;
    let token = &captures[5];
    if token.contains("pre") {
        start = -start;
        end = -end;
    }
    Ok(ParsedWindow {
        start_offset_days: Some(start),
        end_offset_days: Some(end),
        milestone_token: Some(token.to_string()),
    })
}

/// Rule 3: a bare token has no window at all.
fn bare_token(captures: &Captures<'_>) -> Result<ParsedWindow> {
    Ok(ParsedWindow {
        start_offset_days: None,
        end_offset_days: None,
        milestone_token: Some(captures[1].to_string()),
    })
}

/// Rule 4: the window opens at the milestone itself.
fn prefixed_span(captures: &Captures<'_>) -> Result<ParsedWindow> {
    let mut end = capture_days(captures, 2, 3)?;
    let token = &captures[4];
    if token.contains("pre") {
        end = -end;
    }
    Ok(ParsedWindow {
        start_offset_days: Some(0),
        end_offset_days: Some(end),
        milestone_token: Some(token.to_string()),
    })
}

/// Rule 5: either a single time-point (`3m-post-op`, where the hyphen
/// split the true milestone name) or a span ending at the milestone
/// (`4d-op-pre-op`).
fn single_span(captures: &Captures<'_>) -> Result<ParsedWindow> {
    let mut start = capture_days(captures, 1, 2)?;
    let middle = &captures[3];
    let token = &captures[4];
    if middle.contains("pre") || token.contains("pre") {
        start = -start;
    }
    if middle.contains("pre") || middle.contains("post") {
        // The milestone name was split across the last hyphen; recombine
        // it. No end offset: this is a single time-point, not a window.
        return Ok(ParsedWindow {
            start_offset_days: Some(start),
            end_offset_days: None,
            milestone_token: Some(format!("{middle}-{token}")),
        });
    }
    Ok(ParsedWindow {
        start_offset_days: Some(start),
        end_offset_days: Some(0),
        milestone_token: Some(token.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(
        start: Option<i64>,
        end: Option<i64>,
        token: Option<&str>,
    ) -> ParsedWindow {
        ParsedWindow {
            start_offset_days: start,
            end_offset_days: end,
            milestone_token: token.map(String::from),
        }
    }

    #[test]
    fn parses_span_pair_with_pre_negation() {
        let parsed = parse("4d-2d-pre-op").unwrap();
        assert_eq!(parsed, window(Some(-4), Some(-2), Some("pre-op")));
    }

    #[test]
    fn parses_span_pair_without_negation() {
        let parsed = parse("3m-1d-post-op").unwrap();
        assert_eq!(parsed, window(Some(90), Some(1), Some("post-op")));
    }

    #[test]
    fn parses_suffixed_span_pair_edge_case() {
        let parsed = parse("1d-pre-1dpo").unwrap();
        assert_eq!(parsed, window(Some(1), Some(-1), Some("po")));
    }

    #[test]
    fn parses_bare_token() {
        let parsed = parse("slug").unwrap();
        assert_eq!(parsed, window(None, None, Some("slug")));
    }

    #[test]
    fn parses_prefixed_span() {
        let parsed = parse("op-10d-post-op").unwrap();
        assert_eq!(parsed, window(Some(0), Some(10), Some("post-op")));
    }

    #[test]
    fn parses_prefixed_span_with_pre_negation() {
        let parsed = parse("op-10d-pre-op").unwrap();
        assert_eq!(parsed, window(Some(0), Some(-10), Some("pre-op")));
    }

    #[test]
    fn recombines_split_milestone_name() {
        let parsed = parse("3m-post-op").unwrap();
        assert_eq!(parsed, window(Some(90), None, Some("post-op")));
    }

    #[test]
    fn recombines_split_pre_milestone_name() {
        let parsed = parse("2w-pre-op").unwrap();
        assert_eq!(parsed, window(Some(-14), None, Some("pre-op")));
    }

    #[test]
    fn single_span_without_split_ends_at_milestone() {
        let parsed = parse("4d-op-pre-op").unwrap();
        assert_eq!(parsed, window(Some(-4), Some(0), Some("pre-op")));
    }

    #[test]
    fn empty_slug_is_unparseable() {
        let parsed = parse("").unwrap();
        assert!(parsed.is_unparsed());
    }

    #[test]
    fn digit_in_bare_token_is_unparseable() {
        let parsed = parse("reg-d0").unwrap();
        assert!(parsed.is_unparsed());
    }

    #[test]
    fn converts_units_to_days() {
        assert_eq!(days(1, 'd').unwrap(), 1);
        assert_eq!(days(1, 'w').unwrap(), 7);
        assert_eq!(days(1, 'm').unwrap(), 30);
        assert_eq!(days(1, 'y').unwrap(), 365);
    }

    #[test]
    fn unknown_unit_is_fatal() {
        assert_eq!(days(1, 'x'), Err(ScheduleError::UnknownUnit('x')));
    }
}
