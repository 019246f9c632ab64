//! Milestone-token resolution.
//!
//! Maps the token a slug mentions (e.g. `pre-op`, `reg`) to a canonical
//! milestone name and the representative date drawn from the patient
//! journey. Definitions are an ordered slice because the first matched
//! definition supplies the date.

use chrono::NaiveDateTime;
use tracing::warn;

use pjw_model::MilestoneDates;

/// A token's resolved interpretation.
///
/// `name` echoes the raw token back when no definition matched, and is
/// `None` only when there was no token to resolve at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedMilestone {
    pub name: Option<String>,
    pub date: Option<NaiveDateTime>,
}

/// Which journey date field a milestone definition reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateSource {
    Consent,
    Operation,
    Invitation,
    Registration,
    Discharge,
}

struct MilestoneDefinition {
    key: &'static str,
    name: &'static str,
    source: DateSource,
}

/// Ordered milestone definitions; first match wins the date.
///
/// `appt` reads the consent date: no dedicated appointment-date field
/// exists upstream, so consent is the documented stand-in.
const MILESTONE_DEFINITIONS: &[MilestoneDefinition] = &[
    MilestoneDefinition {
        key: "appt",
        name: "appointment",
        source: DateSource::Consent,
    },
    MilestoneDefinition {
        key: "op",
        name: "operation",
        source: DateSource::Operation,
    },
    MilestoneDefinition {
        key: "inv",
        name: "invitation",
        source: DateSource::Invitation,
    },
    MilestoneDefinition {
        key: "reg",
        name: "registration",
        source: DateSource::Registration,
    },
    MilestoneDefinition {
        key: "dis",
        name: "discharge",
        source: DateSource::Discharge,
    },
];

impl MilestoneDefinition {
    fn date(&self, dates: &MilestoneDates) -> Option<NaiveDateTime> {
        match self.source {
            DateSource::Consent => dates.consent_date,
            DateSource::Operation => dates.operation_date,
            DateSource::Invitation => dates.invitation_date,
            DateSource::Registration => dates.registration_date,
            DateSource::Discharge => dates.discharge_date,
        }
    }
}

/// Whether any milestone definition key occurs in the token.
pub fn matches_any_definition(token: &str) -> bool {
    MILESTONE_DEFINITIONS
        .iter()
        .any(|definition| token.contains(definition.key))
}

/// Resolve a milestone token against a journey's candidate dates.
///
/// A token may contain several definition keys; every matched canonical
/// name is joined into the resolved name, but only the first matched
/// definition contributes the date, even when that date is null. That
/// asymmetry is a known methodology caveat of the source data, kept
/// as-is rather than silently corrected.
pub fn resolve(token: Option<&str>, dates: &MilestoneDates) -> ResolvedMilestone {
    let Some(token) = token else {
        warn!("no milestone token to resolve");
        return ResolvedMilestone::default();
    };
    let mut names: Vec<&str> = Vec::new();
    let mut date = None;
    for definition in MILESTONE_DEFINITIONS {
        if token.contains(definition.key) {
            if names.is_empty() {
                date = definition.date(dates);
            }
            names.push(definition.name);
        }
    }
    if names.is_empty() {
        warn!(token = %token, "no milestone definition matched token");
        return ResolvedMilestone {
            name: Some(token.to_string()),
            date: None,
        };
    }
    ResolvedMilestone {
        name: Some(names.join(", ")),
        date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 1, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn resolves_operation_from_pre_op_token() {
        let dates = MilestoneDates {
            operation_date: Some(date(10)),
            ..MilestoneDates::default()
        };
        let resolved = resolve(Some("pre-op"), &dates);
        assert_eq!(resolved.name.as_deref(), Some("operation"));
        assert_eq!(resolved.date, Some(date(10)));
    }

    #[test]
    fn appointment_reads_consent_date() {
        let resolved = resolve(Some("appt"), &MilestoneDates::default());
        assert_eq!(resolved.name.as_deref(), Some("appointment"));
        assert_eq!(resolved.date, None);
    }

    #[test]
    fn unknown_token_echoes_back() {
        let resolved = resolve(Some("unknown-token"), &MilestoneDates::default());
        assert_eq!(resolved.name.as_deref(), Some("unknown-token"));
        assert_eq!(resolved.date, None);
    }

    #[test]
    fn missing_token_resolves_to_nothing() {
        let resolved = resolve(None, &MilestoneDates::default());
        assert_eq!(resolved, ResolvedMilestone::default());
    }

    #[test]
    fn multiple_keys_join_names_in_definition_order() {
        let dates = MilestoneDates {
            operation_date: Some(date(10)),
            registration_date: Some(date(3)),
            ..MilestoneDates::default()
        };
        let resolved = resolve(Some("reg-op"), &dates);
        assert_eq!(resolved.name.as_deref(), Some("operation, registration"));
        // First definition in order wins the date.
        assert_eq!(resolved.date, Some(date(10)));
    }

    #[test]
    fn first_match_keeps_null_date_over_later_matches() {
        let dates = MilestoneDates {
            registration_date: Some(date(3)),
            ..MilestoneDates::default()
        };
        let resolved = resolve(Some("reg-op"), &dates);
        // `op` matches first with a null operation date; the populated
        // registration date is discarded.
        assert_eq!(resolved.date, None);
    }
}
