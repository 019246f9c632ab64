//! Row types for the four relational source tables.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One schedule definition, identified by its timing slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSchedule {
    pub id: i64,
    /// Hyphen-delimited timing rule, e.g. `4d-2d-pre-op` or `reg`.
    pub slug: String,
}

/// One activity definition referencing its schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawActivity {
    pub id: i64,
    pub content_slug: String,
    pub schedule_id: i64,
}

/// One patient journey with its five nullable milestone dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPatientJourney {
    pub id: i64,
    pub patient_id: i64,
    pub invitation_date: Option<NaiveDateTime>,
    pub registration_date: Option<NaiveDateTime>,
    pub discharge_date: Option<NaiveDateTime>,
    pub consent_date: Option<NaiveDateTime>,
    pub operation_date: Option<NaiveDateTime>,
}

/// One survey result linking an activity occurrence to a journey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSurveyResult {
    pub id: i64,
    pub activity_id: i64,
    pub patient_journey_id: i64,
}

impl RawPatientJourney {
    /// The five candidate milestone dates in one bundle.
    pub fn milestone_dates(&self) -> MilestoneDates {
        MilestoneDates {
            invitation_date: self.invitation_date,
            registration_date: self.registration_date,
            discharge_date: self.discharge_date,
            consent_date: self.consent_date,
            operation_date: self.operation_date,
        }
    }
}

/// The candidate dates a milestone token can resolve against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneDates {
    pub invitation_date: Option<NaiveDateTime>,
    pub registration_date: Option<NaiveDateTime>,
    pub discharge_date: Option<NaiveDateTime>,
    pub consent_date: Option<NaiveDateTime>,
    pub operation_date: Option<NaiveDateTime>,
}
