//! The denormalized schedule-window record and its natural key.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One row of the `patient_journey_schedule_window` target table.
///
/// Built fresh on every pipeline run from the join of the four source
/// tables and never mutated in place. Offsets are signed days relative to
/// the milestone date; all three window fields are null together when the
/// schedule slug could not be parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleWindowRecord {
    pub patient_id: i64,
    pub patient_journey_id: i64,
    pub activity_id: i64,
    pub activity_content_slug: String,
    pub schedule_id: i64,
    pub schedule_slug: String,
    pub schedule_start_offset_days: Option<i64>,
    pub schedule_end_offset_days: Option<i64>,
    pub schedule_milestone_name: Option<String>,
    pub milestone_date: Option<NaiveDateTime>,
}

impl ScheduleWindowRecord {
    pub fn natural_key(&self) -> NaturalKey {
        NaturalKey {
            patient_id: self.patient_id,
            patient_journey_id: self.patient_journey_id,
            activity_id: self.activity_id,
            schedule_id: self.schedule_id,
        }
    }
}

/// The tuple that must stay unique in the target table across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NaturalKey {
    pub patient_id: i64,
    pub patient_journey_id: i64,
    pub activity_id: i64,
    pub schedule_id: i64,
}
