pub mod record;
pub mod source;

pub use record::{NaturalKey, ScheduleWindowRecord};
pub use source::{
    MilestoneDates, RawActivity, RawPatientJourney, RawSchedule, RawSurveyResult,
};
