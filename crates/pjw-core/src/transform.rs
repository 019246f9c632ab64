//! The pure transformation: source rows in, candidate records out.

use anyhow::{Context, Result};
use tracing::debug;

use pjw_model::{RawActivity, RawPatientJourney, RawSchedule, RawSurveyResult};

use crate::denormalize::denormalize;
use crate::frame::{
    activity_frame, patient_journey_frame, schedule_frame, survey_result_frame,
};
use crate::window::{WindowBuild, build_window_records};

/// One fetched snapshot of the four source tables.
#[derive(Debug, Default)]
pub struct SourceTables {
    pub schedules: Vec<RawSchedule>,
    pub activities: Vec<RawActivity>,
    pub patient_journeys: Vec<RawPatientJourney>,
    pub survey_results: Vec<RawSurveyResult>,
}

/// Denormalize the snapshot and build candidate window records.
///
/// Pure and synchronous; selection against the target store and the
/// write itself happen in the orchestrator.
pub fn transform(tables: &SourceTables) -> Result<WindowBuild> {
    let schedules = schedule_frame(&tables.schedules).context("build schedule frame")?;
    let activities = activity_frame(&tables.activities).context("build activity frame")?;
    let patient_journeys =
        patient_journey_frame(&tables.patient_journeys).context("build patient journey frame")?;
    let survey_results =
        survey_result_frame(&tables.survey_results).context("build survey result frame")?;

    let merged = denormalize(&patient_journeys, &activities, &schedules, &survey_results)
        .context("denormalize source frames")?;
    debug!(
        journey_count = tables.patient_journeys.len(),
        merged_count = merged.height(),
        "source frames denormalized"
    );
    build_window_records(&merged).context("build window records")
}
