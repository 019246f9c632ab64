//! Joining the four source frames into one wide frame.
//!
//! All three joins are inner joins on the shared `id` column; rows
//! without a counterpart are dropped, never errored. The join-key column
//! is carried once per source under a source-suffixed name so no column
//! silently shadows another.

use std::collections::BTreeMap;

use anyhow::{Result, bail};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

use crate::data_utils::column_value_string;

/// Columns the merged frame carries, in source order.
pub const MERGED_COLUMNS: &[&str] = &[
    "id_patient_journey",
    "patient_id",
    "invitation_date",
    "registration_date",
    "discharge_date",
    "consent_date",
    "operation_date",
    "id_activity",
    "content_slug",
    "schedule_id",
    "id_schedule",
    "slug",
    "id_survey_result",
    "activity_id",
    "patient_journey_id",
];

/// Join patient journeys to activities, schedules, and survey results.
pub fn denormalize(
    patient_journeys: &DataFrame,
    activities: &DataFrame,
    schedules: &DataFrame,
    survey_results: &DataFrame,
) -> Result<DataFrame> {
    ensure_columns(patient_journeys, "patient_journey", &["id", "patient_id"])?;
    ensure_columns(activities, "activity", &["id", "content_slug", "schedule_id"])?;
    ensure_columns(schedules, "schedule", &["id", "slug"])?;
    ensure_columns(
        survey_results,
        "survey_result",
        &["id", "activity_id", "patient_journey_id"],
    )?;

    let activity_index = index_by_id(activities);
    let schedule_index = index_by_id(schedules);
    let survey_index = index_by_id(survey_results);

    let mut merged: BTreeMap<&str, Vec<String>> = MERGED_COLUMNS
        .iter()
        .map(|name| (*name, Vec::new()))
        .collect();
    for journey_row in 0..patient_journeys.height() {
        let id = column_value_string(patient_journeys, "id", journey_row);
        if id.trim().is_empty() {
            continue;
        }
        let Some(&activity_row) = activity_index.get(&id) else {
            continue;
        };
        let Some(&schedule_row) = schedule_index.get(&id) else {
            continue;
        };
        let Some(&survey_row) = survey_index.get(&id) else {
            continue;
        };

        push(&mut merged, "id_patient_journey", id.clone());
        for name in [
            "patient_id",
            "invitation_date",
            "registration_date",
            "discharge_date",
            "consent_date",
            "operation_date",
        ] {
            push(
                &mut merged,
                name,
                column_value_string(patient_journeys, name, journey_row),
            );
        }
        push(&mut merged, "id_activity", id.clone());
        for name in ["content_slug", "schedule_id"] {
            push(
                &mut merged,
                name,
                column_value_string(activities, name, activity_row),
            );
        }
        push(&mut merged, "id_schedule", id.clone());
        push(
            &mut merged,
            "slug",
            column_value_string(schedules, "slug", schedule_row),
        );
        push(&mut merged, "id_survey_result", id.clone());
        for name in ["activity_id", "patient_journey_id"] {
            push(
                &mut merged,
                name,
                column_value_string(survey_results, name, survey_row),
            );
        }
    }

    let columns: Vec<Column> = MERGED_COLUMNS
        .iter()
        .map(|name| {
            let values = merged.remove(*name).expect("known merged column");
            Series::new((*name).into(), values).into_column()
        })
        .collect();
    Ok(DataFrame::new(columns)?)
}

fn push(merged: &mut BTreeMap<&str, Vec<String>>, name: &str, value: String) {
    merged.get_mut(name).expect("known merged column").push(value);
}

/// First row per id wins; ids are primary keys upstream, so duplicates
/// only appear in malformed extracts.
fn index_by_id(df: &DataFrame) -> BTreeMap<String, usize> {
    let mut index = BTreeMap::new();
    for idx in 0..df.height() {
        let id = column_value_string(df, "id", idx);
        if id.trim().is_empty() {
            continue;
        }
        index.entry(id).or_insert(idx);
    }
    index
}

fn ensure_columns(df: &DataFrame, source: &str, required: &[&str]) -> Result<()> {
    for name in required {
        if df.column(name).is_err() {
            bail!("{source} frame is missing column {name}");
        }
    }
    Ok(())
}
