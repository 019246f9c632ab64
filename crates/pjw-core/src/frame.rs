//! Source-row to DataFrame conversion.
//!
//! Frames stay string-typed throughout the pipeline; dates are rendered
//! as ISO 8601 strings and parsed back where a computation needs them.

use anyhow::Result;
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

use pjw_model::{RawActivity, RawPatientJourney, RawSchedule, RawSurveyResult};

use crate::data_utils::format_optional_datetime;

fn string_column(name: &str, values: Vec<String>) -> Column {
    Series::new(name.into(), values).into_column()
}

pub fn schedule_frame(rows: &[RawSchedule]) -> Result<DataFrame> {
    let ids = rows.iter().map(|row| row.id.to_string()).collect();
    let slugs = rows.iter().map(|row| row.slug.clone()).collect();
    let frame = DataFrame::new(vec![
        string_column("id", ids),
        string_column("slug", slugs),
    ])?;
    Ok(frame)
}

pub fn activity_frame(rows: &[RawActivity]) -> Result<DataFrame> {
    let ids = rows.iter().map(|row| row.id.to_string()).collect();
    let content_slugs = rows.iter().map(|row| row.content_slug.clone()).collect();
    let schedule_ids = rows.iter().map(|row| row.schedule_id.to_string()).collect();
    let frame = DataFrame::new(vec![
        string_column("id", ids),
        string_column("content_slug", content_slugs),
        string_column("schedule_id", schedule_ids),
    ])?;
    Ok(frame)
}

pub fn patient_journey_frame(rows: &[RawPatientJourney]) -> Result<DataFrame> {
    let mut columns: Vec<(&str, Vec<String>)> = vec![
        ("id", Vec::with_capacity(rows.len())),
        ("patient_id", Vec::with_capacity(rows.len())),
        ("invitation_date", Vec::with_capacity(rows.len())),
        ("registration_date", Vec::with_capacity(rows.len())),
        ("discharge_date", Vec::with_capacity(rows.len())),
        ("consent_date", Vec::with_capacity(rows.len())),
        ("operation_date", Vec::with_capacity(rows.len())),
    ];
    for row in rows {
        columns[0].1.push(row.id.to_string());
        columns[1].1.push(row.patient_id.to_string());
        columns[2]
            .1
            .push(format_optional_datetime(row.invitation_date.as_ref()));
        columns[3]
            .1
            .push(format_optional_datetime(row.registration_date.as_ref()));
        columns[4]
            .1
            .push(format_optional_datetime(row.discharge_date.as_ref()));
        columns[5]
            .1
            .push(format_optional_datetime(row.consent_date.as_ref()));
        columns[6]
            .1
            .push(format_optional_datetime(row.operation_date.as_ref()));
    }
    let frame = DataFrame::new(
        columns
            .into_iter()
            .map(|(name, values)| string_column(name, values))
            .collect(),
    )?;
    Ok(frame)
}

pub fn survey_result_frame(rows: &[RawSurveyResult]) -> Result<DataFrame> {
    let ids = rows.iter().map(|row| row.id.to_string()).collect();
    let activity_ids = rows.iter().map(|row| row.activity_id.to_string()).collect();
    let journey_ids = rows
        .iter()
        .map(|row| row.patient_journey_id.to_string())
        .collect();
    let frame = DataFrame::new(vec![
        string_column("id", ids),
        string_column("activity_id", activity_ids),
        string_column("patient_journey_id", journey_ids),
    ])?;
    Ok(frame)
}
