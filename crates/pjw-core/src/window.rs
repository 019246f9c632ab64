//! Per-row window building over the merged frame.

use anyhow::{Context, Result, anyhow};
use polars::prelude::DataFrame;
use tracing::debug;

use pjw_model::{MilestoneDates, ScheduleWindowRecord};
use pjw_schedule::{matches_any_definition, parse, resolve};

use crate::data_utils::{column_value_string, parse_datetime, parse_i64};

/// The built records plus counts for the run summary.
#[derive(Debug, Default)]
pub struct WindowBuild {
    pub records: Vec<ScheduleWindowRecord>,
    /// Rows whose slug matched no rule and carry a null window.
    pub unparsed_slugs: usize,
    /// Rows whose milestone token matched no definition.
    pub unmatched_milestones: usize,
}

/// Run the slug parser and milestone resolver over every merged row.
///
/// Unparseable slugs and unmatched tokens are carried through with null
/// fields rather than dropped; only the fatal unknown-unit parse error
/// and id columns that fail to read as integers abort the build.
pub fn build_window_records(merged: &DataFrame) -> Result<WindowBuild> {
    let mut build = WindowBuild::default();
    for idx in 0..merged.height() {
        let slug = column_value_string(merged, "slug", idx);
        let window = parse(&slug)
            .with_context(|| format!("parse schedule slug {slug:?}"))?;
        if window.is_unparsed() {
            build.unparsed_slugs += 1;
        }
        if let Some(token) = window.milestone_token.as_deref()
            && !matches_any_definition(token)
        {
            build.unmatched_milestones += 1;
        }

        let dates = MilestoneDates {
            invitation_date: parse_datetime(&column_value_string(merged, "invitation_date", idx)),
            registration_date: parse_datetime(&column_value_string(
                merged,
                "registration_date",
                idx,
            )),
            discharge_date: parse_datetime(&column_value_string(merged, "discharge_date", idx)),
            consent_date: parse_datetime(&column_value_string(merged, "consent_date", idx)),
            operation_date: parse_datetime(&column_value_string(merged, "operation_date", idx)),
        };
        let milestone = resolve(window.milestone_token.as_deref(), &dates);

        build.records.push(ScheduleWindowRecord {
            patient_id: require_i64(merged, "patient_id", idx)?,
            patient_journey_id: require_i64(merged, "patient_journey_id", idx)?,
            activity_id: require_i64(merged, "activity_id", idx)?,
            activity_content_slug: column_value_string(merged, "content_slug", idx),
            schedule_id: require_i64(merged, "schedule_id", idx)?,
            schedule_slug: slug,
            schedule_start_offset_days: window.start_offset_days,
            schedule_end_offset_days: window.end_offset_days,
            schedule_milestone_name: milestone.name,
            milestone_date: milestone.date,
        });
    }
    debug!(
        record_count = build.records.len(),
        unparsed_slugs = build.unparsed_slugs,
        unmatched_milestones = build.unmatched_milestones,
        "window records built"
    );
    Ok(build)
}

fn require_i64(df: &DataFrame, name: &str, idx: usize) -> Result<i64> {
    parse_i64(&column_value_string(df, name, idx))
        .ok_or_else(|| anyhow!("row {idx}: column {name} is missing or not an integer"))
}
