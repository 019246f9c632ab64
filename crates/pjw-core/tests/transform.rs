//! Integration tests for the transform pipeline.

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime};

use pjw_core::{SourceTables, denormalize, select_new, transform};
use pjw_core::{
    activity_frame, patient_journey_frame, schedule_frame, survey_result_frame,
};
use pjw_model::{RawActivity, RawPatientJourney, RawSchedule, RawSurveyResult};

fn date(month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, month, day)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn sample_tables() -> SourceTables {
    SourceTables {
        schedules: vec![
            RawSchedule {
                id: 1,
                slug: "4d-2d-pre-op".to_string(),
            },
            RawSchedule {
                id: 2,
                slug: "3m-1d-post-op".to_string(),
            },
        ],
        activities: vec![
            RawActivity {
                id: 1,
                content_slug: "pain-survey".to_string(),
                schedule_id: 1,
            },
            RawActivity {
                id: 2,
                content_slug: "readiness-survey".to_string(),
                schedule_id: 2,
            },
        ],
        patient_journeys: vec![
            RawPatientJourney {
                id: 1,
                patient_id: 101,
                invitation_date: Some(date(1, 1)),
                registration_date: Some(date(1, 3)),
                discharge_date: Some(date(2, 1)),
                consent_date: Some(date(1, 5)),
                operation_date: Some(date(1, 10)),
            },
            RawPatientJourney {
                id: 2,
                patient_id: 102,
                invitation_date: Some(date(1, 2)),
                registration_date: Some(date(1, 4)),
                discharge_date: Some(date(2, 2)),
                consent_date: Some(date(1, 6)),
                operation_date: Some(date(1, 11)),
            },
        ],
        survey_results: vec![
            RawSurveyResult {
                id: 1,
                activity_id: 301,
                patient_journey_id: 1,
            },
            RawSurveyResult {
                id: 2,
                activity_id: 302,
                patient_journey_id: 2,
            },
        ],
    }
}

#[test]
fn transform_builds_one_record_per_matched_survey_row() {
    let build = transform(&sample_tables()).unwrap();
    assert_eq!(build.records.len(), 2);
    assert_eq!(build.unparsed_slugs, 0);
    assert_eq!(build.unmatched_milestones, 0);

    let first = &build.records[0];
    assert_eq!(first.patient_id, 101);
    assert_eq!(first.patient_journey_id, 1);
    assert_eq!(first.activity_id, 301);
    assert_eq!(first.activity_content_slug, "pain-survey");
    assert_eq!(first.schedule_id, 1);
    assert_eq!(first.schedule_slug, "4d-2d-pre-op");
    assert_eq!(first.schedule_start_offset_days, Some(-4));
    assert_eq!(first.schedule_end_offset_days, Some(-2));
    assert_eq!(first.schedule_milestone_name.as_deref(), Some("operation"));
    assert_eq!(first.milestone_date, Some(date(1, 10)));

    let second = &build.records[1];
    assert_eq!(second.patient_id, 102);
    assert_eq!(second.activity_id, 302);
    assert_eq!(second.schedule_start_offset_days, Some(90));
    assert_eq!(second.schedule_end_offset_days, Some(1));
    assert_eq!(second.milestone_date, Some(date(1, 11)));
}

#[test]
fn unmatched_rows_are_dropped_not_errored() {
    let mut tables = sample_tables();
    // A journey with no activity/schedule/survey counterpart.
    tables.patient_journeys.push(RawPatientJourney {
        id: 9,
        patient_id: 109,
        invitation_date: None,
        registration_date: None,
        discharge_date: None,
        consent_date: None,
        operation_date: None,
    });
    // A survey result whose id matches no journey.
    tables.survey_results.push(RawSurveyResult {
        id: 8,
        activity_id: 308,
        patient_journey_id: 8,
    });
    let build = transform(&tables).unwrap();
    assert_eq!(build.records.len(), 2);
}

#[test]
fn merged_frame_disambiguates_join_keys_by_source() {
    let tables = sample_tables();
    let merged = denormalize(
        &patient_journey_frame(&tables.patient_journeys).unwrap(),
        &activity_frame(&tables.activities).unwrap(),
        &schedule_frame(&tables.schedules).unwrap(),
        &survey_result_frame(&tables.survey_results).unwrap(),
    )
    .unwrap();
    for name in [
        "id_patient_journey",
        "id_activity",
        "id_schedule",
        "id_survey_result",
    ] {
        assert!(merged.column(name).is_ok(), "missing column {name}");
    }
    assert_eq!(merged.height(), 2);
}

#[test]
fn unparseable_slug_is_carried_with_null_window() {
    let mut tables = sample_tables();
    tables.schedules[0].slug = "reg-d0".to_string();
    let build = transform(&tables).unwrap();
    assert_eq!(build.records.len(), 2);
    assert_eq!(build.unparsed_slugs, 1);

    let unparsed = &build.records[0];
    assert_eq!(unparsed.schedule_slug, "reg-d0");
    assert_eq!(unparsed.schedule_start_offset_days, None);
    assert_eq!(unparsed.schedule_end_offset_days, None);
    assert_eq!(unparsed.schedule_milestone_name, None);
    assert_eq!(unparsed.milestone_date, None);
}

#[test]
fn unknown_milestone_token_echoes_into_the_record() {
    let mut tables = sample_tables();
    tables.schedules[1].slug = "xyz".to_string();
    let build = transform(&tables).unwrap();
    assert_eq!(build.unmatched_milestones, 1);
    let echoed = &build.records[1];
    assert_eq!(echoed.schedule_milestone_name.as_deref(), Some("xyz"));
    assert_eq!(echoed.milestone_date, None);
}

#[test]
fn rerunning_against_written_keys_selects_nothing() {
    let tables = sample_tables();

    // First run: empty target, everything is new.
    let first = transform(&tables).unwrap();
    let selected = select_new(first.records, &BTreeSet::new());
    assert_eq!(selected.len(), 2);

    // Simulate the write, then rerun against unchanged sources.
    let existing: BTreeSet<_> = selected.iter().map(|r| r.natural_key()).collect();
    let second = transform(&tables).unwrap();
    let reselected = select_new(second.records, &existing);
    assert!(reselected.is_empty());
}

#[test]
fn partial_overlap_selects_only_new_rows() {
    let tables = sample_tables();
    let build = transform(&tables).unwrap();
    let existing: BTreeSet<_> = [build.records[0].natural_key()].into();
    let selected = select_new(build.records, &existing);
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].patient_id, 102);
    assert_eq!(selected[0].activity_id, 302);
}
