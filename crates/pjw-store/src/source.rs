//! Reads over the four relational source tables.

use chrono::NaiveDateTime;
use sqlx::PgPool;

use pjw_model::{RawActivity, RawPatientJourney, RawSchedule, RawSurveyResult};

use crate::error::Result;

#[derive(sqlx::FromRow)]
struct ScheduleRow {
    id: i64,
    slug: String,
}

#[derive(sqlx::FromRow)]
struct ActivityRow {
    id: i64,
    content_slug: String,
    schedule_id: i64,
}

#[derive(sqlx::FromRow)]
struct PatientJourneyRow {
    id: i64,
    patient_id: i64,
    invitation_date: Option<NaiveDateTime>,
    registration_date: Option<NaiveDateTime>,
    discharge_date: Option<NaiveDateTime>,
    consent_date: Option<NaiveDateTime>,
    operation_date: Option<NaiveDateTime>,
}

#[derive(sqlx::FromRow)]
struct SurveyResultRow {
    id: i64,
    activity_id: i64,
    patient_journey_id: i64,
}

pub async fn fetch_schedules(pool: &PgPool) -> Result<Vec<RawSchedule>> {
    let rows = sqlx::query_as::<_, ScheduleRow>("SELECT id, slug FROM schedule")
        .fetch_all(pool)
        .await?;
    Ok(rows
        .into_iter()
        .map(|row| RawSchedule {
            id: row.id,
            slug: row.slug,
        })
        .collect())
}

pub async fn fetch_activities(pool: &PgPool) -> Result<Vec<RawActivity>> {
    let rows =
        sqlx::query_as::<_, ActivityRow>("SELECT id, content_slug, schedule_id FROM activity")
            .fetch_all(pool)
            .await?;
    Ok(rows
        .into_iter()
        .map(|row| RawActivity {
            id: row.id,
            content_slug: row.content_slug,
            schedule_id: row.schedule_id,
        })
        .collect())
}

pub async fn fetch_patient_journeys(pool: &PgPool) -> Result<Vec<RawPatientJourney>> {
    let rows = sqlx::query_as::<_, PatientJourneyRow>(
        "SELECT id, patient_id, invitation_date, registration_date, discharge_date, \
         consent_date, operation_date FROM patient_journey",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows
        .into_iter()
        .map(|row| RawPatientJourney {
            id: row.id,
            patient_id: row.patient_id,
            invitation_date: row.invitation_date,
            registration_date: row.registration_date,
            discharge_date: row.discharge_date,
            consent_date: row.consent_date,
            operation_date: row.operation_date,
        })
        .collect())
}

pub async fn fetch_survey_results(pool: &PgPool) -> Result<Vec<RawSurveyResult>> {
    let rows = sqlx::query_as::<_, SurveyResultRow>(
        "SELECT id, activity_id, patient_journey_id FROM survey_result",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows
        .into_iter()
        .map(|row| RawSurveyResult {
            id: row.id,
            activity_id: row.activity_id,
            patient_journey_id: row.patient_journey_id,
        })
        .collect())
}
