//! The `patient_journey_schedule_window` target table.

use std::collections::BTreeSet;

use sqlx::PgPool;
use tracing::debug;

use pjw_model::{NaturalKey, ScheduleWindowRecord};

use crate::error::Result;

pub const TARGET_TABLE: &str = "patient_journey_schedule_window";

/// Create the target table when it does not exist yet.
///
/// The natural key is enforced by the incremental selection logic, not
/// by a database constraint; overlapping runs remain the operator's
/// responsibility (the watch loop never overlaps itself).
pub async fn ensure_target_table(pool: &PgPool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS patient_journey_schedule_window (\
            patient_id BIGINT NOT NULL,\
            patient_journey_id BIGINT NOT NULL,\
            activity_id BIGINT NOT NULL,\
            activity_content_slug TEXT NOT NULL,\
            schedule_id BIGINT NOT NULL,\
            schedule_slug TEXT NOT NULL,\
            schedule_start_offset_days BIGINT,\
            schedule_end_offset_days BIGINT,\
            schedule_milestone_name TEXT,\
            milestone_date TIMESTAMP\
        )",
    )
    .execute(pool)
    .await?;
    Ok(())
}

#[derive(sqlx::FromRow)]
struct KeyRow {
    patient_id: i64,
    patient_journey_id: i64,
    activity_id: i64,
    schedule_id: i64,
}

/// The natural keys already persisted; empty for a fresh table.
pub async fn existing_keys(pool: &PgPool) -> Result<BTreeSet<NaturalKey>> {
    let rows = sqlx::query_as::<_, KeyRow>(
        "SELECT patient_id, patient_journey_id, activity_id, schedule_id \
         FROM patient_journey_schedule_window",
    )
    .fetch_all(pool)
    .await?;
    let keys = rows
        .into_iter()
        .map(|row| NaturalKey {
            patient_id: row.patient_id,
            patient_journey_id: row.patient_journey_id,
            activity_id: row.activity_id,
            schedule_id: row.schedule_id,
        })
        .collect();
    Ok(keys)
}

/// Append records inside one transaction so a partial write never
/// leaves the table between runs.
pub async fn append_records(pool: &PgPool, records: &[ScheduleWindowRecord]) -> Result<u64> {
    let mut tx = pool.begin().await?;
    for record in records {
        sqlx::query(
            "INSERT INTO patient_journey_schedule_window (\
                patient_id, patient_journey_id, activity_id, activity_content_slug, \
                schedule_id, schedule_slug, schedule_start_offset_days, \
                schedule_end_offset_days, schedule_milestone_name, milestone_date\
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(record.patient_id)
        .bind(record.patient_journey_id)
        .bind(record.activity_id)
        .bind(&record.activity_content_slug)
        .bind(record.schedule_id)
        .bind(&record.schedule_slug)
        .bind(record.schedule_start_offset_days)
        .bind(record.schedule_end_offset_days)
        .bind(&record.schedule_milestone_name)
        .bind(record.milestone_date)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    debug!(record_count = records.len(), "records appended");
    Ok(records.len() as u64)
}
