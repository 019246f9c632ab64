//! Relational collaborators: fetch the four source tables and maintain
//! the `patient_journey_schedule_window` target table.

pub mod error;
pub mod source;
pub mod target;

use sqlx::PgPool;
use tracing::info;

pub use error::{Result, StoreError};
pub use source::{
    fetch_activities, fetch_patient_journeys, fetch_schedules, fetch_survey_results,
};
pub use target::{TARGET_TABLE, append_records, ensure_target_table, existing_keys};

/// Connect to the source/target database.
pub async fn connect(database_url: &str) -> Result<PgPool> {
    let pool = PgPool::connect(database_url).await?;
    info!("database connected");
    Ok(pool)
}
