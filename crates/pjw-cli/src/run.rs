//! Run orchestration: one pipeline pass, and the periodic watch loop.
//!
//! The pipeline itself is pure (`pjw-core`); this module sequences the
//! store collaborators around it and owns the run-level error boundary.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use sqlx::PgPool;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use pjw_core::{SourceTables, select_new, transform};
use pjw_store::{
    TARGET_TABLE, append_records, ensure_target_table, existing_keys, fetch_activities,
    fetch_patient_journeys, fetch_schedules, fetch_survey_results,
};

use crate::types::RunSummary;

/// Run the pipeline once: fetch, transform, select, append.
pub async fn run_once(pool: &PgPool) -> Result<RunSummary> {
    let run_start = Instant::now();

    info!("fetching source tables");
    let tables = SourceTables {
        schedules: fetch_schedules(pool).await.context("fetch schedule")?,
        activities: fetch_activities(pool).await.context("fetch activity")?,
        patient_journeys: fetch_patient_journeys(pool)
            .await
            .context("fetch patient_journey")?,
        survey_results: fetch_survey_results(pool)
            .await
            .context("fetch survey_result")?,
    };
    info!(
        schedule_count = tables.schedules.len(),
        activity_count = tables.activities.len(),
        patient_journey_count = tables.patient_journeys.len(),
        survey_result_count = tables.survey_results.len(),
        "source tables fetched"
    );

    let build = transform(&tables).context("transform source tables")?;
    let candidate_count = build.records.len();
    if build.unparsed_slugs > 0 || build.unmatched_milestones > 0 {
        warn!(
            unparsed_slugs = build.unparsed_slugs,
            unmatched_milestones = build.unmatched_milestones,
            "some rows carry null window or milestone fields"
        );
    }

    ensure_target_table(pool).await.context("ensure target table")?;
    let existing = existing_keys(pool).await.context("read existing keys")?;
    let fresh = select_new(build.records, &existing);
    let new_count = fresh.len();

    let written = if fresh.is_empty() {
        info!("no new data");
        0
    } else {
        let written = append_records(pool, &fresh).await.context("append records")?;
        info!(record_count = written, table = TARGET_TABLE, "data loaded");
        written
    };

    Ok(RunSummary {
        schedule_count: tables.schedules.len(),
        activity_count: tables.activities.len(),
        patient_journey_count: tables.patient_journeys.len(),
        survey_result_count: tables.survey_results.len(),
        candidate_count,
        unparsed_slugs: build.unparsed_slugs,
        unmatched_milestones: build.unmatched_milestones,
        existing_count: existing.len(),
        new_count,
        written,
        duration_ms: run_start.elapsed().as_millis() as u64,
    })
}

/// Run the pipeline on a fixed interval until interrupted.
///
/// Runs execute serially inside the loop task; with
/// [`MissedTickBehavior::Skip`] an overrunning run causes skipped ticks
/// instead of a second concurrent run observing a stale key snapshot.
/// A failed run is logged and the loop waits for the next tick; no
/// retry happens in between.
pub async fn watch(pool: &PgPool, interval_secs: u64, sla_secs: u64) -> Result<()> {
    info!(interval_secs, sla_secs, "starting watch loop");
    let mut timer = tokio::time::interval(Duration::from_secs(interval_secs));
    timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            _ = timer.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown signal received, stopping watch loop");
                return Ok(());
            }
        }
        let started = Instant::now();
        match run_once(pool).await {
            Ok(summary) => info!(
                candidate_count = summary.candidate_count,
                new_count = summary.new_count,
                written = summary.written,
                duration_ms = summary.duration_ms,
                "run complete"
            ),
            Err(error) => error!("run failed: {error:#}"),
        }
        let elapsed = started.elapsed();
        if elapsed > Duration::from_secs(sla_secs) {
            warn!(
                duration_ms = elapsed.as_millis() as u64,
                threshold_secs = sla_secs,
                "run exceeded its SLA threshold"
            );
        }
    }
}
