//! Subcommand implementations.

use anyhow::Result;
use comfy_table::{Cell, Table};
use tracing::info;

use pjw_cli::config::{self, Settings};
use pjw_cli::run::{run_once, watch};
use pjw_cli::summary::{apply_table_style, print_summary};
use pjw_model::MilestoneDates;
use pjw_schedule::{parse, resolve};

use crate::cli::{RunArgs, SlugArgs, WatchArgs};

pub async fn run_pipeline(args: &RunArgs) -> Result<()> {
    config::load_dotenv();
    let settings = Settings::from_env()?;
    let pool = pjw_store::connect(&settings.database_url).await?;
    let summary = run_once(&pool).await?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

pub async fn run_watch(args: &WatchArgs) -> Result<()> {
    config::load_dotenv();
    let settings = Settings::from_env()?;
    let pool = pjw_store::connect(&settings.database_url).await?;
    let interval_secs = args.interval_secs.unwrap_or(settings.run_interval_secs);
    let sla_secs = args.sla_secs.unwrap_or(settings.sla_secs);
    watch(&pool, interval_secs, sla_secs).await
}

/// Parse a single slug and show its interpretation. An operator
/// debugging aid, no database involved.
pub fn run_slug(args: &SlugArgs) -> Result<()> {
    let window = parse(&args.slug)?;
    let milestone = resolve(window.milestone_token.as_deref(), &MilestoneDates::default());
    if window.is_unparsed() {
        info!(slug = %args.slug, "slug matched no timing rule");
    }
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![Cell::new("Field"), Cell::new("Value")]);
    table.add_row(vec![Cell::new("Slug"), Cell::new(&args.slug)]);
    table.add_row(vec![
        Cell::new("Start offset (days)"),
        optional_cell(window.start_offset_days),
    ]);
    table.add_row(vec![
        Cell::new("End offset (days)"),
        optional_cell(window.end_offset_days),
    ]);
    table.add_row(vec![
        Cell::new("Milestone token"),
        Cell::new(window.milestone_token.as_deref().unwrap_or("-")),
    ]);
    table.add_row(vec![
        Cell::new("Milestone name"),
        Cell::new(milestone.name.as_deref().unwrap_or("-")),
    ]);
    println!("{table}");
    Ok(())
}

fn optional_cell(value: Option<i64>) -> Cell {
    match value {
        Some(days) => Cell::new(days),
        None => Cell::new("-"),
    }
}
