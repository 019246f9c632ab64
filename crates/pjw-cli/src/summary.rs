//! Human-readable run summary rendering.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::RunSummary;

pub fn print_summary(summary: &RunSummary) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Count")]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table.add_row(vec![Cell::new("Schedules"), Cell::new(summary.schedule_count)]);
    table.add_row(vec![
        Cell::new("Activities"),
        Cell::new(summary.activity_count),
    ]);
    table.add_row(vec![
        Cell::new("Patient journeys"),
        Cell::new(summary.patient_journey_count),
    ]);
    table.add_row(vec![
        Cell::new("Survey results"),
        Cell::new(summary.survey_result_count),
    ]);
    table.add_row(vec![
        Cell::new("Candidate records"),
        Cell::new(summary.candidate_count),
    ]);
    table.add_row(vec![
        Cell::new("Unparseable slugs"),
        warn_cell(summary.unparsed_slugs),
    ]);
    table.add_row(vec![
        Cell::new("Unmatched milestones"),
        warn_cell(summary.unmatched_milestones),
    ]);
    table.add_row(vec![
        Cell::new("Already present"),
        Cell::new(summary.existing_count),
    ]);
    table.add_row(vec![
        Cell::new("New records written"),
        written_cell(summary.written),
    ]);
    println!("{table}");
    if summary.written == 0 {
        println!("No new data ({} ms).", summary.duration_ms);
    } else {
        println!(
            "Loaded {} record(s) in {} ms.",
            summary.written, summary.duration_ms
        );
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(60);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn warn_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Yellow).add_attribute(Attribute::Bold)
    } else {
        Cell::new(count).fg(Color::DarkGrey)
    }
}

fn written_cell(written: u64) -> Cell {
    if written > 0 {
        Cell::new(written)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new(written).fg(Color::DarkGrey)
    }
}
