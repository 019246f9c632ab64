//! Incremental selection against the target table's natural keys.

use std::collections::BTreeSet;

use pjw_model::{NaturalKey, ScheduleWindowRecord};

/// Keep only candidates whose natural key is not already persisted.
///
/// An empty `existing` set (fresh target table) selects everything; an
/// empty result means the run has no new data and must not write.
pub fn select_new(
    candidates: Vec<ScheduleWindowRecord>,
    existing: &BTreeSet<NaturalKey>,
) -> Vec<ScheduleWindowRecord> {
    candidates
        .into_iter()
        .filter(|record| !existing.contains(&record.natural_key()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(patient_id: i64) -> ScheduleWindowRecord {
        ScheduleWindowRecord {
            patient_id,
            patient_journey_id: patient_id - 100,
            activity_id: patient_id + 200,
            activity_content_slug: "pain-survey".to_string(),
            schedule_id: patient_id - 100,
            schedule_slug: "4d-2d-pre-op".to_string(),
            schedule_start_offset_days: Some(-4),
            schedule_end_offset_days: Some(-2),
            schedule_milestone_name: Some("operation".to_string()),
            milestone_date: None,
        }
    }

    #[test]
    fn empty_existing_set_selects_everything() {
        let selected = select_new(vec![record(101), record(102)], &BTreeSet::new());
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn existing_keys_are_filtered_out() {
        let existing: BTreeSet<_> = [record(101).natural_key()].into();
        let selected = select_new(vec![record(101), record(102)], &existing);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].patient_id, 102);
    }

    #[test]
    fn all_existing_selects_nothing() {
        let existing: BTreeSet<_> = [record(101).natural_key(), record(102).natural_key()].into();
        let selected = select_new(vec![record(101), record(102)], &existing);
        assert!(selected.is_empty());
    }
}
