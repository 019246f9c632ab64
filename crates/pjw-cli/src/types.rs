use serde::{Deserialize, Serialize};

/// Counts and timing for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub schedule_count: usize,
    pub activity_count: usize,
    pub patient_journey_count: usize,
    pub survey_result_count: usize,
    /// Denormalized rows produced this run.
    pub candidate_count: usize,
    pub unparsed_slugs: usize,
    pub unmatched_milestones: usize,
    /// Natural keys already present in the target table.
    pub existing_count: usize,
    /// Candidates whose natural key was not yet present.
    pub new_count: usize,
    /// Rows actually appended (zero means "no new data").
    pub written: u64,
    pub duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_serializes() {
        let summary = RunSummary {
            schedule_count: 2,
            candidate_count: 2,
            new_count: 1,
            written: 1,
            ..RunSummary::default()
        };
        let json = serde_json::to_string(&summary).expect("serialize summary");
        let round: RunSummary = serde_json::from_str(&json).expect("deserialize summary");
        assert_eq!(round, summary);
    }
}
