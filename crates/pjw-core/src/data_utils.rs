use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::{AnyValue, DataFrame};

pub fn any_to_string(value: AnyValue) -> String {
    match value {
        AnyValue::String(value) => value.to_string(),
        AnyValue::StringOwned(value) => value.to_string(),
        AnyValue::Null => String::new(),
        _ => value.to_string(),
    }
}

pub fn column_value_string(df: &DataFrame, name: &str, idx: usize) -> String {
    match df.column(name) {
        Ok(series) => any_to_string(series.get(idx).unwrap_or(AnyValue::Null)),
        Err(_) => String::new(),
    }
}

pub fn parse_i64(value: &str) -> Option<i64> {
    if value.trim().is_empty() {
        return None;
    }
    value.trim().parse::<i64>().ok()
}

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a frame cell back into a datetime. Accepts the pipeline's own
/// ISO rendering plus the space-separated and date-only forms the source
/// tables have been seen to carry.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed);
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

pub fn format_datetime(value: &NaiveDateTime) -> String {
    value.format("%Y-%m-%dT%H:%M:%S").to_string()
}

pub fn format_optional_datetime(value: Option<&NaiveDateTime>) -> String {
    value.map(format_datetime).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datetime_round_trips_through_frame_cells() {
        let date = NaiveDate::from_ymd_opt(2023, 1, 10)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        assert_eq!(parse_datetime(&format_datetime(&date)), Some(date));
    }

    #[test]
    fn date_only_values_get_midnight() {
        let parsed = parse_datetime("2023-02-01").unwrap();
        assert_eq!(format_datetime(&parsed), "2023-02-01T00:00:00");
    }

    #[test]
    fn empty_cells_parse_to_none() {
        assert_eq!(parse_datetime(""), None);
        assert_eq!(parse_datetime("  "), None);
        assert_eq!(parse_i64(""), None);
    }
}
