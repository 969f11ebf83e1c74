use crate::core::error::ApiError;
use crate::models::api::LogsQuery;
use crate::stores::exercise_store::LogFilter;
use chrono::NaiveDate;
use serde::de::{self, Deserializer, Visitor};
use std::fmt;

/// Parse a calendar date in `YYYY-MM-DD` form
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        ApiError::InvalidParameter(format!(
            "{} must be a date in YYYY-MM-DD format, got '{}'",
            field, value
        ))
    })
}

/// Lenient result cap: absent or non-numeric falls back to the default
pub fn parse_limit(value: Option<&str>, default: usize) -> usize {
    match value {
        Some(raw) => raw.trim().parse::<usize>().unwrap_or(default),
        None => default,
    }
}

/// Turn the raw logs query into a validated filter.
///
/// Date bounds must parse; the limit is lenient per `parse_limit`.
pub fn build_log_filter(query: &LogsQuery, default_limit: usize) -> Result<LogFilter, ApiError> {
    let from = match &query.from {
        Some(raw) if !raw.trim().is_empty() => Some(parse_date("from", raw)?),
        _ => None,
    };

    let to = match &query.to {
        Some(raw) if !raw.trim().is_empty() => Some(parse_date("to", raw)?),
        _ => None,
    };

    let limit = parse_limit(query.limit.as_deref(), default_limit);

    Ok(LogFilter { from, to, limit })
}

/// Deserialize an i64 from either a number or a numeric string.
///
/// Form bodies always deliver strings; JSON bodies usually deliver
/// numbers but clients of the original API sent both.
pub fn de_duration<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    struct DurationVisitor;

    impl Visitor<'_> for DurationVisitor {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or a numeric string")
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<i64, E> {
            Ok(value)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<i64, E> {
            i64::try_from(value).map_err(|_| E::custom("duration out of range"))
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<i64, E> {
            value
                .trim()
                .parse::<i64>()
                .map_err(|_| E::custom(format!("invalid duration '{}'", value)))
        }
    }

    deserializer.deserialize_any(DurationVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::api::ExerciseBody;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("from", "2023-01-15").unwrap(), date(2023, 1, 15));
        assert_eq!(parse_date("from", " 2023-01-15 ").unwrap(), date(2023, 1, 15));
        assert!(parse_date("from", "Jan 15 2023").is_err());
        assert!(parse_date("from", "2023-13-01").is_err());
        assert!(parse_date("from", "").is_err());
    }

    #[test]
    fn test_parse_limit_lenient() {
        assert_eq!(parse_limit(Some("5"), 500), 5);
        assert_eq!(parse_limit(Some("0"), 500), 0);
        assert_eq!(parse_limit(Some("abc"), 500), 500);
        assert_eq!(parse_limit(Some("-1"), 500), 500);
        assert_eq!(parse_limit(Some(""), 500), 500);
        assert_eq!(parse_limit(None, 500), 500);
    }

    #[test]
    fn test_build_log_filter() {
        let query = LogsQuery {
            from: Some("2023-01-15".to_string()),
            to: Some("2023-02-15".to_string()),
            limit: Some("10".to_string()),
        };
        let filter = build_log_filter(&query, 500).unwrap();
        assert_eq!(filter.from, Some(date(2023, 1, 15)));
        assert_eq!(filter.to, Some(date(2023, 2, 15)));
        assert_eq!(filter.limit, 10);

        let filter = build_log_filter(&LogsQuery::default(), 500).unwrap();
        assert_eq!(filter.from, None);
        assert_eq!(filter.to, None);
        assert_eq!(filter.limit, 500);

        let query = LogsQuery {
            from: Some("garbage".to_string()),
            to: None,
            limit: None,
        };
        assert!(build_log_filter(&query, 500).is_err());
    }

    #[test]
    fn test_empty_date_strings_mean_no_bound() {
        let query = LogsQuery {
            from: Some("".to_string()),
            to: Some("  ".to_string()),
            limit: None,
        };
        let filter = build_log_filter(&query, 500).unwrap();
        assert_eq!(filter.from, None);
        assert_eq!(filter.to, None);
    }

    #[test]
    fn test_de_duration_from_json_number() {
        let body: ExerciseBody =
            serde_json::from_str(r#"{"description":"run","duration":30}"#).unwrap();
        assert_eq!(body.duration, 30);
    }

    #[test]
    fn test_de_duration_from_json_string() {
        let body: ExerciseBody =
            serde_json::from_str(r#"{"description":"run","duration":"45"}"#).unwrap();
        assert_eq!(body.duration, 45);
    }

    #[test]
    fn test_de_duration_from_form() {
        let body: ExerciseBody =
            serde_urlencoded::from_str("description=run&duration=30").unwrap();
        assert_eq!(body.duration, 30);
        assert_eq!(body.description, "run");
        assert!(body.date.is_none());
    }

    #[test]
    fn test_de_duration_rejects_garbage() {
        assert!(serde_json::from_str::<ExerciseBody>(
            r#"{"description":"run","duration":"lots"}"#
        )
        .is_err());
    }
}
