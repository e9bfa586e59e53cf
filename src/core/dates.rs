//! Calendar helpers for week and month bucketing.
//!
//! Every boundary produced here is UTC midnight so that records without
//! timezone information never drift across a week or month edge.

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Returns the instant at UTC midnight of `date`.
pub fn utc_midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First day of the month following `date`.
pub fn next_month_start(date: NaiveDate) -> NaiveDate {
    let first = start_of_month(date);
    first.checked_add_months(Months::new(1)).unwrap_or(first)
}

pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    next_month_start(date).pred_opt().unwrap_or(date)
}

/// Sunday on or before `date`, or `date` itself when that Sunday is out of range.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_sunday();
    date.checked_sub_days(chrono::Days::new(offset.into())).unwrap_or(date)
}

/// First day of every calendar month touching `[start, end]`, oldest first.
pub fn month_starts(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let last = start_of_month(end);
    let mut current = start_of_month(start);
    let mut months = Vec::new();
    while current <= last {
        months.push(current);
        match current.checked_add_months(Months::new(1)) {
            Some(next) => current = next,
            None => break,
        }
    }
    months
}

/// Sunday of every week touching `[start, end]`, oldest first.
pub fn week_starts(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut current = start_of_week(start);
    let mut weeks = Vec::new();
    while current <= end {
        weeks.push(current);
        match current.checked_add_days(chrono::Days::new(7)) {
            Some(next) => current = next,
            None => break,
        }
    }
    weeks
}

/// Number of whole months between the months of `from` and `to`.
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    i64::from(to.year() - from.year()) * 12 + i64::from(to.month()) - i64::from(from.month())
}

/// Parses a record date.
///
/// RFC 3339 instants keep their instant; plain dates and datetimes without an
/// offset are pinned to UTC midnight of their calendar day.
pub fn parse_record_date(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(utc_midnight(date));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(utc_midnight(naive.date()));
        }
    }
    anyhow::bail!("Invalid date: {raw}")
}

/// Serde adapter for record dates, see [`parse_record_date`].
pub mod record_date {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(
        date: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_record_date(&raw).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_starts_spans_year_boundary() {
        let months = month_starts(date(2023, 11, 17), date(2024, 2, 3));
        assert_eq!(
            months,
            vec![
                date(2023, 11, 1),
                date(2023, 12, 1),
                date(2024, 1, 1),
                date(2024, 2, 1)
            ]
        );
    }

    #[test]
    fn test_start_of_week_near_minimum_date_does_not_overflow() {
        let earliest = NaiveDate::MIN;
        assert!(start_of_week(earliest) <= earliest);
        assert_eq!(start_of_week(date(2024, 1, 3)), date(2023, 12, 31));
    }

    #[test]
    fn test_week_starts_begin_on_sunday() {
        // 2024-01-03 is a Wednesday
        let weeks = week_starts(date(2024, 1, 3), date(2024, 1, 21));
        assert_eq!(
            weeks,
            vec![date(2023, 12, 31), date(2024, 1, 7), date(2024, 1, 14), date(2024, 1, 21)]
        );
    }

    #[test]
    fn test_last_day_of_month() {
        assert_eq!(last_day_of_month(date(2024, 2, 10)), date(2024, 2, 29));
        assert_eq!(last_day_of_month(date(2023, 12, 31)), date(2023, 12, 31));
    }

    #[test]
    fn test_months_between() {
        assert_eq!(months_between(date(2023, 11, 30), date(2024, 2, 1)), 3);
        assert_eq!(months_between(date(2024, 2, 1), date(2024, 2, 28)), 0);
    }

    #[test]
    fn test_parse_record_date_variants() {
        let midnight = utc_midnight(date(2024, 3, 5));
        assert_eq!(parse_record_date("2024-03-05").unwrap(), midnight);
        assert_eq!(parse_record_date("2024-03-05T18:30:00").unwrap(), midnight);
        assert_eq!(
            parse_record_date("2024-03-05T23:30:00-02:00").unwrap(),
            utc_midnight(date(2024, 3, 6)) + chrono::Duration::minutes(90)
        );
        assert!(parse_record_date("05/03/2024").is_err());
    }
}
