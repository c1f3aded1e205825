//! Date helpers
//!
//! The backend speaks ISO 8601 (sometimes with offset, sometimes a bare
//! `LocalDateTime`, sometimes a plain date). Form inputs speak the HTML
//! `datetime-local` / `date` formats in the browser's timezone.

use chrono::{
    DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc,
};

const INPUT_MINUTES: &str = "%Y-%m-%dT%H:%M";
const INPUT_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";
const INPUT_FRACTION: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Current instant.
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses the value of an `<input type="datetime-local">`.
pub fn parse_datetime_local(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    [INPUT_MINUTES, INPUT_SECONDS, INPUT_FRACTION]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Parses the value of an `<input type="date">`.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Interprets a `datetime-local` value in `tz` and returns the instant.
pub fn local_input_to_utc<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let naive = parse_datetime_local(value)?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// `2030-01-01T12:00:00.000Z`, the shape `Date.toISOString()` produces.
pub fn to_iso(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses whatever date the backend sent, as an instant. Values without an
/// offset are read in `tz`.
pub fn parse_backend<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    let naive = parse_datetime_local(value)
        .or_else(|| parse_date(value).map(|d| d.and_time(NaiveTime::MIN)))?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Backend date as a `datetime-local` input value (edit forms).
pub fn to_datetime_local<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<String> {
    let instant = parse_backend(value, tz)?;
    Some(
        instant
            .with_timezone(tz)
            .naive_local()
            .format(INPUT_MINUTES)
            .to_string(),
    )
}

/// `dd/mm/yyyy` in the browser timezone; unparseable input is returned as-is.
pub fn format_br_date(value: &str) -> String {
    match parse_backend(value, &Local) {
        Some(instant) => instant.with_timezone(&Local).format("%d/%m/%Y").to_string(),
        None => value.to_string(),
    }
}

pub fn format_br_datetime(value: &str) -> String {
    match parse_backend(value, &Local) {
        Some(instant) => instant
            .with_timezone(&Local)
            .format("%d/%m/%Y %H:%M")
            .to_string(),
        None => value.to_string(),
    }
}

/// Completed years between `birth` and `today`.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn brt() -> FixedOffset {
        FixedOffset::west_opt(3 * 3600).unwrap()
    }

    #[test]
    fn test_datetime_local_formats() {
        assert!(parse_datetime_local("2030-05-01T08:30").is_some());
        assert!(parse_datetime_local("2030-05-01T08:30:15").is_some());
        assert!(parse_datetime_local("01/05/2030").is_none());
        assert!(parse_datetime_local("").is_none());
    }

    #[test]
    fn test_local_input_to_iso() {
        let instant = local_input_to_utc("2030-05-01T08:30", &brt()).unwrap();
        assert_eq!(to_iso(&instant), "2030-05-01T11:30:00.000Z");
    }

    #[test]
    fn test_backend_shapes() {
        let tz = brt();
        let with_offset = parse_backend("2030-05-01T11:30:00Z", &tz).unwrap();
        let naive = parse_backend("2030-05-01T08:30:00", &tz).unwrap();
        assert_eq!(with_offset, naive);
        assert!(parse_backend("2030-05-01", &tz).is_some());
        assert!(parse_backend("amanhã", &tz).is_none());
    }

    #[test]
    fn test_to_datetime_local_round_trip() {
        let tz = brt();
        assert_eq!(
            to_datetime_local("2030-05-01T11:30:00.000Z", &tz).as_deref(),
            Some("2030-05-01T08:30")
        );
    }

    #[test]
    fn test_format_falls_back_to_raw() {
        assert_eq!(format_br_date("sem data"), "sem data");
        assert_eq!(format_br_date("2030-12-25"), "25/12/2030");
    }

    #[test]
    fn test_age_counts_completed_years() {
        let birth = NaiveDate::from_ymd_opt(2008, 6, 15).unwrap();
        assert_eq!(age_on(birth, NaiveDate::from_ymd_opt(2024, 6, 14).unwrap()), 15);
        assert_eq!(age_on(birth, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()), 16);
    }
}
