//! Timestamp conversion helpers: ISO-8601 round-tripping and the three
//! RFC-2616 HTTP-date forms (RFC-1123, RFC-850, asctime).

use anyhow::{anyhow, Result};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// Normalizes any timestamp to UTC. Idempotent: `to_utc(to_utc(dt)) == to_utc(dt)`.
pub fn to_utc(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt
}

/// Formats as UTC ISO-8601 with microsecond precision and a trailing `Z`,
/// e.g. `2014-12-31T15:45:30.000000Z`.
pub fn to_iso_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

/// Parses the format produced by [`to_iso_datetime`], or any RFC-3339
/// datetime, normalizing the result to UTC.
pub fn from_iso_datetime(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    let trimmed = s.strip_suffix('Z').unwrap_or(s);
    let naive = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .map_err(|e| anyhow!("invalid ISO-8601 datetime '{s}': {e}"))?;
    Ok(Utc.from_utc_datetime(&naive))
}

const RFC1123: &str = "%a, %d %b %Y %H:%M:%S GMT";
const RFC850: &str = "%A, %d-%b-%y %H:%M:%S GMT";
const ASCTIME: &str = "%a %b %e %H:%M:%S %Y";

/// Formats as RFC-1123, the form HTTP clients are expected to emit.
pub fn to_http_datetime(dt: &DateTime<Utc>) -> String {
    dt.format(RFC1123).to_string()
}

/// Parses any of the three RFC-2616-sanctioned HTTP-date forms.
pub fn from_http_datetime(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();
    for fmt in [RFC1123, RFC850, ASCTIME] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    Err(anyhow!("unrecognized HTTP-date: '{s}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn iso_round_trip() {
        let dt = Utc.with_ymd_and_hms(2014, 12, 31, 15, 45, 30).unwrap();
        let s = to_iso_datetime(&dt);
        assert_eq!(s, "2014-12-31T15:45:30.000000Z");
        assert_eq!(from_iso_datetime(&s).unwrap(), to_utc(dt));
    }

    #[test]
    fn http_date_round_trip_rfc1123() {
        let dt = Utc.with_ymd_and_hms(2014, 12, 31, 15, 45, 30).unwrap();
        let s = to_http_datetime(&dt);
        assert_eq!(s, "Wed, 31 Dec 2014 15:45:30 GMT");
        assert_eq!(from_http_datetime(&s).unwrap(), dt);
    }

    #[test]
    fn http_date_accepts_rfc850() {
        let dt = Utc.with_ymd_and_hms(2014, 12, 31, 15, 45, 30).unwrap();
        let parsed = from_http_datetime("Wednesday, 31-Dec-14 15:45:30 GMT").unwrap();
        assert_eq!(parsed, dt);
    }

    #[test]
    fn http_date_accepts_asctime() {
        let dt = Utc.with_ymd_and_hms(2014, 12, 31, 15, 45, 30).unwrap();
        let parsed = from_http_datetime("Wed Dec 31 15:45:30 2014").unwrap();
        assert_eq!(parsed, dt);
    }

    #[test]
    fn to_utc_is_idempotent() {
        let dt = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(to_utc(to_utc(dt)), to_utc(dt));
    }
}
