//! Reporter-supplied times arrive as a local date, a wall-clock time and an
//! IANA zone name. Storage is always an absolute UTC instant; the zone name
//! is kept next to it purely for redisplay.
//!
//! Resolution never fails. Unknown zones degrade to "the naive value was
//! already UTC" so a report is never dropped because of a bad zone name.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

/// Accepted layouts for offset-less `received_at` strings
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Result of resolving a naive local time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalized {
    pub instant: DateTime<Utc>,
    /// False when the zone name was missing or unknown and the naive value
    /// was taken as UTC
    pub zone_resolved: bool,
}

/// Look up an IANA zone by name
pub fn parse_timezone(name: &str) -> Option<Tz> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    name.parse::<Tz>().ok()
}

/// Resolve a naive local datetime against a zone.
///
/// Ambiguous wall times (clocks going back) take the earlier instant.
/// Wall times inside a spring-forward gap are read with the offset that was
/// in effect before the gap.
pub fn resolve_local(naive: NaiveDateTime, tz_name: Option<&str>) -> Normalized {
    let Some(tz) = tz_name.and_then(parse_timezone) else {
        return Normalized {
            instant: naive.and_utc(),
            zone_resolved: false,
        };
    };

    let instant = match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => {
            // a day earlier is safely before any transition gap
            let day_before = naive - Duration::days(1);
            let offset = tz.offset_from_utc_datetime(&day_before).fix().local_minus_utc();
            (naive - Duration::seconds(i64::from(offset))).and_utc()
        }
    };

    Normalized {
        instant,
        zone_resolved: true,
    }
}

/// Combine a local date and time in the named zone into an absolute instant
pub fn to_absolute(date: NaiveDate, time: NaiveTime, tz_name: &str) -> DateTime<Utc> {
    resolve_local(date.and_time(time), Some(tz_name)).instant
}

/// Express a stored instant as wall time in the named zone.
///
/// Missing instants stay missing; an unknown zone yields the instant in UTC.
pub fn to_display(instant: Option<DateTime<Utc>>, tz_name: Option<&str>) -> Option<DateTime<Tz>> {
    let instant = instant?;
    let tz = tz_name.and_then(parse_timezone).unwrap_or(Tz::UTC);
    Some(instant.with_timezone(&tz))
}

/// Parse a free-form `received_at` value.
///
/// Offset-aware RFC 3339 strings are taken as-is. Naive datetimes (or bare
/// dates, read as midnight) are resolved against `tz_name`. Unparseable input
/// yields `None` rather than an error so the rest of the report is kept.
pub fn parse_received_at(raw: &str, tz_name: Option<&str>) -> Option<Normalized> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(Normalized {
            instant: dt.with_timezone(&Utc),
            zone_resolved: true,
        });
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    Some(resolve_local(naive, tz_name))
}
