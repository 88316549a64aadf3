//! Parsing and normalizing the timestamps stored with transactions.
//!
//! Timestamps are kept in UTC at whole-second precision so that the text SQLite stores for them
//! sorts in chronological order.

use time::{
    Date, Duration, OffsetDateTime, Time, UtcOffset, format_description::well_known::Rfc3339,
    macros::format_description,
};

use crate::Error;

/// Convert `date_time` to UTC and drop the sub-second part.
pub fn normalize(date_time: OffsetDateTime) -> OffsetDateTime {
    date_time
        .to_offset(UtcOffset::UTC)
        .replace_nanosecond(0)
        .unwrap_or(date_time.to_offset(UtcOffset::UTC))
}

/// The current time, normalized.
pub fn now() -> OffsetDateTime {
    normalize(OffsetDateTime::now_utc())
}

/// Parse an RFC 3339 timestamp, or a `YYYY-MM-DD` date which is taken to be at `time_of_day`
/// in UTC. Sub-seconds are dropped.
///
/// # Errors
/// Returns an [Error::Validation] naming `field` if `raw` is neither.
pub fn parse_date_time(raw: &str, time_of_day: Time, field: &str) -> Result<OffsetDateTime, Error> {
    parse(raw, time_of_day, field).map(normalize)
}

/// Like [parse_date_time], but a timestamp with sub-seconds is rounded up to the next whole
/// second.
///
/// Use this for the lower bound of a range so that stored timestamps before the bound stay
/// outside it.
///
/// # Errors
/// Returns an [Error::Validation] naming `field` if `raw` is neither a date nor a timestamp.
pub fn parse_date_time_rounding_up(
    raw: &str,
    time_of_day: Time,
    field: &str,
) -> Result<OffsetDateTime, Error> {
    let date_time = parse(raw, time_of_day, field)?;
    let whole_seconds = normalize(date_time);

    if date_time.nanosecond() > 0 {
        Ok(whole_seconds + Duration::SECOND)
    } else {
        Ok(whole_seconds)
    }
}

fn parse(raw: &str, time_of_day: Time, field: &str) -> Result<OffsetDateTime, Error> {
    let raw = raw.trim();

    if let Ok(date_time) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Ok(date_time);
    }

    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .map(|date| date.with_time(time_of_day).assume_utc())
        .map_err(|_| {
            Error::Validation(format!(
                "Invalid {field}, expected a date (YYYY-MM-DD) or an RFC 3339 timestamp"
            ))
        })
}

/// The last whole second of a day.
pub const END_OF_DAY: Time = time::macros::time!(23:59:59);
