//! Calendar dates are always derived in UTC.
//!
//! A record belongs to the calendar cell of the UTC date of its timestamp, and
//! inputs carrying no offset are read as UTC.

use time::{
    Date, OffsetDateTime, PrimitiveDateTime,
    format_description::{BorrowedFormatItem, well_known::Rfc3339},
    macros::format_description,
};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

const DATETIME_FORMATS: &[&[BorrowedFormatItem<'static>]] = &[
    format_description!("[year]-[month]-[day]T[hour]:[minute]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
];

pub fn parse_date(value: &str) -> crate::Result<Date> {
    Date::parse(value.trim(), DATE_FORMAT)
        .map_err(|err| crate::Error::InvalidInput(format!("invalid date '{value}': {err}")))
}

/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM[:SS[.fff]]`, `YYYY-MM-DD HH:MM[:SS]`
/// and bare dates (midnight).
pub fn parse_datetime(value: &str) -> crate::Result<OffsetDateTime> {
    let value = value.trim();

    if let Ok(datetime) = OffsetDateTime::parse(value, &Rfc3339) {
        return Ok(datetime.to_offset(time::UtcOffset::UTC));
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = PrimitiveDateTime::parse(value, format) {
            return Ok(datetime.assume_utc());
        }
    }

    if let Ok(date) = Date::parse(value, DATE_FORMAT) {
        return Ok(date.midnight().assume_utc());
    }

    crate::invalid!("invalid date and time '{}'", value)
}

pub fn utc_date(timestamp: i64) -> crate::Result<Date> {
    Ok(OffsetDateTime::from_unix_timestamp(timestamp)?.date())
}

pub fn start_of_day(date: Date) -> i64 {
    date.midnight().assume_utc().unix_timestamp()
}

pub fn utc_today() -> Date {
    OffsetDateTime::now_utc().date()
}
