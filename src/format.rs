//! Wire rendering of primitive values.
//!
//! Every timestamp sent to the API is rendered in a fixed reference zone
//! (Moscow, UTC+3) so that output does not depend on the machine's local
//! timezone.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};

/// Offset of the reference timezone in seconds east of UTC.
const REFERENCE_OFFSET_SECS: i32 = 3 * 3600;

/// Longest comment accepted by the wallet and P2P APIs.
pub const MAX_COMMENT_CHARS: usize = 255;

const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

pub(crate) fn reference_offset() -> FixedOffset {
    FixedOffset::east_opt(REFERENCE_OFFSET_SECS).expect("UTC+3 is a valid offset")
}

/// Render an amount as a plain numeric string: `999.0` → `"999"`, `999.5` → `"999.5"`.
pub fn format_amount(amount: f64) -> String {
    format!("{amount}")
}

/// Render a timestamp as `YYYY-MM-DDTHH:MM:SS+03:00`.
///
/// A missing timestamp renders as an empty string.
pub fn format_datetime<Tz: TimeZone>(value: Option<&DateTime<Tz>>) -> String {
    match value {
        Some(dt) => dt
            .with_timezone(&reference_offset())
            .format(DATETIME_FORMAT)
            .to_string(),
        None => String::new(),
    }
}

/// Render a calendar date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Join payment sources with a single space, e.g. `["QW_RUB", "CARD"]` → `"QW_RUB CARD"`.
pub fn join_sources<S: AsRef<str>>(sources: &[S]) -> String {
    sources
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trim a comment and cap it at [`MAX_COMMENT_CHARS`] characters.
pub fn format_comment(comment: &str) -> String {
    comment.trim().chars().take(MAX_COMMENT_CHARS).collect()
}

/// Strip the leading `+` and any whitespace from a phone number.
pub fn normalize_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .trim_start_matches('+')
        .to_string()
}
