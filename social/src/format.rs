//! Display formatting for timestamps, counts, money, and text.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use std::sync::LazyLock;

use regex::Regex;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

static HASHTAG_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"#[a-zA-Z0-9_]+").ok());

/// Relative-time buckets, largest first, in seconds.
const INTERVALS: [(&str, i64); 6] = [
    ("year", 31_536_000),
    ("month", 2_592_000),
    ("week", 604_800),
    ("day", 86_400),
    ("hour", 3_600),
    ("minute", 60),
];

/// Render `then` relative to `now`, e.g. `"1 hour ago"` or `"3 days ago"`.
///
/// Anything under a minute, including timestamps in the future, reads
/// `"Just now"`.
#[must_use]
pub fn relative_time(then: OffsetDateTime, now: OffsetDateTime) -> String {
    let elapsed = (now - then).whole_seconds();
    for (unit, seconds) in INTERVALS {
        let count = elapsed / seconds;
        if count >= 1 {
            return if count == 1 { format!("1 {unit} ago") } else { format!("{count} {unit}s ago") };
        }
    }
    "Just now".to_owned()
}

/// [`relative_time`] for an RFC 3339 string; unparseable input reads
/// `"Invalid date"`.
#[must_use]
pub fn format_relative_time(timestamp: &str, now: OffsetDateTime) -> String {
    match OffsetDateTime::parse(timestamp, &Rfc3339) {
        Ok(then) => relative_time(then, now),
        Err(_) => "Invalid date".to_owned(),
    }
}

/// Compact count: `999`, `1.2K`, `3M`.
#[must_use]
pub fn format_number(num: u64) -> String {
    const UNITS: [&str; 5] = ["", "K", "M", "B", "T"];
    if num < 1000 {
        return num.to_string();
    }
    let mut order = 0usize;
    let mut scaled = num;
    while scaled >= 1000 && order < UNITS.len() - 1 {
        scaled /= 1000;
        order += 1;
    }
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let value = num as f64 / 1000f64.powi(order as i32);
    format!("{}{}", trim_fraction(&format!("{value:.1}")), UNITS[order])
}

/// Minor units to a display amount: `500, "usd"` → `"$5.00"`.
#[must_use]
pub fn format_currency(amount: i64, currency: &str) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.unsigned_abs();
    let whole = group_thousands(abs / 100);
    let cents = abs % 100;
    let code = currency.to_ascii_uppercase();
    let symbol = match code.as_str() {
        "USD" => "$".to_owned(),
        other => format!("{other} "),
    };
    format!("{sign}{symbol}{whole}.{cents:02}")
}

/// Cut `text` to `max_len` characters and append `...` when it was longer.
#[must_use]
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_owned();
    }
    let head: String = text.chars().take(max_len).collect();
    format!("{head}...")
}

#[must_use]
pub fn format_username(username: &str) -> String {
    if username.is_empty() || username.starts_with('@') {
        username.to_owned()
    } else {
        format!("@{username}")
    }
}

#[must_use]
pub fn extract_hashtags(text: &str) -> Vec<String> {
    HASHTAG_RE
        .as_ref()
        .map(|re| re.find_iter(text).map(|m| m.as_str().to_owned()).collect())
        .unwrap_or_default()
}

/// 1024-based size: `1536` → `"1.5 KB"`.
#[must_use]
pub fn format_file_size(bytes: u64) -> String {
    const SIZES: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];
    if bytes == 0 {
        return "0 Bytes".to_owned();
    }
    let mut index = 0usize;
    let mut scaled = bytes;
    while scaled >= 1024 && index < SIZES.len() - 1 {
        scaled /= 1024;
        index += 1;
    }
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let value = bytes as f64 / 1024f64.powi(index as i32);
    format!("{} {}", trim_fraction(&format!("{value:.2}")), SIZES[index])
}

/// Calendar date for saved-idea lists, e.g. `"Jan 15, 2024"`.
#[must_use]
pub fn format_short_date(at: OffsetDateTime) -> String {
    let month = match at.month() {
        time::Month::January => "Jan",
        time::Month::February => "Feb",
        time::Month::March => "Mar",
        time::Month::April => "Apr",
        time::Month::May => "May",
        time::Month::June => "Jun",
        time::Month::July => "Jul",
        time::Month::August => "Aug",
        time::Month::September => "Sep",
        time::Month::October => "Oct",
        time::Month::November => "Nov",
        time::Month::December => "Dec",
    };
    format!("{month} {}, {}", at.day(), at.year())
}

fn trim_fraction(fixed: &str) -> String {
    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.').to_owned()
    } else {
        fixed.to_owned()
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
