use super::*;
use time::Duration;
use time::macros::datetime;

const NOW: OffsetDateTime = datetime!(2024-06-01 12:00 UTC);

#[test]
fn relative_time_ninety_minutes_is_one_hour() {
    assert_eq!(relative_time(NOW - Duration::minutes(90), NOW), "1 hour ago");
}

#[test]
fn relative_time_thirty_seconds_is_just_now() {
    assert_eq!(relative_time(NOW - Duration::seconds(30), NOW), "Just now");
    assert_eq!(relative_time(NOW - Duration::seconds(59), NOW), "Just now");
    assert_eq!(relative_time(NOW - Duration::seconds(60), NOW), "1 minute ago");
}

#[test]
fn relative_time_under_a_second_is_just_now() {
    assert_eq!(relative_time(NOW - Duration::milliseconds(400), NOW), "Just now");
    assert_eq!(relative_time(NOW, NOW), "Just now");
    assert_eq!(relative_time(NOW + Duration::hours(2), NOW), "Just now");
}

#[test]
fn relative_time_pluralizes_larger_units() {
    assert_eq!(relative_time(NOW - Duration::days(3), NOW), "3 days ago");
    assert_eq!(relative_time(NOW - Duration::days(8), NOW), "1 week ago");
    assert_eq!(relative_time(NOW - Duration::days(65), NOW), "2 months ago");
    assert_eq!(relative_time(NOW - Duration::days(400), NOW), "1 year ago");
}

#[test]
fn format_relative_time_parses_rfc3339() {
    assert_eq!(format_relative_time("2024-06-01T10:30:00Z", NOW), "1 hour ago");
    assert_eq!(format_relative_time("2024-06-01T11:59:59.500+00:00", NOW), "Just now");
    assert_eq!(format_relative_time("yesterday", NOW), "Invalid date");
}

#[test]
fn format_number_uses_suffixes() {
    assert_eq!(format_number(0), "0");
    assert_eq!(format_number(999), "999");
    assert_eq!(format_number(1000), "1K");
    assert_eq!(format_number(1234), "1.2K");
    assert_eq!(format_number(2_500_000), "2.5M");
    assert_eq!(format_number(3_000_000_000), "3B");
}

#[test]
fn format_currency_renders_minor_units() {
    assert_eq!(format_currency(500, "usd"), "$5.00");
    assert_eq!(format_currency(5, "usd"), "$0.05");
    assert_eq!(format_currency(123_456_789, "usd"), "$1,234,567.89");
    assert_eq!(format_currency(-250, "USD"), "-$2.50");
    assert_eq!(format_currency(1999, "eur"), "EUR 19.99");
    assert_eq!(format_currency(100, "jpy"), "JPY 1.00");
}

#[test]
fn truncate_text_appends_ellipsis_only_when_cut() {
    assert_eq!(truncate_text("short", 10), "short");
    assert_eq!(truncate_text("exactly10!", 10), "exactly10!");
    assert_eq!(truncate_text("a longer sentence", 8), "a longer...");
    assert_eq!(truncate_text("héllo wörld", 5), "héllo...");
}

#[test]
fn format_username_adds_single_at() {
    assert_eq!(format_username("sam"), "@sam");
    assert_eq!(format_username("@sam"), "@sam");
    assert_eq!(format_username(""), "");
}

#[test]
fn extract_hashtags_finds_all_tags() {
    assert_eq!(extract_hashtags("Building #web3 tools with #Rust_lang!"), vec!["#web3", "#Rust_lang"]);
    assert!(extract_hashtags("no tags here").is_empty());
}

#[test]
fn format_file_size_scales_by_1024() {
    assert_eq!(format_file_size(0), "0 Bytes");
    assert_eq!(format_file_size(512), "512 Bytes");
    assert_eq!(format_file_size(1536), "1.5 KB");
    assert_eq!(format_file_size(1_048_576), "1 MB");
}

#[test]
fn format_short_date_is_month_day_year() {
    assert_eq!(format_short_date(datetime!(2024-01-15 10:30 UTC)), "Jan 15, 2024");
}
