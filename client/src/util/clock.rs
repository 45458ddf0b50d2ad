//! Wall-clock access that works in the browser and on the server.

use time::OffsetDateTime;

/// Current UTC time.
///
/// `OffsetDateTime::now_utc` is unavailable on `wasm32-unknown-unknown`, so
/// the browser build reads `Date.now()` instead.
pub fn now() -> OffsetDateTime {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_possible_truncation)]
        let nanos = (js_sys::Date::now() * 1_000_000.0) as i128;
        OffsetDateTime::from_unix_timestamp_nanos(nanos).unwrap_or(OffsetDateTime::UNIX_EPOCH)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        OffsetDateTime::now_utc()
    }
}
