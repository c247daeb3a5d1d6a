use chrono::{TimeZone, Utc};

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: i64 = 1000;
    pub const MS_IN_MIN: i64 = Self::MS_IN_S * 60;
    pub const MS_IN_5_MIN: i64 = Self::MS_IN_S * 60 * 5;
    pub const MS_IN_15_MIN: i64 = Self::MS_IN_S * 60 * 15;
    pub const MS_IN_30_MIN: i64 = Self::MS_IN_S * 60 * 30;
    pub const MS_IN_H: i64 = Self::MS_IN_MIN * 60;

    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
}

/// Epoch milliseconds to a display string (UTC).
/// Invalid timestamps come back empty rather than panicking.
pub fn epoch_ms_to_utc(epoch_ms: i64) -> String {
    if let chrono::LocalResult::Single(datetime) = Utc.timestamp_millis_opt(epoch_ms) {
        datetime.format(TimeUtils::STANDARD_TIME_FORMAT).to_string()
    } else {
        String::new()
    }
}
