use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Format used for date/time cells in the CSV export
pub const CSV_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn get_utc_iso_datetime() -> String {
    let timestamp = chrono::Utc::now().to_rfc3339();
    return timestamp;
}

/// Convert an Excel serial date (1900 date system) to a naive datetime.
///
/// Returns `None` for serials chrono cannot represent.
pub fn excel_serial_to_datetime(value: f64) -> Option<NaiveDateTime> {
    if !value.is_finite() {
        return None;
    }
    let excel_base = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let days = value.trunc() as i64;
    let seconds = ((value - days as f64) * 86400.0).round() as i64;
    excel_base
        .checked_add_signed(Duration::try_days(days)?)?
        .checked_add_signed(Duration::try_seconds(seconds)?)
}

pub fn format_datetime(dt: &NaiveDateTime) -> String {
    return dt.format(CSV_DATETIME_FORMAT).to_string();
}
