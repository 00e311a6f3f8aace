mod datetime;
mod filesystem;
mod string;

pub use datetime::{excel_serial_to_datetime, format_datetime, get_utc_iso_datetime};
pub use filesystem::write_error_to_log;
pub use string::{normalize_header, strip_extension};
