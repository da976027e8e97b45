// src/viewer/format.rs
//! Display formatting for table cells.

use chrono::{DateTime, Local, Utc};

/// `1234567` -> `"1,234,567"`.
#[must_use]
pub fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[must_use]
pub fn demand(value: f64) -> String {
    format!("{value:.4}")
}

/// Calendar date in the viewer's local time zone.
#[must_use]
pub fn date(value: DateTime<Utc>) -> String {
    value.with_timezone(&Local).format("%-m/%-d/%Y").to_string()
}

/// Date and time in the viewer's local time zone.
#[must_use]
pub fn date_time(value: DateTime<Utc>) -> String {
    value
        .with_timezone(&Local)
        .format("%-m/%-d/%Y, %-I:%M:%S %p")
        .to_string()
}
