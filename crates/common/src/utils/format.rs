//! Display helpers for addresses and timestamps.

use chrono::{Datelike, Local, TimeZone, Timelike};

/// Shortens an address to `0x1234...abcd`.
pub fn format_address(addr: Option<&str>) -> String {
    let addr = match addr {
        Some(a) if !a.is_empty() => a,
        _ => return String::new(),
    };
    let chars: Vec<char> = addr.chars().collect();
    if chars.len() >= 10 {
        let head: String = chars[..6].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        addr.to_string()
    }
}

/// Renders unix seconds in local time as `Y/M/D h:m:s`.
pub fn format_timestamp(timestamp: Option<u64>) -> String {
    format_timestamp_in(timestamp, &Local)
}

/// Same as [`format_timestamp`] for an explicit time zone. Fields are not zero padded.
pub fn format_timestamp_in<Tz: TimeZone>(timestamp: Option<u64>, tz: &Tz) -> String {
    let secs = match timestamp {
        Some(t) if t > 0 => t,
        _ => return "-".to_string(),
    };
    let Ok(secs) = i64::try_from(secs) else {
        return "-".to_string();
    };
    match tz.timestamp_opt(secs, 0).single() {
        Some(dt) => format!(
            "{}/{}/{} {}:{}:{}",
            dt.year(),
            dt.month(),
            dt.day(),
            dt.hour(),
            dt.minute(),
            dt.second()
        ),
        None => "-".to_string(),
    }
}
