use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Utc};
use chrono_tz::Tz;
use phf::phf_map;
use tracing::{debug, warn};

/// Date format of the `date` attribute and the `date` query parameter
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Translation keys for fixture short statuses
static STATUS_KEYS: phf::Map<&'static str, &'static str> = phf_map! {
    "NS" => "scheduled",
    "TBD" => "tbd",
    "1H" => "first_half",
    "HT" => "half_time",
    "2H" => "second_half",
    "FT" => "finished",
    "AET" => "extra_time",
    "PEN" => "penalties",
    "LIVE" => "live",
};

/// Resolve a time zone name, falling back to the host zone and then UTC
pub fn resolve_time_zone(requested: Option<&str>) -> Tz {
    match requested.map(str::trim).filter(|s| !s.is_empty()) {
        Some(name) => match name.parse::<Tz>() {
            Ok(tz) => tz,
            Err(_) => {
                warn!("CONFIG: Invalid timezone {:?}, using local timezone", name);
                host_time_zone()
            }
        },
        None => host_time_zone(),
    }
}

/// Time zone of the host, UTC when it cannot be determined
pub fn host_time_zone() -> Tz {
    match iana_time_zone::get_timezone() {
        Ok(name) => name.parse::<Tz>().unwrap_or_else(|_| {
            debug!("CONFIG: Host timezone {:?} not recognized, using UTC", name);
            Tz::UTC
        }),
        Err(e) => {
            debug!("CONFIG: Could not determine host timezone ({}), using UTC", e);
            Tz::UTC
        }
    }
}

/// Calendar date of `now` in `tz`, as `YYYY-MM-DD`
pub fn format_date(now: DateTime<Utc>, tz: Tz) -> String {
    now.with_timezone(&tz).format(DATE_FORMAT).to_string()
}

/// Calendar year of `now` in `tz`, as four digits
pub fn current_year(now: DateTime<Utc>, tz: Tz) -> String {
    format!("{:04}", now.with_timezone(&tz).year())
}

pub fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, DATE_FORMAT).ok()
}

/// Move a `YYYY-MM-DD` date by a number of days
pub fn shift_date(date: &str, days: i64) -> Option<String> {
    let shifted = parse_date(date)?.checked_add_signed(TimeDelta::try_days(days)?)?;
    Some(shifted.format(DATE_FORMAT).to_string())
}

/// Human-readable form of a `YYYY-MM-DD` date, e.g. `Sat, Mar 15, 2025`
///
/// Unparseable input is returned as given.
pub fn display_date(date: &str) -> String {
    match parse_date(date) {
        Some(d) => d.format("%a, %b %-d, %Y").to_string(),
        None => date.to_string(),
    }
}

/// Kickoff time (`HH:MM`) of an RFC 3339 timestamp in `tz`
pub fn format_kickoff(timestamp: &str, tz: Tz) -> Option<String> {
    let parsed = DateTime::parse_from_rfc3339(timestamp).ok()?;
    Some(parsed.with_timezone(&tz).format("%H:%M").to_string())
}

/// Date and time (`DD/MM/YYYY HH:MM`) of an RFC 3339 timestamp in `tz`
pub fn format_game_date(timestamp: &str, tz: Tz) -> Option<String> {
    let parsed = DateTime::parse_from_rfc3339(timestamp).ok()?;
    Some(parsed.with_timezone(&tz).format("%d/%m/%Y %H:%M").to_string())
}

/// Translation key for a fixture short status, if known
pub fn status_translation_key(short: &str) -> Option<&'static str> {
    STATUS_KEYS.get(short).copied()
}

/// CSS class for a fixture short status
pub fn status_class(short: &str) -> &'static str {
    match short.to_ascii_lowercase().as_str() {
        "1h" | "2h" | "ht" | "live" | "inplay" => "live",
        "ft" | "aet" | "pen" | "finished" => "finished",
        _ => "scheduled",
    }
}

/// Lowercase a label into a CSS class fragment
pub fn sanitize_class_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.trim().chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }
    out.trim_matches('-').to_string()
}
