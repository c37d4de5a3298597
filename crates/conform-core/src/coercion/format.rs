//! Semantic coercions for format-refined strings
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use super::container::to_json;
use super::Coerced;
use base64::Engine as _;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::{Captures, Regex};
use serde_json::Value;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::OnceLock;
use std::time::Duration;
use url::Url;
use uuid::Uuid;

/// Date-time layouts tried, in order, after RFC 3339 and RFC 2822
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Date-only layouts tried after the date-time layouts
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d %b %Y"];

/// Scheme assumed for URLs written without one
const DEFAULT_URL_SCHEME: &str = "https";

/// Named semantic formats understood by the coercion library
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticFormat {
    DateTime,
    Date,
    Uuid,
    Email,
    Url,
    Duration,
    Ip,
    Ipv4,
    Ipv6,
    Base64,
    Hostname,
    Json,
}

impl SemanticFormat {
    /// Look up a format by name; unknown names yield `None`
    pub fn parse(name: &str) -> Option<Self> {
        let format = match name {
            "date-time" | "datetime" => SemanticFormat::DateTime,
            "date" => SemanticFormat::Date,
            "uuid" => SemanticFormat::Uuid,
            "email" => SemanticFormat::Email,
            "uri" | "url" => SemanticFormat::Url,
            "duration" => SemanticFormat::Duration,
            "ip" => SemanticFormat::Ip,
            "ipv4" => SemanticFormat::Ipv4,
            "ipv6" => SemanticFormat::Ipv6,
            "byte" | "base64" => SemanticFormat::Base64,
            "hostname" => SemanticFormat::Hostname,
            "json" => SemanticFormat::Json,
            _ => return None,
        };
        Some(format)
    }

    /// Run the coercion for this format
    pub fn coerce(&self, value: &Value) -> Option<Coerced> {
        match self {
            SemanticFormat::DateTime => to_datetime(value).map(Coerced::DateTime),
            SemanticFormat::Date => to_date(value).map(Coerced::Date),
            SemanticFormat::Uuid => to_uuid(value).map(Coerced::Uuid),
            SemanticFormat::Email => to_email(value).map(Coerced::Email),
            SemanticFormat::Url => parse_url(value).map(|(url, written)| {
                let text = url_text(&url, &written);
                Coerced::Url { url, text }
            }),
            SemanticFormat::Duration => to_duration(value).map(Coerced::Duration),
            SemanticFormat::Ip => to_ip(value).map(Coerced::Ip),
            SemanticFormat::Ipv4 => to_ipv4(value).map(|ip| Coerced::Ip(IpAddr::V4(ip))),
            SemanticFormat::Ipv6 => to_ipv6(value).map(|ip| Coerced::Ip(IpAddr::V6(ip))),
            SemanticFormat::Base64 => to_base64(value).map(Coerced::Bytes),
            SemanticFormat::Hostname => to_hostname(value).map(Coerced::Hostname),
            SemanticFormat::Json => to_json(value).map(Coerced::Json),
        }
    }
}

fn text(value: &Value) -> Option<&str> {
    value.as_str().map(str::trim).filter(|s| !s.is_empty())
}

fn builtin(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("built-in coercion pattern compiles"))
}

fn from_unix_seconds(seconds: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(seconds, 0)
}

/// Coerce to a UTC date-time
///
/// Strings are tried against the known layouts in order; an integer, or a
/// string holding one, is taken as Unix seconds.
pub fn to_datetime(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => n.as_i64().and_then(from_unix_seconds),
        Value::String(_) => {
            let s = text(value)?;

            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.with_timezone(&Utc));
            }
            if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
                return Some(dt.with_timezone(&Utc));
            }
            for layout in DATETIME_FORMATS {
                if let Ok(naive) = NaiveDateTime::parse_from_str(s, layout) {
                    return Some(naive.and_utc());
                }
            }
            for layout in DATE_FORMATS {
                if let Ok(date) = NaiveDate::parse_from_str(s, layout) {
                    return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
                }
            }

            s.parse::<i64>().ok().and_then(from_unix_seconds)
        }
        _ => None,
    }
}

/// Coerce to a calendar date
pub fn to_date(value: &Value) -> Option<NaiveDate> {
    to_datetime(value).map(|dt| dt.date_naive())
}

/// Coerce to a UUID
pub fn to_uuid(value: &Value) -> Option<Uuid> {
    Uuid::try_parse(text(value)?).ok()
}

/// Coerce to an address-only email string
///
/// Accepts a bare address or `Display Name <address>`; a display name
/// without an address is rejected.
pub fn to_email(value: &Value) -> Option<String> {
    static NAMED: OnceLock<Regex> = OnceLock::new();
    static ADDRESS: OnceLock<Regex> = OnceLock::new();

    let s = text(value)?;
    let named = builtin(&NAMED, r#"^(?:"[^"]*"|[^<>"]*)\s*<([^<>]+)>$"#);
    let address = match named.captures(s) {
        Some(caps) => caps.get(1).map(|m| m.as_str().trim())?,
        None => s,
    };

    let pattern = builtin(
        &ADDRESS,
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~.-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$",
    );
    if !pattern.is_match(address) {
        return None;
    }

    let (local, _) = address.split_once('@')?;
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return None;
    }

    Some(address.to_string())
}

/// Coerce to a URL, assuming `https` when no scheme is given
pub fn to_url(value: &Value) -> Option<Url> {
    parse_url(value).map(|(url, _)| url)
}

fn parse_url(value: &Value) -> Option<(Url, String)> {
    let s = text(value)?;
    let candidate = if s.contains("://") {
        s.to_string()
    } else {
        format!("{}://{}", DEFAULT_URL_SCHEME, s)
    };

    let url = Url::parse(&candidate).ok()?;
    match url.host_str() {
        Some(host) if !host.is_empty() => Some((url, candidate)),
        _ => None,
    }
}

/// Serialized URL, without the root `/` the parser adds to a bare host
fn url_text(url: &Url, written: &str) -> String {
    match url.as_str().strip_suffix('/') {
        Some(bare) if bare == written => bare.to_string(),
        _ => url.as_str().to_string(),
    }
}

/// Textual duration layouts recognized after the compact format
#[derive(Debug, Clone, Copy)]
enum DurationShape {
    Hours,
    Minutes,
    Seconds,
    HoursMinutes,
    ClockSeconds,
    Clock,
    Words,
}

impl DurationShape {
    fn pattern(self) -> &'static str {
        match self {
            DurationShape::Hours => r"^(\d+)h$",
            DurationShape::Minutes => r"^(\d+)m$",
            DurationShape::Seconds => r"^(\d+)s$",
            DurationShape::HoursMinutes => r"^(\d+)h\s*(\d+)m$",
            DurationShape::ClockSeconds => r"^(\d+):([0-5]\d):([0-5]\d)$",
            DurationShape::Clock => r"^(\d+):([0-5]\d)$",
            DurationShape::Words => r"(?i)^(\d+)\s*(days?|hours?|minutes?|seconds?)$",
        }
    }

    fn seconds(self, caps: &Captures<'_>) -> Option<u64> {
        let number = |index: usize| -> Option<u64> { caps.get(index)?.as_str().parse().ok() };

        match self {
            DurationShape::Hours => number(1)?.checked_mul(3600),
            DurationShape::Minutes => number(1)?.checked_mul(60),
            DurationShape::Seconds => number(1),
            DurationShape::HoursMinutes => {
                number(1)?.checked_mul(3600)?.checked_add(number(2)?.checked_mul(60)?)
            }
            DurationShape::ClockSeconds => number(1)?
                .checked_mul(3600)?
                .checked_add(number(2)? * 60 + number(3)?),
            DurationShape::Clock => number(1)?.checked_mul(3600)?.checked_add(number(2)? * 60),
            DurationShape::Words => {
                let unit = caps.get(2)?.as_str().to_ascii_lowercase();
                let scale = match unit.trim_end_matches('s') {
                    "day" => 86_400,
                    "hour" => 3_600,
                    "minute" => 60,
                    "second" => 1,
                    _ => return None,
                };
                number(1)?.checked_mul(scale)
            }
        }
    }
}

fn duration_rules() -> &'static [(Regex, DurationShape)] {
    static RULES: OnceLock<Vec<(Regex, DurationShape)>> = OnceLock::new();

    RULES.get_or_init(|| {
        [
            DurationShape::Hours,
            DurationShape::Minutes,
            DurationShape::Seconds,
            DurationShape::HoursMinutes,
            DurationShape::ClockSeconds,
            DurationShape::Clock,
            DurationShape::Words,
        ]
        .into_iter()
        .map(|shape| {
            let regex = Regex::new(shape.pattern()).expect("built-in duration pattern compiles");
            (regex, shape)
        })
        .collect()
    })
}

fn millis(amount: f64) -> Option<Duration> {
    if amount.is_finite() && amount >= 0.0 {
        Duration::try_from_secs_f64(amount / 1000.0).ok()
    } else {
        None
    }
}

/// Coerce to a duration
///
/// Tries the compact machine format (`1h30m`, `250ms`) first, then the
/// `Nh`/`Nm`/`Ns`/`NhNm`/`HH:MM`/`HH:MM:SS`/`N unit(s)` table. A bare number
/// is taken as milliseconds.
pub fn to_duration(value: &Value) -> Option<Duration> {
    match value {
        Value::Number(n) => match n.as_u64() {
            Some(ms) => Some(Duration::from_millis(ms)),
            None => n.as_f64().and_then(millis),
        },
        Value::String(_) => {
            let s = text(value)?;

            if let Ok(duration) = humantime::parse_duration(s) {
                return Some(duration);
            }
            for (pattern, shape) in duration_rules() {
                if let Some(caps) = pattern.captures(s) {
                    return shape.seconds(&caps).map(Duration::from_secs);
                }
            }

            match s.parse::<u64>() {
                Ok(ms) => Some(Duration::from_millis(ms)),
                Err(_) => s.parse::<f64>().ok().and_then(millis),
            }
        }
        _ => None,
    }
}

/// Coerce to an IP address of either family
pub fn to_ip(value: &Value) -> Option<IpAddr> {
    text(value)?.parse().ok()
}

/// Coerce to an IPv4 address, rejecting IPv6 text
pub fn to_ipv4(value: &Value) -> Option<Ipv4Addr> {
    text(value)?.parse().ok()
}

/// Coerce to an IPv6 address, rejecting IPv4 and IPv4-mapped addresses
pub fn to_ipv6(value: &Value) -> Option<Ipv6Addr> {
    let ip: Ipv6Addr = text(value)?.parse().ok()?;
    match ip.to_ipv4_mapped() {
        Some(_) => None,
        None => Some(ip),
    }
}

/// Decode base64 text, trying the standard, URL-safe, and unpadded URL-safe alphabets
pub fn to_base64(value: &Value) -> Option<Vec<u8>> {
    use base64::engine::general_purpose::{STANDARD, URL_SAFE, URL_SAFE_NO_PAD};

    let s = value.as_str()?.trim();
    STANDARD
        .decode(s)
        .or_else(|_| URL_SAFE.decode(s))
        .or_else(|_| URL_SAFE_NO_PAD.decode(s))
        .ok()
}

/// Validate an RFC 1123 hostname
pub fn to_hostname(value: &Value) -> Option<String> {
    let s = text(value)?;
    let name = s.strip_suffix('.').unwrap_or(s);

    if name.is_empty() || name.len() > 253 {
        return None;
    }

    let labels_ok = name.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
    });

    labels_ok.then(|| s.to_string())
}
