//! Built-in leaf type predicates
//!
//! Every built-in takes exactly one value and returns pass/fail. None of
//! them recurse into arrays or objects; recursion belongs to the Matcher.

use std::net::IpAddr;
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate};
use regex::Regex;
use serde_json::Value;
use uuid::Uuid;

use super::{RegistryEntry, TypeRegistry};

/// Installs every built-in predicate into a fresh registry.
pub(super) fn install(registry: &mut TypeRegistry) {
    leaf(registry, "string", is_string);
    leaf(registry, "text", is_string);
    leaf(registry, "number", is_number);
    leaf(registry, "integer", is_integer);
    leaf(registry, "float", is_number);
    leaf(registry, "boolean", is_boolean);
    leaf(registry, "array", is_array);
    leaf(registry, "object", is_object);
    leaf(registry, "finite", is_finite);
    leaf(registry, "empty", is_empty);
    leaf(registry, "notEmpty", is_not_empty);
    leaf(registry, "date", is_date);
    leaf(registry, "datetime", is_datetime);
    leaf(registry, "email", is_email);
    leaf(registry, "url", is_url);
    leaf(registry, "ip", is_ip);
    leaf(registry, "uuid", is_uuid);
    leaf(registry, "alphanumeric", is_alphanumeric);
}

fn leaf(registry: &mut TypeRegistry, name: &str, predicate: fn(&Value) -> bool) {
    registry.install_predicate(name, predicate);
}

fn is_string(value: &Value) -> bool {
    value.is_string()
}

fn is_number(value: &Value) -> bool {
    value.is_number()
}

fn is_integer(value: &Value) -> bool {
    value.is_i64() || value.is_u64()
}

fn is_boolean(value: &Value) -> bool {
    value.is_boolean()
}

fn is_array(value: &Value) -> bool {
    value.is_array()
}

fn is_object(value: &Value) -> bool {
    value.is_object()
}

fn is_finite(value: &Value) -> bool {
    value.as_f64().is_some_and(f64::is_finite)
}

/// Empty string, empty array, empty object, or null.
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(entries) => entries.is_empty(),
        _ => false,
    }
}

fn is_not_empty(value: &Value) -> bool {
    !is_empty(value)
}

fn is_date(value: &Value) -> bool {
    value.as_str().is_some_and(|s| parse_temporal(s).is_some())
}

fn is_datetime(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|s| DateTime::parse_from_rfc3339(s).is_ok())
}

fn is_email(value: &Value) -> bool {
    value.as_str().is_some_and(|s| email_pattern().is_match(s))
}

fn is_url(value: &Value) -> bool {
    value.as_str().is_some_and(|s| url_pattern().is_match(s))
}

fn is_ip(value: &Value) -> bool {
    value.as_str().is_some_and(|s| s.parse::<IpAddr>().is_ok())
}

fn is_uuid(value: &Value) -> bool {
    value.as_str().is_some_and(|s| Uuid::parse_str(s).is_ok())
}

fn is_alphanumeric(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric()))
}

/// Parses a calendar date or an RFC 3339 timestamp into a comparable point
/// in time. Shared with the date-comparison rules.
pub(crate) fn parse_temporal(s: &str) -> Option<chrono::NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
            .expect("static pattern compiles")
    })
}

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://[^\s]+$").expect("static pattern compiles")
    })
}

impl TypeRegistry {
    // Direct insertion; a fresh registry has no bindings to conflict with.
    fn install_predicate(&mut self, name: &str, predicate: fn(&Value) -> bool) {
        self.entries.insert(
            name.to_string(),
            RegistryEntry::Predicate(std::sync::Arc::new(predicate)),
        );
    }
}
