//! Provider-neutral normalization helpers shared by the ESPN and NCAA adapters.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse an upstream score string. Absent, blank, or non-numeric → 0.
pub fn parse_score(raw: Option<&str>) -> u16 {
    raw.map(str::trim)
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(0)
}

/// Quarter label for a period number: 1–4 → `Q{n}`, 5 → `OT`, 6 → `OT2`, …
pub fn period_label(period: u8) -> String {
    match period {
        0..=4 => format!("Q{period}"),
        5 => "OT".to_string(),
        p => format!("OT{}", p - 4),
    }
}

/// Join venue name, city, and state with ", ", skipping missing segments.
/// No venue name means no venue at all.
pub fn compose_venue(name: Option<&str>, city: Option<&str>, state: Option<&str>) -> Option<String> {
    let name = name.map(str::trim).filter(|n| !n.is_empty())?;
    let parts: Vec<&str> = [Some(name), city, state]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    Some(parts.join(", "))
}

/// Normalize the date formats seen upstream to a calendar date.
///
/// Accepts ISO timestamps (`2026-02-20T17:00Z`, `2026-02-20T17:00:00Z`),
/// plain `2026-02-20`, and US-style `02/20/2026` or `02-20-2026`.
/// Timestamps keep their own calendar date; callers that need a
/// timezone-shifted date should use [`parse_timestamp`] instead.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let date_part = raw.split('T').next().unwrap_or(raw);

    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(date_part, "%m/%d/%Y"))
        .or_else(|_| NaiveDate::parse_from_str(date_part, "%m-%d-%Y"))
        .ok()
}

/// Parse an upstream timestamp into UTC. ESPN drops the seconds field
/// (`2026-02-20T17:00Z`), which RFC 3339 parsing rejects.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%MZ")
        .ok()
        .map(|naive| naive.and_utc())
}

/// True when an upstream time string means "not yet announced".
pub fn is_tbd(raw: &str) -> bool {
    let t = raw.trim();
    t.is_empty() || t.eq_ignore_ascii_case("tbd") || t.eq_ignore_ascii_case("tba")
}
