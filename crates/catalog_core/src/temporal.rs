//! Normalization of arbitrary publish timestamps into epoch milliseconds.
//!
//! Strings run through [`RULES`] in order. A rule either resolves an instant,
//! rejects the input outright, rewrites the working text for the rules after
//! it, or passes. The first resolved instant wins; running off the end of the
//! table means the value is unparseable.

use std::borrow::Cow;
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use serde_json::Value;

/// Milliseconds since the Unix epoch, UTC.
pub type EpochMillis = i64;

/// Numbers above this are already milliseconds.
pub const MILLIS_THRESHOLD: f64 = 1e12;
/// Numbers above this (and not above [`MILLIS_THRESHOLD`]) are seconds.
pub const SECONDS_THRESHOLD: f64 = 1e9;
/// Largest representable instant magnitude (±100 000 000 days).
const MAX_INSTANT_MS: f64 = 8.64e15;

/// Result of applying one rule to the working text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    Instant(EpochMillis),
    Reject,
    Rewrite(String),
    Pass,
}

/// One named step of the parsing cascade.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    apply: fn(&str) -> RuleOutcome,
}

impl Rule {
    pub fn apply(&self, input: &str) -> RuleOutcome {
        (self.apply)(input)
    }
}

pub static RULES: &[Rule] = &[
    Rule { name: "epoch_digits", apply: epoch_digits },
    Rule { name: "embedded_iso_date", apply: embedded_iso_date },
    Rule { name: "dotted_date", apply: dotted_date },
    Rule { name: "space_separated_time", apply: space_separated_time },
    Rule { name: "bare_iso_date", apply: bare_iso_date },
    Rule { name: "fraction_and_offset", apply: fraction_and_offset },
    Rule { name: "assume_utc", apply: assume_utc },
    Rule { name: "general", apply: general },
];

/// Normalizes a raw JSON timestamp. `None` means unparseable.
pub fn normalize_timestamp(raw: Option<&Value>) -> Option<EpochMillis> {
    match raw? {
        Value::Number(number) => number.as_f64().and_then(from_epoch_number),
        Value::String(text) => normalize_text(text),
        _ => None,
    }
}

/// Applies the numeric magnitude rule: milliseconds above 1e12, seconds above
/// 1e9, anything smaller is ambiguous and rejected.
pub fn from_epoch_number(value: f64) -> Option<EpochMillis> {
    if !value.is_finite() {
        return None;
    }
    let millis = if value > MILLIS_THRESHOLD {
        value
    } else if value > SECONDS_THRESHOLD {
        value * 1000.0
    } else {
        return None;
    };
    (millis <= MAX_INSTANT_MS).then(|| millis.trunc() as EpochMillis)
}

/// Normalizes textual timestamps through the rule cascade.
pub fn normalize_text(raw: &str) -> Option<EpochMillis> {
    let mut working: Cow<'_, str> = Cow::Borrowed(raw.trim());
    if working.is_empty() {
        return None;
    }
    for rule in RULES {
        match rule.apply(&working) {
            RuleOutcome::Instant(millis) => return Some(millis),
            RuleOutcome::Reject => return None,
            RuleOutcome::Rewrite(next) => working = Cow::Owned(next),
            RuleOutcome::Pass => {}
        }
    }
    None
}

fn regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("valid timestamp regex"))
}

fn iso_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r"(\d{4})-(\d{2})-(\d{2})")
}

fn dotted_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r"(\d{2})\.(\d{2})\.(\d{4})")
}

fn space_time_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r"^(\d{4}-\d{2}-\d{2}) (\d{2}:\d{2}(?::\d{2})?)")
}

fn bare_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r"^(\d{4})-(\d{2})-(\d{2})$")
}

fn decimal_comma_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r"(T\d{2}:\d{2}:\d{2}),(\d+)")
}

fn long_fraction_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r"(T\d{2}:\d{2}:\d{2}\.\d{3})\d+")
}

fn compact_offset_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r"(T\d{2}:\d{2}(?::\d{2}(?:\.\d+)?)?)([+-]\d{2})(\d{2})$")
}

fn zoneless_datetime_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}(?::\d{2}(?:\.\d+)?)?$")
}

fn utc_midnight(year: &str, month: &str, day: &str) -> Option<EpochMillis> {
    let date = NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight).timestamp_millis())
}

fn resolved(instant: Option<EpochMillis>) -> RuleOutcome {
    instant.map_or(RuleOutcome::Pass, RuleOutcome::Instant)
}

fn epoch_digits(input: &str) -> RuleOutcome {
    if !input.bytes().all(|b| b.is_ascii_digit()) {
        return RuleOutcome::Pass;
    }
    match input.parse::<f64>().ok().and_then(from_epoch_number) {
        Some(millis) => RuleOutcome::Instant(millis),
        None => RuleOutcome::Reject,
    }
}

/// A date buried in other text (`"uploaded 2025-12-22 by ..."`). Dates that
/// open the string are left to the later rules.
fn embedded_iso_date(input: &str) -> RuleOutcome {
    match iso_date_re().captures(input) {
        Some(caps) if caps.get(0).is_some_and(|m| m.start() > 0) => {
            resolved(utc_midnight(&caps[1], &caps[2], &caps[3]))
        }
        _ => RuleOutcome::Pass,
    }
}

fn dotted_date(input: &str) -> RuleOutcome {
    match dotted_date_re().captures(input) {
        Some(caps) => resolved(utc_midnight(&caps[3], &caps[2], &caps[1])),
        None => RuleOutcome::Pass,
    }
}

fn space_separated_time(input: &str) -> RuleOutcome {
    if space_time_re().is_match(input) {
        RuleOutcome::Rewrite(space_time_re().replace(input, "${1}T${2}").into_owned())
    } else {
        RuleOutcome::Pass
    }
}

fn bare_iso_date(input: &str) -> RuleOutcome {
    match bare_date_re().captures(input) {
        Some(caps) => resolved(utc_midnight(&caps[1], &caps[2], &caps[3])),
        None => RuleOutcome::Pass,
    }
}

fn fraction_and_offset(input: &str) -> RuleOutcome {
    let text = decimal_comma_re().replace(input, "${1}.${2}");
    let text = long_fraction_re().replace(&text, "${1}").into_owned();
    let text = compact_offset_re()
        .replace(&text, "${1}${2}:${3}")
        .into_owned();
    if text == input {
        RuleOutcome::Pass
    } else {
        RuleOutcome::Rewrite(text)
    }
}

fn assume_utc(input: &str) -> RuleOutcome {
    if zoneless_datetime_re().is_match(input) {
        RuleOutcome::Rewrite(format!("{input}Z"))
    } else {
        RuleOutcome::Pass
    }
}

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const NAIVE_DATE_FORMATS: &[&str] = &["%Y/%m/%d", "%B %d, %Y", "%b %d, %Y", "%d %B %Y", "%d %b %Y"];

/// Last resort: the formats a general purpose date parser understands.
fn general(input: &str) -> RuleOutcome {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return RuleOutcome::Instant(parsed.timestamp_millis());
    }
    if let Ok(parsed) = DateTime::parse_from_str(input, "%Y-%m-%dT%H:%M%:z") {
        return RuleOutcome::Instant(parsed.timestamp_millis());
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(input) {
        return RuleOutcome::Instant(parsed.timestamp_millis());
    }
    let naive = input.strip_suffix('Z').unwrap_or(input);
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(naive, format) {
            return RuleOutcome::Instant(Utc.from_utc_datetime(&parsed).timestamp_millis());
        }
    }
    for format in NAIVE_DATE_FORMATS {
        if let Some(midnight) = NaiveDate::parse_from_str(input, format)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
        {
            return RuleOutcome::Instant(Utc.from_utc_datetime(&midnight).timestamp_millis());
        }
    }
    RuleOutcome::Pass
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEC_22_2025: EpochMillis = 1_766_361_600_000;

    fn rule(name: &str) -> Rule {
        *RULES
            .iter()
            .find(|rule| rule.name == name)
            .expect("rule exists")
    }

    #[test]
    fn rule_order_is_stable() {
        let names: Vec<_> = RULES.iter().map(|rule| rule.name).collect();
        assert_eq!(
            names,
            vec![
                "epoch_digits",
                "embedded_iso_date",
                "dotted_date",
                "space_separated_time",
                "bare_iso_date",
                "fraction_and_offset",
                "assume_utc",
                "general",
            ]
        );
    }

    #[test]
    fn epoch_digits_rejects_small_numbers() {
        assert_eq!(rule("epoch_digits").apply("12345"), RuleOutcome::Reject);
        assert_eq!(
            rule("epoch_digits").apply("1766361600"),
            RuleOutcome::Instant(DEC_22_2025)
        );
        assert_eq!(rule("epoch_digits").apply("2025-12-22"), RuleOutcome::Pass);
    }

    #[test]
    fn embedded_date_ignores_leading_dates() {
        assert_eq!(
            rule("embedded_iso_date").apply("2025-12-22T10:00:00Z"),
            RuleOutcome::Pass
        );
        assert_eq!(
            rule("embedded_iso_date").apply("uploaded 2025-12-22 at noon"),
            RuleOutcome::Instant(DEC_22_2025)
        );
    }

    #[test]
    fn dotted_date_reorders_day_and_month() {
        assert_eq!(
            rule("dotted_date").apply("22.12.2025"),
            RuleOutcome::Instant(DEC_22_2025)
        );
        assert_eq!(rule("dotted_date").apply("31.02.2025"), RuleOutcome::Pass);
    }

    #[test]
    fn space_separated_time_gets_t_separator() {
        assert_eq!(
            rule("space_separated_time").apply("2025-12-22 10:30:00"),
            RuleOutcome::Rewrite("2025-12-22T10:30:00".into())
        );
        assert_eq!(
            rule("space_separated_time").apply("2025-12-22 10:30"),
            RuleOutcome::Rewrite("2025-12-22T10:30".into())
        );
    }

    #[test]
    fn fraction_and_offset_rewrites_all_three_quirks() {
        assert_eq!(
            rule("fraction_and_offset").apply("2025-12-22T10:30:00,1234567+0200"),
            RuleOutcome::Rewrite("2025-12-22T10:30:00.123+02:00".into())
        );
        assert_eq!(
            rule("fraction_and_offset").apply("2025-12-22T10:30:00Z"),
            RuleOutcome::Pass
        );
    }

    #[test]
    fn assume_utc_only_touches_zoneless_values() {
        assert_eq!(
            rule("assume_utc").apply("2025-12-22T10:30"),
            RuleOutcome::Rewrite("2025-12-22T10:30Z".into())
        );
        assert_eq!(
            rule("assume_utc").apply("2025-12-22T10:30:00+02:00"),
            RuleOutcome::Pass
        );
    }

    #[test]
    fn general_understands_rfc2822_and_month_names() {
        assert_eq!(
            rule("general").apply("Mon, 22 Dec 2025 00:00:00 +0000"),
            RuleOutcome::Instant(DEC_22_2025)
        );
        assert_eq!(
            rule("general").apply("December 22, 2025"),
            RuleOutcome::Instant(DEC_22_2025)
        );
        assert_eq!(rule("general").apply("soon"), RuleOutcome::Pass);
    }
}
