//! Locale-aware display formatting. Pure functions only.

use chrono::{DateTime, Utc};

use crate::temporal::EpochMillis;

/// Placeholder shown for values that cannot be rendered.
pub const MISSING: &str = "—";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    /// Ukrainian: `1 234 567`, `3,5`, `22.12.2025`.
    #[default]
    Uk,
    /// English: `1,234,567`, `3.5`, `2025-12-22`.
    En,
}

impl Locale {
    /// Accepts BCP-47-ish tags (`uk`, `uk-UA`, `en-US`). Unknown tags map to `Uk`.
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "en" => Locale::En,
            _ => Locale::Uk,
        }
    }

    fn group_separator(self) -> char {
        match self {
            Locale::Uk => '\u{a0}',
            Locale::En => ',',
        }
    }

    fn decimal_separator(self) -> char {
        match self {
            Locale::Uk => ',',
            Locale::En => '.',
        }
    }
}

/// Integer with thousands grouping.
pub fn format_count(value: u64, locale: Locale) -> String {
    group_digits(&value.to_string(), locale.group_separator())
}

/// Fixed-point decimal with grouping on the integer part.
pub fn format_decimal(value: f64, digits: usize, locale: Locale) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }
    let fixed = format!("{:.*}", digits, value.abs());
    let (integer, fraction) = match fixed.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (fixed.as_str(), None),
    };
    let mut out = String::new();
    if value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        out.push('-');
    }
    out.push_str(&group_digits(integer, locale.group_separator()));
    if let Some(fraction) = fraction {
        out.push(locale.decimal_separator());
        out.push_str(fraction);
    }
    out
}

/// Percentage from a value already expressed in percent.
pub fn format_percent(percent: f64, digits: usize, locale: Locale) -> String {
    format!("{}%", format_decimal(percent, digits, locale))
}

/// Short form for large counts: `950`, `1.2K`, `3.4M`, `1.1B` (or the Ukrainian
/// abbreviations).
pub fn format_compact(value: u64, locale: Locale) -> String {
    const STEPS: &[(f64, &str, &str)] = &[
        (1e9, "B", "\u{a0}млрд"),
        (1e6, "M", "\u{a0}млн"),
        (1e3, "K", "\u{a0}тис."),
    ];
    let raw = value as f64;
    for (scale, en, uk) in STEPS {
        if raw >= *scale {
            let suffix = match locale {
                Locale::En => en,
                Locale::Uk => uk,
            };
            let scaled = format_decimal(raw / scale, 1, locale);
            let trimmed = scaled
                .strip_suffix(&format!("{}0", locale.decimal_separator()))
                .unwrap_or(&scaled);
            return format!("{trimmed}{suffix}");
        }
    }
    value.to_string()
}

/// `H:MM:SS` for an hour or more, `M:SS` otherwise.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

/// Whole minutes with a localized unit.
pub fn format_minutes(minutes: f64, locale: Locale) -> String {
    let unit = match locale {
        Locale::Uk => "хв",
        Locale::En => "min",
    };
    format!("{}\u{a0}{unit}", format_decimal(minutes.round(), 0, locale))
}

/// Calendar date (UTC) of an instant; [`MISSING`] when undated.
pub fn format_date(instant: Option<EpochMillis>, locale: Locale) -> String {
    let Some(date) = instant.and_then(DateTime::<Utc>::from_timestamp_millis) else {
        return MISSING.to_string();
    };
    match locale {
        Locale::Uk => date.format("%d.%m.%Y").to_string(),
        Locale::En => date.format("%Y-%m-%d").to_string(),
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.chars().count();
    let mut out = String::with_capacity(digits.len() + len / 3 * separator.len_utf8());
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}
