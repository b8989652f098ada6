use catalog_core::normalize_timestamp;
use catalog_core::temporal::{from_epoch_number, normalize_text};
use serde_json::json;

const DEC_22_2025: i64 = 1_766_361_600_000;

#[test]
fn seconds_and_millis_resolve_to_the_same_instant() {
    let seconds = normalize_timestamp(Some(&json!(1_700_000_000)));
    let millis = normalize_timestamp(Some(&json!(1_700_000_000_000_i64)));
    assert_eq!(seconds, Some(1_700_000_000_000));
    assert_eq!(seconds, millis);
}

#[test]
fn small_numbers_are_ambiguous() {
    assert_eq!(from_epoch_number(1e9), None);
    assert_eq!(from_epoch_number(12.0), None);
    assert_eq!(from_epoch_number(f64::NAN), None);
    assert_eq!(normalize_timestamp(Some(&json!(-1_700_000_000))), None);
    assert_eq!(normalize_text("1000000000"), None);
}

#[test]
fn digit_strings_follow_the_numeric_rule() {
    assert_eq!(normalize_text("1700000000"), Some(1_700_000_000_000));
    assert_eq!(normalize_text("1700000000000"), Some(1_700_000_000_000));
    assert_eq!(normalize_text("20251222"), None);
}

#[test]
fn date_spellings_agree_on_utc_midnight() {
    assert_eq!(normalize_text("2025-12-22"), Some(DEC_22_2025));
    assert_eq!(normalize_text("2025-12-22T00:00:00Z"), Some(DEC_22_2025));
    assert_eq!(normalize_text("22.12.2025"), Some(DEC_22_2025));
    assert_eq!(normalize_text("  22.12.2025 19:30 "), Some(DEC_22_2025));
    assert_eq!(normalize_text("published 2025-12-22 (re-upload)"), Some(DEC_22_2025));
}

#[test]
fn space_separated_and_zoneless_times_are_utc() {
    let expected = DEC_22_2025 + 10 * 3_600_000 + 30 * 60_000;
    assert_eq!(normalize_text("2025-12-22 10:30:00"), Some(expected));
    assert_eq!(normalize_text("2025-12-22T10:30:00"), Some(expected));
    assert_eq!(normalize_text("2025-12-22T10:30"), Some(expected));
}

#[test]
fn fractions_commas_and_compact_offsets_are_repaired() {
    let base = DEC_22_2025 + 10 * 3_600_000;
    assert_eq!(
        normalize_text("2025-12-22T10:00:00,250Z"),
        Some(base + 250)
    );
    assert_eq!(
        normalize_text("2025-12-22T10:00:00.123456789Z"),
        Some(base + 123)
    );
    assert_eq!(
        normalize_text("2025-12-22T12:00:00+0200"),
        Some(base)
    );
    assert_eq!(
        normalize_text("2025-12-22 12:00:00,5+0200"),
        Some(base + 500)
    );
}

#[test]
fn unparseable_values_yield_none() {
    assert_eq!(normalize_text("not a date"), None);
    assert_eq!(normalize_text(""), None);
    assert_eq!(normalize_text("2025-13-45"), None);
    assert_eq!(normalize_timestamp(Some(&json!(true))), None);
    assert_eq!(normalize_timestamp(Some(&json!({"at": 1}))), None);
    assert_eq!(normalize_timestamp(None), None);
}

#[test]
fn space_separated_time_without_seconds_is_utc() {
    let half_past_ten = DEC_22_2025 + 10 * 3_600_000 + 30 * 60_000;
    assert_eq!(normalize_text("2025-12-22 10:30"), Some(half_past_ten));
    assert_eq!(normalize_text("2025-12-22 10:30:00"), Some(half_past_ten));
    assert_eq!(
        normalize_text("2025-12-22 12:30+02:00"),
        Some(half_past_ten)
    );
}
