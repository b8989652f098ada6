//! Tolerant projection of canonical fields out of loosely-shaped video records.
//!
//! Every canonical field is described by an ordered list of lookup paths. The
//! first path that resolves to a present, non-null value wins. Accessors never
//! fail: missing or malformed values degrade to the empty string or zero.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

/// A lookup path into a record; more than one segment walks nested objects.
pub type FieldPath = &'static [&'static str];

pub const ID_PATHS: &[FieldPath] = &[&["video_id"], &["videoId"], &["id"], &["youtube_id"]];
pub const TITLE_PATHS: &[FieldPath] = &[&["title"], &["name"], &["snippet", "title"]];
pub const PERFORMER_PATHS: &[FieldPath] = &[&["performer"], &["artist"], &["comedian"]];
pub const VIEW_COUNT_PATHS: &[FieldPath] = &[
    &["view_count"],
    &["viewCount"],
    &["views"],
    &["statistics", "viewCount"],
];
pub const LIKE_COUNT_PATHS: &[FieldPath] = &[
    &["like_count"],
    &["likeCount"],
    &["likes"],
    &["statistics", "likeCount"],
];
pub const DURATION_SECONDS_PATHS: &[FieldPath] = &[
    &["duration_sec"],
    &["durationSec"],
    &["duration_seconds"],
    &["length_seconds"],
    &["lengthSeconds"],
];
/// Fallback duration sources; may hold ISO-8601 (`PT#H#M#S`) or plain seconds.
pub const DURATION_FALLBACK_PATHS: &[FieldPath] = &[&["duration"], &["contentDetails", "duration"]];
pub const PUBLISHED_PATHS: &[FieldPath] = &[
    &["published_at"],
    &["publishedAt"],
    &["published"],
    &["publish_date"],
    &["date"],
    &["snippet", "publishedAt"],
];
pub const URL_PATHS: &[FieldPath] = &[&["url"], &["video_url"], &["videoUrl"]];

const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

/// A video record of unknown provenance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    /// Wraps a JSON value; anything other than an object becomes an empty record.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self { fields },
            _ => Self::default(),
        }
    }

    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// First present, non-null value among `paths`.
    pub fn lookup(&self, paths: &[FieldPath]) -> Option<&Value> {
        resolve(&self.fields, paths)
    }

    /// External identifier; falls back to the id embedded in the record URL.
    pub fn id(&self) -> String {
        let direct = to_text(self.lookup(ID_PATHS));
        if !direct.is_empty() {
            return direct;
        }
        extract_video_id(&to_text(self.lookup(URL_PATHS))).unwrap_or_default()
    }

    pub fn title(&self) -> String {
        to_text(self.lookup(TITLE_PATHS))
    }

    pub fn performer(&self) -> String {
        to_text(self.lookup(PERFORMER_PATHS))
    }

    pub fn view_count(&self) -> u64 {
        to_count(self.lookup(VIEW_COUNT_PATHS))
    }

    pub fn like_count(&self) -> u64 {
        to_count(self.lookup(LIKE_COUNT_PATHS))
    }

    pub fn duration_seconds(&self) -> u64 {
        let direct = to_count(self.lookup(DURATION_SECONDS_PATHS));
        if direct > 0 {
            return direct;
        }
        match self.lookup(DURATION_FALLBACK_PATHS) {
            Some(Value::String(text)) if text.trim().starts_with("PT") => {
                parse_iso_duration(text).unwrap_or(0)
            }
            other => to_count(other),
        }
    }

    /// Raw publish value, untouched; normalization happens in the pipeline.
    pub fn published_raw(&self) -> Option<&Value> {
        self.lookup(PUBLISHED_PATHS)
    }

    /// Watch URL from the record, or one built from the identifier.
    pub fn watch_url(&self) -> String {
        let direct = to_text(self.lookup(URL_PATHS));
        if !direct.is_empty() {
            return direct;
        }
        let id = self.id();
        if id.is_empty() {
            String::new()
        } else {
            format!("{WATCH_URL_PREFIX}{id}")
        }
    }
}

impl From<Value> for Record {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

/// Resolves the first present, non-null value among `paths` in `fields`.
pub fn resolve<'a>(fields: &'a Map<String, Value>, paths: &[FieldPath]) -> Option<&'a Value> {
    paths.iter().find_map(|path| {
        let (first, rest) = path.split_first()?;
        let mut current = fields.get(*first)?;
        for segment in rest {
            current = current.as_object()?.get(*segment)?;
        }
        (!current.is_null()).then_some(current)
    })
}

/// Text coercion: strings are trimmed, numbers and booleans are rendered,
/// everything else is empty.
pub fn to_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.trim().to_string(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        _ => String::new(),
    }
}

/// Non-negative integer coercion. Accepts numbers, numeric strings with
/// embedded whitespace (`"1 234"`) and float text (`"12.0"`); anything else is 0.
pub fn to_count(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(number)) => number
            .as_u64()
            .or_else(|| number.as_f64().and_then(float_to_count))
            .unwrap_or(0),
        Some(Value::String(text)) => parse_count(text).unwrap_or(0),
        _ => 0,
    }
}

/// Floating point coercion with the same tolerance as [`to_count`].
pub fn to_float(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(number)) => number.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        Some(Value::String(text)) => {
            let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
            compact
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .unwrap_or(0.0)
        }
        _ => 0.0,
    }
}

fn parse_count(text: &str) -> Option<u64> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return None;
    }
    compact
        .parse::<u64>()
        .ok()
        .or_else(|| compact.parse::<f64>().ok().and_then(float_to_count))
}

fn float_to_count(value: f64) -> Option<u64> {
    (value.is_finite() && value >= 0.0).then(|| value.trunc() as u64)
}

fn iso_duration_re() -> &'static Regex {
    static ISO_DURATION_RE: OnceLock<Regex> = OnceLock::new();
    ISO_DURATION_RE.get_or_init(|| {
        Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?$").expect("valid duration regex")
    })
}

fn video_id_re() -> &'static Regex {
    static VIDEO_ID_RE: OnceLock<Regex> = OnceLock::new();
    VIDEO_ID_RE.get_or_init(|| {
        Regex::new(r"(?:v=|/shorts/|youtu\.be/)([A-Za-z0-9_-]{11})").expect("valid video id regex")
    })
}

fn bare_video_id_re() -> &'static Regex {
    static BARE_VIDEO_ID_RE: OnceLock<Regex> = OnceLock::new();
    BARE_VIDEO_ID_RE
        .get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("valid bare video id regex"))
}

/// Parses `PT#H#M#S` into seconds; `None` on overflow.
pub fn parse_iso_duration(text: &str) -> Option<u64> {
    let caps = iso_duration_re().captures(text.trim())?;
    let part = |index: usize, scale: u64| match caps.get(index) {
        Some(m) => m.as_str().parse::<u64>().ok()?.checked_mul(scale),
        None => Some(0),
    };
    part(1, 3600)?
        .checked_add(part(2, 60)?)?
        .checked_add(part(3, 1)?)
}

/// Extracts the 11-character video id from a watch, shorts or short-link URL,
/// or accepts a bare id.
pub fn extract_video_id(url_or_id: &str) -> Option<String> {
    let text = url_or_id.trim();
    if text.is_empty() {
        return None;
    }
    if bare_video_id_re().is_match(text) {
        return Some(text.to_string());
    }
    video_id_re()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
