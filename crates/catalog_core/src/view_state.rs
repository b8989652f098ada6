//! User-controllable parameters of one listing session.

/// Rows per page on the main listing.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Which listing the session shows; fixed when the session starts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListingMode {
    #[default]
    All,
    Performer(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    DateDesc,
    ViewsDesc,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::DateDesc => "date_desc",
            SortKey::ViewsDesc => "views_desc",
        }
    }

    /// Exact match only; legacy spellings are not accepted for sort keys.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "date_desc" => Some(SortKey::DateDesc),
            "views_desc" => Some(SortKey::ViewsDesc),
            _ => None,
        }
    }
}

/// Recency window anchored at query time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangeWindow {
    #[default]
    All,
    Month,
    HalfYear,
    Year,
}

/// Accepted spellings, canonical ones included. Anything else means `All`.
const RANGE_ALIASES: &[(&str, RangeWindow)] = &[
    ("1m", RangeWindow::Month),
    ("month", RangeWindow::Month),
    ("30d", RangeWindow::Month),
    ("6m", RangeWindow::HalfYear),
    ("6mo", RangeWindow::HalfYear),
    ("halfyear", RangeWindow::HalfYear),
    ("half-year", RangeWindow::HalfYear),
    ("half_year", RangeWindow::HalfYear),
    ("1y", RangeWindow::Year),
    ("year", RangeWindow::Year),
    ("12m", RangeWindow::Year),
    ("12mo", RangeWindow::Year),
];

impl RangeWindow {
    pub fn as_str(self) -> &'static str {
        match self {
            RangeWindow::All => "all",
            RangeWindow::Month => "1m",
            RangeWindow::HalfYear => "6m",
            RangeWindow::Year => "1y",
        }
    }

    /// Window length in days, `None` for the unbounded window.
    pub fn days(self) -> Option<i64> {
        match self {
            RangeWindow::All => None,
            RangeWindow::Month => Some(30),
            RangeWindow::HalfYear => Some(183),
            RangeWindow::Year => Some(365),
        }
    }

    /// Normalizes canonical values and legacy aliases; unknown input is `All`.
    pub fn from_alias(value: &str) -> Self {
        let key = value.trim().to_ascii_lowercase();
        RANGE_ALIASES
            .iter()
            .find(|(alias, _)| *alias == key)
            .map(|(_, window)| *window)
            .unwrap_or_default()
    }
}

/// The complete state one pipeline run reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    mode: ListingMode,
    pub sort_key: SortKey,
    pub range: RangeWindow,
    /// 1-based; clamped by every query run.
    pub page: usize,
    page_size: usize,
    pub search_query: String,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::all()
    }
}

impl ViewState {
    /// Main listing over every record.
    pub fn all() -> Self {
        Self::with_mode(ListingMode::All)
    }

    /// Listing restricted to one performer.
    pub fn for_performer(name: impl Into<String>) -> Self {
        Self::with_mode(ListingMode::Performer(name.into()))
    }

    fn with_mode(mode: ListingMode) -> Self {
        Self {
            mode,
            sort_key: SortKey::default(),
            range: RangeWindow::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search_query: String::new(),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn mode(&self) -> &ListingMode {
        &self.mode
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn performer_filter(&self) -> Option<&str> {
        match &self.mode {
            ListingMode::All => None,
            ListingMode::Performer(name) => Some(name),
        }
    }

    /// Fresh state with the same mode and page size; the decoding baseline.
    pub fn baseline(&self) -> Self {
        Self::with_mode(self.mode.clone()).with_page_size(self.page_size)
    }

    /// Only meaningful in performer mode; the main listing ignores it.
    pub(crate) fn replace_performer(&mut self, name: String) {
        if let ListingMode::Performer(current) = &mut self.mode {
            *current = name;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_aliases_normalize() {
        assert_eq!(RangeWindow::from_alias("month"), RangeWindow::Month);
        assert_eq!(RangeWindow::from_alias("Half-Year"), RangeWindow::HalfYear);
        assert_eq!(RangeWindow::from_alias("6mo"), RangeWindow::HalfYear);
        assert_eq!(RangeWindow::from_alias("12mo"), RangeWindow::Year);
        assert_eq!(RangeWindow::from_alias("1y"), RangeWindow::Year);
        assert_eq!(RangeWindow::from_alias("decade"), RangeWindow::All);
        assert_eq!(RangeWindow::from_alias(""), RangeWindow::All);
    }

    #[test]
    fn sort_key_requires_exact_values() {
        assert_eq!(SortKey::parse("views_desc"), Some(SortKey::ViewsDesc));
        assert_eq!(SortKey::parse("VIEWS_DESC"), None);
        assert_eq!(SortKey::parse("views"), None);
    }

    #[test]
    fn replace_performer_is_ignored_on_main_listing() {
        let mut state = ViewState::all();
        state.replace_performer("Anna".into());
        assert_eq!(state.performer_filter(), None);
    }
}
