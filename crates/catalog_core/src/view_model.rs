use crate::SortKey;
use crate::RangeWindow;

/// What the listing area should show.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListingStatus {
    /// Collections not loaded yet.
    #[default]
    Loading,
    /// Initial load failed.
    Failed { message: String },
    /// Loaded, but the current filters match nothing.
    Empty,
    Ready,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub status: ListingStatus,
    pub rows: Vec<RecordRowView>,
    pub total_matched: usize,
    pub page_count: usize,
    pub current_page: usize,
    pub selected_sort: SortKey,
    pub effective_sort: SortKey,
    pub range: RangeWindow,
    pub search_query: String,
    pub search_pending: bool,
    pub range_fallback: bool,
    pub performer: Option<PerformerSummaryView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRowView {
    /// 1-based position in the whole filtered listing.
    pub position: usize,
    pub record_id: String,
    pub title: String,
    pub performer: String,
    pub view_count: u64,
    pub views: String,
    pub duration: String,
    pub published: String,
    pub watch_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformerSummaryView {
    pub performer: String,
    pub matched_count: usize,
    pub matched_view_sum: u64,
    pub matched_views: String,
    pub rank: Option<u32>,
    pub score: Option<String>,
    pub like_rate: Option<String>,
    pub total_minutes: Option<String>,
}
