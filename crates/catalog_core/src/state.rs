use catalog_logging::catalog_info;

use crate::codec::encode_query;
use crate::debounce::Debouncer;
use crate::format::{
    format_count, format_date, format_decimal, format_duration, format_minutes, format_percent,
    Locale,
};
use crate::pipeline::{run_query, PerformerSummary, QueryOptions, QueryResult};
use crate::temporal::normalize_timestamp;
use crate::view_model::{AppViewModel, ListingStatus, PerformerSummaryView, RecordRowView};
use crate::{EpochMillis, RangeWindow, RatingEntry, Record, SortKey, ViewState};

/// The two input collections, owned by the session for its lifetime.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    pub records: Vec<Record>,
    pub rating: Vec<RatingEntry>,
}

#[derive(Debug, Clone, PartialEq, Default)]
enum LoadStatus {
    #[default]
    Loading,
    Loaded(Catalog),
    Failed(String),
}

/// Rendered result of the latest pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct PageSnapshot {
    rows: Vec<RecordRowView>,
    total_matched: usize,
    page_count: usize,
    effective_sort: SortKey,
    performer: Option<PerformerSummaryView>,
    range_fallback: bool,
}

/// Session state holder: view state, inputs, and the latest query result.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    view_state: ViewState,
    options: QueryOptions,
    locale: Locale,
    load: LoadStatus,
    snapshot: PageSnapshot,
    search: Debouncer<String>,
    now_ms: EpochMillis,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ViewState::default(), QueryOptions::default(), Locale::default(), 0)
    }
}

impl AppState {
    pub fn new(
        view_state: ViewState,
        options: QueryOptions,
        locale: Locale,
        now_ms: EpochMillis,
    ) -> Self {
        Self {
            view_state,
            options,
            locale,
            load: LoadStatus::Loading,
            snapshot: PageSnapshot::default(),
            search: Debouncer::default(),
            now_ms,
            dirty: false,
        }
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view_state
    }

    pub fn now_ms(&self) -> EpochMillis {
        self.now_ms
    }

    /// Canonical query string for the current view state.
    pub fn encoded_query(&self) -> String {
        encode_query(&self.view_state)
    }

    pub fn view(&self) -> AppViewModel {
        let status = match &self.load {
            LoadStatus::Loading => ListingStatus::Loading,
            LoadStatus::Failed(message) => ListingStatus::Failed {
                message: message.clone(),
            },
            LoadStatus::Loaded(_) if self.snapshot.total_matched == 0 => ListingStatus::Empty,
            LoadStatus::Loaded(_) => ListingStatus::Ready,
        };
        AppViewModel {
            status,
            rows: self.snapshot.rows.clone(),
            total_matched: self.snapshot.total_matched,
            page_count: self.snapshot.page_count.max(1),
            current_page: self.view_state.page,
            selected_sort: self.view_state.sort_key,
            effective_sort: self.snapshot.effective_sort,
            range: self.view_state.range,
            search_query: self.view_state.search_query.clone(),
            search_pending: self.search.is_pending(),
            range_fallback: self.snapshot.range_fallback,
            performer: self.snapshot.performer.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn row(&self, index: usize) -> Option<&RecordRowView> {
        self.snapshot.rows.get(index)
    }

    pub(crate) fn is_loaded(&self) -> bool {
        matches!(self.load, LoadStatus::Loaded(_))
    }

    pub(crate) fn apply_catalog(&mut self, catalog: Catalog) {
        catalog_info!(
            "catalog loaded: {} records, {} rating rows",
            catalog.records.len(),
            catalog.rating.len()
        );
        self.load = LoadStatus::Loaded(catalog);
        self.requery();
    }

    pub(crate) fn fail_load(&mut self, message: String) {
        self.load = LoadStatus::Failed(message);
        self.snapshot = PageSnapshot::default();
        self.dirty = true;
    }

    pub(crate) fn advance_clock(&mut self, now_ms: EpochMillis) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    /// Returns false when the selection is already active.
    pub(crate) fn set_sort(&mut self, sort_key: SortKey) -> bool {
        if self.view_state.sort_key == sort_key {
            return false;
        }
        self.view_state.sort_key = sort_key;
        self.view_state.page = 1;
        true
    }

    pub(crate) fn set_range(&mut self, range: RangeWindow) -> bool {
        if self.view_state.range == range {
            return false;
        }
        self.view_state.range = range;
        self.view_state.page = 1;
        true
    }

    pub(crate) fn queue_search(&mut self, text: String, at_ms: EpochMillis) {
        self.advance_clock(at_ms);
        self.search.push(text, at_ms);
        self.dirty = true;
    }

    pub(crate) fn take_due_search(&mut self, now_ms: EpochMillis) -> Option<String> {
        self.search.poll(now_ms)
    }

    pub(crate) fn take_pending_search(&mut self) -> Option<String> {
        self.search.flush()
    }

    pub(crate) fn set_search(&mut self, text: String) -> bool {
        if self.view_state.search_query == text {
            return false;
        }
        self.view_state.search_query = text;
        self.view_state.page = 1;
        true
    }

    /// Pages are 1-based even before a query run can clamp them.
    pub(crate) fn set_page(&mut self, page: usize) -> bool {
        let page = page.max(1);
        if self.view_state.page == page {
            return false;
        }
        self.view_state.page = page;
        true
    }

    /// Re-runs the pipeline over the loaded catalog (clamping the page) and
    /// refreshes the rendered snapshot.
    pub(crate) fn requery(&mut self) {
        self.dirty = true;
        let LoadStatus::Loaded(catalog) = &self.load else {
            return;
        };
        let result = run_query(
            &catalog.records,
            &catalog.rating,
            &mut self.view_state,
            self.now_ms,
            &self.options,
        );
        self.snapshot = snapshot_from(&result, self.view_state.page_size(), self.locale);
    }
}

fn snapshot_from(result: &QueryResult<'_>, page_size: usize, locale: Locale) -> PageSnapshot {
    let offset = (result.current_page - 1) * page_size;
    let rows = result
        .page
        .iter()
        .enumerate()
        .map(|(index, record)| row_view(offset + index + 1, record, locale))
        .collect();
    PageSnapshot {
        rows,
        total_matched: result.total_matched,
        page_count: result.page_count,
        effective_sort: result.effective_sort,
        performer: result
            .performer_summary
            .as_ref()
            .map(|summary| performer_view(summary, locale)),
        range_fallback: result.range_fallback,
    }
}

fn row_view(position: usize, record: &Record, locale: Locale) -> RecordRowView {
    let view_count = record.view_count();
    RecordRowView {
        position,
        record_id: record.id(),
        title: record.title(),
        performer: record.performer(),
        view_count,
        views: format_count(view_count, locale),
        duration: format_duration(record.duration_seconds()),
        published: format_date(normalize_timestamp(record.published_raw()), locale),
        watch_url: record.watch_url(),
    }
}

fn performer_view(summary: &PerformerSummary, locale: Locale) -> PerformerSummaryView {
    let rating = summary.rating.as_ref();
    PerformerSummaryView {
        performer: summary.performer.clone(),
        matched_count: summary.matched_count,
        matched_view_sum: summary.matched_view_sum,
        matched_views: format_count(summary.matched_view_sum, locale),
        rank: rating.map(|entry| entry.rank),
        score: rating.map(|entry| format_decimal(entry.score, 2, locale)),
        like_rate: rating.map(|entry| format_percent(entry.like_rate_smooth_pct, 2, locale)),
        total_minutes: rating.map(|entry| format_minutes(entry.total_minutes, locale)),
    }
}
