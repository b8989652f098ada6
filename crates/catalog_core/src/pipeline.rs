//! Filter, sort and paginate a record collection according to a [`ViewState`].

use std::cell::OnceCell;
use std::cmp::Reverse;

use catalog_logging::catalog_debug;

use crate::rating::{find_rating, RatingEntry};
use crate::record::Record;
use crate::temporal::{normalize_timestamp, EpochMillis};
use crate::view_state::{RangeWindow, SortKey, ViewState};

pub const DAY_MS: EpochMillis = 86_400_000;

/// What to do when a recency window filters every remaining record out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangePolicy {
    /// Records outside the window (or without a date) are dropped, even if
    /// nothing is left.
    #[default]
    Strict,
    /// When the window would empty a non-empty set, ignore it for that run.
    FallbackWhenEmpty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryOptions {
    pub range_policy: RangePolicy,
}

/// Aggregate over the filtered (pre-pagination) set in performer mode.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformerSummary {
    pub performer: String,
    pub matched_count: usize,
    pub matched_view_sum: u64,
    pub rating: Option<RatingEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult<'a> {
    pub page: Vec<&'a Record>,
    pub total_matched: usize,
    pub page_count: usize,
    pub current_page: usize,
    pub effective_sort: SortKey,
    pub performer_summary: Option<PerformerSummary>,
    /// Set when [`RangePolicy::FallbackWhenEmpty`] dropped the window.
    pub range_fallback: bool,
}

impl QueryResult<'_> {
    pub fn is_empty(&self) -> bool {
        self.total_matched == 0
    }
}

/// A record with the projections the pipeline compares on; the publish
/// instant is only normalized when a stage asks for it.
struct Candidate<'a> {
    record: &'a Record,
    title: String,
    performer: String,
    views: u64,
    published: OnceCell<Option<EpochMillis>>,
}

impl<'a> Candidate<'a> {
    fn project(record: &'a Record) -> Self {
        Self {
            record,
            title: record.title(),
            performer: record.performer(),
            views: record.view_count(),
            published: OnceCell::new(),
        }
    }

    fn published(&self) -> Option<EpochMillis> {
        *self
            .published
            .get_or_init(|| normalize_timestamp(self.record.published_raw()))
    }
}

/// Effective sort: any recency window forces views-descending.
pub fn effective_sort(state: &ViewState) -> SortKey {
    if state.range == RangeWindow::All {
        state.sort_key
    } else {
        SortKey::ViewsDesc
    }
}

/// Runs the query, clamping `state.page` into `[1, page_count]`.
///
/// Never fails: malformed fields fall back to defaults and undated records are
/// simply excluded from windowed results.
pub fn run_query<'a>(
    records: &'a [Record],
    rating: &[RatingEntry],
    state: &mut ViewState,
    now_ms: EpochMillis,
    options: &QueryOptions,
) -> QueryResult<'a> {
    let mut matched: Vec<Candidate<'a>> = records.iter().map(Candidate::project).collect();

    if let Some(performer) = state.performer_filter() {
        let wanted = performer.to_lowercase();
        matched.retain(|candidate| candidate.performer.to_lowercase() == wanted);
    }

    let mut range_fallback = false;
    if let Some(days) = state.range.days() {
        let cutoff = now_ms - days * DAY_MS;
        let in_window = |candidate: &Candidate<'_>| {
            candidate
                .published()
                .is_some_and(|published| published >= cutoff)
        };
        let undated = matched
            .iter()
            .filter(|candidate| candidate.published().is_none())
            .count();
        if undated > 0 {
            catalog_debug!("{} records without a usable publish date", undated);
        }
        let windowed_empty = !matched.is_empty() && !matched.iter().any(in_window);
        if windowed_empty && options.range_policy == RangePolicy::FallbackWhenEmpty {
            catalog_debug!(
                "range {} matched nothing; falling back to the full set",
                state.range.as_str()
            );
            range_fallback = true;
        } else {
            matched.retain(in_window);
        }
    }

    let needle = state.search_query.trim().to_lowercase();
    if !needle.is_empty() {
        matched.retain(|candidate| {
            candidate.title.to_lowercase().contains(&needle)
                || candidate.performer.to_lowercase().contains(&needle)
        });
    }

    let sort = effective_sort(state);
    match sort {
        SortKey::ViewsDesc => matched.sort_by_key(|candidate| Reverse(candidate.views)),
        SortKey::DateDesc => {
            matched.sort_by_key(|candidate| Reverse(candidate.published().unwrap_or(0)))
        }
    }

    let total_matched = matched.len();
    let page_size = state.page_size().max(1);
    let page_count = total_matched.div_ceil(page_size).max(1);
    state.page = state.page.clamp(1, page_count);

    let performer_summary = state.performer_filter().map(|performer| PerformerSummary {
        performer: performer.to_string(),
        matched_count: total_matched,
        matched_view_sum: matched.iter().map(|candidate| candidate.views).sum(),
        rating: find_rating(rating, performer).cloned(),
    });

    let page = matched
        .iter()
        .skip((state.page - 1) * page_size)
        .take(page_size)
        .map(|candidate| candidate.record)
        .collect();

    catalog_debug!(
        "query matched {} of {} records; page {}/{} sorted by {}",
        total_matched,
        records.len(),
        state.page,
        page_count,
        sort.as_str()
    );

    QueryResult {
        page,
        total_matched,
        page_count,
        current_page: state.page,
        effective_sort: sort,
        performer_summary,
        range_fallback,
    }
}
