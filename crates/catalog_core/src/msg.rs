use crate::{EpochMillis, RangeWindow, RatingEntry, Record, SortKey};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Both input collections arrived.
    CatalogLoaded {
        records: Vec<Record>,
        rating: Vec<RatingEntry>,
    },
    /// Initial load failed; the message names the resource and status.
    LoadFailed(String),
    /// User picked a sort order.
    SortSelected(SortKey),
    /// User picked a recency window.
    RangeSelected(RangeWindow),
    /// User typed into the search box (debounced).
    SearchInput { text: String, at_ms: EpochMillis },
    /// Commit pending search text immediately (e.g. Enter pressed).
    SearchCommitted,
    /// User clicked a page button.
    PageSelected(usize),
    NextPage,
    PrevPage,
    /// User picked a row of the current page (0-based).
    RecordSelected { index: usize },
    /// Clock tick; commits debounced input whose window elapsed.
    Tick { now_ms: EpochMillis },
    /// Input that asks for nothing, such as an empty command line.
    NoOp,
}
