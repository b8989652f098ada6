//! Catalog core: record normalization, the listing query pipeline, URL view
//! state, display formatting, and the pure session state machine around them.
pub mod codec;
mod debounce;
mod effect;
pub mod format;
mod msg;
pub mod pipeline;
mod rating;
pub mod record;
mod state;
pub mod temporal;
mod update;
mod view_model;
mod view_state;

pub use codec::{apply_to_url, decode_query, encode_query, replace_owned_query};
pub use debounce::{Debouncer, SEARCH_DEBOUNCE_MS};
pub use effect::{Effect, PlaybackRequest};
pub use format::Locale;
pub use msg::Msg;
pub use pipeline::{
    effective_sort, run_query, PerformerSummary, QueryOptions, QueryResult, RangePolicy,
};
pub use rating::{find_rating, RatingEntry};
pub use record::Record;
pub use state::{AppState, Catalog};
pub use temporal::{normalize_timestamp, EpochMillis};
pub use update::update;
pub use view_model::{AppViewModel, ListingStatus, PerformerSummaryView, RecordRowView};
pub use view_state::{ListingMode, RangeWindow, SortKey, ViewState, DEFAULT_PAGE_SIZE};
