use catalog_logging::catalog_debug;

use crate::state::Catalog;
use crate::{AppState, Effect, Msg, PlaybackRequest};

/// Pure update function: applies a message to state and returns any effects.
///
/// Every committed view-state change re-runs the query (which clamps the page)
/// and asks the host to replace the URL query.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::CatalogLoaded { records, rating } => {
            state.apply_catalog(Catalog { records, rating });
            // The page may have been clamped; publish the canonical URL.
            vec![replace_query(&state)]
        }
        Msg::LoadFailed(message) => {
            state.fail_load(message);
            Vec::new()
        }
        Msg::SortSelected(sort_key) => {
            let changed = state.set_sort(sort_key);
            commit(&mut state, changed)
        }
        Msg::RangeSelected(range) => {
            let changed = state.set_range(range);
            commit(&mut state, changed)
        }
        Msg::SearchInput { text, at_ms } => {
            state.queue_search(text, at_ms);
            Vec::new()
        }
        Msg::SearchCommitted => match state.take_pending_search() {
            Some(text) => {
                let changed = state.set_search(text);
                commit(&mut state, changed)
            }
            None => Vec::new(),
        },
        Msg::PageSelected(page) => {
            let changed = state.set_page(page);
            commit(&mut state, changed)
        }
        Msg::NextPage => {
            let page = state.view_state().page.saturating_add(1);
            let changed = state.set_page(page);
            commit(&mut state, changed)
        }
        Msg::PrevPage => {
            let page = state.view_state().page.saturating_sub(1).max(1);
            let changed = state.set_page(page);
            commit(&mut state, changed)
        }
        Msg::RecordSelected { index } => match state.row(index) {
            Some(row) => vec![Effect::OpenPlayback(PlaybackRequest {
                record_id: row.record_id.clone(),
                title: row.title.clone(),
                watch_url: row.watch_url.clone(),
            })],
            None => {
                catalog_debug!("ignoring selection of missing row {}", index);
                Vec::new()
            }
        },
        Msg::Tick { now_ms } => {
            state.advance_clock(now_ms);
            match state.take_due_search(now_ms) {
                Some(text) => {
                    let changed = state.set_search(text);
                    commit(&mut state, changed)
                }
                None => Vec::new(),
            }
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn commit(state: &mut AppState, changed: bool) -> Vec<Effect> {
    if !changed {
        return Vec::new();
    }
    let before = state.view_state().page;
    state.requery();
    if state.is_loaded() && state.view_state().page != before {
        catalog_debug!("page {} clamped to {}", before, state.view_state().page);
    }
    vec![replace_query(state)]
}

fn replace_query(state: &AppState) -> Effect {
    Effect::ReplaceQuery {
        query: state.encoded_query(),
    }
}
