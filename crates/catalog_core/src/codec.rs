//! Mapping between [`ViewState`] and the page URL's query string.

use url::{form_urlencoded, Url};

use crate::view_state::{RangeWindow, SortKey, ViewState};

pub const SORT_PARAM: &str = "sort";
pub const RANGE_PARAM: &str = "range";
pub const PAGE_PARAM: &str = "page";
pub const SEARCH_PARAM: &str = "q";
pub const PERFORMER_PARAM: &str = "p";

const OWNED_PARAMS: &[&str] = &[SORT_PARAM, RANGE_PARAM, PAGE_PARAM, SEARCH_PARAM, PERFORMER_PARAM];

/// Decodes a query string (with or without the leading `?`) on top of `base`.
///
/// Decoding is permissive: unknown sort keys keep the baseline, range aliases
/// are normalized, an invalid page becomes 1, and search text is taken as-is.
pub fn decode_query(query: &str, base: ViewState) -> ViewState {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut state = base;
    let param = |name: &str| {
        form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    };

    if let Some(raw) = param(SORT_PARAM) {
        match SortKey::parse(&raw) {
            Some(key) => state.sort_key = key,
            None => catalog_logging::catalog_debug!("ignoring unknown sort key {:?}", raw),
        }
    }
    if let Some(raw) = param(RANGE_PARAM) {
        let range = RangeWindow::from_alias(&raw);
        if range.as_str() != raw {
            catalog_logging::catalog_debug!("range {:?} normalized to {}", raw, range.as_str());
        }
        state.range = range;
    }
    state.page = param(PAGE_PARAM)
        .as_deref()
        .and_then(parse_page)
        .unwrap_or(1);
    state.search_query = param(SEARCH_PARAM).unwrap_or_default();
    if let Some(name) = param(PERFORMER_PARAM).filter(|name| !name.is_empty()) {
        state.replace_performer(name);
    }
    state
}

fn parse_page(raw: &str) -> Option<usize> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<usize>().ok().filter(|page| *page > 0)
}

/// Canonical query string for `state`, without the leading `?`.
pub fn encode_query(state: &ViewState) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    append_state(&mut serializer, state);
    serializer.finish()
}

/// Returns `url` with its query replaced by the encoding of `state`.
/// Parameters this codec does not own are kept, in their original order.
pub fn apply_to_url(url: &Url, state: &ViewState) -> Url {
    replace_owned_query(url, &encode_query(state))
}

/// Swaps the owned parameters of `url` for those in `encoded` (as produced by
/// [`encode_query`]); foreign parameters and the fragment survive.
pub fn replace_owned_query(url: &Url, encoded: &str) -> Url {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in url
        .query_pairs()
        .filter(|(key, _)| !OWNED_PARAMS.contains(&&**key))
    {
        serializer.append_pair(&key, &value);
    }
    for (key, value) in form_urlencoded::parse(encoded.as_bytes()) {
        serializer.append_pair(&key, &value);
    }
    let mut next = url.clone();
    next.set_query(Some(&serializer.finish()));
    next
}

fn append_state(serializer: &mut form_urlencoded::Serializer<'_, String>, state: &ViewState) {
    serializer.append_pair(SORT_PARAM, state.sort_key.as_str());
    serializer.append_pair(RANGE_PARAM, state.range.as_str());
    serializer.append_pair(PAGE_PARAM, &state.page.to_string());
    if !state.search_query.is_empty() {
        serializer.append_pair(SEARCH_PARAM, &state.search_query);
    }
    if let Some(name) = state.performer_filter() {
        serializer.append_pair(PERFORMER_PARAM, name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_parsing_rejects_signs_and_zero() {
        assert_eq!(parse_page("3"), Some(3));
        assert_eq!(parse_page("+3"), None);
        assert_eq!(parse_page("-1"), None);
        assert_eq!(parse_page("0"), None);
        assert_eq!(parse_page("2x"), None);
    }
}
