use catalog_core::{
    apply_to_url, decode_query, encode_query, RangeWindow, SortKey, ViewState,
};
use pretty_assertions::assert_eq;
use url::Url;

#[test]
fn decode_reads_every_parameter() {
    let state = decode_query(
        "?sort=views_desc&range=halfyear&page=4&q=%D0%BA%D0%BE%D0%BC%D1%96%D0%BA+live",
        ViewState::all(),
    );
    assert_eq!(state.sort_key, SortKey::ViewsDesc);
    assert_eq!(state.range, RangeWindow::HalfYear);
    assert_eq!(state.page, 4);
    assert_eq!(state.search_query, "комік live");
}

#[test]
fn decode_is_permissive_about_bad_values() {
    let mut base = ViewState::all();
    base.sort_key = SortKey::ViewsDesc;
    let state = decode_query("sort=popular&range=forever&page=-2", base);
    assert_eq!(state.sort_key, SortKey::ViewsDesc);
    assert_eq!(state.range, RangeWindow::All);
    assert_eq!(state.page, 1);
    assert_eq!(state.search_query, "");

    let state = decode_query("", ViewState::all());
    assert_eq!(state, ViewState::all());
}

#[test]
fn decode_keeps_search_text_untrimmed() {
    let state = decode_query("q=%20spaced%20", ViewState::all());
    assert_eq!(state.search_query, " spaced ");
}

#[test]
fn performer_parameter_only_applies_in_performer_mode() {
    let state = decode_query("p=Anna+K", ViewState::for_performer(""));
    assert_eq!(state.performer_filter(), Some("Anna K"));

    let state = decode_query("p=Anna+K", ViewState::all());
    assert_eq!(state.performer_filter(), None);
}

#[test]
fn encode_writes_canonical_values_and_omits_empty_search() {
    let mut state = ViewState::all();
    state.range = RangeWindow::from_alias("12mo");
    state.page = 2;
    assert_eq!(encode_query(&state), "sort=date_desc&range=1y&page=2");

    state.search_query = "foo bar".into();
    assert_eq!(
        encode_query(&state),
        "sort=date_desc&range=1y&page=2&q=foo+bar"
    );

    let performer = ViewState::for_performer("Anna K");
    assert_eq!(
        encode_query(&performer),
        "sort=date_desc&range=all&page=1&p=Anna+K"
    );
}

#[test]
fn decode_of_encode_round_trips() {
    let mut states = Vec::new();
    for sort_key in [SortKey::DateDesc, SortKey::ViewsDesc] {
        for range in [
            RangeWindow::All,
            RangeWindow::Month,
            RangeWindow::HalfYear,
            RangeWindow::Year,
        ] {
            for search in ["", "foo & bar", "  ?q=1#x "] {
                for base in [ViewState::all(), ViewState::for_performer("Олена / Q&A")] {
                    let mut state = base;
                    state.sort_key = sort_key;
                    state.range = range;
                    state.page = 3;
                    state.search_query = search.to_string();
                    states.push(state);
                }
            }
        }
    }

    for state in states {
        let decoded = decode_query(&encode_query(&state), state.baseline());
        assert_eq!(decoded, state);
        assert_eq!(encode_query(&decoded), encode_query(&state));
    }
}

#[test]
fn apply_to_url_replaces_owned_parameters_and_keeps_others() {
    let url = Url::parse("https://example.com/videos.html?utm=feed&q=old&page=9#top").unwrap();
    let mut state = ViewState::all();
    state.sort_key = SortKey::ViewsDesc;

    let next = apply_to_url(&url, &state);
    assert_eq!(
        next.as_str(),
        "https://example.com/videos.html?utm=feed&sort=views_desc&range=all&page=1#top"
    );
}

#[test]
fn replace_owned_query_accepts_an_encoded_state() {
    let url = Url::parse("https://example.com/?ref=mail&range=6mo").unwrap();
    let next = catalog_core::replace_owned_query(&url, "sort=date_desc&range=6m&page=2&q=a+b");
    assert_eq!(
        next.query(),
        Some("ref=mail&sort=date_desc&range=6m&page=2&q=a+b")
    );
}
