use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use catalog_core::{
    decode_query, update, AppState, EpochMillis, Locale, Msg, QueryOptions, ViewState,
};
use catalog_engine::{CatalogSources, EngineEvent, EngineHandle, FetchSettings, Source};
use catalog_logging::{catalog_error, catalog_info, catalog_warn};
use clap::Parser;
use url::Url;

use super::cli::CliArgs;
use super::commands::{parse_line, Inbound, HELP};
use super::effects::EffectRunner;
use super::logging;
use super::render::render;

const TICK_INTERVAL: Duration = Duration::from_millis(40);
const PERFORMER_PAGE: &str = "performer.html";

pub fn run_app() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    logging::initialize(args.log_destination, args.log_level);

    let page_url = Url::parse(&args.page_url)
        .with_context(|| format!("invalid page url {:?}", args.page_url))?;
    let view_state = initial_view_state(&page_url, args.performer.as_deref());
    catalog_info!("starting catalog session url={}", page_url);

    let state = AppState::new(
        view_state,
        QueryOptions {
            range_policy: args.range_policy.into(),
        },
        Locale::from_tag(&args.locale),
        now_ms(),
    );
    let mut session = Session::new(state, EffectRunner::new(page_url));
    session.render_now();

    let engine = EngineHandle::new(FetchSettings::default());
    engine.load(CatalogSources {
        videos: Source::parse(&args.videos),
        rating: Source::parse(&args.rating),
    });
    session.await_catalog(&engine, Duration::from_secs(args.load_timeout_secs))?;

    if args.once {
        return Ok(());
    }
    print_help();
    session.interact();
    catalog_info!("session finished url={}", session.effects.page_url());
    Ok(())
}

/// The performer listing is selected by `--performer` or by the page path.
/// Without a performer name the main listing is shown instead.
fn initial_view_state(page_url: &Url, performer: Option<&str>) -> ViewState {
    let query = page_url.query().unwrap_or("");
    let performer_page = page_url.path().ends_with(PERFORMER_PAGE);
    let base = match performer {
        Some(name) => ViewState::for_performer(name.trim()),
        None if performer_page => ViewState::for_performer(""),
        None => ViewState::all(),
    };
    let state = decode_query(query, base);
    if state.performer_filter().is_some_and(str::is_empty) {
        catalog_warn!("no performer name given; showing the main listing");
        return decode_query(query, ViewState::all());
    }
    state
}

fn now_ms() -> EpochMillis {
    chrono::Utc::now().timestamp_millis()
}

enum Event {
    Input(Inbound),
    Tick(EpochMillis),
    Eof,
}

struct Session {
    state: AppState,
    effects: EffectRunner,
}

impl Session {
    fn new(state: AppState, effects: EffectRunner) -> Self {
        Self { state, effects }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        print_lines(self.effects.run(effects));
        if self.state.consume_dirty() {
            self.render_now();
        }
    }

    fn render_now(&self) {
        print_lines(render(&self.state.view()));
    }

    /// Blocks until the engine reports the catalog; a failed load is fatal.
    fn await_catalog(&mut self, engine: &EngineHandle, timeout: Duration) -> anyhow::Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match engine.recv_timeout(remaining) {
                Some(EngineEvent::LoadStarted) => continue,
                Some(EngineEvent::CatalogLoaded(catalog)) => {
                    self.dispatch_msg(Msg::Tick { now_ms: now_ms() });
                    self.dispatch_msg(Msg::CatalogLoaded {
                        records: catalog.records,
                        rating: catalog.rating,
                    });
                    return Ok(());
                }
                Some(EngineEvent::LoadFailed(err)) => {
                    catalog_error!("catalog load failed: {}", err);
                    self.dispatch_msg(Msg::LoadFailed(err.to_string()));
                    return Err(err.into());
                }
                None => {
                    let message = format!("catalog load timed out after {}s", timeout.as_secs());
                    catalog_error!("{}", message);
                    self.dispatch_msg(Msg::LoadFailed(message.clone()));
                    bail!(message);
                }
            }
        }
    }

    fn interact(&mut self) {
        let (event_tx, event_rx) = mpsc::channel::<Event>();

        let input_tx = event_tx.clone();
        thread::spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                if input_tx
                    .send(Event::Input(parse_line(&line, now_ms())))
                    .is_err()
                {
                    return;
                }
            }
            let _ = input_tx.send(Event::Eof);
        });

        thread::spawn(move || {
            while event_tx.send(Event::Tick(now_ms())).is_ok() {
                thread::sleep(TICK_INTERVAL);
            }
        });

        while let Ok(event) = event_rx.recv() {
            match event {
                Event::Tick(now_ms) => self.dispatch_msg(Msg::Tick { now_ms }),
                Event::Input(Inbound::Msg(msg)) => self.dispatch_msg(msg),
                Event::Input(Inbound::Help) => print_help(),
                Event::Input(Inbound::Unknown(line)) => {
                    catalog_warn!("unrecognized command {:?}", line);
                    print_lines([format!("unknown command: {line} (try `help`)")]);
                }
                Event::Input(Inbound::Quit) => break,
                Event::Eof => {
                    self.dispatch_msg(Msg::SearchCommitted);
                    break;
                }
            }
        }
    }
}

fn print_help() {
    print_lines(HELP.iter().map(|line| line.to_string()));
}

fn print_lines(lines: impl IntoIterator<Item = String>) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in lines {
        if writeln!(out, "{line}").is_err() {
            return;
        }
    }
    let _ = out.flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::{encode_query, ListingMode, RangeWindow, SortKey};
    use pretty_assertions::assert_eq;

    #[test]
    fn main_listing_reads_state_from_the_page_query() {
        let url = Url::parse("https://site/index.html?sort=views_desc&range=6mo&page=3&q=live")
            .unwrap();
        let state = initial_view_state(&url, None);
        assert_eq!(state.mode(), &ListingMode::All);
        assert_eq!(state.sort_key, SortKey::ViewsDesc);
        assert_eq!(state.range, RangeWindow::HalfYear);
        assert_eq!(state.page, 3);
        assert_eq!(state.search_query, "live");
    }

    #[test]
    fn performer_page_takes_the_name_from_the_query() {
        let url = Url::parse("https://site/performer.html?p=Anna%20K&range=1y").unwrap();
        let state = initial_view_state(&url, None);
        assert_eq!(state.performer_filter(), Some("Anna K"));
        assert_eq!(state.range, RangeWindow::Year);
    }

    #[test]
    fn performer_page_without_a_name_shows_the_main_listing() {
        let url = Url::parse("https://site/performer.html?p=&sort=views_desc").unwrap();
        let state = initial_view_state(&url, None);
        assert_eq!(state.mode(), &ListingMode::All);
        assert_eq!(state.sort_key, SortKey::ViewsDesc);
        assert!(!encode_query(&state).contains("p="));
    }

    #[test]
    fn performer_flag_selects_performer_mode_on_any_page() {
        let url = Url::parse("https://site/index.html").unwrap();
        let state = initial_view_state(&url, Some("Boris"));
        assert_eq!(state.performer_filter(), Some("Boris"));
    }
}
