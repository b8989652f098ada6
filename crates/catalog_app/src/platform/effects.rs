use catalog_core::{replace_owned_query, Effect};
use catalog_logging::{catalog_debug, catalog_info};
use url::Url;

/// Executes core effects against the terminal session.
///
/// The "address bar" is `page_url`; query replacement rewrites it in place
/// and never triggers a reload.
pub struct EffectRunner {
    page_url: Url,
}

impl EffectRunner {
    pub fn new(page_url: Url) -> Self {
        Self { page_url }
    }

    pub fn page_url(&self) -> &Url {
        &self.page_url
    }

    /// Runs the effects and returns the lines to show the user.
    pub fn run(&mut self, effects: Vec<Effect>) -> Vec<String> {
        let mut lines = Vec::new();
        for effect in effects {
            match effect {
                Effect::ReplaceQuery { query } => {
                    let next = replace_owned_query(&self.page_url, &query);
                    if next != self.page_url {
                        catalog_debug!("ReplaceQuery url={}", next);
                        self.page_url = next;
                    }
                }
                Effect::OpenPlayback(request) => {
                    catalog_info!(
                        "OpenPlayback id={} url={}",
                        request.record_id,
                        request.watch_url
                    );
                    lines.push(format!("▶ {} — {}", request.title, request.watch_url));
                }
            }
        }
        lines
    }
}
