use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use catalog_logging::catalog_error;

use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::load::load_catalog;
use crate::{CatalogSources, EngineEvent, LoadError};

enum EngineCommand {
    Load(CatalogSources),
}

/// Runs loads on a background tokio runtime and reports [`EngineEvent`]s.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> Self {
        Self::with_fetcher(Arc::new(ReqwestFetcher::new(settings)))
    }

    pub fn with_fetcher(fetcher: Arc<dyn Fetcher>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    catalog_error!("failed to start engine runtime: {}", err);
                    let _ = event_tx.send(EngineEvent::LoadFailed(LoadError::Engine(
                        err.to_string(),
                    )));
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let fetcher = fetcher.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(fetcher.as_ref(), command, event_tx).await;
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn load(&self, sources: CatalogSources) {
        let _ = self.cmd_tx.send(EngineCommand::Load(sources));
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    fetcher: &dyn Fetcher,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Load(sources) => {
            let _ = event_tx.send(EngineEvent::LoadStarted);
            let event = match load_catalog(fetcher, &sources).await {
                Ok(catalog) => EngineEvent::CatalogLoaded(catalog),
                Err(err) => EngineEvent::LoadFailed(err),
            };
            let _ = event_tx.send(event);
        }
    }
}
