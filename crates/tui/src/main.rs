mod app;
mod config;
mod events;
mod logging;
mod persist;
mod strings;
mod terminal;
mod theme;
mod ui;

use std::sync::Arc;

use anyhow::Result;
use spin_core::{MemoryStore, Session, Store};
use terminal::TerminalGuard;
use tracing::{info, warn};

fn main() -> Result<()> {
    let cfg = config::Config::load();
    let _log_guard = logging::init(cfg.data_dir.as_deref(), &cfg.log_level)?;
    for w in &cfg.warnings {
        warn!(target: "tui", "{}, using defaults", w);
    }
    let store: Arc<dyn Store> = match &cfg.data_dir {
        Some(dir) => {
            info!(target: "tui", "store dir: {}", dir.display());
            Arc::new(persist::FileStore::new(dir))
        }
        None => {
            warn!(target: "tui", "no data directory, history will not be saved");
            Arc::new(MemoryStore::new())
        }
    };
    let mut app = app::App::new(Session::new(store));
    let mut term = TerminalGuard::new(cfg.mouse)?;
    events::run(&mut term.terminal, &mut app)
}
