use std::{
    collections::BTreeSet,
    sync::{
        mpsc::{self, Receiver, TryRecvError},
        Arc,
    },
};

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    history::History,
    pocket::Pocket,
    projector::project,
    store::{Hydration, Persisted, Store},
    validate::{validate, Rejection},
    HIGHLIGHT_WINDOW, HISTORY_KEY,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("history is still loading")]
    NotReady,
    #[error(transparent)]
    Rejected(#[from] Rejection),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Loading,
    Ready,
}

/// The running tracker: history, its persisted mirror and the startup load.
///
/// Every mutation applies to memory first, then writes the whole history back
/// to the store. A failed write is logged and the session carries on in memory.
pub struct Session {
    persisted: Persisted<History>,
    state: Hydration<History>,
    rx: Option<Receiver<History>>,
    degraded: bool,
}

impl Session {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            persisted: Persisted::new(store, HISTORY_KEY),
            state: Hydration::Uninitialized,
            rx: None,
            degraded: false,
        }
    }

    /// Kick off the one-shot load on a background thread. Later calls do nothing.
    pub fn start(&mut self) {
        if !matches!(self.state, Hydration::Uninitialized) {
            return;
        }
        let (tx, rx) = mpsc::channel::<History>();
        let persisted = self.persisted.clone();
        let spawned = std::thread::Builder::new()
            .name("history-load".into())
            .spawn(move || {
                let h = persisted.load_or(History::new());
                let _ = tx.send(h);
            });
        match spawned {
            Ok(_) => {
                self.state = Hydration::Loading;
                self.rx = Some(rx);
            }
            Err(e) => {
                warn!(target: "core", "load thread failed to start, loading inline: {}", e);
                let h = self.persisted.load_or(History::new());
                self.finish_load(h);
            }
        }
    }

    /// Pick up the load result if it has arrived. Returns true on the
    /// transition to `Ready`.
    pub fn poll(&mut self) -> bool {
        let Some(rx) = &self.rx else {
            return false;
        };
        match rx.try_recv() {
            Ok(h) => {
                self.finish_load(h);
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                warn!(target: "core", "load thread exited without a result, starting empty");
                self.finish_load(History::new());
                true
            }
        }
    }

    /// Block until the load has finished.
    pub fn wait_ready(&mut self) {
        if matches!(self.state, Hydration::Uninitialized) {
            self.start();
        }
        let Some(rx) = self.rx.take() else {
            return;
        };
        let h = rx.recv().unwrap_or_else(|_| {
            warn!(target: "core", "load thread exited without a result, starting empty");
            History::new()
        });
        self.finish_load(h);
    }

    fn finish_load(&mut self, h: History) {
        info!(target: "core", "history ready: {} entries", h.len());
        self.rx = None;
        self.state = Hydration::Ready(h);
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            Hydration::Uninitialized => Phase::Uninitialized,
            Hydration::Loading => Phase::Loading,
            Hydration::Ready(_) => Phase::Ready,
        }
    }

    pub fn history(&self) -> Option<&History> {
        self.state.ready()
    }

    pub fn active_set(&self) -> Option<BTreeSet<Pocket>> {
        self.history().map(|h| project(h, HIGHLIGHT_WINDOW))
    }

    /// True while the most recent write failed.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn submit_text(&mut self, text: &str) -> Result<Pocket, SessionError> {
        self.ensure_ready()?;
        let pocket = validate(text)?;
        self.mutate(|h| h.add(pocket))?;
        Ok(pocket)
    }

    pub fn tap_grid_value(&mut self, value: i64) -> Result<Pocket, SessionError> {
        self.ensure_ready()?;
        let pocket = Pocket::new(value).map_err(|e| {
            warn!(target: "core", "grid tap outside the wheel: {}", value);
            e
        })?;
        self.mutate(|h| h.add(pocket))?;
        Ok(pocket)
    }

    /// `Ok(None)` when there was nothing to undo. The snapshot is rewritten
    /// either way, so a corrupt one loaded as empty gets replaced.
    pub fn undo(&mut self) -> Result<Option<Pocket>, SessionError> {
        let h = self.state.ready_mut().ok_or(SessionError::NotReady)?;
        let removed = h.undo();
        self.persist();
        Ok(removed)
    }

    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.mutate(History::reset)
    }

    fn ensure_ready(&self) -> Result<(), SessionError> {
        if self.state.is_ready() {
            Ok(())
        } else {
            Err(SessionError::NotReady)
        }
    }

    fn mutate(&mut self, f: impl FnOnce(&mut History)) -> Result<(), SessionError> {
        let h = self.state.ready_mut().ok_or(SessionError::NotReady)?;
        f(h);
        self.persist();
        Ok(())
    }

    fn persist(&mut self) {
        let Some(h) = self.state.ready() else {
            return;
        };
        self.degraded = !self.persisted.save_best_effort(h);
    }
}
