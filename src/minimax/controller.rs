//! Background search runs.
//!
//! `SearchController` moves a `MinimaxSearch` onto a worker thread for the
//! duration of one run and takes it back when the worker is joined, so the
//! search state is only ever touched by one thread at a time. Completion is
//! published through a single atomic flag; results are read only after the
//! join.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::warn;

use super::config::AiConfig;
use super::error::{ConfigError, ControllerError};
use super::search::{MinimaxSearch, PredictedStep};
use super::stats::SearchStats;
use crate::core::{AiAction, MatchState};
use crate::rules::RulesEngine;

/// Cooperative stop flag, checked between node expansions.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the search to stop.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Clear the flag before a new run.
    pub fn reset(&self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Runs one search at a time off the caller's thread.
pub struct SearchController<E: RulesEngine> {
    /// Parked search; `None` while a worker owns it.
    search: Option<MinimaxSearch<E>>,
    worker: Option<JoinHandle<MinimaxSearch<E>>>,
    cancel: CancelToken,
    done: Arc<AtomicBool>,
}

impl<E> SearchController<E>
where
    E: RulesEngine + Send + 'static,
{
    pub fn new(rules: E, config: AiConfig) -> Result<Self, ConfigError> {
        let cancel = CancelToken::new();
        let search = MinimaxSearch::new(rules, config)?.with_cancel_token(cancel.clone());
        Ok(Self {
            search: Some(search),
            worker: None,
            cancel,
            done: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Start searching a snapshot of `state` on a worker thread.
    pub fn start(&mut self, state: &MatchState) -> Result<(), ControllerError> {
        if self.is_running() {
            return Err(ControllerError::AlreadyRunning);
        }
        self.collect()?;
        let mut search = self.search.take().ok_or(ControllerError::WorkerPanicked)?;

        self.cancel.reset();
        self.done.store(false, Ordering::Release);

        let snapshot = state.clone();
        let done = Arc::clone(&self.done);
        let handle = thread::Builder::new()
            .name("ccg-ai-search".into())
            .spawn(move || {
                search.run(&snapshot);
                done.store(true, Ordering::Release);
                search
            })?;
        self.worker = Some(handle);
        Ok(())
    }

    /// Cancel the run in progress and wait for the worker to exit.
    pub fn stop(&mut self) {
        if self.worker.is_none() {
            return;
        }
        self.cancel.cancel();
        if let Err(err) = self.collect() {
            warn!(error = %err, "search worker lost while stopping");
        }
    }

    /// A worker is still searching.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.worker.as_ref().is_some_and(|w| !w.is_finished())
    }

    /// The last run finished and its result can be read.
    #[must_use]
    pub fn is_result_ready(&self) -> bool {
        self.done.load(Ordering::Acquire)
    }

    /// Block until the current run finishes and return its result.
    pub fn wait(&mut self) -> Result<Option<AiAction>, ControllerError> {
        self.collect()?;
        Ok(self.search.as_ref().and_then(MinimaxSearch::best_action))
    }

    /// Action chosen by the last finished run; `None` while running.
    pub fn best_action(&mut self) -> Option<AiAction> {
        self.finished()?.best_action()
    }

    pub fn nodes_evaluated(&mut self) -> u32 {
        self.finished().map_or(0, |s| s.stats().nodes_evaluated)
    }

    pub fn depth_reached(&mut self) -> u32 {
        self.finished().map_or(0, |s| s.stats().depth_reached)
    }

    /// Statistics of the last finished run.
    pub fn stats(&mut self) -> Option<SearchStats> {
        self.finished().map(|s| s.stats().clone())
    }

    /// Prediction text of the last finished run.
    pub fn node_path(&mut self) -> String {
        self.finished().map(MinimaxSearch::node_path).unwrap_or_default()
    }

    pub fn best_line(&mut self) -> Vec<PredictedStep> {
        self.finished().map(MinimaxSearch::best_line).unwrap_or_default()
    }

    /// Release the parked search's memory.
    pub fn clear_memory(&mut self) {
        self.stop();
        if let Some(search) = self.search.as_mut() {
            search.clear_memory();
        }
        self.done.store(false, Ordering::Release);
    }

    /// The parked search, joining a worker that has already finished.
    fn finished(&mut self) -> Option<&MinimaxSearch<E>> {
        if self.is_running() {
            return None;
        }
        self.collect().ok()?;
        self.search.as_ref()
    }

    /// Join the worker, if any, and park its search.
    fn collect(&mut self) -> Result<(), ControllerError> {
        let Some(handle) = self.worker.take() else {
            return Ok(());
        };
        match handle.join() {
            Ok(search) => {
                self.search = Some(search);
                Ok(())
            }
            Err(_) => {
                warn!("search worker panicked");
                Err(ControllerError::WorkerPanicked)
            }
        }
    }
}

impl<E: RulesEngine> Drop for SearchController<E> {
    fn drop(&mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }
}

impl<E: RulesEngine> std::fmt::Debug for SearchController<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchController")
            .field("parked", &self.search.is_some())
            .field("worker", &self.worker.is_some())
            .field("done", &self.done.load(Ordering::Acquire))
            .finish()
    }
}
