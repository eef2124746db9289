//! Timer-driven simulation loop on a background thread.
//!
//! Each `start` spawns a worker tagged with the session's run id and owning
//! the receiving end of a stop channel. The worker waits on that channel with
//! the configured interval as timeout: a timeout means step, a signal or a
//! hung-up sender means exit. Before stepping it re-checks under the session
//! lock that the session is still running the same run, so once `stop`
//! returns no further step is applied.
//!
//! `stop`, `clear`, `randomize` and drop signal the worker and join it, so at
//! most one worker exists per simulation and none outlives it.
//!
//! Mutations issued while running are serialized with steps by the lock.
//! Whether a toggle racing a tick lands before or after that tick is not
//! specified.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, info, warn};

use super::{Command, LoopState, Session};
use crate::compute::{Grid, GridError, GridStats, PatternStamp};
use crate::schema::{ConfigError, SessionConfig};

/// Handle to the worker driving one run.
struct Worker {
    run_id: u64,
    stop_tx: mpsc::Sender<()>,
    handle: JoinHandle<()>,
}

impl Worker {
    fn spawn(session: Arc<Mutex<Session>>, interval: Duration, run_id: u64) -> Self {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let handle = thread::spawn(move || {
            loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {}
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
                let mut session = session.lock().unwrap_or_else(PoisonError::into_inner);
                if !session.is_running() || session.run_id() != run_id {
                    break;
                }
                session.advance();
            }
            debug!("Worker for run {} exiting", run_id);
        });

        Self {
            run_id,
            stop_tx,
            handle,
        }
    }

    /// Signal the worker and wait for it. Must not be called with the
    /// session lock held.
    fn shutdown(self) {
        // The worker may already have exited and dropped its receiver
        self.stop_tx.send(()).ok();
        if self.handle.join().is_err() {
            warn!("Worker for run {} panicked", self.run_id);
        }
    }
}

/// Thread-backed simulation owning one session.
pub struct Simulation {
    session: Arc<Mutex<Session>>,
    interval: Duration,
    worker: Option<Worker>,
}

impl Simulation {
    /// Create a stopped simulation with an empty grid.
    pub fn new(config: &SessionConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_session(Session::new(config)?, config.interval()))
    }

    /// Wrap an existing session.
    pub fn from_session(session: Session, interval: Duration) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            interval,
            worker: None,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        // A grid is replaced wholesale, so a poisoned session is still consistent
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Delay between generations.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start stepping. No-op if already running.
    pub fn start(&mut self) {
        let run_id = {
            let mut session = self.lock();
            if !session.start() {
                return;
            }
            session.run_id()
        };
        self.spawn_worker(run_id);
    }

    /// Stop stepping and wait for the worker to exit. No-op if already
    /// stopped.
    pub fn stop(&mut self) {
        if self.lock().stop() {
            info!("Simulation stopped");
        }
        self.retire_worker();
    }

    fn spawn_worker(&mut self, run_id: u64) {
        self.retire_worker();
        info!("Simulation started (run {})", run_id);
        self.worker = Some(Worker::spawn(
            Arc::clone(&self.session),
            self.interval,
            run_id,
        ));
    }

    fn retire_worker(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.shutdown();
        }
    }

    /// Dispatch a presentation-layer command, spawning or retiring the worker
    /// as the loop state changes.
    pub fn apply(&mut self, command: Command) -> Result<(), GridError> {
        let (was_running, running, run_id) = {
            let mut session = self.lock();
            let was_running = session.is_running();
            session.apply(command)?;
            (was_running, session.is_running(), session.run_id())
        };
        match (was_running, running) {
            (false, true) => self.spawn_worker(run_id),
            (true, false) => self.retire_worker(),
            _ => {}
        }
        Ok(())
    }

    /// Flip one cell. Legal while running.
    pub fn toggle_cell(&self, row: usize, col: usize) -> Result<(), GridError> {
        self.lock().toggle_cell(row, col)
    }

    /// Randomize with the session's random source; stops the loop.
    pub fn randomize(&mut self, density: f64) {
        self.lock().randomize(density);
        self.retire_worker();
    }

    /// Clear the grid; stops the loop.
    pub fn clear(&mut self) {
        self.lock().clear();
        self.retire_worker();
    }

    /// Overlay a pattern at (top, left).
    pub fn stamp(&self, top: usize, left: usize, pattern: &PatternStamp) {
        self.lock().stamp(top, left, pattern);
    }

    /// Current grid. Cheap: the cell buffer is shared, not copied.
    pub fn snapshot(&self) -> Grid {
        self.lock().grid().clone()
    }

    pub fn generation(&self) -> u64 {
        self.lock().generation()
    }

    pub fn loop_state(&self) -> LoopState {
        self.lock().loop_state()
    }

    pub fn is_running(&self) -> bool {
        self.lock().is_running()
    }

    pub fn placing(&self) -> bool {
        self.lock().placing()
    }

    pub fn stats(&self) -> GridStats {
        self.lock().stats()
    }
}

impl Drop for Simulation {
    fn drop(&mut self) {
        self.lock().stop();
        self.retire_worker();
    }
}
