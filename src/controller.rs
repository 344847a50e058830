//! Run lifecycle: countdown, worker thread, cancellation, and status
//! reporting back to the caller.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::TypistConfig;
use crate::engine::{Outcome, Typist};
use crate::injector::{Clipboard, Injector};

/// Grace period before the first keystroke, giving the user time to focus
/// the target application.
pub const COUNTDOWN_SECS: u64 = 3;

/// Shared stop request. Cloning hands out another handle to the same flag,
/// so a signal handler can cancel a run owned by a worker thread.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    fn clear(&self) {
        self.cancelled.store(false, Ordering::SeqCst);
    }
}

/// Progress and terminal states a run reports, in order. Exactly one
/// terminal state arrives per run, always last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Countdown(u64),
    Typing,
    Completed { uncorrected: usize },
    Stopped,
    Failed(String),
}

impl Status {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Status::Completed { .. } | Status::Stopped | Status::Failed(_)
        )
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Countdown(n) => write!(f, "Starting in {n}..."),
            Status::Typing => write!(f, "Typing in progress..."),
            Status::Completed { .. } => write!(f, "Typing completed!"),
            Status::Stopped => write!(f, "Typing stopped by user."),
            Status::Failed(msg) => write!(f, "An error occurred: {msg}"),
        }
    }
}

/// Owns one run at a time. `start` is rejected while a run is active;
/// `request_stop` may be called from any thread, including a Ctrl-C handler.
#[derive(Debug, Default)]
pub struct Controller {
    running: Arc<AtomicBool>,
    cancel: CancelToken,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn request_stop(&self) {
        if self.is_running() {
            self.cancel.cancel();
        }
    }

    /// Spawn the typing worker. Returns `false` without side effects if a run
    /// is already active. IO is opened inside the worker via `open_io`, since
    /// injection backends are not generally `Send`.
    pub fn start<I, C, F>(
        &self,
        text: String,
        cfg: TypistConfig,
        seed: Option<u64>,
        open_io: F,
        status: Sender<Status>,
    ) -> bool
    where
        I: Injector,
        C: Clipboard,
        F: FnOnce() -> Result<(I, C)> + Send + 'static,
    {
        if self.running.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.cancel.clear();

        let running = Arc::clone(&self.running);
        let cancel = self.cancel.clone();
        let handle = thread::spawn(move || {
            let terminal = run_worker(&text, cfg, seed, open_io, &cancel, &status);
            let _ = status.send(terminal);
            cancel.clear();
            running.store(false, Ordering::SeqCst);
        });

        *self.handle.lock().expect("controller lock poisoned") = Some(handle);
        true
    }

    /// Wait for the current worker, if any, to finish.
    pub fn join(&self) {
        let handle = self.handle.lock().expect("controller lock poisoned").take();
        if let Some(handle) = handle {
            let _ = handle.join();
        }
    }
}

fn run_worker<I, C, F>(
    text: &str,
    cfg: TypistConfig,
    seed: Option<u64>,
    open_io: F,
    cancel: &CancelToken,
    status: &Sender<Status>,
) -> Status
where
    I: Injector,
    C: Clipboard,
    F: FnOnce() -> Result<(I, C)>,
{
    for remaining in (1..=COUNTDOWN_SECS).rev() {
        if cancel.is_cancelled() {
            return Status::Stopped;
        }
        let _ = status.send(Status::Countdown(remaining));
        thread::sleep(Duration::from_secs(1));
    }
    if cancel.is_cancelled() {
        return Status::Stopped;
    }

    let _ = status.send(Status::Typing);

    let (mut injector, mut clipboard) = match open_io() {
        Ok(io) => io,
        Err(err) => return Status::Failed(format!("{err:#}")),
    };

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut typist = Typist::new(&mut injector, &mut clipboard, cfg, cancel.clone(), &mut rng);
    match typist.run(text) {
        Ok(Outcome::Completed { uncorrected }) => Status::Completed { uncorrected },
        Ok(Outcome::Cancelled) => Status::Stopped,
        Err(err) => Status::Failed(format!("{err:#}")),
    }
}
