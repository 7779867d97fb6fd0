//! Cancel-free, coalesced, cooldown-debounced background computation
//!
//! A coordinator thread owns a small explicit state machine (idle, running,
//! cooldown) and enforces the scheduling discipline: one computation in
//! flight at a time, requests arriving while busy collapse into a single
//! queued follow-up holding only the most recent snapshot, and a fixed
//! cooldown window separates a completion from the follow-up's start. There
//! is no cancellation; a stale result is delivered and then superseded by
//! the follow-up's result. A worker fault counts as completion, so the
//! queued follow-up is still honored.

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::engine::{self, ComputeRequest, ComputeResponse};
use crate::error::EngineError;
use log::{debug, error};

/// Cooldown between a completed computation and the queued follow-up.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(100);

/// The unit of work the scheduler runs in the background.
///
/// Implemented by [`EngineBackend`] in production; tests substitute slow or
/// faulting backends to exercise the scheduling discipline.
pub trait ComputeBackend: Send + Sync + 'static {
    fn run(&self, request: &ComputeRequest, request_id: u64)
        -> Result<ComputeResponse, EngineError>;
}

/// Runs [`engine::compute`].
#[derive(Debug, Default)]
pub struct EngineBackend;

impl ComputeBackend for EngineBackend {
    fn run(
        &self,
        request: &ComputeRequest,
        request_id: u64,
    ) -> Result<ComputeResponse, EngineError> {
        engine::compute(request, request_id)
    }
}

enum Msg {
    Request(ComputeRequest),
    Finished(u64),
    Shutdown,
}

#[derive(Clone, Copy)]
enum State {
    Idle,
    Running,
    Cooldown(Instant),
}

/// Handle to the coordinator thread.
///
/// Dropping the scheduler shuts the coordinator down and waits for any
/// in-flight computation to finish.
///
/// # Examples
///
/// ```no_run
/// use karnaugh_logic::{Cell, ColorTable, FormulaKind, TruthTable};
/// use karnaugh_logic::engine::ComputeRequest;
/// use karnaugh_logic::scheduler::Scheduler;
///
/// let (scheduler, responses) = Scheduler::new();
/// let cells = [Cell::Zero, Cell::One, Cell::One, Cell::One];
/// scheduler.request(ComputeRequest {
///     table: TruthTable::from_column(&["a", "b"], "f", &cells).unwrap(),
///     selected_output: 0,
///     representation: FormulaKind::Dnf,
///     prev_colors: ColorTable::default(),
/// });
/// let response = responses.recv().unwrap();
/// assert!(response.selected.is_some());
/// ```
pub struct Scheduler {
    control: Sender<Msg>,
    coordinator: Option<JoinHandle<()>>,
}

impl Scheduler {
    /// A scheduler over the real engine with the standard cooldown.
    pub fn new() -> (Scheduler, Receiver<ComputeResponse>) {
        Scheduler::with_backend(EngineBackend, DEFAULT_COOLDOWN)
    }

    /// A scheduler over the real engine with a configured cooldown.
    pub fn with_config(config: &crate::config::EngineConfig) -> (Scheduler, Receiver<ComputeResponse>) {
        Scheduler::with_backend(EngineBackend, config.cooldown)
    }

    /// A scheduler over an arbitrary backend and cooldown.
    pub fn with_backend<B: ComputeBackend>(
        backend: B,
        cooldown: Duration,
    ) -> (Scheduler, Receiver<ComputeResponse>) {
        let (control_tx, control_rx) = mpsc::channel();
        let (response_tx, response_rx) = mpsc::channel();
        let coordinator = Coordinator {
            backend: Arc::new(backend),
            cooldown,
            control: control_rx,
            finished: control_tx.clone(),
            responses: response_tx,
            next_id: 0,
            worker: None,
        };
        let handle = thread::spawn(move || coordinator.run());
        (
            Scheduler {
                control: control_tx,
                coordinator: Some(handle),
            },
            response_rx,
        )
    }

    /// Submit a snapshot for computation.
    ///
    /// Starts immediately when idle; otherwise replaces the queued
    /// follow-up, so intermediate snapshots are never computed.
    pub fn request(&self, request: ComputeRequest) {
        let _ = self.control.send(Msg::Request(request));
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        let _ = self.control.send(Msg::Shutdown);
        if let Some(handle) = self.coordinator.take() {
            let _ = handle.join();
        }
    }
}

struct Coordinator<B: ComputeBackend> {
    backend: Arc<B>,
    cooldown: Duration,
    control: Receiver<Msg>,
    finished: Sender<Msg>,
    responses: Sender<ComputeResponse>,
    next_id: u64,
    worker: Option<JoinHandle<()>>,
}

impl<B: ComputeBackend> Coordinator<B> {
    fn run(mut self) {
        let mut state = State::Idle;
        let mut queued: Option<ComputeRequest> = None;

        loop {
            if let State::Cooldown(until) = state {
                if Instant::now() >= until {
                    state = match queued.take() {
                        Some(request) => {
                            self.start(request);
                            State::Running
                        }
                        None => State::Idle,
                    };
                    continue;
                }
            }

            let msg = match state {
                State::Cooldown(until) => {
                    match self
                        .control
                        .recv_timeout(until.saturating_duration_since(Instant::now()))
                    {
                        Ok(msg) => msg,
                        Err(RecvTimeoutError::Timeout) => continue,
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                _ => match self.control.recv() {
                    Ok(msg) => msg,
                    Err(_) => break,
                },
            };

            match msg {
                Msg::Request(request) => match state {
                    State::Idle => {
                        self.start(request);
                        state = State::Running;
                    }
                    // Coalesce: only the most recent snapshot survives
                    State::Running | State::Cooldown(_) => queued = Some(request),
                },
                Msg::Finished(id) => {
                    debug!("computation {} finished, entering cooldown", id);
                    if let Some(handle) = self.worker.take() {
                        let _ = handle.join();
                    }
                    state = State::Cooldown(Instant::now() + self.cooldown);
                }
                Msg::Shutdown => break,
            }
        }

        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }

    fn start(&mut self, request: ComputeRequest) {
        let id = self.next_id;
        self.next_id += 1;
        debug!("starting computation {}", id);

        let backend = Arc::clone(&self.backend);
        let responses = self.responses.clone();
        let finished = self.finished.clone();
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
        self.worker = Some(thread::spawn(move || {
            match panic::catch_unwind(AssertUnwindSafe(|| backend.run(&request, id))) {
                Ok(Ok(response)) => {
                    let _ = responses.send(response);
                }
                Ok(Err(err)) => error!("computation {} failed: {}", id, err),
                Err(_) => error!("computation {} panicked", id),
            }
            // Faults count as completion: the busy flag clears and any
            // queued follow-up still runs
            let _ = finished.send(Msg::Finished(id));
        }));
    }
}
