//! Background simulation loop
//!
//! The engine owns a thread named `engine-thread` that repeatedly hands the
//! current state to a [`StateConsumer`] and computes the next one. It can be
//! paused, resumed and stopped from any thread; stopping is final.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use firecell_model::State;
use firecell_storage::StateConsumer;
use parking_lot::{Condvar, Mutex};

use crate::{Algorithm, ComputationStrategy, EngineError};

/// Everything needed to start a run
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// State published at index 0
    pub initial_state: State,
    /// Simulated seconds per step
    pub step_time: f64,
    /// Stop after publishing this many states; run until stopped when `None`
    pub step_limit: Option<u64>,
}

impl SimulationConfig {
    pub fn new(initial_state: State, step_time: f64) -> Self {
        Self {
            initial_state,
            step_time,
            step_limit: None,
        }
    }

    pub fn with_step_limit(mut self, step_limit: u64) -> Self {
        self.step_limit = Some(step_limit);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnginePhase {
    Running,
    Paused,
    /// Terminal; the loop has exited or is about to
    Stopped,
}

/// Control surface of a running simulation
pub trait Engine {
    fn pause(&self);
    fn resume(&self);
    /// Stop the loop and wait for the thread to finish
    fn stop(&mut self);
    fn phase(&self) -> EnginePhase;
}

struct Control {
    phase: Mutex<EnginePhase>,
    changed: Condvar,
    published: AtomicU64,
}

impl Control {
    /// Move from `from` to `to`; no-op in any other phase
    fn transition(&self, from: EnginePhase, to: EnginePhase) -> bool {
        let mut phase = self.phase.lock();
        if *phase != from {
            return false;
        }
        *phase = to;
        self.changed.notify_all();
        true
    }

    fn stop(&self) {
        let mut phase = self.phase.lock();
        *phase = EnginePhase::Stopped;
        self.changed.notify_all();
    }

    /// Block while paused; false once stopped
    fn wait_until_runnable(&self) -> bool {
        let mut phase = self.phase.lock();
        while *phase == EnginePhase::Paused {
            self.changed.wait(&mut phase);
        }
        *phase == EnginePhase::Running
    }
}

/// Engine running on its own thread
pub struct BasicEngine {
    control: Arc<Control>,
    thread: Option<JoinHandle<()>>,
}

impl BasicEngine {
    /// Spawn the engine thread and start publishing states immediately
    pub fn start(
        config: SimulationConfig,
        consumer: Arc<dyn StateConsumer>,
        algorithm: Box<dyn Algorithm>,
        strategy: Box<dyn ComputationStrategy>,
    ) -> Result<Self, EngineError> {
        let control = Arc::new(Control {
            phase: Mutex::new(EnginePhase::Running),
            changed: Condvar::new(),
            published: AtomicU64::new(0),
        });

        let thread_control = Arc::clone(&control);
        let thread = std::thread::Builder::new()
            .name("engine-thread".to_string())
            .spawn(move || {
                run(config, &thread_control, consumer.as_ref(), algorithm.as_ref(), strategy.as_ref());
                thread_control.stop();
            })
            .map_err(EngineError::Spawn)?;

        Ok(Self {
            control,
            thread: Some(thread),
        })
    }

    /// Number of states handed to the consumer so far
    pub fn published(&self) -> u64 {
        self.control.published.load(Ordering::Acquire)
    }

    /// Block until the loop ends on its own (step limit or error)
    pub fn wait(&mut self) {
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("Engine thread panicked");
            }
        }
    }
}

impl Engine for BasicEngine {
    fn pause(&self) {
        if self.control.transition(EnginePhase::Running, EnginePhase::Paused) {
            log::info!("Simulation paused after {} states", self.published());
        }
    }

    fn resume(&self) {
        if self.control.transition(EnginePhase::Paused, EnginePhase::Running) {
            log::info!("Simulation resumed");
        }
    }

    fn stop(&mut self) {
        self.control.stop();
        self.wait();
    }

    fn phase(&self) -> EnginePhase {
        *self.control.phase.lock()
    }
}

impl Drop for BasicEngine {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run(
    config: SimulationConfig,
    control: &Control,
    consumer: &dyn StateConsumer,
    algorithm: &dyn Algorithm,
    strategy: &dyn ComputationStrategy,
) {
    let size = config.initial_state.space_size();
    log::info!(
        "Engine started: space {}, step time {}s, limit {:?}",
        size,
        config.step_time,
        config.step_limit
    );

    let mut state = config.initial_state;
    let mut index = 0u64;

    let limit_reached = |index: u64| config.step_limit.is_some_and(|limit| index >= limit);

    while control.wait_until_runnable() && !limit_reached(index) {
        if let Err(e) = consumer.put_state(state.clone(), index) {
            log::error!("Failed to store state {}: {}", index, e);
            break;
        }
        index += 1;
        control.published.store(index, Ordering::Release);
        log::debug!("Published state {}", index - 1);

        if limit_reached(index) {
            log::info!("Step limit of {} reached", index);
            break;
        }

        state = match strategy.compute(&state, algorithm) {
            Ok(next) => next,
            Err(e) => {
                log::error!("Computing state {} failed: {}", index, e);
                break;
            }
        };
    }

    log::info!("Engine stopped after {} states", index);
}
