//! Single-flight execution of asynchronous work.
//!
//! [`SingleFlight::run_exclusive`] cancels whatever is in flight, waits for
//! it to unwind, and only then starts the new work. Two pieces of work never
//! run at the same time, and a cancelled piece never resumes after the next
//! one has started.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{oneshot, watch, Mutex};
use tokio::task::AbortHandle;
use tracing::{debug, warn};

use crate::error::Superseded;
use crate::state::{FlightOutcome, FlightState};

/// The task currently (or most recently) in flight.
struct Flight {
    id: u64,
    abort: AbortHandle,
    /// Resolves once the task's future has been dropped.
    finished: oneshot::Receiver<()>,
}

/// Lives inside the spawned future; dropping it marks the flight finished.
struct FlightGuard {
    id: u64,
    state: Arc<watch::Sender<FlightState>>,
    _done: oneshot::Sender<()>,
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        let id = self.id;
        self.state.send_if_modified(|state| {
            if *state == (FlightState::Running { id }) {
                *state = FlightState::Idle;
                true
            } else {
                false
            }
        });
    }
}

/// Runs at most one piece of asynchronous work at a time; newer work
/// supersedes older work.
pub struct SingleFlight {
    current: Mutex<Option<Flight>>,
    next_id: AtomicU64,
    state: Arc<watch::Sender<FlightState>>,
}

impl Default for SingleFlight {
    fn default() -> Self {
        Self::new()
    }
}

impl SingleFlight {
    pub fn new() -> Self {
        let (state, _) = watch::channel(FlightState::Idle);
        Self {
            current: Mutex::new(None),
            next_id: AtomicU64::new(1),
            state: Arc::new(state),
        }
    }

    /// Current runner state.
    pub fn state(&self) -> FlightState {
        *self.state.borrow()
    }

    /// Watch runner state transitions.
    pub fn subscribe(&self) -> watch::Receiver<FlightState> {
        self.state.subscribe()
    }

    /// Cancel any work in flight, then run `work` to completion.
    ///
    /// Returns [`Superseded`] if `work` is itself cancelled by a later call
    /// or by [`SingleFlight::cancel_current`]. A panic inside `work` is
    /// resumed on this caller.
    pub async fn run_exclusive<F, T>(&self, work: F) -> Result<T, Superseded>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let (id, handle) = {
            let mut current = self.current.lock().await;
            if let Some(previous) = current.take() {
                cancel(previous).await;
            }

            let id = self.next_id.fetch_add(1, Ordering::Relaxed);
            let (done_tx, done_rx) = oneshot::channel();
            let guard = FlightGuard {
                id,
                state: Arc::clone(&self.state),
                _done: done_tx,
            };
            self.state.send_replace(FlightState::Running { id });

            let handle = tokio::spawn(async move {
                let _guard = guard;
                work.await
            });
            *current = Some(Flight {
                id,
                abort: handle.abort_handle(),
                finished: done_rx,
            });
            (id, handle)
        };

        match handle.await {
            Ok(value) => {
                debug!(flight = id, outcome = %FlightOutcome::Completed, "flight finished");
                Ok(value)
            }
            Err(e) if e.is_cancelled() => {
                debug!(flight = id, outcome = %FlightOutcome::Cancelled, "flight superseded");
                Err(Superseded)
            }
            Err(e) => {
                warn!(flight = id, outcome = %FlightOutcome::Failed, "flight panicked");
                std::panic::resume_unwind(e.into_panic())
            }
        }
    }

    /// Cancel the work in flight without starting anything new.
    ///
    /// Returns whether anything was actually running. Idempotent.
    pub async fn cancel_current(&self) -> bool {
        let mut current = self.current.lock().await;
        match current.take() {
            Some(flight) => cancel(flight).await,
            None => false,
        }
    }
}

/// Abort `flight` and wait until its future has been dropped.
async fn cancel(flight: Flight) -> bool {
    let Flight {
        id,
        abort,
        finished,
    } = flight;
    let was_running = !abort.is_finished();
    abort.abort();
    // Err means the guard was dropped, which is the only way this resolves.
    let _ = finished.await;
    if was_running {
        debug!(flight = id, "cancelled in-flight work");
    }
    was_running
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    use super::*;

    struct ActiveGuard(Arc<AtomicUsize>);

    impl ActiveGuard {
        fn enter(active: &Arc<AtomicUsize>) -> Self {
            active.fetch_add(1, Ordering::SeqCst);
            Self(Arc::clone(active))
        }
    }

    impl Drop for ActiveGuard {
        fn drop(&mut self) {
            self.0.fetch_sub(1, Ordering::SeqCst);
        }
    }

    async fn wait_running(runner: &SingleFlight) {
        let mut rx = runner.subscribe();
        tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|s| s.is_active()))
            .await
            .expect("runner should start")
            .expect("state channel open");
    }

    #[tokio::test]
    async fn runs_work_to_completion() {
        let runner = SingleFlight::new();
        assert_eq!(runner.state(), FlightState::Idle);

        let value = runner.run_exclusive(async { 21 * 2 }).await;
        assert_eq!(value, Ok(42));
        assert_eq!(runner.state(), FlightState::Idle);
    }

    #[tokio::test]
    async fn work_errors_reach_their_caller() {
        let runner = SingleFlight::new();
        let result = runner
            .run_exclusive(async { Err::<(), _>("boom") })
            .await;
        assert_eq!(result, Ok(Err("boom")));
    }

    #[tokio::test]
    async fn newer_run_supersedes_older() {
        let runner = Arc::new(SingleFlight::new());

        let first = {
            let runner = Arc::clone(&runner);
            tokio::spawn(async move {
                runner
                    .run_exclusive(async {
                        std::future::pending::<()>().await;
                        "first"
                    })
                    .await
            })
        };
        wait_running(&runner).await;

        let second = runner.run_exclusive(async { "second" }).await;
        assert_eq!(second, Ok("second"));
        assert_eq!(first.await.unwrap(), Err(Superseded));
        assert_eq!(runner.state(), FlightState::Idle);
    }

    #[tokio::test]
    async fn never_runs_two_at_once() {
        let runner = Arc::new(SingleFlight::new());
        let active = Arc::new(AtomicUsize::new(0));

        let first = {
            let runner = Arc::clone(&runner);
            let active = Arc::clone(&active);
            tokio::spawn(async move {
                runner
                    .run_exclusive(async move {
                        let _guard = ActiveGuard::enter(&active);
                        tokio::time::sleep(Duration::from_secs(60)).await;
                    })
                    .await
            })
        };
        wait_running(&runner).await;

        let observed = {
            let active = Arc::clone(&active);
            runner
                .run_exclusive(async move { active.load(Ordering::SeqCst) })
                .await
        };
        assert_eq!(observed, Ok(0));
        assert_eq!(first.await.unwrap(), Err(Superseded));
    }

    #[tokio::test]
    async fn cancel_current_is_idempotent() {
        let runner = Arc::new(SingleFlight::new());
        assert!(!runner.cancel_current().await);

        let pending = {
            let runner = Arc::clone(&runner);
            tokio::spawn(async move {
                runner
                    .run_exclusive(std::future::pending::<()>())
                    .await
            })
        };
        wait_running(&runner).await;

        assert!(runner.cancel_current().await);
        assert!(!runner.cancel_current().await);
        assert_eq!(pending.await.unwrap(), Err(Superseded));
        assert_eq!(runner.state(), FlightState::Idle);
    }

    #[tokio::test]
    async fn completed_flight_is_not_reported_as_cancelled() {
        let runner = SingleFlight::new();
        runner.run_exclusive(async {}).await.unwrap();
        assert!(!runner.cancel_current().await);
    }

    #[tokio::test]
    #[should_panic(expected = "work exploded")]
    async fn panics_propagate_to_caller() {
        let runner = SingleFlight::new();
        let _ = runner
            .run_exclusive(async { panic!("work exploded") })
            .await;
    }
}
