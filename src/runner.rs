use crate::errors::RunnerError;
use crossbeam::channel::{bounded, Receiver, RecvTimeoutError, Sender};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const CHANNEL_CAPACITY: usize = 64;
const TEARDOWN_GRACE: Duration = Duration::from_millis(250);

/// What to do when the worker produces nothing for a whole step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeoutPolicy {
    /// Surface a [`RunnerError::StepTimeout`] and end the stream.
    Raise,
    /// End the stream as if the source had completed.
    StopSilently,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunnerState {
    Running,
    Completed,
    Errored,
    TimedOut,
    TornDown,
}

enum Event<T> {
    Item(T),
    Done,
    Panicked(String),
}

/// Runs `source` inside a dedicated worker thread and hands its items
/// back through a bounded channel, waiting at most `per_step_timeout`
/// for each one. A source that hangs, loops forever or panics cannot
/// block or corrupt the caller.
///
/// Teardown happens on every exit path, including dropping the stream
/// half-way: the cancellation flag is set, the channel is drained and
/// disconnected (which unparks a producer blocked on a full channel),
/// and the worker is joined within a bounded grace period. A worker
/// that ignores all of that is detached; it can no longer reach the
/// caller.
pub fn run_bounded<I, T>(
    source: I,
    per_step_timeout: Duration,
    policy: TimeoutPolicy,
) -> BoundedStream<T>
where
    I: IntoIterator<Item = T> + Send + 'static,
    T: Send + 'static,
{
    assert!(per_step_timeout > Duration::from_secs(0));
    let (sender, receiver) = bounded(CHANNEL_CAPACITY);
    let cancel = Arc::new(AtomicBool::new(false));
    let worker_cancel = cancel.clone();
    let worker = thread::Builder::new()
        .name("bounded-runner".into())
        .spawn(move || produce(source, sender, worker_cancel))
        .expect("failed to spawn worker thread");
    BoundedStream {
        receiver: Some(receiver),
        worker: Some(worker),
        cancel,
        per_step_timeout,
        policy,
        state: RunnerState::Running,
    }
}

fn produce<I, T>(source: I, sender: Sender<Event<T>>, cancel: Arc<AtomicBool>)
where
    I: IntoIterator<Item = T>,
{
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        for item in source {
            if cancel.load(Ordering::SeqCst) {
                break;
            }
            if sender.send(Event::Item(item)).is_err() {
                // consumer tore the channel down
                break;
            }
        }
    }));
    let last = match result {
        Ok(()) => Event::Done,
        Err(payload) => Event::Panicked(panic_message(payload.as_ref())),
    };
    let _ = sender.send(last);
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "worker panicked".to_string()
    }
}

pub struct BoundedStream<T> {
    receiver: Option<Receiver<Event<T>>>,
    worker: Option<JoinHandle<()>>,
    cancel: Arc<AtomicBool>,
    per_step_timeout: Duration,
    policy: TimeoutPolicy,
    state: RunnerState,
}

impl<T> BoundedStream<T> {
    /// `Running` while items may still arrive, `TornDown` afterwards.
    pub fn state(&self) -> RunnerState {
        self.state
    }

    fn finish(&mut self, outcome: RunnerState) {
        self.state = outcome;
        self.teardown();
    }

    fn teardown(&mut self) {
        self.cancel.store(true, Ordering::SeqCst);
        if let Some(receiver) = self.receiver.take() {
            // discard whatever the worker managed to push, then drop
            // the receiver so a blocked send fails instead of parking
            while receiver.try_recv().is_ok() {}
        }
        if let Some(worker) = self.worker.take() {
            let deadline = Instant::now() + TEARDOWN_GRACE;
            while !worker.is_finished() && Instant::now() < deadline {
                thread::sleep(Duration::from_millis(1));
            }
            if worker.is_finished() {
                let _ = worker.join();
            }
            // unresponsive workers are detached, never waited on
        }
        self.state = RunnerState::TornDown;
    }
}

impl<T> Iterator for BoundedStream<T> {
    type Item = Result<T, RunnerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state != RunnerState::Running {
            return None;
        }
        let receiver = match self.receiver.as_ref() {
            Some(receiver) => receiver,
            None => return None,
        };
        match receiver.recv_timeout(self.per_step_timeout) {
            Ok(Event::Item(item)) => Some(Ok(item)),
            Ok(Event::Done) => {
                self.finish(RunnerState::Completed);
                None
            }
            Ok(Event::Panicked(reason)) => {
                self.finish(RunnerState::Errored);
                Some(Err(RunnerError::Worker { reason }))
            }
            Err(RecvTimeoutError::Disconnected) => {
                self.finish(RunnerState::Errored);
                Some(Err(RunnerError::Worker {
                    reason: "worker terminated without completing".to_string(),
                }))
            }
            Err(RecvTimeoutError::Timeout) => {
                self.finish(RunnerState::TimedOut);
                match self.policy {
                    TimeoutPolicy::Raise => Some(Err(RunnerError::StepTimeout {
                        timeout: self.per_step_timeout,
                    })),
                    TimeoutPolicy::StopSilently => None,
                }
            }
        }
    }
}

impl<T> Drop for BoundedStream<T> {
    fn drop(&mut self) {
        self.teardown();
    }
}
