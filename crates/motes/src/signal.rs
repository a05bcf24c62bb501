//! Completion signal for the chaos transition.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll, Waker};

use parking_lot::Mutex;

/// How a chaos transition ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChaosOutcome {
    /// The reform collection was installed.
    Completed,
    /// A regeneration superseded the transition, or the controller was
    /// dropped, before the reform ran.
    Cancelled,
}

#[derive(Debug, Default)]
struct SignalState {
    outcome: Option<ChaosOutcome>,
    waker: Option<Waker>,
}

/// Controller side of a [`ChaosCompletion`].
#[derive(Debug, Clone, Default)]
pub(crate) struct ChaosSignal {
    state: Arc<Mutex<SignalState>>,
}

impl ChaosSignal {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn completion(&self) -> ChaosCompletion {
        ChaosCompletion {
            state: self.state.clone(),
        }
    }

    /// Resolve the signal. Only the first outcome sticks.
    pub(crate) fn resolve(&self, outcome: ChaosOutcome) {
        let waker = {
            let mut state = self.state.lock();
            if state.outcome.is_some() {
                return;
            }
            state.outcome = Some(outcome);
            state.waker.take()
        };
        if let Some(waker) = waker {
            waker.wake();
        }
    }
}

/// Future returned by [`Controller::trigger_chaos`](crate::Controller::trigger_chaos).
///
/// The controller resolves it from [`Controller::tick`](crate::Controller::tick),
/// so something must keep ticking for it to finish.
#[derive(Debug)]
#[must_use = "dropping the completion does not cancel the chaos transition"]
pub struct ChaosCompletion {
    state: Arc<Mutex<SignalState>>,
}

impl ChaosCompletion {
    /// Outcome if the transition already ended.
    pub fn outcome(&self) -> Option<ChaosOutcome> {
        self.state.lock().outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome().is_some()
    }
}

impl Future for ChaosCompletion {
    type Output = ChaosOutcome;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut state = self.state.lock();
        match state.outcome {
            Some(outcome) => Poll::Ready(outcome),
            None => {
                state.waker = Some(cx.waker().clone());
                Poll::Pending
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_lite::future;

    #[test]
    fn test_pending_until_resolved() {
        let signal = ChaosSignal::new();
        let mut completion = signal.completion();

        assert_eq!(future::block_on(future::poll_once(&mut completion)), None);
        assert!(!completion.is_finished());

        signal.resolve(ChaosOutcome::Completed);
        assert_eq!(completion.outcome(), Some(ChaosOutcome::Completed));
        assert_eq!(future::block_on(completion), ChaosOutcome::Completed);
    }

    #[test]
    fn test_first_outcome_wins() {
        let signal = ChaosSignal::new();
        let completion = signal.completion();

        signal.resolve(ChaosOutcome::Cancelled);
        signal.resolve(ChaosOutcome::Completed);
        assert_eq!(future::block_on(completion), ChaosOutcome::Cancelled);
    }

    #[test]
    fn test_wakes_waiting_task() {
        let signal = ChaosSignal::new();
        let completion = signal.completion();

        let resolver = signal.clone();
        let handle = std::thread::spawn(move || {
            std::thread::sleep(std::time::Duration::from_millis(10));
            resolver.resolve(ChaosOutcome::Completed);
        });

        assert_eq!(future::block_on(completion), ChaosOutcome::Completed);
        handle.join().unwrap();
    }
}
