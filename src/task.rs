//! Fire-and-join task handles.
//!
//! Each task runs on its own thread and reports exactly one outcome through
//! a dedicated channel. The send never blocks and nothing here can cancel a
//! running task; callers that need "wait for all" semantics keep polling
//! every handle until each has reported.

use anyhow::{anyhow, Result};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

/// Handle to a spawned unit of work producing a single `Result<T>`.
pub struct Task<T> {
    rx: Receiver<Result<T>>,
}

/// Run `work` on a dedicated thread and hand back its completion signal.
pub fn spawn<T, F>(work: F) -> Task<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        // The receiver outlives the worker in normal operation; a send
        // error only means nobody is waiting anymore.
        let _ = tx.send(work());
    });
    Task { rx }
}

impl<T> Task<T> {
    /// Wait up to `timeout` for the outcome.
    ///
    /// Returns `None` while the task is still running. Once the outcome has
    /// been delivered the handle is spent; polling again reports a dead
    /// channel.
    pub fn poll(&self, timeout: Duration) -> Option<Result<T>> {
        match self.rx.recv_timeout(timeout) {
            Ok(outcome) => Some(outcome),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                Some(Err(anyhow!("task thread exited without reporting")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_returns_none_until_done() {
        let task = spawn(|| {
            thread::sleep(Duration::from_millis(100));
            Ok(42)
        });

        assert!(task.poll(Duration::from_millis(5)).is_none());

        let mut outcome = None;
        for _ in 0..200 {
            if let Some(result) = task.poll(Duration::from_millis(20)) {
                outcome = Some(result);
                break;
            }
        }
        assert_eq!(outcome.unwrap().unwrap(), 42);
    }

    #[test]
    fn test_poll_delivers_errors() {
        let task = spawn(|| -> Result<()> { Err(anyhow!("boom")) });

        let mut outcome = None;
        for _ in 0..200 {
            if let Some(result) = task.poll(Duration::from_millis(20)) {
                outcome = Some(result);
                break;
            }
        }
        let err = outcome.unwrap().unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_panicking_task_reports_dead_channel() {
        let task = spawn(|| -> Result<()> { panic!("worker died") });

        let mut outcome = None;
        for _ in 0..200 {
            if let Some(result) = task.poll(Duration::from_millis(20)) {
                outcome = Some(result);
                break;
            }
        }
        let err = outcome.unwrap().unwrap_err();
        assert!(err.to_string().contains("without reporting"));
    }
}
