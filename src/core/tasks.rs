//! Background task dispatch
//!
//! A task is dispatched with `delay(...)`, which returns immediately with a
//! [`TaskHandle`]. Calling [`TaskHandle::get`] waits for the result.
//!
//! `get` takes a timeout and a `propagate` flag. When no result can be produced
//! (the task failed, panicked, timed out, or never had a result) `get` returns an
//! error if `propagate` is set and `Ok(None)` otherwise.

use crate::domain::{DataSubmissionReport, Mapping, NadError, Result};
use std::path::PathBuf;
use std::time::Duration;
use tokio::task::JoinHandle;

enum HandleState<T> {
    Running(JoinHandle<Result<T>>),
    Ready(Option<T>),
}

/// Pending result of a dispatched task
pub struct TaskHandle<T> {
    task_name: &'static str,
    state: HandleState<T>,
}

impl<T: Send + 'static> TaskHandle<T> {
    /// Run `job` on the blocking thread pool
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_blocking<F>(task_name: &'static str, job: F) -> Self
    where
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        tracing::debug!(task = task_name, "Dispatching task");
        Self {
            task_name,
            state: HandleState::Running(tokio::task::spawn_blocking(job)),
        }
    }

    /// A handle whose outcome is already known
    ///
    /// `None` models a task that never produced a result.
    pub fn ready(task_name: &'static str, result: Option<T>) -> Self {
        Self {
            task_name,
            state: HandleState::Ready(result),
        }
    }

    /// Name the task was dispatched under
    pub fn task_name(&self) -> &'static str {
        self.task_name
    }

    /// Wait for the task result
    ///
    /// `timeout` of `None` waits indefinitely. A running task that times out is
    /// aborted if it has not started yet; a blocking job already running is left
    /// to finish in the background.
    ///
    /// # Errors
    ///
    /// Returns [`NadError::Task`] when no result is available and `propagate` is
    /// `true`.
    pub async fn get(self, timeout: Option<Duration>, propagate: bool) -> Result<Option<T>> {
        let task_name = self.task_name;
        let outcome: Result<T> = match self.state {
            HandleState::Ready(Some(value)) => Ok(value),
            HandleState::Ready(None) => Err(NadError::Task(format!(
                "No result has been set for task {task_name}"
            ))),
            HandleState::Running(handle) => {
                let abort = handle.abort_handle();
                let joined = match timeout {
                    Some(limit) => match tokio::time::timeout(limit, handle).await {
                        Ok(joined) => joined,
                        Err(_) => {
                            abort.abort();
                            return Self::no_result(
                                task_name,
                                propagate,
                                NadError::Task(format!(
                                    "Task {task_name} timed out after {}s",
                                    limit.as_secs_f64()
                                )),
                            );
                        }
                    },
                    None => handle.await,
                };

                match joined {
                    Ok(result) => result,
                    Err(e) => Err(NadError::Task(format!("Task {task_name} did not complete: {e}"))),
                }
            }
        };

        match outcome {
            Ok(value) => Ok(Some(value)),
            Err(e) => Self::no_result(task_name, propagate, e),
        }
    }

    fn no_result(task_name: &'static str, propagate: bool, error: NadError) -> Result<Option<T>> {
        if propagate {
            Err(error)
        } else {
            tracing::warn!(task = task_name, error = %error, "Task produced no result");
            Ok(None)
        }
    }
}

/// Arguments for the submission validation task
#[derive(Debug, Clone)]
pub struct ValidationRequest {
    /// Id of the submission being validated
    pub submission_id: i64,

    /// Local path of the downloaded submission file
    pub path: PathBuf,

    /// Canonical field to source column
    pub mapping: Mapping,
}

/// Background task that turns a downloaded submission into a report
pub trait ValidationTask: Send + Sync {
    /// Dispatch validation and return immediately
    fn delay(&self, request: ValidationRequest) -> TaskHandle<DataSubmissionReport>;
}

/// Runs [`crate::core::validation::validate_file`] on the blocking pool
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalValidationTask;

impl ValidationTask for LocalValidationTask {
    fn delay(&self, request: ValidationRequest) -> TaskHandle<DataSubmissionReport> {
        TaskHandle::spawn_blocking("load_and_validate", move || {
            crate::core::validation::validate_file(&request.path, &request.mapping)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ready_with_result() {
        let handle = TaskHandle::ready("t", Some(5));
        assert_eq!(handle.get(None, true).await.unwrap(), Some(5));
    }

    #[tokio::test]
    async fn test_ready_without_result_propagates() {
        let handle: TaskHandle<i32> = TaskHandle::ready("t", None);
        let err = handle.get(None, true).await.unwrap_err();
        assert!(err.to_string().contains("No result has been set"));
    }

    #[tokio::test]
    async fn test_ready_without_result_suppressed() {
        let handle: TaskHandle<i32> = TaskHandle::ready("t", None);
        assert_eq!(handle.get(None, false).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_spawned_job_result() {
        let handle = TaskHandle::spawn_blocking("sum", || Ok(2 + 2));
        let value = handle
            .get(Some(Duration::from_secs(5)), true)
            .await
            .unwrap();
        assert_eq!(value, Some(4));
    }

    #[tokio::test]
    async fn test_spawned_job_error() {
        let handle: TaskHandle<i32> =
            TaskHandle::spawn_blocking("fail", || Err(NadError::Validation("bad".to_string())));
        assert!(handle.get(None, true).await.is_err());

        let handle: TaskHandle<i32> =
            TaskHandle::spawn_blocking("fail", || Err(NadError::Validation("bad".to_string())));
        assert_eq!(handle.get(None, false).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_timeout() {
        let handle = TaskHandle::spawn_blocking("slow", || {
            std::thread::sleep(Duration::from_millis(500));
            Ok(1)
        });
        let err = handle
            .get(Some(Duration::from_millis(10)), true)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }
}
