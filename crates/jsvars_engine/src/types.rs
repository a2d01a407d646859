use jsvars_core::{FailureKind, FailureRecord};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn into_record(self, target: impl Into<String>) -> FailureRecord {
        FailureRecord {
            target: target.into(),
            kind: self.kind,
            detail: self.message,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// Nothing was ever enqueued; callers treat this as a usage error.
    #[error("no targets were provided")]
    NoTargets,
    #[error("worker task failed: {0}")]
    Worker(#[source] tokio::task::JoinError),
    #[error("target producer failed: {0}")]
    Producer(#[source] tokio::task::JoinError),
}

/// Lifecycle of a single worker. `Stopped` is reached only once the queue is
/// closed and drained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Idle,
    Fetching,
    Extracting,
    Emitting,
    Stopped,
}
