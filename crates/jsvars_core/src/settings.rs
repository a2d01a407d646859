use std::num::NonZeroUsize;

pub const DEFAULT_CONCURRENCY: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(value) => value,
    None => unreachable!(),
};

/// Process-wide scan configuration, fixed for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSettings {
    /// Number of workers, which is also the capacity of the target queue.
    pub concurrency: NonZeroUsize,
    /// Only report bindings with exactly this name.
    pub filter: Option<String>,
}

impl ScanSettings {
    pub fn new(concurrency: NonZeroUsize, filter: Option<String>) -> Self {
        Self {
            concurrency,
            filter: filter.filter(|name| !name.is_empty()),
        }
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            filter: None,
        }
    }
}
