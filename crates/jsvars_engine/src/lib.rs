//! jsvars engine: HTTP retrieval and the worker pool that drives extraction.
mod fetch;
mod pool;
mod sink;
mod types;

pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use pool::WorkerPool;
pub use sink::{ChannelRecordSink, RecordSink};
pub use types::{DispatchError, FetchError, WorkerState};
