use std::sync::Arc;

use engine_logging::{engine_debug, engine_info, engine_trace};
use jsvars_core::{
    DeclarationExtractor, Extractor, ReportRecord, ScanRecord, ScanSettings, Target,
};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;

use crate::{DispatchError, Fetcher, RecordSink, WorkerState};

type SharedQueue = Arc<Mutex<mpsc::Receiver<Target>>>;

/// Fixed-size pool of workers draining one bounded queue of targets.
pub struct WorkerPool {
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn Extractor>,
    settings: ScanSettings,
}

impl WorkerPool {
    pub fn new(fetcher: Arc<dyn Fetcher>, settings: ScanSettings) -> Self {
        Self::with_extractor(fetcher, Arc::new(DeclarationExtractor), settings)
    }

    pub fn with_extractor(
        fetcher: Arc<dyn Fetcher>,
        extractor: Arc<dyn Extractor>,
        settings: ScanSettings,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            settings,
        }
    }

    /// Process every target and emit exactly one record per target to `sink`.
    ///
    /// Workers are started before the first target is queued. `targets` is
    /// drained on a blocking thread, so it may read from a blocking source
    /// such as stdin; it is held back once the queue is full. Returns after
    /// every worker has seen the queue close and finished its current item.
    /// Records arrive in completion order, not input order.
    pub async fn run<I>(&self, targets: I, sink: Arc<dyn RecordSink>) -> Result<usize, DispatchError>
    where
        I: IntoIterator<Item = Target> + Send + 'static,
        I::IntoIter: Send,
    {
        let concurrency = self.settings.concurrency.get();
        let (tx, rx) = mpsc::channel::<Target>(concurrency);
        let queue: SharedQueue = Arc::new(Mutex::new(rx));

        let mut workers = JoinSet::new();
        for worker_id in 0..concurrency {
            workers.spawn(worker_loop(
                worker_id,
                queue.clone(),
                self.fetcher.clone(),
                self.extractor.clone(),
                self.settings.filter.clone(),
                sink.clone(),
            ));
        }
        engine_debug!("Started {concurrency} workers");

        let producer = tokio::task::spawn_blocking(move || {
            let mut enqueued = 0usize;
            for target in targets {
                if target.trim().is_empty() {
                    continue;
                }
                // Fails only if every worker is gone.
                if tx.blocking_send(target).is_err() {
                    break;
                }
                enqueued += 1;
            }
            // `tx` drops here, closing the queue.
            enqueued
        });

        let enqueued = match producer.await {
            Ok(count) => count,
            Err(err) => {
                // Still let the workers drain what was queued.
                while workers.join_next().await.is_some() {}
                return Err(DispatchError::Producer(err));
            }
        };

        let mut processed = 0usize;
        let mut failure = None;
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(count) => processed += count,
                Err(err) => {
                    failure.get_or_insert(err);
                }
            }
        }
        if let Some(err) = failure {
            return Err(DispatchError::Worker(err));
        }

        if enqueued == 0 {
            return Err(DispatchError::NoTargets);
        }
        engine_info!("Processed {processed} of {enqueued} targets");
        Ok(processed)
    }
}

async fn worker_loop(
    worker_id: usize,
    queue: SharedQueue,
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn Extractor>,
    filter: Option<String>,
    sink: Arc<dyn RecordSink>,
) -> usize {
    let mut processed = 0;
    loop {
        let next = queue.lock().await.recv().await;
        let Some(target) = next else {
            break;
        };

        transition(worker_id, WorkerState::Fetching, &target);
        let record = match fetcher.fetch(&target).await {
            Ok(content) => {
                transition(worker_id, WorkerState::Extracting, &target);
                let bindings = extractor.extract(&content, filter.as_deref());
                ScanRecord::Report(ReportRecord { target, bindings })
            }
            Err(err) => {
                engine_debug!("Worker {worker_id} failed {target}: {err}");
                ScanRecord::Failure(err.into_record(target))
            }
        };

        transition(worker_id, WorkerState::Emitting, record.target());
        sink.emit(record);
        processed += 1;
        engine_trace!("Worker {worker_id} -> {:?}", WorkerState::Idle);
    }
    engine_trace!("Worker {worker_id} -> {:?}", WorkerState::Stopped);
    processed
}

fn transition(worker_id: usize, state: WorkerState, target: &str) {
    engine_trace!("Worker {worker_id} -> {state:?} ({target})");
}
