use std::sync::mpsc;

use jsvars_core::ScanRecord;

/// Consumer of per-target outcomes. Called concurrently from every worker.
pub trait RecordSink: Send + Sync {
    fn emit(&self, record: ScanRecord);
}

pub struct ChannelRecordSink {
    tx: mpsc::Sender<ScanRecord>,
}

impl ChannelRecordSink {
    pub fn new(tx: mpsc::Sender<ScanRecord>) -> Self {
        Self { tx }
    }
}

impl RecordSink for ChannelRecordSink {
    fn emit(&self, record: ScanRecord) {
        let _ = self.tx.send(record);
    }
}
