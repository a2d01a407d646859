//! jsvars core: data model, declaration extraction and scan settings. No IO.
mod decode;
mod extract;
mod settings;
mod types;

pub use decode::decode_text;
pub use extract::{extract, extract_content, extract_text, DeclarationExtractor, Extractor};
pub use settings::{ScanSettings, DEFAULT_CONCURRENCY};
pub use types::{
    Content, FailureKind, FailureRecord, ReportRecord, ScanRecord, Target, VariableBinding,
};
