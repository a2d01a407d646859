//! Where targets come from: the argument list or line-delimited input.

use std::io::BufRead;

use engine_logging::engine_error;
use jsvars_core::Target;

/// Targets to scan, consumed lazily by the worker pool's producer.
pub enum TargetSource<R> {
    List(Vec<String>),
    Lines(R),
}

impl<R: BufRead> TargetSource<R> {
    pub fn into_targets(self) -> Box<dyn Iterator<Item = Target> + Send>
    where
        R: Send + 'static,
    {
        match self {
            TargetSource::List(urls) => Box::new(non_blank(urls.into_iter())),
            TargetSource::Lines(reader) => Box::new(non_blank(read_lines(reader))),
        }
    }
}

/// Yields lines until end of input. A read error ends the input early.
fn read_lines<R: BufRead>(reader: R) -> impl Iterator<Item = String> {
    reader.lines().map_while(|line| match line {
        Ok(line) => Some(line),
        Err(err) => {
            engine_error!("Error reading input: {err}");
            None
        }
    })
}

fn non_blank(lines: impl Iterator<Item = String>) -> impl Iterator<Item = Target> {
    lines.filter_map(|line| {
        let trimmed = line.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}
