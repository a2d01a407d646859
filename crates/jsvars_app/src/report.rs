//! Console rendering of scan records.

use std::io::{self, Write};
use std::sync::Mutex;

use engine_logging::engine_warn;
use jsvars_core::{FailureKind, FailureRecord, ReportRecord, ScanRecord};
use jsvars_engine::RecordSink;

/// Escape sequences used by the reporter. Empty strings disable coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub reset: &'static str,
    pub red: &'static str,
    pub green: &'static str,
    pub yellow: &'static str,
    pub blue: &'static str,
}

impl Palette {
    pub const fn ansi() -> Self {
        Self {
            reset: "\x1b[0m",
            red: "\x1b[31m",
            green: "\x1b[32m",
            yellow: "\x1b[33m",
            blue: "\x1b[34m",
        }
    }

    pub const fn plain() -> Self {
        Self {
            reset: "",
            red: "",
            green: "",
            yellow: "",
            blue: "",
        }
    }
}

/// Writes each record as one block; blocks from concurrent workers never
/// interleave.
pub struct ConsoleReporter<W: Write + Send> {
    palette: Palette,
    out: Mutex<W>,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout(palette: Palette) -> Self {
        Self::new(palette, io::stdout())
    }
}

impl<W: Write + Send> ConsoleReporter<W> {
    pub fn new(palette: Palette, out: W) -> Self {
        Self {
            palette,
            out: Mutex::new(out),
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W: Write + Send> RecordSink for ConsoleReporter<W> {
    fn emit(&self, record: ScanRecord) {
        let block = render(&self.palette, &record);
        let mut out = match self.out.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(err) = out.write_all(block.as_bytes()).and_then(|()| out.flush()) {
            engine_warn!("Failed to write report for {}: {err}", record.target());
        }
    }
}

pub fn render(palette: &Palette, record: &ScanRecord) -> String {
    match record {
        ScanRecord::Report(report) => render_report(palette, report),
        ScanRecord::Failure(failure) => render_failure(palette, failure),
    }
}

fn render_report(p: &Palette, report: &ReportRecord) -> String {
    let mut block = String::new();
    if report.has_matches() {
        block.push_str(&format!(
            "{}[URL]{} {}{}{}\n",
            p.green, p.reset, p.blue, report.target, p.reset
        ));
        block.push_str(&format!("{}  Variables and Values:{}\n", p.yellow, p.reset));
        for binding in &report.bindings {
            block.push_str(&format!(
                "{}    {}[{}] [{}]\n",
                p.green, p.reset, binding.name, binding.value
            ));
        }
    } else {
        block.push_str(&format!(
            "{}[URL]{} {}{}{}\n",
            p.yellow, p.reset, p.blue, report.target, p.reset
        ));
        block.push_str(&format!(
            "{}  No matching variables found.{}\n",
            p.yellow, p.reset
        ));
    }
    block
}

fn render_failure(p: &Palette, failure: &FailureRecord) -> String {
    let target = &failure.target;
    let detail = &failure.detail;
    match failure.kind {
        FailureKind::Transport => format!(
            "{}[Error]{} Error fetching {target} : {detail}\n",
            p.red, p.reset
        ),
        FailureKind::NonSuccessStatus(_) => format!(
            "{}[Warning]{} Non-OK HTTP status for {target} : {detail}\n",
            p.yellow, p.reset
        ),
        FailureKind::BodyRead => format!(
            "{}[Error]{} Error reading response body from {target} : {detail}\n",
            p.red, p.reset
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsvars_core::VariableBinding;
    use pretty_assertions::assert_eq;

    fn report(bindings: Vec<VariableBinding>) -> ScanRecord {
        ScanRecord::Report(ReportRecord {
            target: "https://a.test/app.js".into(),
            bindings,
        })
    }

    #[test]
    fn renders_bindings_in_order() {
        let record = report(vec![
            VariableBinding::new("a", "1"),
            VariableBinding::new("b", "\"x"),
        ]);
        assert_eq!(
            render(&Palette::plain(), &record),
            "[URL] https://a.test/app.js\n  Variables and Values:\n    [a] [1]\n    [b] [\"x]\n"
        );
    }

    #[test]
    fn renders_no_match_notice() {
        assert_eq!(
            render(&Palette::plain(), &report(Vec::new())),
            "[URL] https://a.test/app.js\n  No matching variables found.\n"
        );
    }

    #[test]
    fn renders_each_failure_kind() {
        let failure = |kind, detail: &str| {
            ScanRecord::Failure(FailureRecord {
                target: "https://a.test/app.js".into(),
                kind,
                detail: detail.into(),
            })
        };
        let plain = Palette::plain();

        assert_eq!(
            render(&plain, &failure(FailureKind::Transport, "connection refused")),
            "[Error] Error fetching https://a.test/app.js : connection refused\n"
        );
        assert_eq!(
            render(&plain, &failure(FailureKind::NonSuccessStatus(404), "404 Not Found")),
            "[Warning] Non-OK HTTP status for https://a.test/app.js : 404 Not Found\n"
        );
        assert_eq!(
            render(&plain, &failure(FailureKind::BodyRead, "reset")),
            "[Error] Error reading response body from https://a.test/app.js : reset\n"
        );
    }

    #[test]
    fn ansi_palette_wraps_header() {
        let rendered = render(&Palette::ansi(), &report(Vec::new()));
        assert!(rendered.starts_with("\x1b[33m[URL]\x1b[0m \x1b[34mhttps://a.test/app.js\x1b[0m\n"));
    }

    #[test]
    fn reporter_writes_whole_blocks() {
        let reporter = ConsoleReporter::new(Palette::plain(), Vec::new());
        reporter.emit(report(vec![VariableBinding::new("a", "1")]));
        reporter.emit(report(Vec::new()));

        let written = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(written.matches("[URL]").count(), 2);
        assert!(written.contains("    [a] [1]\n"));
    }
}
