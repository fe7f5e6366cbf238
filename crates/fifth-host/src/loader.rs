//! Script loading
//!
//! Reads a text source file and feeds it to the evaluator line by line. One
//! bad line is reported and skipped; the rest of the file still runs.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use fifth_sdk::{EngineContext, VmStatus};

use crate::report::Reporter;

/// Lines longer than this are truncated at the boundary. A documented
/// limitation of the loader, not an error.
pub const MAX_LINE: usize = 256;

/// Evaluate one line of source, reporting any non-`Ok` status with its
/// source context. Returns the status so callers can branch; every caller in
/// this crate simply continues.
pub fn eval_line(
    engine: &mut dyn EngineContext,
    reporter: &mut Reporter,
    source: Option<&str>,
    line: u32,
    text: &str,
) -> VmStatus {
    let status = engine.eval(text);
    if let Some(message) = status.message() {
        reporter.error(source.map(|s| (s, line)), message);
    }
    status
}

/// Load a source file, evaluating each line through the engine.
///
/// Per-line evaluation errors are reported with the 1-based line number and
/// do not stop the rest of the file. A missing or unreadable file reports
/// the native error and returns without evaluating anything; this is
/// non-fatal to the caller.
pub fn include(engine: &mut dyn EngineContext, reporter: &mut Reporter, path: &Path) {
    let source = path.display().to_string();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            reporter.error(None, &format!("error opening file '{}': {}", source, e));
            return;
        }
    };

    let mut reader = BufReader::new(file);
    let mut buf = String::new();
    let mut line = 1u32;
    loop {
        buf.clear();
        match reader.read_line(&mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let text = truncate_line(buf.trim_end_matches(['\n', '\r']), MAX_LINE);
                eval_line(engine, reporter, Some(&source), line, text);
                line += 1;
            }
            Err(e) => {
                reporter.error(None, &format!("error reading file '{}': {}", source, e));
                return;
            }
        }
    }
}

fn truncate_line(line: &str, max: usize) -> &str {
    if line.len() <= max {
        return line;
    }
    let mut end = max;
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    &line[..end]
}
