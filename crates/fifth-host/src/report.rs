//! Error and trace reporting
//!
//! Maps evaluator result codes to diagnostic text on a colorized stream,
//! carries the engine's low-level trace channel, and converts numeric
//! literals for the evaluator.

use std::fmt;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use fifth_sdk::{Cell, VmStatus};

/// Resolve the color choice for the diagnostic stream.
///
/// `NO_COLOR` wins over TTY auto-detection.
fn color_choice() -> ColorChoice {
    if std::env::var_os("NO_COLOR").is_some() {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    }
}

/// Diagnostic reporter over a colorized stream.
///
/// Production code writes to stderr; tests inject a
/// [`termcolor::Ansi`]/[`termcolor::NoColor`] buffer.
pub struct Reporter {
    stream: Box<dyn WriteColor>,
}

impl Reporter {
    /// Reporter over the process stderr stream.
    pub fn stderr() -> Self {
        Self::new(Box::new(StandardStream::stderr(color_choice())))
    }

    /// Reporter over an arbitrary colorized stream.
    pub fn new(stream: Box<dyn WriteColor>) -> Self {
        Self { stream }
    }

    /// Report an error message in red, with a `source:line: ` prefix when
    /// source context is known.
    pub fn error(&mut self, context: Option<(&str, u32)>, message: &str) {
        write_error(&mut *self.stream, context, message);
    }

    /// Report a non-fatal oddity in yellow.
    pub fn warning(&mut self, message: &str) {
        write_warning(&mut *self.stream, message);
    }

    /// Low-level interpreter trace fragment, dimmed, no trailing newline.
    pub fn trace(&mut self, message: fmt::Arguments<'_>) {
        write_trace(&mut *self.stream, message);
    }
}

fn write_error(stream: &mut dyn WriteColor, context: Option<(&str, u32)>, message: &str) {
    let _ = stream.set_color(ColorSpec::new().set_fg(Some(Color::Red)));
    if let Some((source, line)) = context {
        let _ = write!(stream, "{}:{}: ", source, line);
    }
    let _ = write!(stream, "{}", message);
    let _ = stream.reset();
    let _ = writeln!(stream);
}

fn write_warning(stream: &mut dyn WriteColor, message: &str) {
    let _ = stream.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)));
    let _ = write!(stream, "{}", message);
    let _ = stream.reset();
    let _ = writeln!(stream);
}

fn write_trace(stream: &mut dyn WriteColor, message: fmt::Arguments<'_>) {
    let _ = stream.set_color(ColorSpec::new().set_dimmed(true));
    let _ = stream.write_fmt(message);
    let _ = stream.reset();
}

/// Convert a source token to a cell.
///
/// The whole token must be a number; trailing characters or an empty token
/// yield [`VmStatus::NotAWord`] so the evaluator aborts the word instead of
/// running with a garbage value.
pub fn parse_number(token: &str) -> Result<Cell, VmStatus> {
    token.parse::<Cell>().map_err(|_| VmStatus::NotAWord)
}
