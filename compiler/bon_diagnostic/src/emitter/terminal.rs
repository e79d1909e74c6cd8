//! Human-readable diagnostic output.
//!
//! ```text
//! error[E1005]: field `id` occurs in extended class `shop.Base` already
//!   --> 40..42: shadows an inherited field
//!       10..12: declared in `shop.Base` here
//!   = note: shadowing is not allowed in bonaparte
//! ```

use std::fmt::Write as _;
use std::io::{self, Write};

use crate::{Diagnostic, Severity};

use super::DiagnosticEmitter;

const RED: &str = "\x1b[1;31m";
const YELLOW: &str = "\x1b[1;33m";
const CYAN: &str = "\x1b[1;36m";
const GREEN: &str = "\x1b[1;32m";
const BLUE: &str = "\x1b[1;34m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// When to color terminal output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Color only when writing to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

impl std::str::FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            other => Err(format!(
                "unknown color mode `{other}` (expected auto, always or never)"
            )),
        }
    }
}

/// ANSI styling, or none.
#[derive(Copy, Clone, Debug)]
struct Palette {
    enabled: bool,
}

impl Palette {
    fn paint(self, out: &mut String, style: &str, text: &str) {
        if self.enabled {
            let _ = write!(out, "{style}{text}{RESET}");
        } else {
            out.push_str(text);
        }
    }

    fn severity(severity: Severity) -> &'static str {
        match severity {
            Severity::Error => RED,
            Severity::Warning => YELLOW,
            Severity::Note => CYAN,
        }
    }
}

pub struct TerminalEmitter<W: Write> {
    writer: W,
    palette: Palette,
}

impl<W: Write> TerminalEmitter<W> {
    /// `is_tty` only matters for [`ColorMode::Auto`].
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            palette: Palette {
                enabled: mode.should_use_colors(is_tty),
            },
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn render(&self, diagnostic: &Diagnostic) -> String {
        let palette = self.palette;
        let mut out = String::new();

        palette.paint(
            &mut out,
            Palette::severity(diagnostic.severity),
            diagnostic.severity.as_str(),
        );
        palette.paint(&mut out, BOLD, &format!("[{}]", diagnostic.code));
        let _ = writeln!(out, ": {}", diagnostic.message);

        for label in &diagnostic.labels {
            let (arrow, style) = if label.is_primary {
                ("-->", RED)
            } else {
                ("   ", BLUE)
            };
            let _ = write!(out, "  {arrow} {:?}: ", label.span);
            palette.paint(&mut out, style, &label.message);
            out.push('\n');
        }
        for note in &diagnostic.notes {
            out.push_str("  = ");
            palette.paint(&mut out, BOLD, "note");
            let _ = writeln!(out, ": {note}");
        }
        for suggestion in &diagnostic.suggestions {
            out.push_str("  = ");
            palette.paint(&mut out, GREEN, "help");
            let _ = writeln!(out, ": {}", suggestion.message);
        }
        out.push('\n');
        out
    }
}

impl TerminalEmitter<io::Stderr> {
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        Self::with_color_mode(io::stderr(), mode, is_tty)
    }
}

fn count(n: usize, what: &str) -> String {
    if n == 1 {
        format!("1 {what}")
    } else {
        format!("{n} {what}s")
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        let text = self.render(diagnostic);
        let _ = self.writer.write_all(text.as_bytes());
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        let mut out = String::new();
        if error_count > 0 {
            self.palette.paint(&mut out, RED, "error");
            let _ = write!(out, ": model check found {}", count(error_count, "error"));
            if warning_count > 0 {
                let _ = write!(out, " and {}", count(warning_count, "warning"));
            }
        } else if warning_count > 0 {
            self.palette.paint(&mut out, YELLOW, "warning");
            let _ = write!(out, ": model check found {}", count(warning_count, "warning"));
        } else {
            return;
        }
        out.push('\n');
        let _ = self.writer.write_all(out.as_bytes());
    }
}

#[cfg(test)]
mod tests;
