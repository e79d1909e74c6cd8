//! Command handlers for the bonc CLI.
//!
//! Each submodule implements one command. Option parsing, file loading and
//! diagnostic reporting are shared and live here.

use std::io::IsTerminal;

use bon_check::{CheckConfig, CheckResult};
use bon_diagnostic::emitter::{ColorMode, DiagnosticEmitter, JsonEmitter, TerminalEmitter};
use bon_ir::Model;

mod check;
mod explain;
mod resolve;

pub use check::check_file;
pub use explain::explain_error;
pub use resolve::resolve_file;

/// How diagnostics and tables are written.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

/// Options shared by `check` and `resolve`.
#[derive(Clone, Debug, Default)]
pub struct Options {
    pub format: OutputFormat,
    pub color: ColorMode,
    pub check: CheckConfig,
}

/// Parse the options and the model path following a command name.
pub fn parse_options(args: &[String]) -> Result<(Options, String), String> {
    let mut options = Options::default();
    let mut path = None;

    for arg in args {
        if let Some(format) = arg.strip_prefix("--format=") {
            options.format = match format {
                "terminal" => OutputFormat::Terminal,
                "json" => OutputFormat::Json,
                other => {
                    return Err(format!(
                        "unknown format `{other}` (expected terminal or json)"
                    ))
                }
            };
        } else if let Some(color) = arg.strip_prefix("--color=") {
            options.color = color.parse()?;
        } else if arg == "--no-length-checks" {
            options.check.check_lengths = false;
        } else if arg.starts_with('-') {
            return Err(format!("unknown option `{arg}`"));
        } else if path.is_none() {
            path = Some(arg.clone());
        } else {
            return Err(format!("unexpected argument `{arg}`"));
        }
    }

    let path = path.ok_or_else(|| "missing model file".to_owned())?;
    Ok((options, path))
}

/// Read and load a model file, exiting with a user-friendly message on failure.
fn load_model_file(path: &str) -> Model {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    };

    match bonc::load_model(&content) {
        Ok(model) => model,
        Err(e) => {
            eprintln!("error: cannot load '{path}': {e}");
            std::process::exit(1);
        }
    }
}

/// Write the diagnostics of a run in the requested format.
///
/// JSON goes to stdout so it can be piped. Terminal output goes to stderr.
fn report(result: &CheckResult, options: &Options) {
    match options.format {
        OutputFormat::Json => {
            let mut emitter = JsonEmitter::new(std::io::stdout());
            emitter.emit_all(&result.diagnostics);
            emitter.flush();
        }
        OutputFormat::Terminal => {
            if result.diagnostics.is_empty() {
                return;
            }
            let is_tty = std::io::stderr().is_terminal();
            let mut emitter = TerminalEmitter::stderr(options.color, is_tty);
            emitter.emit_all(&result.diagnostics);
            emitter.emit_summary(result.error_count, result.warning_count);
            emitter.flush();
        }
    }
}
