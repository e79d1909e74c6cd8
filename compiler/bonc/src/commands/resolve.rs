//! The `resolve` command: print the descriptor table of every field.

use bonc::table::{render_text, rows};
use bonc::GenerationRun;

use super::{load_model_file, report, Options, OutputFormat};

/// Print how every field's data type resolves.
///
/// Fields whose type fails to resolve are listed as unresolved; the
/// diagnostics explain why.
pub fn resolve_file(path: &str, options: &Options) {
    let model = load_model_file(path);
    let mut run = GenerationRun::new(&model, options.check);
    let result = run.check();

    let table = rows(&model, &run.resolved_fields());
    match options.format {
        OutputFormat::Terminal => {
            report(&result, options);
            print!("{}", render_text(&table));
        }
        OutputFormat::Json => match serde_json::to_string_pretty(&table) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: cannot serialize descriptor table: {e}");
                std::process::exit(1);
            }
        },
    }
    run.finish();

    if result.has_errors().is_some() {
        std::process::exit(1);
    }
}
