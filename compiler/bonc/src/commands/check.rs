//! The `check` command: validate a model and resolve every data type.

use bonc::GenerationRun;

use super::{load_model_file, report, Options, OutputFormat};

/// Validate a model file, reporting every problem before exiting.
pub fn check_file(path: &str, options: &Options) {
    let model = load_model_file(path);
    let mut run = GenerationRun::new(&model, options.check);
    let result = run.check();
    report(&result, options);

    if result.has_errors().is_some() {
        std::process::exit(1);
    }

    if options.format == OutputFormat::Terminal {
        let classes = model.classes().count();
        let fields = model.fields().count();
        println!("OK: {path} ({classes} classes, {fields} fields)");
    }
    run.finish();
}
