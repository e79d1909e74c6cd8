//! bonc: bonScript type-resolution front-end CLI.

mod commands;

use commands::{check_file, explain_error, parse_options, resolve_file};

fn main() {
    bonc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "check" | "resolve" => {
            let (options, path) = match parse_options(&args[2..]) {
                Ok(parsed) => parsed,
                Err(message) => {
                    eprintln!("error: {message}");
                    eprintln!("Usage: bonc {command} <model.json> [options]");
                    std::process::exit(1);
                }
            };
            if command == "check" {
                check_file(&path, &options);
            } else {
                resolve_file(&path, &options);
            }
        }
        "--explain" | "explain" => {
            if args.len() < 3 {
                eprintln!("Usage: bonc explain <ERROR_CODE>");
                eprintln!("Example: bonc explain E2001");
                std::process::exit(1);
            }
            explain_error(&args[2]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("bonc {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("bonc - bonScript type resolution and validation");
    println!();
    println!("Usage: bonc <command> [options]");
    println!();
    println!("Commands:");
    println!("  check <model.json>     Validate a model and resolve every data type");
    println!("  resolve <model.json>   Print the resolved descriptor of every field");
    println!("  explain <code>         Explain an error code (e.g., E2001)");
    println!("  help                   Show this help message");
    println!("  version                Show version information");
    println!();
    println!("Options:");
    println!("  --format=<fmt>         Output format: terminal (default), json");
    println!("  --color=<mode>         Colors: auto (default), always, never");
    println!("  --no-length-checks     Skip length and precision checks");
    println!();
    println!("Environment:");
    println!("  RUST_LOG               Enable tracing, e.g. RUST_LOG=bon_types=debug");
    println!();
    println!("Examples:");
    println!("  bonc check shop.json");
    println!("  bonc resolve shop.json --format=json");
    println!("  bonc explain E1005");
}
