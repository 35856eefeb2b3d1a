// minipy: translate a tiny statement language to Python

use std::io;
use std::path::Path;

use crossterm::tty::IsTty;
use minipy::cli::{usage, Driver};
use minipy::config::Config;
use tracing::{debug, error};

fn main() {
    let config = Config::from_env();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .with_max_level(config.log_level)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("minipy");

    if args.iter().skip(1).any(|a| a == "-h" || a == "--help") {
        println!("{}", usage(program_name));
        return;
    }

    let (source, output) = match args.as_slice() {
        [_, source] => (Path::new(source), None),
        [_, source, output] => (Path::new(source), Some(Path::new(output))),
        _ => {
            eprintln!("Error: Expected a source file and an optional output file");
            eprintln!();
            eprintln!("{}", usage(program_name));
            std::process::exit(1);
        }
    };

    let stdout = io::stdout();
    let driver = Driver::new(config.use_color(stdout.is_tty()));
    debug!(color = %config.color, level = %config.log_level, "starting");

    // Compilation failures are reported on stdout and still exit with status 0.
    if let Err(e) = driver.run(source, output, &mut stdout.lock()) {
        error!(error = %e, "failed to write to stdout");
    }
}
