//! Entry point of the `optbind` binary

use clap::Parser;
use std::process::ExitCode;

use super::cli::args::Args;
use super::cli::display::render;
use super::inspect::inspect;
use crate::core::error_handling::log_error_with_context;
use crate::core::logging::init_logging;

pub fn startup() -> ExitCode {
    let args = Args::parse();
    run(&args)
}

pub fn run(args: &Args) -> ExitCode {
    let use_color = args.use_color();
    colored::control::set_override(use_color);

    let log_file = args.log_file.as_ref().map(|p| p.to_string_lossy().to_string());
    if let Err(e) = init_logging(
        args.log_level.as_deref(),
        args.log_format,
        log_file.as_deref(),
        use_color,
    ) {
        eprintln!("Logging disabled: {}", e);
    }

    let profile = match args.resolve_profile() {
        Ok(profile) => profile,
        Err(e) => {
            log_error_with_context(&e, "Resolving the customization profile");
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };
    log::debug!("Using profile {:?}", profile);

    let inspection = inspect(&args.inspect, &args.keys, &profile);
    match render(&inspection, args.format, use_color) {
        Ok(report) => println!("{}", report),
        Err(e) => {
            eprintln!("Error: cannot render report: {}", e);
            return ExitCode::from(2);
        }
    }

    if inspection.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
