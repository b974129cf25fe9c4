//! yearcal - twelve-month calendar layout with holiday overlays

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = yearcal::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
