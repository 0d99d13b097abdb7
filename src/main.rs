//! hitrows CLI entry point
//!
//! Parses arguments and dispatches to `cli::run`. Failures are written as a
//! JSON error object and end the process with a non-zero exit code.

use hitrows::cli;

fn main() {
    if let Err(e) = cli::run() {
        if cli::write_error(e.code_str(), e.message()).is_err() {
            eprintln!("{}", e);
        }
        std::process::exit(1);
    }
}
