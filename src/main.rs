//! # isearch CLI
//!
//! Command-line interface for the similar image search.
//!
//! ## Usage
//! ```bash
//! isearch cat.jpg ~/Pictures
//! isearch cat.jpg ~/Pictures --algorithm dhash --level 5 --output json
//! ```

mod cli;

use console::style;
use std::process::ExitCode;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
