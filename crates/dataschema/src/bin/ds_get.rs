//! `ds-get`: print the value at a dotted path.
//!
//! Usage:
//!   ds-get '<path>' [--pretty]
//!
//! The document is read from stdin. Exits with status 1 when the path does
//! not resolve.

use dataschema::cli::{init_logging, lookup, parse_args, read_stdin, CliError};
use std::io::{self, Write};

fn run() -> Result<bool, CliError> {
    let (positionals, output) = parse_args(std::env::args().skip(1))?;
    let path = positionals
        .first()
        .ok_or_else(|| CliError::Usage("First argument must be a path.".to_string()))?;
    let doc = read_stdin()?;
    match lookup(doc.trim(), path, output)? {
        Some(found) => {
            writeln!(io::stdout(), "{found}")?;
            Ok(true)
        }
        None => Ok(false),
    }
}

fn main() {
    init_logging();
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
