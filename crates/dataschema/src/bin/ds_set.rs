//! `ds-set`: set a dotted path to a JSON value.
//!
//! Usage:
//!   ds-set '<path>' '<json-value>' [--pretty]
//!
//! The document is read from stdin; the updated document is printed.

use dataschema::cli::{init_logging, parse_args, read_stdin, set, CliError};
use std::io::{self, Write};

fn run() -> Result<(), CliError> {
    let (positionals, output) = parse_args(std::env::args().skip(1))?;
    let (path, value) = match positionals.as_slice() {
        [path, value, ..] => (path, value),
        _ => return Err(CliError::Usage("Usage: ds-set <path> <json-value>".to_string())),
    };
    let doc = read_stdin()?;
    let updated = set(doc.trim(), path, value, output)?;
    writeln!(io::stdout(), "{updated}")?;
    Ok(())
}

fn main() {
    init_logging();
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
