//! `ds-keys`: collect the distinct values found along a relation.
//!
//! Usage:
//!   ds-keys '<relation>' [--pretty]
//!
//! The document is read from stdin; the keys are printed as a JSON array.

use dataschema::cli::{init_logging, keys, parse_args, read_stdin, CliError};
use std::io::{self, Write};

fn run() -> Result<(), CliError> {
    let (positionals, output) = parse_args(std::env::args().skip(1))?;
    let relation = positionals
        .first()
        .ok_or_else(|| CliError::Usage("First argument must be a relation.".to_string()))?;
    let doc = read_stdin()?;
    let collected = keys(doc.trim(), relation, output)?;
    writeln!(io::stdout(), "{collected}")?;
    Ok(())
}

fn main() {
    init_logging();
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
