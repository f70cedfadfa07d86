//! Logic behind the command-line tools.
//!
//! - `ds-get <path>`: print the value at a dotted path
//! - `ds-set <path> <json>`: print the document after a set
//! - `ds-keys <relation>`: print the keys collected along a relation
//!
//! Each tool reads its document from stdin. Output is canonical JSON; pass
//! `--pretty` for indented output. `RUST_LOG` controls logging.

use dataschema_join::KeySet;
use dataschema_value::{Holder, Value};
use std::io::{self, Read};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Value(#[from] dataschema_value::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Usage(String),
}

/// Output options shared by the tools.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Output {
    pub pretty: bool,
}

/// Split command-line arguments into positionals and output options.
pub fn parse_args<I>(args: I) -> Result<(Vec<String>, Output), CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut positionals = Vec::new();
    let mut output = Output::default();
    for arg in args {
        if arg == "--pretty" || arg == "-p" {
            output.pretty = true;
        } else if arg.starts_with("--") {
            return Err(CliError::Usage(format!("Unknown option: {arg}")));
        } else {
            positionals.push(arg);
        }
    }
    Ok((positionals, output))
}

/// Read the whole of stdin.
pub fn read_stdin() -> Result<String, CliError> {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

/// Initialise `env_logger` from `RUST_LOG`.
pub fn init_logging() {
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .init();
}

fn render(holder: &Holder, output: Output) -> Result<String, CliError> {
    if output.pretty {
        return Ok(holder.to_json_pretty()?);
    }
    Ok(serde_json::to_string(holder)?)
}

/// Look up `path` in `doc`. `None` when the path does not resolve.
pub fn lookup(doc: &str, path: &str, output: Output) -> Result<Option<String>, CliError> {
    let found = Holder::parse(doc).get(path);
    if !found.exists() {
        log::debug!("{path:?} did not resolve");
        return Ok(None);
    }
    render(&found, output).map(Some)
}

/// Set `path` in `doc` to the JSON `value` and render the new document.
pub fn set(doc: &str, path: &str, value: &str, output: Output) -> Result<String, CliError> {
    let value: serde_json::Value = serde_json::from_str(value)?;
    let updated = Holder::parse(doc).set(path, Value::from(value));
    render(&updated, output)
}

/// Collect the keys reachable along `relation` as a JSON array.
pub fn keys(doc: &str, relation: &str, output: Output) -> Result<String, CliError> {
    let keys = KeySet::collect(&Holder::parse(doc), relation);
    let holder = Holder::new(Value::array(keys.into_vec().into_iter().map(Value::from).collect()));
    render(&holder, output)
}
