use thiserror::Error;

/// Failures of the few operations that can fail.
///
/// Reads and coercions never fail; they degrade to absent or zero values.
#[derive(Error, Debug)]
pub enum Error {
    /// The holder's JSON form does not fit the requested type.
    #[error("DECODE: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("ENCODE: {0}")]
    Encode(#[source] serde_json::Error),
}
