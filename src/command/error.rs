//! Command interpretation error types.

use thiserror::Error;

/// Errors that can occur while interpreting a filter command.
///
/// Unrecognized commands are not errors (the parser returns `Ok(None)`); this
/// enum covers genuine faults that must reach the caller rather than leave a
/// filter half-constructed.
#[derive(Debug, Error)]
pub enum CommandError {
    /// A `top <integer>` count could not be converted (overflow).
    #[error("invalid top count '{value}': {source}")]
    InvalidTopCount {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
}
