use thiserror::Error;

/// Input that does not fit the shape a component expects.
///
/// Raised through [`anyhow`] before any output is written; callers can
/// recover it with `err.downcast_ref::<InvalidInput>()`.
#[derive(Debug, Error, PartialEq)]
#[error("invalid input: {0}")]
pub struct InvalidInput(pub String);
