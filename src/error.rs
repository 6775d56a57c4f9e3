//! Error taxonomy: malformed build requests versus failed selections.

use thiserror::Error;

/// Erased cause of a failed part construction.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A factory build request was malformed.
#[derive(Debug, Error)]
pub enum ConfigError {
  /// The catalog set handed to the builder was empty.
  #[error("no catalogs supplied for base type `{base}`")]
  NoCatalogs { base: &'static str },
  /// The positional value and type arrays differ in length.
  #[error("parameter arrays differ in length: {values} values, {types} types")]
  ParameterArity { values: usize, types: usize },
  /// An erased parameter value is not of its declared type.
  #[error("value for parameter declared as `{declared}` is not of that type")]
  ParameterType { declared: &'static str },
}

/// A selection operation could not produce the requested instance.
///
/// `Construction` preserves its cause, so callers can distinguish "no match"
/// from "match found but construction failed".
#[derive(Debug, Error)]
pub enum ResolveError {
  /// No part matched the predicate when exactly one was required.
  #[error("no part of `{base}` matched the predicate")]
  NotFound { base: &'static str },
  /// More than one part matched the predicate when exactly one was required.
  #[error("{count} parts of `{base}` matched the predicate, expected exactly one")]
  Ambiguous { base: &'static str, count: usize },
  /// The requested concrete type was not discovered among the parts.
  #[error("`{part}` is not a discovered part of `{base}`")]
  UnknownPart { base: &'static str, part: &'static str },
  /// Realizing a matched part failed.
  #[error("constructing part `{part}` of `{base}` failed")]
  Construction {
    base: &'static str,
    part: &'static str,
    #[source]
    source: BoxError,
  },
}
