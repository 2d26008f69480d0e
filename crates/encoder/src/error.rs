//! Error types for name encoding.

use thiserror::Error;

/// Errors raised by the name encoder.
///
/// Lookups of unregistered names mean a caller referenced a column before it
/// was registered. They are not recoverable locally and should abort the
/// current operation.
#[derive(Debug, Error)]
pub enum EncodeError {
	/// `encode` was asked for an original name no table knows about.
	#[error("cannot encode {0:?}: not a registered column name")]
	UnknownName(String),

	/// `decode` was asked for a token no table knows about.
	#[error("cannot decode {0:?}: not an encoded column name")]
	UnknownToken(String),

	/// Configuration text could not be parsed.
	#[error("invalid encoder configuration: {0}")]
	Config(#[from] toml::de::Error),
}

/// Result type for encoder operations.
pub type Result<T> = std::result::Result<T, EncodeError>;
