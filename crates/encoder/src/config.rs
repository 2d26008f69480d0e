//! Encoder configuration.
//!
//! Only the token affixes of the primary table are configurable. They must
//! keep tokens syntactically valid identifiers of the target script language
//! and unlikely to collide with user-chosen names.
//!
//! ```toml
//! prefix = "JaspColumn_"
//! postfix = "_Encoded"
//! ```

use serde::Deserialize;

use crate::error::Result;

/// Token affixes used when the primary table is rebuilt.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncoderConfig {
	/// Text placed before the running counter of every token.
	pub prefix: String,
	/// Text placed after the running counter of every token.
	pub postfix: String,
}

impl Default for EncoderConfig {
	fn default() -> Self {
		Self {
			prefix: "JaspColumn_".to_string(),
			postfix: "_Encoded".to_string(),
		}
	}
}

impl EncoderConfig {
	/// Parses a configuration from TOML text. Missing keys keep their defaults.
	pub fn from_toml_str(input: &str) -> Result<Self> {
		Ok(toml::from_str(input)?)
	}
}
