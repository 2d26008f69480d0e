//! Name substitution inside script source text.
//!
//! Encoding is quote-aware: occurrences inside `'...'` or `"..."` literals are
//! never touched. An occurrence is only replaced when it stands on its own as
//! an identifier (no name character directly before or after it) and is not
//! immediately, modulo spaces and tabs, followed by `(`. The latter keeps
//! calls such as `rep(1, 2)` intact when a column happens to be named `rep`.
//!
//! Escaped quotes are not recognised: `\'` inside a literal ends it like any
//! other matching quote.

use std::collections::BTreeSet;

use crate::registry::NameRegistry;
use crate::substitute::{NameMap, replace_scan};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum QuoteState {
	Code,
	Single,
	Double,
}

impl QuoteState {
	fn step(self, c: char) -> Self {
		match (self, c) {
			(Self::Code, '\'') => Self::Single,
			(Self::Code, '"') => Self::Double,
			(Self::Single, '\'') | (Self::Double, '"') => Self::Code,
			(state, _) => state,
		}
	}
}

/// Characters that may continue an identifier in the target script language.
#[inline]
fn is_name_char(c: char) -> bool {
	c.is_ascii_alphanumeric() || c == '.' || c == '_'
}

/// Returns the byte offsets of every occurrence of `name` outside quoted
/// literals, in ascending order.
///
/// A match consumes only its first character as far as quote tracking is
/// concerned, so overlapping occurrences are all reported.
pub fn find_literal_occurrences(text: &str, name: &str) -> Vec<usize> {
	let mut positions = Vec::new();
	if name.is_empty() {
		return positions;
	}

	let mut state = QuoteState::Code;
	for (pos, c) in text.char_indices() {
		if state == QuoteState::Code && text[pos..].starts_with(name) {
			positions.push(pos);
		} else {
			state = state.step(c);
		}
	}

	positions
}

fn start_is_free(text: &str, pos: usize) -> bool {
	text[..pos].chars().next_back().is_none_or(|c| !is_name_char(c))
}

fn end_is_free(text: &str, end: usize) -> bool {
	let rest = &text[end..];
	match rest.chars().next() {
		None => true,
		Some(c) if is_name_char(c) => false,
		Some(_) => rest.chars().find(|&c| c != ' ' && c != '\t') != Some('('),
	}
}

/// Replaces free-standing occurrences of `names` in script text.
///
/// `names` must be sorted longest-first. Occurrences of one name are
/// rewritten back to front so earlier offsets stay valid. If `found` is
/// given it is cleared and then receives every name that was replaced at
/// least once.
pub fn encode_script_text(
	text: &str,
	map: &NameMap,
	names: &[String],
	mut found: Option<&mut BTreeSet<String>>,
) -> String {
	if let Some(found) = found.as_deref_mut() {
		found.clear();
	}

	let mut out = text.to_string();

	for name in names {
		let Some(token) = map.get(name) else {
			continue;
		};

		for pos in find_literal_occurrences(&out, name).into_iter().rev() {
			let end = pos + name.len();

			// An overlapping later occurrence may already have been rewritten.
			if out.get(pos..end) != Some(name.as_str()) {
				continue;
			}

			if start_is_free(&out, pos) && end_is_free(&out, end) {
				out.replace_range(pos..end, token);
				if let Some(found) = found.as_deref_mut() {
					found.insert(name.clone());
				}
			}
		}
	}

	out
}

impl NameRegistry {
	/// Encodes script text with every registered name.
	pub fn encode_script_text(&self, text: &str, found: Option<&mut BTreeSet<String>>) -> String {
		encode_script_text(text, self.aggregate_encode_map(), self.aggregate_original_names(), found)
	}

	/// Restores original names in script text.
	///
	/// Tokens cannot occur inside naturally written literals, so decoding
	/// needs no quote tracking.
	pub fn decode_script_text(&self, text: &str) -> String {
		replace_scan(text, self.aggregate_decode_map(), self.aggregate_encoded_names())
	}
}
