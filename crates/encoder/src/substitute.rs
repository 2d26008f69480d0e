//! Generic string replacement over an explicit candidate list.
//!
//! Both entry points take the replacement map and, for scanning, the ordered
//! list of candidates to look for. The list drives the search so callers
//! control precedence: sort it longest-first, otherwise a short name can bite
//! a chunk out of a longer one that starts at the same offset.

use rustc_hash::FxHashMap;

/// Mapping from a name to its replacement.
pub type NameMap = FxHashMap<String, String>;

/// Replaces `text` only if it is a key of `map` in its entirety.
///
/// Used for option member keys and values already known to be single names,
/// where a partial match is never wanted.
pub fn replace_exact(text: &str, map: &NameMap) -> String {
	map.get(text).cloned().unwrap_or_else(|| text.to_string())
}

/// Replaces every leftmost occurrence of the candidates in `names`.
///
/// Each round finds the earliest offset, at or after the cursor, where any
/// candidate occurs. On a tie the candidate listed first keeps the match.
/// The occurrence is replaced and the cursor moves past the replacement, so
/// replaced text is never scanned again. Candidates without an entry in
/// `map`, and empty candidates, are ignored.
pub fn replace_scan(text: &str, map: &NameMap, names: &[String]) -> String {
	let mut out = text.to_string();
	let mut cursor = 0;

	loop {
		let mut first: Option<(usize, &str, &str)> = None;

		for name in names {
			if name.is_empty() {
				continue;
			}
			let Some(replacement) = map.get(name) else {
				continue;
			};
			let Some(offset) = out[cursor..].find(name.as_str()) else {
				continue;
			};

			let pos = cursor + offset;
			if first.is_none_or(|(best, _, _)| pos < best) {
				first = Some((pos, name.as_str(), replacement.as_str()));
			}
		}

		let Some((pos, name, replacement)) = first else {
			return out;
		};

		out.replace_range(pos..pos + name.len(), replacement);
		cursor = pos + replacement.len();
	}
}
