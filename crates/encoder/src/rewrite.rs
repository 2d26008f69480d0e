//! Rewriting column references in previously generated scripts.

use std::collections::BTreeMap;

use crate::script::encode_script_text;
use crate::substitute::replace_scan;
use crate::table::{NameTable, sort_longest_first};

/// Replaces free-standing references to `removed` columns with a call that
/// fails at runtime, so stale scripts stop loudly instead of silently using
/// a column that no longer exists.
pub fn remove_column_references<S: AsRef<str>>(script: &str, removed: &[S]) -> String {
	let renames: BTreeMap<String, String> = removed
		.iter()
		.map(|col| {
			let col = col.as_ref();
			(col.to_string(), format!("stop('column {col} was removed from this RScript')"))
		})
		.collect();

	rename_column_references(script, &renames)
}

/// Renames free-standing column references according to `renames`.
///
/// Uses a scratch [`NameTable`] whose tokens decode to the new names: the
/// script is encoded with the usual quote and boundary rules, then every
/// token is replaced by its new name.
pub fn rename_column_references(script: &str, renames: &BTreeMap<String, String>) -> String {
	if renames.is_empty() {
		return script.to_string();
	}

	let table = NameTable::for_renames(renames);
	let encoded = encode_script_text(script, table.encoding_map(), table.original_names(), None);

	let mut tokens = table.encoded_names().to_vec();
	sort_longest_first(&mut tokens);
	replace_scan(&encoded, table.decoding_map(), &tokens)
}
