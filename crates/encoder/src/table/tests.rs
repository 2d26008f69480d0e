use std::collections::BTreeMap;

use colname_primitives::ColumnType;
use proptest::prelude::*;

use super::*;

fn table(names: &[&str], type_variants: bool) -> NameTable {
	let mut table = NameTable::new("col_", "_x");
	table.rebuild(names, type_variants);
	table
}

#[test]
fn test_tokens_use_affixes_and_counter() {
	let t = table(&["Age", "Weight"], false);
	assert_eq!(t.encode("Age").unwrap(), "col_0_x");
	assert_eq!(t.encode("Weight").unwrap(), "col_1_x");
	assert_eq!(t.encoded_names(), ["col_0_x", "col_1_x"]);
}

#[test]
fn test_type_variants_add_three_entries_per_name() {
	let t = table(&["Age", "Weight"], true);
	assert_eq!(t.len(), 8);

	let distinct: std::collections::HashSet<_> = t.encoded_names().iter().collect();
	assert_eq!(distinct.len(), 8);

	let token = t.encode("Age.ordinal").unwrap();
	assert_eq!(t.decode(token).unwrap(), "Age");
	assert_eq!(t.type_of(token), ColumnType::Ordinal);

	let base = t.encode("Weight").unwrap();
	assert_eq!(t.type_of(base), ColumnType::Unknown);
}

#[test]
fn test_original_names_sorted_longest_first() {
	let t = table(&["X", "XYZ", "XY"], false);
	assert_eq!(t.original_names(), ["XYZ", "XY", "X"]);
}

#[test]
fn test_rebuild_replaces_previous_entries() {
	let mut t = table(&["Age"], true);
	t.rebuild(["Height"], false);

	assert!(!t.local_contains("Age"));
	assert!(!t.local_contains("Age.scale"));
	assert!(t.local_contains("Height"));
	assert_eq!(t.encode("Height").unwrap(), "col_0_x");
	assert_eq!(t.type_of("col_1_x"), ColumnType::Unknown);
}

#[test]
fn test_duplicate_and_empty_names_are_skipped() {
	let t = table(&["A", "", "A", "B"], false);
	assert_eq!(t.len(), 2);
	assert_eq!(t.encode("B").unwrap(), "col_1_x");
}

#[test]
fn test_base_name_shadows_qualified_variant() {
	let t = table(&["A", "A.scale"], true);
	let token = t.encode("A.scale").unwrap();
	assert_eq!(t.decode(token).unwrap(), "A.scale");
	assert_eq!(t.type_of(token), ColumnType::Unknown);
	// A, A.scale, A.ordinal, A.nominal, A.scale.{scale,ordinal,nominal}
	assert_eq!(t.len(), 7);
}

#[test]
fn test_unregistered_lookups_fail() {
	let t = table(&["Age"], false);
	assert!(matches!(t.encode("age"), Err(EncodeError::UnknownName(n)) if n == "age"));
	assert!(matches!(t.decode("col_9_x"), Err(EncodeError::UnknownToken(n)) if n == "col_9_x"));
}

#[test]
fn test_empty_lookups_are_noops() {
	let t = table(&[], false);
	assert_eq!(t.encode("").unwrap(), "");
	assert_eq!(t.decode("").unwrap(), "");
	assert_eq!(t.type_of(""), ColumnType::Unknown);
}

#[test]
fn test_local_membership() {
	let t = table(&["Age"], false);
	assert!(t.local_contains("Age"));
	assert!(!t.local_contains("col_0_x"));
	assert!(t.local_contains_encoded("col_0_x"));
	assert!(!t.local_contains_encoded("Age"));
}

#[test]
fn test_renaming_table_decodes_to_new_names() {
	let renames = BTreeMap::from([
		("old".to_string(), "new".to_string()),
		("other".to_string(), "changed".to_string()),
	]);
	let t = NameTable::for_renames(&renames);

	assert_eq!(t.prefix(), RENAME_PREFIX);
	let token = t.encode("old").unwrap();
	assert!(token.starts_with(RENAME_PREFIX) && token.ends_with(RENAME_POSTFIX));
	assert_eq!(t.decode(token).unwrap(), "new");
	assert_eq!(t.decode(t.encode("other").unwrap()).unwrap(), "changed");
}

proptest! {
	#[test]
	fn prop_round_trip(names in prop::collection::vec("[^\\x00]{1,12}", 0..16), variants in any::<bool>()) {
		let mut t = NameTable::new("p_", "_q");
		t.rebuild(&names, variants);

		for name in t.original_names() {
			let token = t.encode(name).unwrap();
			let decoded = t.decode(token).unwrap();
			let base = match name.rsplit_once('.') {
				Some((base, ty)) if t.type_of(token) != ColumnType::Unknown => {
					prop_assert_eq!(ty, t.type_of(token).as_str());
					base
				}
				_ => name.as_str(),
			};
			prop_assert_eq!(decoded, base);
		}

		for token in t.encoded_names() {
			if t.type_of(token) == ColumnType::Unknown {
				let original = t.decode(token).unwrap();
				prop_assert_eq!(t.encode(original).unwrap(), token.as_str());
			}
		}
	}
}
