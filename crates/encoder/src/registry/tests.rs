use colname_primitives::ColumnType;
use pretty_assertions::assert_eq;
use rustc_hash::FxHashSet;
use serde_json::json;

use super::*;
use crate::error::EncodeError;

fn registry(prefix: &str, names: &[&str]) -> NameRegistry {
	let config = EncoderConfig {
		prefix: prefix.to_string(),
		postfix: String::new(),
	};
	let mut registry = NameRegistry::with_config(&config);
	registry.rebuild_primary(names, false);
	registry
}

fn overlay(prefix: &str, names: &[&str], type_variants: bool) -> NameTable {
	let mut table = NameTable::new(prefix, "_");
	table.rebuild(names, type_variants);
	table
}

#[test]
fn test_primary_beats_overlay() {
	let mut reg = registry("p", &["x", "A"]);
	let id = reg.register_overlay({
		let mut table = NameTable::new("p", "");
		table.rebuild(["x", "y", "A"], false);
		table
	});

	assert_eq!(reg.overlay(id).and_then(|t| t.encode("A").ok()), Some("p2"));
	assert_eq!(reg.encode("A").unwrap(), "p1");
	assert_eq!(reg.aggregate_encode_map()["A"], "p1");
}

#[test]
fn test_earlier_overlay_beats_later() {
	let mut reg = registry("p", &["A"]);
	reg.register_overlay(overlay("o", &["B"], false));
	reg.register_overlay(overlay("v", &["B", "C"], false));

	assert_eq!(reg.encode("B").unwrap(), "o0_");
	assert_eq!(reg.encode("C").unwrap(), "v1_");
	assert_eq!(reg.decode("v0_").unwrap(), "B");
	assert_eq!(reg.overlay_count(), 2);
}

#[test]
fn test_mutations_invalidate_aggregates() {
	let mut reg = registry("p", &["A"]);
	assert_eq!(reg.encode("A").unwrap(), "p0");

	reg.rebuild_primary(["Z", "A"], false);
	assert_eq!(reg.encode("A").unwrap(), "p1");

	let id = reg.register_overlay(overlay("o", &["B"], false));
	assert_eq!(reg.encode("B").unwrap(), "o0_");

	assert!(reg.rebuild_overlay(id, ["C"], false));
	assert!(reg.encode("B").is_err());
	assert_eq!(reg.encode("C").unwrap(), "o0_");

	let table = reg.unregister_overlay(id).unwrap();
	assert!(table.local_contains("C"));
	assert!(reg.encode("C").is_err());
	assert!(reg.decode("o0_").is_err());

	assert!(!reg.rebuild_overlay(id, ["D"], false));
	assert!(reg.unregister_overlay(id).is_none());
}

#[test]
fn test_aggregate_lists_are_longest_first() {
	let mut reg = registry("p", &["ab", "c"]);
	reg.register_overlay(overlay("o", &["abcd", "d"], false));

	assert_eq!(reg.aggregate_original_names(), ["abcd", "ab", "c", "d"]);
	assert_eq!(reg.aggregate_encoded_names(), ["o0_", "o1_", "p0", "p1"]);
}

#[test]
fn test_html_safe_decode_map() {
	let reg = registry("p", &["a<b", "[x]"]);
	assert_eq!(reg.aggregate_decode_map_html_safe()["p0"], "a&lt;b");
	assert_eq!(reg.aggregate_decode_map_html_safe()["p1"], "&#x5B;x&#x5D;");
	assert_eq!(reg.aggregate_decode_map()["p0"], "a<b");
}

#[test]
fn test_type_map_spans_overlays() {
	let mut reg = registry("p", &["A"]);
	reg.register_overlay(overlay("o", &["B"], true));

	let token = reg.encode("B.nominal").unwrap().to_string();
	assert_eq!(reg.type_of(&token), ColumnType::Nominal);
	assert_eq!(reg.decode(&token).unwrap(), "B");
	assert_eq!(reg.type_of("p0"), ColumnType::Unknown);
	assert_eq!(reg.type_of("nope"), ColumnType::Unknown);
}

#[test]
fn test_with_overlay_is_scoped() {
	let mut reg = registry("p", &["A"]);

	let (encoded, table) = reg.with_overlay(overlay("o", &["B"], false), |reg| {
		reg.encode_script_text("A + B", None)
	});

	assert_eq!(encoded, "p0 + o0_");
	assert!(table.local_contains("B"));
	assert_eq!(reg.overlay_count(), 0);
	assert!(reg.encode("B").is_err());
}

#[test]
fn test_with_overlay_keeps_existing_overlays() {
	let mut reg = registry("p", &["A"]);
	let kept = reg.register_overlay(overlay("o", &["B"], false));

	let (encoded, _) = reg.with_overlay(overlay("v", &["B", "C"], false), |reg| {
		(reg.encode("B").map(str::to_string), reg.encode("C").map(str::to_string))
	});

	assert_eq!(encoded.0.unwrap(), "o0_");
	assert_eq!(encoded.1.unwrap(), "v1_");
	assert_eq!(reg.overlay_count(), 1);
	assert!(reg.overlay(kept).is_some());
	assert!(reg.encode("C").is_err());
}

#[test]
fn test_column_names_are_primary_only() {
	let mut reg = registry("p", &["A", "BB"]);
	reg.register_overlay(overlay("o", &["CCC"], false));

	assert_eq!(reg.column_names(), ["BB", "A"]);
	assert_eq!(reg.column_names_encoded(), ["p0", "p1"]);
}

#[test]
fn test_local_contains_ignores_other_tables() {
	let mut reg = registry("p", &["A"]);
	reg.register_overlay(overlay("o", &["B"], false));

	assert!(!reg.primary().local_contains("B"));
	assert!(!reg.primary().local_contains_encoded("o0_"));
	assert!(reg.aggregate_encode_map().contains_key("B"));
}

#[test]
fn test_rebuild_primary_from_meta() {
	let mut reg = registry("p", &["stale"]);
	reg.rebuild_primary_from_meta(&json!({
		"plot": true,
		".meta": { "plot": { "encodeThis": ["x", "y"] } }
	}));

	assert_eq!(reg.encode("x").unwrap(), "p0");
	assert_eq!(reg.encode("y").unwrap(), "p1");
	assert!(reg.encode("stale").is_err());
}

#[test]
fn test_lookup_errors() {
	let reg = registry("p", &["A"]);

	assert!(matches!(reg.encode("nope"), Err(EncodeError::UnknownName(name)) if name == "nope"));
	assert!(matches!(reg.decode("p9"), Err(EncodeError::UnknownToken(token)) if token == "p9"));
	assert_eq!(reg.encode("").unwrap(), "");
	assert_eq!(reg.decode("").unwrap(), "");
}

#[test]
fn test_type_variants_scenario() {
	let mut reg = NameRegistry::new();
	reg.rebuild_primary(["Age", "Weight"], true);

	assert_eq!(reg.column_names().len(), 8);
	let tokens: FxHashSet<&String> = reg.aggregate_encoded_names().iter().collect();
	assert_eq!(tokens.len(), 8);
	assert!(tokens.iter().all(|t| t.starts_with("JaspColumn_") && t.ends_with("_Encoded")));
}

#[test]
fn test_overlay_id_display() {
	let mut reg = NameRegistry::new();
	let first = reg.register_overlay(NameTable::new("o", "_"));
	let second = reg.register_overlay(NameTable::new("v", "_"));
	assert_eq!(first.to_string(), "overlay#0");
	assert_eq!(second.to_string(), "overlay#1");
}
