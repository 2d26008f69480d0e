//! Normalization of `{ value, types }` option pairs.
//!
//! Variable-list options carry the selected column names in `value` and the
//! matching column types in `types`. `value` is either a single name or a
//! list, and the two lists are not guaranteed to have equal length; missing
//! types count as unknown.

use std::collections::BTreeSet;

use colname_primitives::ColumnType;
use serde_json::{Map, Value};

use super::meta::META_KEY;
use crate::registry::NameRegistry;

/// Composite `name.type` entries produced while folding types into values.
pub type TypedColumns = BTreeSet<(String, ColumnType)>;

/// Target shape for `{ value, types }` option pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreloadMode {
	/// Split into a `value` option and a sibling `<name>.types` option.
	Legacy,
	/// Fold each type into its value as a composite `name.type` entry.
	Preload,
}

fn is_value_type_pair(option: &Value) -> bool {
	option
		.as_object()
		.is_some_and(|members| members.contains_key("value") && members.contains_key("types"))
}

fn scalar_text(value: &Value) -> String {
	match value {
		Value::String(text) => text.clone(),
		Value::Null => String::new(),
		other => other.to_string(),
	}
}

/// Rewrites every top-level `{ value, types }` member of `options`.
///
/// Returns the composite names created in [`PreloadMode::Preload`]; they must
/// be registered before the options are encoded. Types that are `"unknown"`
/// or not a [`ColumnType`] name leave their value unqualified.
pub fn normalize_legacy_value_type_pairs(options: &mut Value, mode: PreloadMode) -> TypedColumns {
	let mut typed = TypedColumns::new();
	let Value::Object(members) = options else {
		return typed;
	};

	let pairs: Vec<String> = members
		.iter()
		.filter(|(_, option)| is_value_type_pair(option))
		.map(|(name, _)| name.clone())
		.collect();

	for name in pairs {
		match mode {
			PreloadMode::Legacy => split_types(members, name),
			PreloadMode::Preload => {
				if let Some(option) = members.get_mut(&name) {
					*option = fold_types(option, &mut typed);
				}
			}
		}
	}

	typed
}

fn split_types(members: &mut Map<String, Value>, name: String) {
	let Some(Value::Object(mut pair)) = members.remove(&name) else {
		return;
	};
	let types = pair.remove("types").unwrap_or_default();
	let value = pair.remove("value").unwrap_or_default();

	members.insert(format!("{name}.types"), types);
	members.insert(name, value);
}

fn fold_types(option: &Value, typed: &mut TypedColumns) -> Value {
	let (values, single) = match &option["value"] {
		Value::Array(items) => (items.clone(), false),
		other => (vec![Value::String(scalar_text(other))], true),
	};
	let types = option["types"].as_array().map(Vec::as_slice).unwrap_or_default();

	let folded: Vec<Value> = values
		.iter()
		.enumerate()
		.map(|(i, value)| {
			let name = scalar_text(value);
			let ty = types.get(i).map(scalar_text).unwrap_or_default();

			match ty.parse::<ColumnType>() {
				Ok(ColumnType::Unknown) | Err(_) => Value::String(name),
				Ok(_) if name.is_empty() => Value::String(name),
				Ok(ty) => {
					let qualified = ty.qualify(&name);
					typed.insert((qualified.clone(), ty));
					Value::String(qualified)
				}
			}
		})
		.collect();

	if single {
		folded.into_iter().next().unwrap_or_default()
	} else {
		Value::Array(folded)
	}
}

impl NameRegistry {
	/// Normalizes `{ value, types }` pairs and then encodes `options` as
	/// directed by its `.meta` member.
	///
	/// Returns the composite names created in [`PreloadMode::Preload`].
	/// Composite names that no table knows yet are logged and left unencoded.
	pub fn encode_options(&self, options: &mut Value, mode: PreloadMode) -> TypedColumns {
		let typed = normalize_legacy_value_type_pairs(options, mode);

		let encode_map = self.aggregate_encode_map();
		let missing: Vec<&str> = typed
			.iter()
			.map(|(name, _)| name.as_str())
			.filter(|name| !encode_map.contains_key(*name))
			.collect();
		if !missing.is_empty() {
			tracing::warn!(count = missing.len(), names = ?missing, "typed column names are not registered");
		}

		let meta = options.get(META_KEY).cloned().unwrap_or_default();
		self.apply_meta_policy(options, &meta);
		typed
	}
}
