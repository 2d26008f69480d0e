use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, FromRepr, IntoStaticStr};

/// Measurement type of a data column.
///
/// The string form of each variant is its camelCase name (`"nominalText"`),
/// which is also the suffix used for type-qualified names such as
/// `"Age.scale"`. The numeric form is stable and matches the discriminant.
#[derive(
	Debug,
	Default,
	Clone,
	Copy,
	PartialEq,
	Eq,
	PartialOrd,
	Ord,
	Hash,
	Display,
	EnumString,
	EnumIter,
	FromRepr,
	IntoStaticStr,
	Serialize,
	Deserialize,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum ColumnType {
	/// No type information is available.
	#[default]
	Unknown = 0,
	/// Continuous numeric data.
	Scale = 1,
	/// Ordered categories.
	Ordinal = 2,
	/// Unordered categories.
	Nominal = 3,
	/// Unordered categories stored as free text.
	NominalText = 4,
}

impl ColumnType {
	/// Types that get their own qualified pseudo-name when a name table is
	/// rebuilt with type variants, in registration order.
	pub const QUALIFIERS: [ColumnType; 3] = [ColumnType::Scale, ColumnType::Ordinal, ColumnType::Nominal];

	/// Returns the canonical string form.
	#[inline]
	pub fn as_str(self) -> &'static str {
		self.into()
	}

	/// Returns true if `name` is the string form of some variant.
	pub fn is_valid_name(name: &str) -> bool {
		name.parse::<Self>().is_ok()
	}

	/// Builds the type-qualified pseudo-name `"<name>.<type>"`.
	pub fn qualify(self, name: &str) -> String {
		format!("{name}.{}", self.as_str())
	}
}
