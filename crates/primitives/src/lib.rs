//! Vocabulary shared by the column name encoder: column types and text escaping.

/// Closed set of column measurement types.
pub mod column_type;
/// HTML escaping for decoded names shown in rendered output.
pub mod html;

pub use column_type::ColumnType;
pub use html::escape_html;
