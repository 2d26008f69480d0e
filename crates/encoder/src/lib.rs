//! Collision-free column name encoding.
//!
//! User-chosen column names may contain spaces, operators, quotes or
//! non-ASCII text. Before names flow into generated script text or option
//! trees they are replaced by synthetic tokens, and results are decoded back
//! to the original names before they are shown.
//!
//! # Layout
//!
//! - [`table`]: one bidirectional name/token namespace.
//! - [`registry`]: the primary table plus overlays, merged into cached views.
//! - [`substitute`]: exact and scanning replacement over a candidate list.
//! - [`script`]: quote and identifier aware replacement in script text.
//! - [`tree`]: substitution over JSON option trees, `.meta` policy and
//!   `{ value, types }` normalization.
//! - [`rewrite`]: renaming and removing column references in scripts.

pub mod config;
pub mod error;
pub mod registry;
pub mod rewrite;
pub mod script;
pub mod substitute;
pub mod table;
pub mod tree;

pub use colname_primitives::ColumnType;
pub use config::EncoderConfig;
pub use error::{EncodeError, Result};
pub use registry::{NameRegistry, OverlayId};
pub use rewrite::{remove_column_references, rename_column_references};
pub use script::{encode_script_text, find_literal_occurrences};
pub use substitute::{NameMap, replace_exact, replace_scan};
pub use table::{NameTable, TypeMap};
pub use tree::{
	META_KEY, Matching, PreloadMode, TypedColumns, collect_meta_encodings, normalize_legacy_value_type_pairs,
	substitute_tree,
};
