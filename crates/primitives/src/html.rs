/// Inline markup that survives escaping so names can still carry sub/superscripts
/// and emphasis.
const INLINE_TAGS: [&str; 8] = ["sub", "/sub", "sup", "/sup", "b", "/b", "i", "/i"];

/// Escapes `&`, `<` and `>` in `input`, keeping the whitelisted inline tags.
///
/// With `square_brackets` set, `[` and `]` become numeric character
/// references as well; renderers that treat brackets as link syntax would
/// otherwise mangle names containing them.
pub fn escape_html(input: &str, square_brackets: bool) -> String {
	let mut out = input.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;");

	for tag in INLINE_TAGS {
		let escaped = format!("&lt;{tag}&gt;");
		if out.contains(&escaped) {
			out = out.replace(&escaped, &format!("<{tag}>"));
		}
	}

	if square_brackets {
		out = out.replace('[', "&#x5B;").replace(']', "&#x5D;");
	}

	out
}
