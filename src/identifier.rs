/// Normalizes a raw update identifier like `"main-heading"` into its camel-cased key `"mainHeading"`.
///
/// Each hyphen that is directly followed by an ASCII lowercase letter is dropped and that letter upper-cased.
/// All other characters, including hyphens before anything else, are kept as-is.
/// The normalization is idempotent.
#[must_use]
pub fn format_update_identifier(identifier: &str) -> String {
	let mut formatted = String::with_capacity(identifier.len());
	let mut chars = identifier.chars().peekable();
	while let Some(c) = chars.next() {
		match (c, chars.peek()) {
			('-', Some(next)) if next.is_ascii_lowercase() => {
				formatted.push(next.to_ascii_uppercase());
				chars.next();
			}
			_ => formatted.push(c),
		}
	}
	formatted
}

/// Whether `key` is already in normalized form, i.e. could ever match a collected element.
#[must_use]
pub fn is_normalized(key: &str) -> bool {
	format_update_identifier(key) == key
}
