//! HTML utilities for tag stripping, escaping, and fragment formatting.

/// Escape HTML special characters
///
/// # Examples
///
/// ```
/// use cms_panels::html::escape;
///
/// assert_eq!(escape("Hello, World!"), "Hello, World!");
/// assert_eq!(escape("<script>alert('XSS')</script>"),
///            "&lt;script&gt;alert(&#x27;XSS&#x27;)&lt;/script&gt;");
/// assert_eq!(escape("5 < 10 & 10 > 5"), "5 &lt; 10 &amp; 10 &gt; 5");
/// ```
pub fn escape(text: &str) -> String {
	let mut result = String::with_capacity(text.len() + 10);
	for ch in text.chars() {
		match ch {
			'&' => result.push_str("&amp;"),
			'<' => result.push_str("&lt;"),
			'>' => result.push_str("&gt;"),
			'"' => result.push_str("&quot;"),
			'\'' => result.push_str("&#x27;"),
			_ => result.push(ch),
		}
	}
	result
}

/// Strip HTML tags from text
///
/// Best-effort stripping that never fails, including on malformed input:
/// `>` inside quoted attribute values, unclosed tags at end of input, and
/// HTML comments are all handled. An unclosed tag or comment swallows the
/// remainder of the input.
///
/// # Examples
///
/// ```
/// use cms_panels::html::strip_tags;
///
/// assert_eq!(strip_tags("<p>Hello <b>World</b></p>"), "Hello World");
/// assert_eq!(strip_tags("No tags here"), "No tags here");
/// assert_eq!(strip_tags("<!-- note -->text"), "text");
///
/// // Handles > inside quoted attributes
/// assert_eq!(strip_tags(r#"<a title="x>y">Link</a>"#), "Link");
///
/// // Handles malformed/unclosed tags
/// assert_eq!(strip_tags("Hello<br"), "Hello");
/// ```
pub fn strip_tags(html: &str) -> String {
	let mut result = String::with_capacity(html.len());
	let mut rest = html;

	while let Some(open) = rest.find('<') {
		result.push_str(&rest[..open]);
		let tail = &rest[open..];

		if let Some(comment) = tail.strip_prefix("<!--") {
			match comment.find("-->") {
				Some(end) => {
					rest = &comment[end + 3..];
					continue;
				}
				// Unclosed comment swallows the remainder
				None => return result,
			}
		}

		// Scan for the closing '>', honouring quoted attribute values
		let mut in_quote: Option<char> = None;
		let mut close = None;
		for (idx, ch) in tail.char_indices().skip(1) {
			match ch {
				'"' | '\'' => match in_quote {
					Some(quote) if quote == ch => in_quote = None,
					None => in_quote = Some(ch),
					_ => {}
				},
				'>' if in_quote.is_none() => {
					close = Some(idx);
					break;
				}
				_ => {}
			}
		}

		match close {
			Some(idx) => rest = &tail[idx + 1..],
			// Unclosed tag swallows the remainder
			None => return result,
		}
	}

	result.push_str(rest);
	result
}

/// Format an HTML template by substituting placeholder values with
/// HTML-escaped content
///
/// Placeholders are in the format `{key}` and are replaced with the escaped
/// value, so dynamic content is always safe to insert.
///
/// # Examples
///
/// ```
/// use cms_panels::html::format_html;
///
/// let template = "<div class=\"{class}\">{content}</div>";
/// let args = [("class", "container"), ("content", "Hello")];
/// assert_eq!(
///     format_html(template, &args),
///     "<div class=\"container\">Hello</div>"
/// );
/// ```
pub fn format_html(template: &str, args: &[(&str, &str)]) -> String {
	let mut result = template.to_string();
	for (key, value) in args {
		let placeholder = format!("{{{}}}", key);
		result = result.replace(&placeholder, &escape(value));
	}
	result
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_escape() {
		assert_eq!(escape("plain"), "plain");
		assert_eq!(
			escape("<script>alert('XSS')</script>"),
			"&lt;script&gt;alert(&#x27;XSS&#x27;)&lt;/script&gt;"
		);
		assert_eq!(escape("\"quoted\""), "&quot;quoted&quot;");
	}

	#[test]
	fn test_strip_tags_basic() {
		assert_eq!(strip_tags("<p>Hello <b>World</b></p>"), "Hello World");
		assert_eq!(strip_tags("<div><span>Test</span></div>"), "Test");
		assert_eq!(strip_tags("No tags here"), "No tags here");
		assert_eq!(strip_tags(""), "");
	}

	#[test]
	fn test_strip_tags_quoted_attributes() {
		assert_eq!(strip_tags(r#"<a title="x>y">Link</a>"#), "Link");
		assert_eq!(strip_tags("<a title='x>y'>Link</a>"), "Link");
		assert_eq!(strip_tags(r#"<a title="it's">ok</a>"#), "ok");
	}

	#[test]
	fn test_strip_tags_malformed() {
		assert_eq!(strip_tags("Hello<br"), "Hello");
		assert_eq!(strip_tags("Hello<"), "Hello");
		assert_eq!(strip_tags("a<!-- unclosed"), "a");
		assert_eq!(strip_tags("<>text"), "text");
	}

	#[test]
	fn test_strip_tags_comments() {
		assert_eq!(strip_tags("<!-- note -->text"), "text");
		assert_eq!(strip_tags("a<!-- x --> b"), "a b");
	}

	#[test]
	fn test_format_html_escapes_values() {
		let template = "<p>{user_input}</p>";
		let args = [("user_input", "<script>bad()</script>")];
		assert_eq!(
			format_html(template, &args),
			"<p>&lt;script&gt;bad()&lt;/script&gt;</p>"
		);
	}
}
