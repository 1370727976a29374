/// Markup sanitization for the preview panel. The styled output embeds style
/// attributes built from user-controlled values, so it is never rendered
/// without passing through one of these.
pub trait Sanitizer {
    fn sanitize(&self, html: &str) -> String;
}

/// Pass-through for headless contexts and tests.
pub struct IdentitySanitizer;

impl Sanitizer for IdentitySanitizer {
    fn sanitize(&self, html: &str) -> String {
        html.to_string()
    }
}

/// Keeps only well-formed `<span style="...">` / `</span>` tags with a benign
/// style value; every other tag is escaped so it displays as text.
pub struct TagAllowlistSanitizer;

const SPAN_OPEN_PREFIX: &str = "<span style=\"";
const SPAN_CLOSE: &str = "</span>";
const FORBIDDEN_STYLE_CONTENT: [&str; 4] = ["javascript:", "expression(", "url(", "<"];

impl TagAllowlistSanitizer {
    /// Length of a safe span-open tag at the start of `rest`, if there is one.
    fn safe_span_open(rest: &str) -> Option<usize> {
        let body = rest.strip_prefix(SPAN_OPEN_PREFIX)?;
        let value_end = body.find('"')?;
        if !body[value_end + 1..].starts_with('>') {
            return None;
        }
        let value = body[..value_end].to_lowercase();
        if FORBIDDEN_STYLE_CONTENT.iter().any(|needle| value.contains(needle)) {
            return None;
        }
        Some(SPAN_OPEN_PREFIX.len() + value_end + 2)
    }
}

impl Sanitizer for TagAllowlistSanitizer {
    fn sanitize(&self, html: &str) -> String {
        let mut out = String::with_capacity(html.len());
        let mut rest = html;
        while let Some(ch) = rest.chars().next() {
            match ch {
                '<' => {
                    if rest.starts_with(SPAN_CLOSE) {
                        out.push_str(SPAN_CLOSE);
                        rest = &rest[SPAN_CLOSE.len()..];
                    } else if let Some(tag_len) = Self::safe_span_open(rest) {
                        out.push_str(&rest[..tag_len]);
                        rest = &rest[tag_len..];
                    } else {
                        out.push_str("&lt;");
                        rest = &rest[1..];
                    }
                }
                '>' => {
                    out.push_str("&gt;");
                    rest = &rest[1..];
                }
                '&' => {
                    out.push_str("&amp;");
                    rest = &rest[1..];
                }
                _ => {
                    out.push(ch);
                    rest = &rest[ch.len_utf8()..];
                }
            }
        }
        out
    }
}
