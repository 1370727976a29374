/// Utilities for safe text manipulation with proper UTF-8 handling
pub struct TextUtils;

impl TextUtils {
    /// Safely extract a substring using character indices instead of byte indices
    pub fn safe_substring(text: &str, start: usize, end: usize) -> String {
        let chars: Vec<char> = text.chars().collect();
        let char_len = chars.len();

        let safe_start = start.min(char_len);
        let safe_end = end.min(char_len);

        if safe_start >= safe_end {
            return String::new();
        }

        chars[safe_start..safe_end].iter().collect()
    }

    /// Get the character length of a string (not byte length)
    pub fn char_len(text: &str) -> usize {
        text.chars().count()
    }

    /// Truncate to at most `max_chars` characters, marking the cut with an ellipsis
    pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
        if Self::char_len(text) <= max_chars {
            return text.to_string();
        }
        let mut truncated = Self::safe_substring(text, 0, max_chars.saturating_sub(1));
        truncated.push('…');
        truncated
    }
}
