use regex::{Captures, RegexBuilder};

use crate::constants::Constants;

pub struct Styler;

impl Styler {
    /// Wrap every case-insensitive occurrence of `selection` in `text` in an
    /// inline-styled span. Returns None when there is nothing to do: empty
    /// selection, or selection not present in the text. The output is always
    /// recomputed from the raw text, never from a previous result, so calling
    /// this repeatedly with the same inputs yields a byte-identical string.
    pub fn apply(
        text: &str,
        selection: &str,
        fg_color: &str,
        bg_color: &str,
        bold: bool,
        underline: bool,
    ) -> Option<String> {
        if selection.is_empty() || !text.contains(selection) {
            return None;
        }

        // The selection is a literal string, not a pattern. Escape it before
        // building the case-insensitive matcher.
        let pattern = RegexBuilder::new(&regex::escape(selection))
            .case_insensitive(true)
            .build()
            .ok()?;

        let styled = pattern.replace_all(text, |caps: &Captures| {
            // Reuse the matched text so the original casing survives
            Self::styled_span(&caps[0], fg_color, bg_color, bold, underline)
        });

        Some(styled.into_owned())
    }

    fn styled_span(
        matched: &str,
        fg_color: &str,
        bg_color: &str,
        bold: bool,
        underline: bool,
    ) -> String {
        format!(
            "<span style=\"color: {}; background-color: {}; padding: {}; border-radius: {}; font-weight: {}; text-decoration: {};\">{}</span>",
            fg_color,
            bg_color,
            Constants::SPAN_PADDING,
            Constants::SPAN_RADIUS,
            if bold { "bold" } else { "normal" },
            if underline { "underline" } else { "none" },
            matched,
        )
    }
}
