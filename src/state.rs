use std::time::Instant;

use crate::constants::Constants;
use crate::styler::Styler;

/// The single state record behind the form. Every mutation goes through the
/// transition methods below; the rendering layer only reads.
#[derive(Debug, Clone)]
pub struct StyleState {
    pub text: String,
    pub selection: String,
    pub fg_color: String,
    pub bg_color: String,
    pub bold: bool,
    pub underline: bool,
    pub styled_output: String,
    pub copy_error: Option<String>,
    copy_feedback_until: Option<Instant>,
}

impl Default for StyleState {
    fn default() -> Self {
        Self {
            text: String::new(),
            selection: String::new(),
            fg_color: Constants::DEFAULT_FG_COLOR.to_string(),
            bg_color: Constants::DEFAULT_BG_COLOR.to_string(),
            bold: false,
            underline: false,
            styled_output: String::new(),
            copy_error: None,
            copy_feedback_until: None,
        }
    }
}

/// `#rrggbb`, nothing else. The color fields are constrained controls, so
/// anything that fails this check is simply not committed to the state.
pub fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(digits) => digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

impl StyleState {
    pub fn set_text(&mut self, text: String) {
        self.text = text;
    }

    pub fn set_selection(&mut self, selection: String) {
        self.selection = selection;
    }

    pub fn set_fg_color(&mut self, color: &str) {
        if is_hex_color(color) {
            self.fg_color = color.to_string();
        }
    }

    pub fn set_bg_color(&mut self, color: &str) {
        if is_hex_color(color) {
            self.bg_color = color.to_string();
        }
    }

    /// Recompute the styled output from the current fields. Leaves the previous
    /// output in place when the selection guard rejects the inputs.
    pub fn apply_styles(&mut self) {
        if let Some(output) = Styler::apply(
            &self.text,
            &self.selection,
            &self.fg_color,
            &self.bg_color,
            self.bold,
            self.underline,
        ) {
            self.styled_output = output;
        }
    }

    /// Flip the bold flag and recompute in the same transition, so the output
    /// never lags a toggle behind.
    pub fn toggle_bold(&mut self) {
        self.bold = !self.bold;
        self.apply_styles();
    }

    pub fn toggle_underline(&mut self) {
        self.underline = !self.underline;
        self.apply_styles();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Arm the copy feedback window, replacing any pending deadline so an
    /// earlier copy cannot clear the flag out from under a later one.
    pub fn mark_copied(&mut self, now: Instant) {
        self.copy_feedback_until = Some(now + Constants::COPY_FEEDBACK_WINDOW);
        self.copy_error = None;
    }

    pub fn record_copy_error(&mut self, message: String) {
        self.copy_error = Some(message);
        self.copy_feedback_until = None;
    }

    pub fn copy_feedback_active(&self, now: Instant) -> bool {
        self.copy_feedback_until.map_or(false, |until| now < until)
    }

    /// Called from the event loop on every pass; expires the feedback window
    /// without needing user input.
    pub fn tick(&mut self, now: Instant) {
        if let Some(until) = self.copy_feedback_until {
            if now >= until {
                self.copy_feedback_until = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_defaults() {
        let state = StyleState::default();
        assert_eq!(state.fg_color, "#000000");
        assert_eq!(state.bg_color, "#ffffff");
        assert!(!state.bold);
        assert!(!state.underline);
        assert!(state.text.is_empty());
        assert!(state.selection.is_empty());
        assert!(state.styled_output.is_empty());
        assert!(state.copy_error.is_none());
    }

    #[test]
    fn test_field_setters_do_not_recompute() {
        let mut state = StyleState::default();
        state.set_text("hello world".to_string());
        state.set_selection("hello".to_string());
        state.set_fg_color("#ff0000");
        assert!(state.styled_output.is_empty());
    }

    #[test]
    fn test_invalid_colors_are_ignored() {
        let mut state = StyleState::default();
        state.set_fg_color("red");
        state.set_fg_color("#12345");
        state.set_fg_color("#12345g");
        assert_eq!(state.fg_color, "#000000");
        state.set_fg_color("#AbCdEf");
        assert_eq!(state.fg_color, "#AbCdEf");
    }

    #[test]
    fn test_apply_respects_guard() {
        let mut state = StyleState::default();
        state.set_text("hello world".to_string());
        state.set_selection("hello".to_string());
        state.apply_styles();
        let first = state.styled_output.clone();
        assert!(first.contains("<span"));

        // A selection that no longer matches leaves the old output alone
        state.set_selection("absent".to_string());
        state.apply_styles();
        assert_eq!(state.styled_output, first);
    }

    #[test]
    fn test_toggle_recomputes_immediately() {
        let mut state = StyleState::default();
        state.set_text("hello world".to_string());
        state.set_selection("hello".to_string());
        state.apply_styles();
        assert!(state.styled_output.contains("font-weight: normal;"));

        state.toggle_bold();
        assert!(state.bold);
        assert!(state.styled_output.contains("font-weight: bold;"));

        state.toggle_underline();
        assert!(state.underline);
        assert!(state.styled_output.contains("text-decoration: underline;"));
        assert!(state.styled_output.contains("font-weight: bold;"));
    }

    #[test]
    fn test_reset_restores_every_field() {
        let mut state = StyleState::default();
        state.set_text("hello".to_string());
        state.set_selection("hello".to_string());
        state.set_fg_color("#ff0000");
        state.set_bg_color("#00ff00");
        state.toggle_bold();
        state.toggle_underline();
        state.apply_styles();
        state.mark_copied(Instant::now());

        state.reset();
        assert!(state.text.is_empty());
        assert!(state.selection.is_empty());
        assert_eq!(state.fg_color, "#000000");
        assert_eq!(state.bg_color, "#ffffff");
        assert!(!state.bold);
        assert!(!state.underline);
        assert!(state.styled_output.is_empty());
        assert!(!state.copy_feedback_active(Instant::now()));
    }

    #[test]
    fn test_copy_feedback_window() {
        let mut state = StyleState::default();
        let now = Instant::now();
        assert!(!state.copy_feedback_active(now));

        state.mark_copied(now);
        assert!(state.copy_feedback_active(now));
        assert!(state.copy_feedback_active(now + Duration::from_millis(1999)));
        assert!(!state.copy_feedback_active(now + Duration::from_millis(2000)));
    }

    #[test]
    fn test_second_copy_replaces_pending_deadline() {
        let mut state = StyleState::default();
        let now = Instant::now();
        state.mark_copied(now);
        state.mark_copied(now + Duration::from_millis(1000));

        // The first deadline must not clear the flag early
        state.tick(now + Duration::from_millis(2500));
        assert!(state.copy_feedback_active(now + Duration::from_millis(2500)));
        state.tick(now + Duration::from_millis(3000));
        assert!(!state.copy_feedback_active(now + Duration::from_millis(3000)));
    }

    #[test]
    fn test_tick_expires_feedback() {
        let mut state = StyleState::default();
        let now = Instant::now();
        state.mark_copied(now);
        state.tick(now + Duration::from_millis(1000));
        assert!(state.copy_feedback_active(now + Duration::from_millis(1000)));
        state.tick(now + Constants::COPY_FEEDBACK_WINDOW);
        assert!(!state.copy_feedback_active(now + Constants::COPY_FEEDBACK_WINDOW));
    }

    #[test]
    fn test_is_hex_color() {
        assert!(is_hex_color("#000000"));
        assert!(is_hex_color("#FFffFF"));
        assert!(!is_hex_color("000000"));
        assert!(!is_hex_color("#fff"));
        assert!(!is_hex_color("#gggggg"));
        assert!(!is_hex_color(""));
    }
}
