use std::time::Instant;

use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tui_textarea::TextArea;

use crate::clipboard_bridge::{copy_styled_output, Clipboard, SystemClipboard};
use crate::constants::Constants;
use crate::preview::Preview;
use crate::sanitizer::{Sanitizer, TagAllowlistSanitizer};
use crate::state::{is_hex_color, StyleState};
use crate::text_utils::TextUtils;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Text,
    Selection,
    FgColor,
    BgColor,
}

pub enum AppAction {
    None,
    Quit,
}

pub struct App {
    title: String,
    state: StyleState,
    textarea: TextArea<'static>,
    selection_input: String,
    fg_input: String,
    bg_input: String,
    fg_palette_index: usize,
    bg_palette_index: usize,
    focus: Focus,
    clipboard: Box<dyn Clipboard>,
    sanitizer: Box<dyn Sanitizer>,
}

impl App {
    pub fn new(title: String) -> Self {
        Self::with_capabilities(title, Box::new(SystemClipboard), Box::new(TagAllowlistSanitizer))
    }

    /// The clipboard and sanitizer are injected so the app runs headless in
    /// tests with stub capabilities.
    pub fn with_capabilities(
        title: String,
        clipboard: Box<dyn Clipboard>,
        sanitizer: Box<dyn Sanitizer>,
    ) -> Self {
        Self {
            title,
            state: StyleState::default(),
            textarea: Self::new_textarea(),
            selection_input: String::new(),
            fg_input: Constants::DEFAULT_FG_COLOR.to_string(),
            bg_input: Constants::DEFAULT_BG_COLOR.to_string(),
            fg_palette_index: 0,
            bg_palette_index: 1,
            focus: Focus::Text,
            clipboard,
            sanitizer,
        }
    }

    fn new_textarea() -> TextArea<'static> {
        let mut textarea = TextArea::default();
        textarea.set_placeholder_text(Constants::TEXT_PLACEHOLDER);
        textarea.set_cursor_line_style(Style::default());
        textarea
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn state(&self) -> &StyleState {
        &self.state
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            Focus::Text => Focus::Selection,
            Focus::Selection => Focus::FgColor,
            Focus::FgColor => Focus::BgColor,
            Focus::BgColor => Focus::Text,
        };
    }

    pub fn focus_prev(&mut self) {
        self.focus = match self.focus {
            Focus::Text => Focus::BgColor,
            Focus::Selection => Focus::Text,
            Focus::FgColor => Focus::Selection,
            Focus::BgColor => Focus::FgColor,
        };
    }

    pub fn input_text(&mut self, key: KeyEvent) {
        self.textarea.input(key);
        self.sync_text();
    }

    pub fn paste_text(&mut self, content: &str) {
        self.textarea.insert_str(content);
        self.sync_text();
    }

    fn sync_text(&mut self) {
        self.state.set_text(self.textarea.lines().join("\n"));
    }

    pub fn push_selection_char(&mut self, c: char) {
        self.selection_input.push(c);
        self.state.set_selection(self.selection_input.clone());
    }

    pub fn pop_selection_char(&mut self) {
        self.selection_input.pop();
        self.state.set_selection(self.selection_input.clone());
    }

    pub fn paste_selection(&mut self, content: &str) {
        self.selection_input.push_str(content);
        self.state.set_selection(self.selection_input.clone());
    }

    pub fn push_color_char(&mut self, c: char) {
        if c != '#' && !c.is_ascii_hexdigit() {
            return;
        }
        let buffer = match self.focus {
            Focus::FgColor => &mut self.fg_input,
            Focus::BgColor => &mut self.bg_input,
            _ => return,
        };
        if buffer.len() >= 7 {
            return;
        }
        buffer.push(c.to_ascii_lowercase());
        self.commit_colors();
    }

    pub fn pop_color_char(&mut self) {
        match self.focus {
            Focus::FgColor => {
                self.fg_input.pop();
            }
            Focus::BgColor => {
                self.bg_input.pop();
            }
            _ => {}
        }
        self.commit_colors();
    }

    /// Step the focused color field through the preset palette.
    pub fn cycle_palette(&mut self, forward: bool) {
        let len = Constants::PALETTE.len();
        let (index, buffer) = match self.focus {
            Focus::FgColor => (&mut self.fg_palette_index, &mut self.fg_input),
            Focus::BgColor => (&mut self.bg_palette_index, &mut self.bg_input),
            _ => return,
        };
        *index = if forward { (*index + 1) % len } else { (*index + len - 1) % len };
        *buffer = Constants::PALETTE[*index].to_string();
        self.commit_colors();
    }

    // Only valid values reach the state; the buffers keep whatever was typed
    // so the user can finish editing.
    fn commit_colors(&mut self) {
        self.state.set_fg_color(&self.fg_input);
        self.state.set_bg_color(&self.bg_input);
    }

    pub fn apply_styles(&mut self) {
        self.state.apply_styles();
    }

    pub fn toggle_bold(&mut self) {
        self.state.toggle_bold();
    }

    pub fn toggle_underline(&mut self) {
        self.state.toggle_underline();
    }

    pub fn reset(&mut self) {
        self.state.reset();
        self.textarea = Self::new_textarea();
        self.selection_input.clear();
        self.fg_input = Constants::DEFAULT_FG_COLOR.to_string();
        self.bg_input = Constants::DEFAULT_BG_COLOR.to_string();
        self.fg_palette_index = 0;
        self.bg_palette_index = 1;
    }

    pub fn copy_to_clipboard(&mut self, now: Instant) {
        copy_styled_output(&mut self.state, self.clipboard.as_mut(), now);
    }

    pub fn tick(&mut self, now: Instant) {
        self.state.tick(now);
    }

    pub fn draw(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(7),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(f.size());

        self.draw_title(f, chunks[0]);
        self.draw_text_input(f, chunks[1]);
        self.draw_selection_input(f, chunks[2]);
        self.draw_color_inputs(f, chunks[3]);
        self.draw_preview(f, chunks[4]);
        self.draw_markup(f, chunks[5]);
        self.draw_status_bar(f, chunks[6]);
    }

    fn field_block(&self, title: &'static str, focus: Focus) -> Block<'static> {
        let color = if self.focus == focus {
            Constants::FOCUS_BORDER_COLOR
        } else {
            Constants::BLUR_BORDER_COLOR
        };
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(color))
    }

    fn draw_title(&self, f: &mut Frame, area: Rect) {
        let title = Paragraph::new(self.title.clone())
            .style(Style::default().add_modifier(Modifier::BOLD));
        f.render_widget(title, area);
    }

    fn draw_text_input(&mut self, f: &mut Frame, area: Rect) {
        let block = self.field_block("Message", Focus::Text);
        self.textarea.set_block(block);
        f.render_widget(self.textarea.widget(), area);
    }

    fn draw_selection_input(&self, f: &mut Frame, area: Rect) {
        let content = if self.selection_input.is_empty() && self.focus != Focus::Selection {
            Paragraph::new(Constants::SELECTION_PLACEHOLDER)
                .style(Style::default().fg(Constants::BLUR_BORDER_COLOR))
        } else {
            Paragraph::new(self.selection_input.clone())
        };
        f.render_widget(content.block(self.field_block("Text to style", Focus::Selection)), area);
    }

    fn draw_color_inputs(&self, f: &mut Frame, area: Rect) {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        self.draw_color_field(f, halves[0], "Foreground Color", Focus::FgColor, &self.fg_input);
        self.draw_color_field(f, halves[1], "Background Color", Focus::BgColor, &self.bg_input);
    }

    fn draw_color_field(
        &self,
        f: &mut Frame,
        area: Rect,
        title: &'static str,
        focus: Focus,
        buffer: &str,
    ) {
        let mut style = Style::default();
        if let Some(color) = crate::preview::parse_hex_color(buffer) {
            style = style.fg(color);
        } else {
            style = style.fg(Constants::INVALID_INPUT_COLOR);
        }
        let swatch = if is_hex_color(buffer) { " ███" } else { " (invalid)" };
        let paragraph = Paragraph::new(format!("{}{}", buffer, swatch))
            .style(style)
            .block(self.field_block(title, focus));
        f.render_widget(paragraph, area);
    }

    fn draw_preview(&self, f: &mut Frame, area: Rect) {
        let markup = if self.state.styled_output.is_empty() {
            self.sanitizer.sanitize(Constants::PREVIEW_PLACEHOLDER)
        } else {
            self.sanitizer.sanitize(&self.state.styled_output)
        };
        let lines: Vec<Line<'static>> = Preview::render_markup(&markup);
        let title: &'static str = if self.state.bold && self.state.underline {
            "Preview (bold, underline)"
        } else if self.state.bold {
            "Preview (bold)"
        } else if self.state.underline {
            "Preview (underline)"
        } else {
            "Preview"
        };
        let paragraph = Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(Style::default().fg(Constants::BLUR_BORDER_COLOR)),
            );
        f.render_widget(paragraph, area);
    }

    fn draw_markup(&self, f: &mut Frame, area: Rect) {
        let markup = TextUtils::truncate_with_ellipsis(
            &self.state.styled_output,
            Constants::MARKUP_PANEL_MAX_CHARS,
        );
        let paragraph = Paragraph::new(markup).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Markup")
                .border_style(Style::default().fg(Constants::BLUR_BORDER_COLOR)),
        );
        f.render_widget(paragraph, area);
    }

    fn draw_status_bar(&self, f: &mut Frame, area: Rect) {
        let now = Instant::now();
        let (status, fg) = if let Some(err) = &self.state.copy_error {
            (format!("Copy failed: {}", err), Constants::ERROR_COLOR)
        } else if self.state.copy_feedback_active(now) {
            (Constants::COPY_SUCCESS_MESSAGE.to_string(), Constants::FEEDBACK_COLOR)
        } else {
            (
                "Tab: next field | ^A: apply | ^B: bold | ^U: underline | ^R: reset | ^Y: copy | Esc: quit"
                    .to_string(),
                Constants::STATUS_BAR_FG_COLOR,
            )
        };

        let paragraph = Paragraph::new(status)
            .style(Style::default().bg(Constants::STATUS_BAR_BG_COLOR).fg(fg));
        f.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sanitizer::IdentitySanitizer;
    use anyhow::Result;

    struct StubClipboard {
        fail: bool,
    }

    impl Clipboard for StubClipboard {
        fn write_text(&mut self, _text: &str) -> Result<()> {
            if self.fail {
                anyhow::bail!("denied");
            }
            Ok(())
        }
    }

    fn headless_app() -> App {
        App::with_capabilities(
            Constants::DEFAULT_TITLE.to_string(),
            Box::new(StubClipboard { fail: false }),
            Box::new(IdentitySanitizer),
        )
    }

    #[test]
    fn test_focus_cycle_wraps() {
        let mut app = headless_app();
        assert_eq!(app.focus(), Focus::Text);
        app.focus_next();
        app.focus_next();
        app.focus_next();
        app.focus_next();
        assert_eq!(app.focus(), Focus::Text);
        app.focus_prev();
        assert_eq!(app.focus(), Focus::BgColor);
    }

    #[test]
    fn test_color_field_rejects_non_hex_input() {
        let mut app = headless_app();
        app.focus_next();
        app.focus_next();
        assert_eq!(app.focus(), Focus::FgColor);
        app.pop_color_char();
        app.push_color_char('z');
        assert_eq!(app.state().fg_color, "#000000");
        app.push_color_char('f');
        assert_eq!(app.state().fg_color, "#00000f");
    }

    #[test]
    fn test_palette_cycle_commits_valid_colors() {
        let mut app = headless_app();
        app.focus_next();
        app.focus_next();
        app.cycle_palette(true);
        assert_eq!(app.state().fg_color, Constants::PALETTE[1]);
        app.cycle_palette(false);
        app.cycle_palette(false);
        assert_eq!(app.state().fg_color, Constants::PALETTE[Constants::PALETTE.len() - 1]);
    }

    #[test]
    fn test_selection_edits_reach_state() {
        let mut app = headless_app();
        app.push_selection_char('h');
        app.push_selection_char('i');
        assert_eq!(app.state().selection, "hi");
        app.pop_selection_char();
        assert_eq!(app.state().selection, "h");
        app.paste_selection("ello");
        assert_eq!(app.state().selection, "hello");
    }

    #[test]
    fn test_reset_clears_inputs_and_state() {
        let mut app = headless_app();
        app.paste_text("hello world");
        app.paste_selection("hello");
        app.apply_styles();
        assert!(!app.state().styled_output.is_empty());

        app.reset();
        assert!(app.state().text.is_empty());
        assert!(app.state().styled_output.is_empty());
        assert_eq!(app.state().fg_color, Constants::DEFAULT_FG_COLOR);
    }

    #[test]
    fn test_copy_failure_is_surfaced() {
        let mut app = App::with_capabilities(
            Constants::DEFAULT_TITLE.to_string(),
            Box::new(StubClipboard { fail: true }),
            Box::new(IdentitySanitizer),
        );
        app.paste_text("hello");
        app.paste_selection("hello");
        app.apply_styles();
        let now = Instant::now();
        app.copy_to_clipboard(now);
        assert!(app.state().copy_error.is_some());
        assert!(!app.state().copy_feedback_active(now));
    }
}
