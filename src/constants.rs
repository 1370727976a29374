/// Application constants to avoid magic numbers
use std::time::Duration;

pub struct Constants;

impl Constants {
    // Style state defaults
    pub const DEFAULT_FG_COLOR: &'static str = "#000000";
    pub const DEFAULT_BG_COLOR: &'static str = "#ffffff";

    // Layout values baked into every generated span
    pub const SPAN_PADDING: &'static str = "3px";
    pub const SPAN_RADIUS: &'static str = "3px";

    // Copy feedback
    pub const COPY_FEEDBACK_WINDOW: Duration = Duration::from_millis(2000);
    pub const COPY_SUCCESS_MESSAGE: &'static str = "Copied to clipboard!";

    // Labels and placeholders
    pub const DEFAULT_TITLE: &'static str = "Colored Text Generator";
    pub const TEXT_PLACEHOLDER: &'static str = "Type your message here...";
    pub const SELECTION_PLACEHOLDER: &'static str = "Enter text to style";
    pub const PREVIEW_PLACEHOLDER: &'static str = "Your formatted text will appear here...";

    // Preset palette cycled with Up/Down in the color fields
    pub const PALETTE: [&'static str; 10] = [
        "#000000", "#ffffff", "#ff0000", "#00ff00", "#0000ff", "#ffff00", "#ff00ff",
        "#00ffff", "#808080", "#ffa500",
    ];

    // Colors and Styles
    pub const FOCUS_BORDER_COLOR: ratatui::style::Color = ratatui::style::Color::Cyan;
    pub const BLUR_BORDER_COLOR: ratatui::style::Color = ratatui::style::Color::DarkGray;
    pub const INVALID_INPUT_COLOR: ratatui::style::Color = ratatui::style::Color::Red;
    pub const STATUS_BAR_BG_COLOR: ratatui::style::Color = ratatui::style::Color::Blue;
    pub const STATUS_BAR_FG_COLOR: ratatui::style::Color = ratatui::style::Color::White;
    pub const FEEDBACK_COLOR: ratatui::style::Color = ratatui::style::Color::Green;
    pub const ERROR_COLOR: ratatui::style::Color = ratatui::style::Color::Red;

    // UI Layout
    pub const MARKUP_PANEL_MAX_CHARS: usize = 500;
}
