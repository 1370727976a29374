/// Terminal rendering of the sanitized markup: styled spans become ratatui
/// spans carrying the parsed colors and modifiers, everything else is plain.
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

pub struct Preview;

const SPAN_OPEN_PREFIX: &str = "<span style=\"";
const SPAN_CLOSE: &str = "</span>";

pub fn parse_hex_color(value: &str) -> Option<Color> {
    let digits = value.strip_prefix('#')?;
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Preview {
    /// Turn a sanitized markup fragment into display lines. Markup that does
    /// not parse as a styled span renders as plain text.
    pub fn render_markup(markup: &str) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        let mut current: Vec<Span<'static>> = Vec::new();

        for (text, style) in Self::segments(markup) {
            let mut first = true;
            for piece in text.split('\n') {
                if !first {
                    lines.push(Line::from(std::mem::take(&mut current)));
                }
                if !piece.is_empty() {
                    current.push(Span::styled(Self::unescape(piece), style));
                }
                first = false;
            }
        }

        lines.push(Line::from(current));
        lines
    }

    fn segments(markup: &str) -> Vec<(String, Style)> {
        let mut segments = Vec::new();
        let mut rest = markup;
        while !rest.is_empty() {
            if let Some((style, inner, consumed)) = Self::parse_span(rest) {
                segments.push((inner, style));
                rest = &rest[consumed..];
            } else {
                // Skip past the first char before searching so a stray '<'
                // that failed to parse still advances
                let first_len = rest.chars().next().map_or(1, |c| c.len_utf8());
                match rest[first_len..].find('<') {
                    Some(offset) => {
                        segments.push((rest[..offset + first_len].to_string(), Style::default()));
                        rest = &rest[offset + first_len..];
                    }
                    None => {
                        segments.push((rest.to_string(), Style::default()));
                        rest = "";
                    }
                }
            }
        }
        segments
    }

    fn parse_span(rest: &str) -> Option<(Style, String, usize)> {
        let body = rest.strip_prefix(SPAN_OPEN_PREFIX)?;
        let value_end = body.find('"')?;
        let declarations = &body[..value_end];
        let after_tag = body[value_end + 1..].strip_prefix('>')?;
        let close = after_tag.find(SPAN_CLOSE)?;
        let inner = &after_tag[..close];
        let consumed = rest.len() - after_tag.len() + close + SPAN_CLOSE.len();
        Some((Self::span_style(declarations), inner.to_string(), consumed))
    }

    fn span_style(declarations: &str) -> Style {
        let mut style = Style::default();
        for declaration in declarations.split(';') {
            let mut parts = declaration.splitn(2, ':');
            let (name, value) = match (parts.next(), parts.next()) {
                (Some(name), Some(value)) => (name.trim(), value.trim()),
                _ => continue,
            };
            match name {
                "color" => {
                    if let Some(color) = parse_hex_color(value) {
                        style = style.fg(color);
                    }
                }
                "background-color" => {
                    if let Some(color) = parse_hex_color(value) {
                        style = style.bg(color);
                    }
                }
                "font-weight" if value == "bold" => {
                    style = style.add_modifier(Modifier::BOLD);
                }
                "text-decoration" if value == "underline" => {
                    style = style.add_modifier(Modifier::UNDERLINED);
                }
                _ => {}
            }
        }
        style
    }

    fn unescape(text: &str) -> String {
        text.replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&amp;", "&")
    }
}
