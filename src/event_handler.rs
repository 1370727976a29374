use clipboard::{ClipboardContext, ClipboardProvider};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

use crate::app::{App, AppAction, Focus};

pub struct EventHandler;

impl EventHandler {
    pub fn handle_event(app: &mut App, event: Event) -> AppAction {
        match event {
            Event::Key(key) => Self::handle_key_event(app, key),
            _ => AppAction::None,
        }
    }

    fn handle_key_event(app: &mut App, key: KeyEvent) -> AppAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return Self::handle_control_key(app, key);
        }

        match key.code {
            KeyCode::Esc => AppAction::Quit,
            KeyCode::Tab => {
                app.focus_next();
                AppAction::None
            }
            KeyCode::BackTab => {
                app.focus_prev();
                AppAction::None
            }
            _ => Self::handle_field_key(app, key),
        }
    }

    fn handle_control_key(app: &mut App, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('c') => AppAction::Quit,
            KeyCode::Char('a') => {
                app.apply_styles();
                AppAction::None
            }
            KeyCode::Char('b') => {
                app.toggle_bold();
                AppAction::None
            }
            KeyCode::Char('u') => {
                app.toggle_underline();
                AppAction::None
            }
            KeyCode::Char('r') => {
                app.reset();
                AppAction::None
            }
            KeyCode::Char('y') => {
                app.copy_to_clipboard(Instant::now());
                AppAction::None
            }
            KeyCode::Char('v') => {
                Self::paste_from_clipboard(app);
                AppAction::None
            }
            _ => AppAction::None,
        }
    }

    fn handle_field_key(app: &mut App, key: KeyEvent) -> AppAction {
        match app.focus() {
            Focus::Text => {
                app.input_text(key);
            }
            Focus::Selection => match key.code {
                KeyCode::Char(c) => app.push_selection_char(c),
                KeyCode::Backspace => app.pop_selection_char(),
                _ => {}
            },
            Focus::FgColor | Focus::BgColor => match key.code {
                KeyCode::Char(c) => app.push_color_char(c),
                KeyCode::Backspace => app.pop_color_char(),
                KeyCode::Up => app.cycle_palette(true),
                KeyCode::Down => app.cycle_palette(false),
                _ => {}
            },
        }
        AppAction::None
    }

    fn paste_from_clipboard(app: &mut App) {
        let Ok(mut ctx) = <ClipboardContext as ClipboardProvider>::new() else {
            return;
        };
        let Ok(content) = ctx.get_contents() else {
            return;
        };
        match app.focus() {
            Focus::Text => app.paste_text(&content),
            Focus::Selection => {
                // The selection field is a single-line match target
                if !content.contains('\n') && !content.contains('\r') {
                    app.paste_selection(&content);
                }
            }
            Focus::FgColor | Focus::BgColor => {}
        }
    }
}
