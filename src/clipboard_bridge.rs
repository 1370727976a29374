use std::time::Instant;

use anyhow::Result;
use clipboard::{ClipboardContext, ClipboardProvider};

use crate::state::StyleState;

/// Host clipboard capability. The system implementation talks to the real
/// clipboard; tests inject stubs so the bridge logic runs headless.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        let mut ctx: ClipboardContext = ClipboardProvider::new()
            .map_err(|e| anyhow::anyhow!("clipboard unavailable: {}", e))?;
        ctx.set_contents(text.to_string())
            .map_err(|e| anyhow::anyhow!("clipboard write failed: {}", e))?;
        Ok(())
    }
}

/// Copy the current styled output. Does nothing when there is nothing to copy.
/// On success the feedback window is armed (replacing a pending one); on
/// failure the error is recorded on the state so the status bar can show it.
pub fn copy_styled_output(state: &mut StyleState, clipboard: &mut dyn Clipboard, now: Instant) {
    if state.styled_output.is_empty() {
        return;
    }
    match clipboard.write_text(&state.styled_output) {
        Ok(()) => state.mark_copied(now),
        Err(err) => state.record_copy_error(err.to_string()),
    }
}
