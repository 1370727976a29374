mod app;
mod clipboard_bridge;
mod constants;
mod event_handler;
mod preview;
mod sanitizer;
mod state;
mod styler;
mod text_utils;

use anyhow::Result;
use app::{App, AppAction};
use clap::Parser;
use constants::Constants;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use event_handler::EventHandler;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "tintgen")]
#[command(about = "Style a substring of your text and copy the HTML markup")]
struct Args {
    /// Heading shown above the form
    #[arg(long, default_value = Constants::DEFAULT_TITLE)]
    title: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let terminal_setup = enable_raw_mode().and_then(|_| {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend)
    });

    match terminal_setup {
        Ok(mut terminal) => {
            let mut app = App::new(args.title);
            let result = run_app(&mut app, &mut terminal);

            disable_raw_mode()?;
            execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
            terminal.show_cursor()?;

            result?;
        }
        Err(_) => {
            eprintln!("Error: Terminal not available. This application requires a terminal to run.");
            std::process::exit(1);
        }
    }

    Ok(())
}

fn run_app(app: &mut App, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    loop {
        // Expire the copy-feedback window even when no events arrive
        app.tick(Instant::now());
        terminal.draw(|f| app.draw(f))?;

        if crossterm::event::poll(Duration::from_millis(100))? {
            let event = crossterm::event::read()?;
            match EventHandler::handle_event(app, event) {
                AppAction::Quit => break,
                AppAction::None => continue,
            }
        }
    }
    Ok(())
}
