//! Birthday CLI - An animated birthday card in the terminal

mod io;
mod ui;

use std::io::stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
        MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::{error, info};

use birthday_core::{Action, App, CardContent, Pacing, Settings};

/// Redraw at least this often so particles keep moving
const FRAME: Duration = Duration::from_millis(33);

/// Approximate pixel width of a terminal cell, for swipe thresholds
const CELL_WIDTH_PX: i32 = 8;

#[derive(Parser, Debug)]
#[command(name = "birthday", version, about = "An animated birthday card with a typewriter love letter")]
struct Args {
    /// Card content as JSON (defaults to the built-in sample card)
    #[arg(short, long)]
    content: Option<PathBuf>,

    /// Milliseconds between typed characters
    #[arg(short, long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    speed: u64,

    /// Delay multiplier after punctuation; 1 types at an even pace
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
    punctuation_pause: u32,

    /// Log filter such as "debug" or "birthday_core=trace" (defaults to RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,

    /// Print the effective card content as JSON and exit
    #[arg(long)]
    dump_content: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let content = match &args.content {
        Some(path) => io::load_content(path)?,
        None => CardContent::default(),
    };

    if args.dump_content {
        println!("{}", content.to_json()?);
        return Ok(());
    }

    let (_guard, log_path) = io::init_logging(args.log_level.as_deref())?;

    let settings = Settings {
        interval: Duration::from_millis(args.speed),
        pacing: Pacing {
            punctuation_factor: args.punctuation_pause,
        },
    };
    let today = chrono::Local::now().date_naive();
    let mut app = App::new(content, settings, today)?;
    info!(
        recipient = %app.content.recipient,
        age = app.hero.age,
        log = %log_path.display(),
        "card ready"
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    app.set_status(&format!("A card for {}! Press Enter to begin, ? for help", app.content.recipient));

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(e) = res {
        error!("{e:#}");
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let start = Instant::now();
    let mut drag_origin: Option<u16> = None;

    while app.running {
        app.advance(start.elapsed());
        terminal.draw(|f| ui::draw(f, app))?;

        // Wake for the next timer or the next frame, whichever is sooner
        let timeout = app
            .timers
            .next_deadline()
            .map(|deadline| deadline.saturating_sub(start.elapsed()).min(FRAME))
            .unwrap_or(FRAME);
        if !event::poll(timeout)? {
            continue;
        }

        match event::read()? {
            Event::Key(key)
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                app.running = false;
            }
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                // Clear status on any key
                app.clear_status();
                if let Some(action) = key_action(key.code) {
                    app.apply(action);
                }
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => drag_origin = Some(mouse.column),
                MouseEventKind::Up(MouseButton::Left) => {
                    if let Some(origin) = drag_origin.take() {
                        let offset = (mouse.column as i32 - origin as i32) * CELL_WIDTH_PX;
                        if offset != 0 {
                            app.apply(Action::Swipe(offset));
                        }
                    }
                }
                _ => {}
            },
            _ => {}
        }
    }
    Ok(())
}

fn key_action(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char(c) => Action::from_char(c),
        KeyCode::Tab => Some(Action::NextSection),
        KeyCode::BackTab => Some(Action::PrevSection),
        KeyCode::Up => Some(Action::Up),
        KeyCode::Down => Some(Action::Down),
        KeyCode::Left => Some(Action::Left),
        KeyCode::Right => Some(Action::Right),
        KeyCode::Enter => Some(Action::Activate),
        KeyCode::Esc => Some(Action::Back),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_action() {
        assert_eq!(key_action(KeyCode::Tab), Some(Action::NextSection));
        assert_eq!(key_action(KeyCode::BackTab), Some(Action::PrevSection));
        assert_eq!(key_action(KeyCode::Char('q')), Some(Action::Quit));
        assert_eq!(key_action(KeyCode::F(1)), None);
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["birthday"]);
        assert_eq!(args.speed, 30);
        assert_eq!(args.punctuation_pause, 3);
        assert!(args.content.is_none());
        assert!(Args::try_parse_from(["birthday", "--speed", "0"]).is_err());
    }
}
