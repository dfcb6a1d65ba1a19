//! Birthday Web - WebAssembly version of the birthday card
//!
//! This crate renders the card in the browser using Ratzilla for terminal
//! rendering in the DOM.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use ratzilla::ratatui::Terminal;
use ratzilla::{event::KeyCode, DomBackend, WebRenderer};
use wasm_bindgen::prelude::*;

use birthday_core::{Action, App, CardContent, Settings};

pub mod io;
mod ui;

/// Initialize the birthday card web application
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    let mut app = App::new(CardContent::default(), Settings::default(), io::today())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    app.set_status(&format!("A card for {}! Press Enter to begin, ? for help", app.content.recipient));

    // Wrap in Rc<RefCell> for shared state
    let app_state = Rc::new(RefCell::new(app));

    // Create terminal with DOM backend
    let backend = DomBackend::new()
        .map_err(|e| JsValue::from_str(&format!("Failed to create backend: {:?}", e)))?;
    let mut terminal = Terminal::new(backend)
        .map_err(|e| JsValue::from_str(&format!("Failed to create terminal: {:?}", e)))?;

    // Set up keyboard handler
    terminal.on_key_event({
        let app_state_cloned = app_state.clone();
        move |event| {
            let mut app = app_state_cloned.borrow_mut();
            app.clear_status();

            if let Some(action) = key_action(event.code) {
                app.apply(action);
            }
        }
    });

    // Draw loop, also the clock for every card timer
    let start = io::now_ms();
    terminal.draw_web(move |frame| {
        let mut app = app_state.borrow_mut();
        let elapsed = (io::now_ms() - start).max(0.0);
        app.advance(Duration::from_secs_f64(elapsed / 1000.0));
        ui::draw(frame, &app);
    });

    web_sys::console::log_1(&"Birthday card WASM initialized".into());

    Ok(())
}

fn key_action(code: KeyCode) -> Option<Action> {
    match code {
        // Quitting means nothing in a browser tab
        KeyCode::Char('q') => None,
        KeyCode::Char(c) => Action::from_char(c),
        KeyCode::Tab => Some(Action::NextSection),
        KeyCode::Up => Some(Action::Up),
        KeyCode::Down => Some(Action::Down),
        KeyCode::Left => Some(Action::Left),
        KeyCode::Right => Some(Action::Right),
        KeyCode::Enter => Some(Action::Activate),
        KeyCode::Esc => Some(Action::Back),
        _ => None,
    }
}
