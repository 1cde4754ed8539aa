pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::ThemeColors;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

use crate::answers::KeyValueStore;

pub async fn run_tui<S: KeyValueStore>(mut app: App<S>) -> anyhow::Result<()> {
    // Buffer notices while TUI is active to prevent output corrupting the display
    crate::notices::activate();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();

    // 250ms tick drives flash message expiry
    let mut events = EventHandler::new(250);

    let result = loop {
        if let Err(e) = terminal.draw(|frame| ui::draw(frame, &mut app)) {
            break Err(e.into());
        }

        match events.next().await {
            Event::Key(key) => handle_key_event(&mut app, key),
            Event::Resize => {}
            Event::Tick => app.update_flash(),
        }

        if app.should_quit {
            break Ok(());
        }
    };

    // Restore terminal
    ratatui::restore();

    // Flush buffered notices now that the terminal is restored
    crate::notices::flush();

    result
}

pub fn handle_key_event<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) {
    match app.input_mode {
        app::InputMode::Normal => {
            match key.code {
                // Quit
                KeyCode::Char('q') => app.should_quit = true,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.should_quit = true
                }

                // Navigation
                KeyCode::Char('j') | KeyCode::Down => app.next_row(),
                KeyCode::Char('k') | KeyCode::Up => app.previous_row(),

                // Rating
                KeyCode::Char('l') | KeyCode::Right | KeyCode::Char('+') => app.increase_rating(),
                KeyCode::Char('h') | KeyCode::Left | KeyCode::Char('-') => app.decrease_rating(),
                KeyCode::Char(' ') => app.confirm_selected_rating(),
                KeyCode::Char(c @ '1'..='5') => {
                    if let Some(rating) = c.to_digit(10) {
                        app.set_selected_rating(rating as u8);
                    }
                }

                // Results
                KeyCode::Enter | KeyCode::Char('c') => app.compute_results(),
                KeyCode::Tab => app.toggle_view(),

                // Reset (asks first)
                KeyCode::Char('R') => app.start_reset(),

                // Help
                KeyCode::Char('?') => app.show_help(),

                _ => {}
            }
        }
        app::InputMode::ConfirmReset => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('s') | KeyCode::Char('S') => {
                app.confirm_reset()
            }
            // Anything else backs out
            _ => app.cancel_reset(),
        },
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::MemoryStore;
    use crate::catalog::Catalog;
    use crate::session::Session;

    fn app() -> App<MemoryStore> {
        App::new(Session::open(Catalog::builtin(), MemoryStore::new()))
    }

    fn press(app: &mut App<MemoryStore>, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_digit_sets_rating() {
        let mut app = app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.session.answer("marketing-1"), Some(4));
    }

    #[test]
    fn test_reset_needs_confirmation() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));

        press(&mut app, KeyCode::Char('R'));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.session.answer("marketing-0"), Some(2));

        press(&mut app, KeyCode::Char('R'));
        press(&mut app, KeyCode::Char('s'));
        assert!(app.session.answers().is_empty());
    }

    #[test]
    fn test_help_swallows_next_key() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app();
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn test_enter_computes_results() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.current_view, app::View::Results);
        let (_, overall) = app.results.as_ref().unwrap();
        assert_eq!(*overall, crate::scoring::Overall::Insufficient);
    }
}
