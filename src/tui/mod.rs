// File: ./src/tui/mod.rs
// Terminal capture modal: one input line with a live date preview.
pub mod input;
pub mod view;

use crate::model::CaptureRecord;
use crate::session::{CaptureEvent, CaptureSession, CaptureSurface};
use crate::tui::input::InputLine;
use crate::tui::view::draw;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};

/// What the modal displays; driven by the capture session.
#[derive(Debug, Default)]
pub struct ModalSurface {
    title: String,
    preview: String,
    closed: bool,
}

impl ModalSurface {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn preview(&self) -> &str {
        &self.preview
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl CaptureSurface for ModalSurface {
    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn show_preview(&mut self, preview: &str) {
        self.preview = preview.to_string();
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

/// Apply a key press to the input field and translate it for the session.
/// Returns `None` for keys that change nothing.
pub fn handle_key(key: KeyEvent, input: &mut InputLine) -> Option<CaptureEvent> {
    let before = input.text().to_string();
    match key.code {
        KeyCode::Enter => return Some(CaptureEvent::Commit),
        KeyCode::Esc => return Some(CaptureEvent::Cancel),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Some(CaptureEvent::Cancel);
        }
        KeyCode::Char(c) => input.enter_char(c),
        KeyCode::Backspace => input.delete_char(),
        KeyCode::Delete => input.delete_char_forward(),
        KeyCode::Left => input.move_cursor_left(),
        KeyCode::Right => input.move_cursor_right(),
        KeyCode::Home => input.move_cursor_home(),
        KeyCode::End => input.move_cursor_end(),
        _ => {}
    }
    if input.text() == before {
        None
    } else {
        Some(CaptureEvent::Input(input.text().to_string()))
    }
}

fn run_modal(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    title: &str,
    captured: &mut Option<CaptureRecord>,
) -> Result<()> {
    let mut input = InputLine::default();
    let mut session = CaptureSession::new(ModalSurface::default())
        .with_title(title)
        .on_enter(|record| *captured = Some(record));
    session.open();

    while !session.surface().is_closed() {
        terminal.draw(|f| draw(f, session.surface(), &input))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && let Some(capture_event) = handle_key(key, &mut input)
        {
            session.handle(capture_event);
        }
    }
    Ok(())
}

/// Show the capture modal until the user commits (Enter) or cancels (Esc).
pub fn capture(title: &str) -> Result<Option<CaptureRecord>> {
    // Panic Hook: restore the terminal before printing the report
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut captured = None;
    let result = run_modal(&mut terminal, title, &mut captured);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    Ok(captured)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_emits_full_input() {
        let mut input = InputLine::default();
        assert_eq!(
            handle_key(press(KeyCode::Char('a')), &mut input),
            Some(CaptureEvent::Input("a".to_string()))
        );
        assert_eq!(
            handle_key(press(KeyCode::Char('b')), &mut input),
            Some(CaptureEvent::Input("ab".to_string()))
        );
    }

    #[test]
    fn test_cursor_moves_are_silent() {
        let mut input = InputLine::default();
        handle_key(press(KeyCode::Char('a')), &mut input);
        assert_eq!(handle_key(press(KeyCode::Left), &mut input), None);
        assert_eq!(handle_key(press(KeyCode::Backspace), &mut input), None);
    }

    #[test]
    fn test_enter_and_escape() {
        let mut input = InputLine::default();
        assert_eq!(
            handle_key(press(KeyCode::Enter), &mut input),
            Some(CaptureEvent::Commit)
        );
        assert_eq!(
            handle_key(press(KeyCode::Esc), &mut input),
            Some(CaptureEvent::Cancel)
        );
        assert_eq!(
            handle_key(
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                &mut input
            ),
            Some(CaptureEvent::Cancel)
        );
    }

    #[test]
    fn test_session_driven_by_keys() {
        let mut input = InputLine::default();
        let mut captured = None;
        {
            let mut session = CaptureSession::new(ModalSurface::default())
                .with_title("Describe intention")
                .on_enter(|record| captured = Some(record));
            session.open();
            for c in "Read #books".chars() {
                if let Some(ev) = handle_key(press(KeyCode::Char(c)), &mut input) {
                    session.handle(ev);
                }
            }
            if let Some(ev) = handle_key(press(KeyCode::Enter), &mut input) {
                session.handle(ev);
            }
            assert!(session.surface().is_closed());
        }
        let record = captured.unwrap();
        assert_eq!(record.description, "Read ");
        assert_eq!(record.tags, vec!["books"]);
    }
}
