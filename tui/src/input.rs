//! Keyboard input for the Nebula Field TUI.
//!
//! Terminal events are read on a blocking thread and forwarded over a bounded
//! channel; the frame loop drains a capped batch per frame.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Result, anyhow};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;
use tracing::debug;

use nebula_engine::{App, WalletConnector};

const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(25);
const INPUT_CHANNEL_CAPACITY: usize = 1024;
const MAX_EVENTS_PER_FRAME: usize = 64;

enum InputMsg {
    Event(Event),
    Error(String),
}

pub struct InputPump {
    rx: mpsc::Receiver<InputMsg>,
    stop: Arc<AtomicBool>,
    join: Option<tokio::task::JoinHandle<()>>,
}

impl InputPump {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
        let stop = Arc::new(AtomicBool::new(false));
        let stop2 = stop.clone();

        let join = tokio::task::spawn_blocking(move || input_loop(stop2, tx));
        Self {
            rx,
            stop,
            join: Some(join),
        }
    }

    pub async fn shutdown(&mut self) {
        // Close first so a sender blocked on capacity wakes up.
        self.rx.close();

        self.stop.store(true, Ordering::Release);
        if let Some(join) = self.join.take() {
            let _ = tokio::time::timeout(Duration::from_secs(2), join).await;
        }
    }
}

impl Default for InputPump {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InputPump {
    fn drop(&mut self) {
        self.rx.close();
        self.stop.store(true, Ordering::Release);
    }
}

fn input_loop(stop: Arc<AtomicBool>, tx: mpsc::Sender<InputMsg>) {
    while !stop.load(Ordering::Acquire) {
        match event::poll(INPUT_POLL_TIMEOUT) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    if tx.blocking_send(InputMsg::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                break;
            }
        }
    }
}

/// Drain pending terminal events into the app. Returns `true` when the app
/// should quit.
pub fn handle_events<W: WalletConnector>(app: &mut App<W>, input: &mut InputPump) -> Result<bool> {
    let mut processed = 0;
    while processed < MAX_EVENTS_PER_FRAME {
        let ev = match input.rx.try_recv() {
            Ok(InputMsg::Event(ev)) => ev,
            Ok(InputMsg::Error(msg)) => return Err(anyhow!("input error: {msg}")),
            Err(mpsc::error::TryRecvError::Empty) => break,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                return Err(anyhow!("input pump disconnected"));
            }
        };

        if apply_event(app, ev) {
            return Ok(true);
        }
        processed += 1;
    }
    Ok(app.should_quit())
}

/// Apply one terminal event. Returns `true` when the app should quit.
pub fn apply_event<W: WalletConnector>(app: &mut App<W>, ev: Event) -> bool {
    match ev {
        Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
            if app.is_wallet_modal_open() {
                handle_modal_key(app, key);
            } else {
                handle_form_key(app, key);
            }
        }
        Event::Paste(text) if !app.is_wallet_modal_open() => app.enter_text(&text),
        _ => {}
    }
    app.should_quit()
}

fn handle_modal_key<W: WalletConnector>(app: &mut App<W>, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_wallet_modal(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.request_quit();
        }
        KeyCode::Up | KeyCode::Char('k') => app.modal_select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.modal_select_next(),
        KeyCode::Enter => app.modal_confirm(),
        KeyCode::Char('d') => app.modal_disconnect(),
        _ => {}
    }
}

fn handle_form_key<W: WalletConnector>(app: &mut App<W>, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl {
        match key.code {
            KeyCode::Char('c') => app.request_quit(),
            KeyCode::Char('r') => app.reset(),
            KeyCode::Char('s') => app.suggest(),
            KeyCode::Char('w') => app.open_wallet_modal(),
            KeyCode::Char('t') => app.toggle_panel_tab(),
            KeyCode::Backspace | KeyCode::Char('h') => app.delete_word_backwards(),
            _ => debug!(code = ?key.code, "Unbound control key"),
        }
        return;
    }

    match key.code {
        KeyCode::Esc => app.request_quit(),
        KeyCode::Tab | KeyCode::BackTab => app.focus_next(),
        KeyCode::Enter => app.emit(),
        KeyCode::Backspace => app.delete_char(),
        KeyCode::Delete => app.delete_char_forward(),
        KeyCode::Left => app.move_cursor_left(),
        KeyCode::Right => app.move_cursor_right(),
        KeyCode::Home => app.move_cursor_home(),
        KeyCode::End => app.move_cursor_end(),
        KeyCode::Char(c) => app.enter_char(c),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

    use super::apply_event;
    use nebula_engine::{App, FocusField, PanelTab};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    #[test]
    fn typing_goes_to_focused_field() {
        let mut app = App::new(None);
        apply_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.focus(), FocusField::Wallet);
        for c in "0x12".chars() {
            apply_event(&mut app, key(KeyCode::Char(c)));
        }
        apply_event(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.form().wallet.text(), "0x1");
    }

    #[test]
    fn control_bindings() {
        let mut app = App::new(None);
        apply_event(&mut app, ctrl('s'));
        assert!(!app.form().narrative.text().is_empty());
        apply_event(&mut app, ctrl('t'));
        assert_eq!(app.panel_tab(), PanelTab::Trace);
        apply_event(&mut app, ctrl('r'));
        assert!(app.form().narrative.text().is_empty());
        assert!(apply_event(&mut app, ctrl('c')));
    }

    #[test]
    fn escape_closes_modal_before_quitting() {
        let mut app = App::new(None);
        apply_event(&mut app, ctrl('w'));
        assert!(app.is_wallet_modal_open());
        assert!(!apply_event(&mut app, key(KeyCode::Esc)));
        assert!(!app.is_wallet_modal_open());
        assert!(apply_event(&mut app, key(KeyCode::Esc)));
    }

    #[test]
    fn modal_swallows_text_keys() {
        let mut app = App::new(None);
        apply_event(&mut app, ctrl('w'));
        apply_event(&mut app, key(KeyCode::Char('x')));
        apply_event(&mut app, key(KeyCode::Down));
        assert_eq!(app.modal_selected(), 1);
        assert!(app.form().narrative.text().is_empty());
    }

    #[test]
    fn paste_inserts_text() {
        let mut app = App::new(None);
        apply_event(&mut app, Event::Paste("hello\nworld".to_string()));
        assert_eq!(app.form().narrative.text(), "helloworld");
    }
}
