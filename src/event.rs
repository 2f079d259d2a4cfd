use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

use crate::session::input::KeyInput;

pub enum AppEvent {
    Key(KeyEvent),
    Paste(String),
    Tick,
    Resize(u16, u16),
}

pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
    _tx: mpsc::Sender<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let _tx = tx.clone();

        thread::spawn(move || {
            loop {
                let next = if event::poll(tick_rate).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key)) => Some(AppEvent::Key(key)),
                        Ok(Event::Paste(text)) => Some(AppEvent::Paste(text)),
                        Ok(Event::Resize(w, h)) => Some(AppEvent::Resize(w, h)),
                        Ok(_) => None,
                        Err(e) => {
                            log::error!("terminal event read failed: {e}");
                            None
                        }
                    }
                } else {
                    Some(AppEvent::Tick)
                };
                if let Some(app_event) = next {
                    if tx.send(app_event).is_err() {
                        return;
                    }
                }
            }
        });

        Self { rx, _tx }
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        Ok(self.rx.recv()?)
    }
}

/// Typed text minus the last word and any whitespace after it.
pub fn delete_word(typed: &[char]) -> Vec<char> {
    let mut end = typed.len();
    while end > 0 && typed[end - 1].is_whitespace() {
        end -= 1;
    }
    while end > 0 && !typed[end - 1].is_whitespace() {
        end -= 1;
    }
    typed[..end].to_vec()
}

fn appended(typed: &[char], extra: impl IntoIterator<Item = char>) -> Vec<char> {
    let mut next = typed.to_vec();
    next.extend(extra);
    next
}

/// Maps a terminal key press onto a typing input. Keys with no typing meaning
/// return `None` and are left to the screen handlers.
pub fn translate_key(key: &KeyEvent, typed: &[char]) -> Option<KeyInput> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    match key.code {
        KeyCode::Enter if ctrl => Some(KeyInput::Restart),
        KeyCode::Char('r') if ctrl => Some(KeyInput::Restart),
        KeyCode::Enter => Some(KeyInput::Enter),
        KeyCode::Tab => Some(KeyInput::Tab),
        KeyCode::Backspace if ctrl || alt => Some(KeyInput::Replace(delete_word(typed))),
        // Many terminals send Ctrl+Backspace as Ctrl+H.
        KeyCode::Char('w') | KeyCode::Char('h') if ctrl => {
            Some(KeyInput::Replace(delete_word(typed)))
        }
        KeyCode::Backspace => {
            let mut next = typed.to_vec();
            next.pop();
            Some(KeyInput::Replace(next))
        }
        KeyCode::Char(_) if ctrl || alt => None,
        KeyCode::Char(ch) => Some(KeyInput::Replace(appended(typed, [ch]))),
        _ => None,
    }
}

/// Pasted text is appended as typed, with carriage returns removed.
pub fn translate_paste(text: &str, typed: &[char]) -> KeyInput {
    KeyInput::Replace(appended(typed, text.chars().filter(|&c| c != '\r')))
}
