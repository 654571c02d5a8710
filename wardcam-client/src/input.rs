use crate::stream_worker::StreamCommand;
use crate::worker;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use std::sync::mpsc::Sender;
use std::thread;
use wardcam_core::command::PtzAction;

pub enum SessionCommand {
    Ptz(worker::Command),
    Stream(StreamCommand),
    Quit,
}

pub fn spawn_input_loop(tx: Sender<SessionCommand>) {
    thread::spawn(move || input_loop(tx));
}

fn input_loop(tx: Sender<SessionCommand>) {
    let _raw_mode = RawModeGuard::new();
    loop {
        match event::read() {
            Ok(Event::Key(key)) => {
                if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    continue;
                }
                let command = match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        Some(SessionCommand::Quit)
                    }
                    KeyCode::Left => ptz(worker::Command::Move(PtzAction::Left)),
                    KeyCode::Right => ptz(worker::Command::Move(PtzAction::Right)),
                    KeyCode::Up => ptz(worker::Command::Move(PtzAction::Up)),
                    KeyCode::Down => ptz(worker::Command::Move(PtzAction::Down)),
                    KeyCode::Char(']') => ptz(worker::Command::Move(PtzAction::ZoomIn)),
                    KeyCode::Char('[') => ptz(worker::Command::Move(PtzAction::ZoomOut)),
                    KeyCode::Char('p') => ptz(worker::Command::CyclePrecision),
                    KeyCode::Char('l') => ptz(worker::Command::RefreshPresets),
                    KeyCode::Char('u') => ptz(worker::Command::UpdateCurrentPreset),
                    KeyCode::Char('.') => ptz(worker::Command::Poll),
                    KeyCode::Char(digit @ '1'..='9') => {
                        let slot = digit as usize - '1' as usize;
                        ptz(worker::Command::GotoPreset(slot))
                    }
                    KeyCode::Char('r') => Some(SessionCommand::Stream(StreamCommand::Reset)),
                    KeyCode::Char('s') => Some(SessionCommand::Stream(StreamCommand::Stop)),
                    KeyCode::Char('q') | KeyCode::Esc => Some(SessionCommand::Quit),
                    _ => None,
                };
                if let Some(command) = command {
                    let quit = matches!(command, SessionCommand::Quit);
                    let _ = tx.send(command);
                    if quit {
                        break;
                    }
                }
            }
            Err(_) => break,
            _ => {}
        }
    }
}

fn ptz(command: worker::Command) -> Option<SessionCommand> {
    Some(SessionCommand::Ptz(command))
}

struct RawModeGuard;

impl RawModeGuard {
    fn new() -> Self {
        let _ = terminal::enable_raw_mode();
        Self
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}
