//! Line-based input source standing in for mouse and keyboard.

use board_library::HostEvent;
use board_library::board::widgets;
use board_library::button::PaintRequest;
use board_library::input::{Command, KeyCode};
use log::{debug, warn};
use std::io::{self, BufRead};
use std::sync::mpsc::Sender;
use std::thread;

// One wheel notch as reported by most hosts
const WHEEL_DELTA: i16 = 120;

pub(crate) const HELP: &str =
    "commands: <enter>|space, up, down, press, release, click, ok, cancel, quit";

pub(crate) fn parse_command(line: &str) -> Option<HostEvent> {
    let line = line.trim().to_ascii_lowercase();
    let event = match line.as_str() {
        "" | "space" => HostEvent::KeyDown(KeyCode::Space as u32),
        "up" | "wheel up" => HostEvent::Wheel { delta: WHEEL_DELTA },
        "down" | "wheel down" => HostEvent::Wheel { delta: -WHEEL_DELTA },
        "press" => HostEvent::Paint(PaintRequest {
            widget: widgets::USER_BUTTON,
            pressed: true,
        }),
        "release" => HostEvent::Paint(PaintRequest {
            widget: widgets::USER_BUTTON,
            pressed: false,
        }),
        "click" => HostEvent::Command(Command::User as u32),
        "ok" => HostEvent::Command(Command::Ok as u32),
        "cancel" => HostEvent::Command(Command::Cancel as u32),
        "quit" | "close" => HostEvent::Destroy,
        _ => return None,
    };
    Some(event)
}

/// Reads commands from stdin until EOF, which closes the window.
pub(crate) fn spawn_stdin_reader(events: Sender<HostEvent>) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("stdin".to_string())
        .spawn(move || forward_commands(io::stdin().lock(), &events))
}

fn forward_commands(input: impl BufRead, events: &Sender<HostEvent>) {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("stdin read failed: {e}");
                break;
            }
        };
        match parse_command(&line) {
            Some(event) => {
                debug!("input {line:?} -> {event:?}");
                if events.send(event).is_err() {
                    return;
                }
            }
            None => warn!("unknown command {line:?} ({HELP})"),
        }
    }
    if events.send(HostEvent::Destroy).is_err() {
        debug!("event loop already gone, close on EOF dropped");
    }
}
