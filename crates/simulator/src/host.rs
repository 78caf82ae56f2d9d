//! Terminal stand-in for the board window.
//!
//! The OLED is drawn with 24-bit ANSI colors, two pixel rows per text row
//! (upper half block). LED, scoreboard, user button and the status label
//! share one line underneath.

use board_library::board::widgets;
use board_library::button::OwnerDrawnButton;
use board_library::color::Rgb;
use board_library::{BitmapHandle, CursorHandle, Host, HostEvent, Resources, WidgetId};
use log::{trace, warn};
use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::sync::mpsc::Sender;

// "Resource" ids of the terminal host
const LED_OFF: BitmapHandle = BitmapHandle(1);
const LED_ON: BitmapHandle = BitmapHandle(2);
const BTN_UP: BitmapHandle = BitmapHandle(3);
const BTN_DOWN: BitmapHandle = BitmapHandle(4);
const DIGIT_BASE: u32 = 10;
const HAND: CursorHandle = CursorHandle(1);

pub(crate) fn resources() -> Resources {
    Resources {
        led_off: LED_OFF,
        led_on: LED_ON,
        digits: std::array::from_fn(|i| BitmapHandle(DIGIT_BASE + i as u32)),
    }
}

pub(crate) fn user_button() -> OwnerDrawnButton {
    OwnerDrawnButton::new(widgets::USER_BUTTON, BTN_UP, BTN_DOWN, HAND)
}

struct Panel {
    frame: Vec<Rgb>,
    width: usize,
    height: usize,
    led: bool,
    digits: [u8; widgets::SCORE.len()],
    button_down: bool,
    status: String,
}

struct Screen<W> {
    panel: Panel,
    out: W,
}

/// Renders the board window to `W` (stdout by default). Each update
/// rewrites the whole panel while holding the screen lock, so writes
/// reach the terminal in the order the updates happened.
pub(crate) struct TerminalHost<W: Write + Send = io::Stdout> {
    title: String,
    events: Sender<HostEvent>,
    screen: Mutex<Screen<W>>,
}

impl TerminalHost {
    pub(crate) fn new(title: String, events: Sender<HostEvent>) -> Self {
        Self::with_output(title, events, io::stdout())
    }
}

impl<W: Write + Send> TerminalHost<W> {
    pub(crate) fn with_output(title: String, events: Sender<HostEvent>, out: W) -> Self {
        Self {
            title,
            events,
            screen: Mutex::new(Screen {
                panel: Panel {
                    frame: Vec::new(),
                    width: 0,
                    height: 0,
                    led: false,
                    digits: [0; widgets::SCORE.len()],
                    button_down: false,
                    status: String::new(),
                },
                out,
            }),
        }
    }

    fn screen(&self) -> MutexGuard<'_, Screen<W>> {
        self.screen.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn clear_screen(&self) {
        let mut screen = self.screen();
        if let Err(e) = write_flush(&mut screen.out, b"\x1b[2J") {
            warn!("terminal write failed: {e}");
        }
    }

    fn update(&self, f: impl FnOnce(&mut Panel)) {
        let mut screen = self.screen();
        f(&mut screen.panel);
        let text = render_panel(&self.title, &screen.panel);
        if let Err(e) = write_flush(&mut screen.out, text.as_bytes()) {
            warn!("terminal write failed: {e}");
        }
    }
}

fn write_flush(out: &mut impl Write, bytes: &[u8]) -> io::Result<()> {
    out.write_all(bytes)?;
    out.flush()
}

impl<W: Write + Send> Host for TerminalHost<W> {
    fn present_surface(&self, _target: WidgetId, width: usize, height: usize, pixels: &[Rgb]) {
        self.update(|panel| {
            panel.frame.clear();
            panel.frame.extend_from_slice(pixels);
            panel.width = width;
            panel.height = height;
        });
    }

    fn show_bitmap(&self, target: WidgetId, bitmap: BitmapHandle) {
        self.update(|panel| {
            if target == widgets::LED {
                panel.led = bitmap == LED_ON;
            } else if target == widgets::USER_BUTTON {
                panel.button_down = bitmap == BTN_DOWN;
            } else if let Some(i) = widgets::SCORE.iter().position(|&w| w == target) {
                panel.digits[i] = bitmap.0.saturating_sub(DIGIT_BASE) as u8;
            } else {
                warn!("bitmap {bitmap:?} for unknown widget {target:?}");
            }
        });
    }

    fn set_cursor(&self, target: WidgetId, cursor: CursorHandle) {
        trace!("cursor {cursor:?} over {target:?}");
    }

    fn set_status(&self, text: &str) {
        self.update(|panel| panel.status = text.to_string());
    }

    fn focus_main(&self) {
        trace!("focus back to board window");
    }

    fn post_quit(&self, code: i32) {
        if self.events.send(HostEvent::Quit(code)).is_err() {
            warn!("event loop already gone, quit({code}) dropped");
        }
    }
}

/// Renders a row-major frame as half-block rows.
pub(crate) fn render_frame(frame: &[Rgb], width: usize, height: usize) -> String {
    let mut out = String::new();
    for y in (0..height).step_by(2) {
        for x in 0..width {
            let top = frame[y * width + x];
            let bottom = if y + 1 < height {
                frame[(y + 1) * width + x]
            } else {
                Rgb::default()
            };
            let _ = write!(
                out,
                "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m\u{2580}",
                top.r, top.g, top.b, bottom.r, bottom.g, bottom.b
            );
        }
        out.push_str("\x1b[0m\n");
    }
    out
}

fn render_panel(title: &str, panel: &Panel) -> String {
    let mut out = String::from("\x1b[H");
    let _ = writeln!(out, "{title}\x1b[K");
    out.push_str(&render_frame(&panel.frame, panel.width, panel.height));

    let score: String = panel
        .digits
        .iter()
        .rev()
        .map(|&d| char::from(b'0' + d.min(9)))
        .collect();
    let _ = writeln!(
        out,
        "LED {}  SCORE {}  USER {}  {}\x1b[K",
        if panel.led { "(*)" } else { "( )" },
        score,
        if panel.button_down { "[v]" } else { "[^]" },
        panel.status
    );
    out
}
