//! Board facade: the API the firmware programs against.
//!
//! One [`Board`] is shared (behind an `Arc`) by the host event thread and
//! the firmware thread. The paused flag is atomic; the graphic display and
//! both segment displays sit behind their own mutexes so a firmware draw
//! never interleaves with a redraw triggered by input.

use crate::color::{OFF_COLOR, ON_COLOR, Rgb};
use crate::error::BoardError;
use crate::font::Font;
use crate::host::{BitmapHandle, Host};
use crate::segments::SegmentDisplay;
use crate::surface::PixelSurface;
use log::{debug, info, trace, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

pub const SCREEN_WIDTH: usize = 96;
pub const SCREEN_HEIGHT: usize = 64;
/// Bytes of a packed 1bpp frame for [`Board::draw_bitmap`]
pub const BITMAP_LEN: usize = SCREEN_WIDTH * SCREEN_HEIGHT / 8;
pub const TICKS_PER_SEC: u32 = 33;
pub const SCORE_DIGITS: usize = 4;

const PAUSED_TEXT: &str = "PAUSED";
const RUNNING_TEXT: &str = "RUNNING";
const PAUSED_COLUMN: usize = 35;

/// Host widget ids of the board window.
pub mod widgets {
    use crate::host::WidgetId;

    pub const LCD: WidgetId = WidgetId(1000);
    pub const LED: WidgetId = WidgetId(1001);
    pub const SCORE: [WidgetId; super::SCORE_DIGITS] = [
        WidgetId(1002),
        WidgetId(1003),
        WidgetId(1004),
        WidgetId(1005),
    ];
    pub const USER_BUTTON: WidgetId = WidgetId(1006);
}

/// Bitmaps the host loaded for the segment displays.
#[derive(Debug, Clone, Copy)]
pub struct Resources {
    pub led_off: BitmapHandle,
    pub led_on: BitmapHandle,
    pub digits: [BitmapHandle; 10],
}

#[derive(Debug, Clone, Copy)]
pub struct BoardOptions {
    pub ticks_per_sec: u32,
    pub on_color: Rgb,
    pub off_color: Rgb,
}

impl Default for BoardOptions {
    fn default() -> Self {
        Self {
            ticks_per_sec: TICKS_PER_SEC,
            on_color: ON_COLOR,
            off_color: OFF_COLOR,
        }
    }
}

struct Display {
    surface: PixelSurface,
    font: Font,
}

pub struct Board<H: Host> {
    host: H,
    options: BoardOptions,
    initialized: AtomicBool,
    paused: AtomicBool,
    display: Mutex<Display>,
    led: Mutex<SegmentDisplay>,
    score: Mutex<SegmentDisplay>,
}

// A panicking firmware thread must not take the display down with it.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<H: Host> Board<H> {
    pub fn new(host: H, resources: &Resources, options: BoardOptions) -> Result<Self, BoardError> {
        // 1 "segment" (the LED itself), 2 bitmaps (off/on)
        let led = SegmentDisplay::builder(1, 2)
            .segment(0, widgets::LED)
            .bitmaps([resources.led_off, resources.led_on])
            .build()?;

        // one segment per digit, 10 bitmaps (0-9)
        let score = SegmentDisplay::builder(SCORE_DIGITS, resources.digits.len())
            .segments(widgets::SCORE)
            .bitmaps(resources.digits)
            .build()?;

        let surface = PixelSurface::new(SCREEN_WIDTH, SCREEN_HEIGHT, widgets::LCD, options.off_color);

        Ok(Self {
            host,
            options,
            initialized: AtomicBool::new(false),
            paused: AtomicBool::new(false),
            display: Mutex::new(Display {
                surface,
                font: Font::new(options.on_color),
            }),
            led: Mutex::new(led),
            score: Mutex::new(score),
        })
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Firmware-side setup hook; repeated calls are no-ops.
    pub fn init(&self) {
        if !self.initialized.swap(true, Ordering::SeqCst) {
            info!(
                "board up: {SCREEN_WIDTH}x{SCREEN_HEIGHT} display, {} ticks/s",
                self.options.ticks_per_sec
            );
        }
    }

    /// Asks the host loop to exit with `code` and returns.
    pub fn request_termination(&self, code: i32) {
        info!("termination requested ({code})");
        self.host.post_quit(code);
    }

    /// Asks the host loop to exit with `code`. The calling thread never
    /// resumes; it ends with the process.
    pub fn terminate(&self, code: i32) -> ! {
        self.request_termination(code);
        loop {
            thread::park();
        }
    }

    /// Wall-clock length of `ticks` board ticks (truncated to milliseconds).
    pub fn tick_duration(&self, ticks: u32) -> Duration {
        let ms = 1000 * u64::from(ticks) / u64::from(self.options.ticks_per_sec.max(1));
        Duration::from_millis(ms)
    }

    /// Blocks the calling thread for `ticks` board ticks. Firmware thread only.
    pub fn sleep(&self, ticks: u32) {
        let duration = self.tick_duration(ticks);
        trace!("sleep {ticks} ticks ({duration:?})");
        thread::sleep(duration);
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    /// Sets the paused flag and updates the overlay and status label.
    ///
    /// The flag change and its visual update happen under the display lock,
    /// so concurrent callers leave the label matching the flag.
    pub fn set_paused(&self, paused: bool) {
        let mut display = lock(&self.display);
        self.paused.store(paused, Ordering::SeqCst);
        self.show_paused(&mut display, paused);
    }

    /// Flips the paused flag and returns the new value.
    pub fn toggle_paused(&self) -> bool {
        let mut display = lock(&self.display);
        let paused = !self.paused.fetch_xor(true, Ordering::SeqCst);
        self.show_paused(&mut display, paused);
        paused
    }

    fn show_paused(&self, display: &mut Display, paused: bool) {
        debug!("{}", if paused { PAUSED_TEXT } else { RUNNING_TEXT });
        if paused {
            let Display { surface, font } = display;
            surface.clear();
            font.draw_str(surface, &self.host, PAUSED_COLUMN, 0, PAUSED_TEXT);
            self.host.set_status(PAUSED_TEXT);
        } else {
            // the firmware repaints the display on its own
            self.host.set_status(RUNNING_TEXT);
        }
    }

    /// Shows a packed 1bpp frame (see [`PixelSurface::load_packed`]).
    ///
    /// `bitmap` must hold at least [`BITMAP_LEN`] bytes.
    pub fn draw_bitmap(&self, bitmap: &[u8]) {
        if let Err(err) = self.try_draw_bitmap(bitmap) {
            debug_assert!(false, "{err}");
            warn!("draw_bitmap ignored: {err}");
        }
    }

    pub fn try_draw_bitmap(&self, bitmap: &[u8]) -> Result<(), BoardError> {
        let mut display = lock(&self.display);
        display.surface.load_packed(bitmap, self.options.on_color)?;
        display.surface.redraw(&self.host);
        Ok(())
    }

    /// Shows `n` on the scoreboard; only the low four digits fit.
    pub fn draw_count(&self, n: u32) {
        lock(&self.score).show_number(&self.host, n);
    }

    /// Draws printable ASCII at pixel column `x`, character row `row`.
    pub fn draw_string(&self, x: usize, row: usize, text: &str) {
        let mut guard = lock(&self.display);
        let Display { surface, font } = &mut *guard;
        font.draw_str(surface, &self.host, x, row, text);
    }

    pub fn set_led(&self, on: bool) {
        lock(&self.led).set_segment(&self.host, 0, usize::from(on));
    }

    pub fn led_state(&self) -> usize {
        lock(&self.led).state(0).unwrap_or_default()
    }

    pub fn score_states(&self) -> Vec<usize> {
        lock(&self.score).states()
    }

    /// Runs `f` with the graphic surface locked.
    pub fn with_surface<R>(&self, f: impl FnOnce(&PixelSurface) -> R) -> R {
        f(&lock(&self.display).surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::glyph;
    use crate::host::mock::{HostCall, RecordingHost};

    fn resources() -> Resources {
        Resources {
            led_off: BitmapHandle(1),
            led_on: BitmapHandle(2),
            digits: std::array::from_fn(|i| BitmapHandle(10 + i as u32)),
        }
    }

    fn board() -> Board<RecordingHost> {
        Board::new(RecordingHost::new(), &resources(), BoardOptions::default()).unwrap()
    }

    #[test]
    fn starts_running_with_blank_display() {
        let b = board();
        assert!(!b.is_paused());
        assert_eq!(b.led_state(), 0);
        assert_eq!(b.score_states(), [0, 0, 0, 0]);
        assert!(b.with_surface(|s| s.render().iter().all(|&c| c == OFF_COLOR)));
        assert!(b.host().calls().is_empty());
    }

    #[test]
    fn init_is_idempotent() {
        let b = board();
        b.init();
        b.init();
        assert!(b.host().calls().is_empty());
    }

    #[test]
    fn pausing_overlays_paused_text() {
        let b = board();
        b.draw_bitmap(&[0xff; BITMAP_LEN]);
        b.host().clear();

        b.set_paused(true);
        assert!(b.is_paused());
        assert_eq!(b.host().last_status().as_deref(), Some("PAUSED"));
        assert!(b.host().present_count() >= 1);

        b.with_surface(|s| {
            for (i, ch) in "PAUSED".chars().enumerate() {
                let g = glyph(ch).unwrap();
                for (dx, column) in g.iter().enumerate() {
                    for dy in 0..8 {
                        let x = 35 + i * 6 + dx;
                        assert_eq!(s.is_on(x, dy), column & (1u8 << dy) != 0);
                    }
                }
            }
            // everything outside the text was cleared
            assert!(!s.is_on(0, 0));
            assert!(!s.is_on(95, 63));
            assert!(!s.is_on(34, 0));
        });
    }

    #[test]
    fn resuming_leaves_display_alone() {
        let b = board();
        b.set_paused(true);
        let before = b.with_surface(|s| s.render());
        b.host().clear();

        b.set_paused(false);
        assert!(!b.is_paused());
        assert_eq!(b.host().calls(), [HostCall::Status("RUNNING".to_string())]);
        assert_eq!(b.with_surface(|s| s.render()), before);
    }

    #[test]
    fn toggle_flips_state() {
        let b = board();
        assert!(b.toggle_paused());
        assert!(b.is_paused());
        assert!(!b.toggle_paused());
        assert!(!b.is_paused());
    }

    #[test]
    fn draw_count_sets_score_digits() {
        let b = board();
        b.draw_count(1234);
        assert_eq!(b.score_states(), [4, 3, 2, 1]);
        b.draw_count(0);
        assert_eq!(b.score_states(), [0, 0, 0, 0]);
        b.draw_count(12345);
        assert_eq!(b.score_states(), [5, 4, 3, 2]);
        assert_eq!(
            b.host().calls().first(),
            Some(&HostCall::Bitmap(widgets::SCORE[0], BitmapHandle(14)))
        );
    }

    #[test]
    fn draw_bitmap_flushes_once() {
        let b = board();
        let mut bitmap = [0u8; BITMAP_LEN];
        bitmap[3] = 0x01;
        b.draw_bitmap(&bitmap);
        assert_eq!(b.host().present_count(), 1);
        assert!(b.with_surface(|s| s.is_on(3, 0) && s.color(3, 0) == ON_COLOR));
    }

    #[test]
    fn short_bitmap_is_an_error() {
        let b = board();
        assert_eq!(
            b.try_draw_bitmap(&[0u8; 4]),
            Err(BoardError::BitmapTooShort {
                expected: BITMAP_LEN,
                actual: 4
            })
        );
        assert_eq!(b.host().present_count(), 0);
    }

    #[test]
    fn led_follows_set_led() {
        let b = board();
        b.set_led(true);
        assert_eq!(b.led_state(), 1);
        b.set_led(false);
        assert_eq!(b.led_state(), 0);
        assert_eq!(
            b.host().calls(),
            [
                HostCall::Bitmap(widgets::LED, BitmapHandle(2)),
                HostCall::Bitmap(widgets::LED, BitmapHandle(1)),
            ]
        );
    }

    #[test]
    fn ticks_convert_at_board_rate() {
        let b = board();
        assert_eq!(b.tick_duration(33), Duration::from_secs(1));
        assert_eq!(b.tick_duration(1), Duration::from_millis(30));
        assert_eq!(b.tick_duration(0), Duration::ZERO);
    }

    #[test]
    fn request_termination_posts_quit() {
        let b = board();
        b.request_termination(3);
        assert_eq!(b.host().calls(), [HostCall::Quit(3)]);
    }
}
