//! Demo firmware: a bouncing ball over scrolling terrain, a frame counter
//! on the scoreboard. Stands in for the real board application and uses
//! nothing but the board API.

use board_library::board::{BITMAP_LEN, SCREEN_HEIGHT, SCREEN_WIDTH};
use board_library::{Board, Host};
use log::info;

const FRAMES_PER_POINT: u32 = 10;
const TERRAIN_PERIOD: usize = 32;

fn plot(bitmap: &mut [u8; BITMAP_LEN], x: usize, y: usize) {
    bitmap[x + (y / 8) * SCREEN_WIDTH] |= 1u8 << (y % 8);
}

pub(crate) fn render_scene(bitmap: &mut [u8; BITMAP_LEN], frame: u32) {
    bitmap.fill(0);
    let frame = frame as usize;

    // terrain: triangle wave, 4..12 pixels tall
    for x in 0..SCREEN_WIDTH {
        let phase = (x + frame) % TERRAIN_PERIOD;
        let rise = phase.min(TERRAIN_PERIOD - phase);
        let top = SCREEN_HEIGHT - 4 - rise / 2;
        for y in top..SCREEN_HEIGHT {
            plot(bitmap, x, y);
        }
    }

    // ball: 3x3, parabolic hop, rows 8..=47 (row band 0 is left for text)
    let bx = 20 + frame % 56;
    let t = (frame % 24) as isize - 12;
    let by = 8 + (t * t / 4) as usize;
    for dy in 0..3 {
        for dx in 0..3 {
            plot(bitmap, bx + dx, by + dy);
        }
    }
}

/// Runs until `frames` frames were shown (0 = forever), then terminates
/// the board with result 0.
pub(crate) fn run<H: Host>(board: &Board<H>, frames: u32) {
    board.init();
    info!("demo firmware started");

    let mut bitmap = [0u8; BITMAP_LEN];
    let mut frame = 0u32;
    while frames == 0 || frame < frames {
        if !board.is_paused() {
            render_scene(&mut bitmap, frame);
            board.draw_bitmap(&bitmap);
            board.draw_string(0, 0, "QWIN DEMO");
            board.draw_count(frame / FRAMES_PER_POINT);
            frame = frame.wrapping_add(1);
        }
        board.sleep(1);
    }

    info!("demo firmware done after {frame} frames");
    board.terminate(0);
}
