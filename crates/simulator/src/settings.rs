use board_library::BoardOptions;
use board_library::board::TICKS_PER_SEC;
use board_library::color::{OFF_COLOR, ON_COLOR};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
#[serde(default)]
pub(crate) struct Settings {
    /// Caption printed above the simulated board.
    pub title: String,
    /// Board ticks per second; `sleep(ticks)` converts with this rate.
    pub ticks_per_sec: u32,
    /// RGB of a lit OLED pixel.
    pub on_color: [u8; 3],
    /// RGB of a dark OLED pixel.
    pub off_color: [u8; 3],
    /// Flash LED, scoreboard and display once before the firmware starts.
    pub self_test: bool,
    /// Frames the demo firmware runs before terminating; 0 runs forever.
    pub demo_frames: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: "QWIN GUI demo".to_string(),
            ticks_per_sec: TICKS_PER_SEC,
            on_color: [ON_COLOR.r, ON_COLOR.g, ON_COLOR.b],
            off_color: [OFF_COLOR.r, OFF_COLOR.g, OFF_COLOR.b],
            self_test: true,
            demo_frames: 0,
        }
    }
}

impl Settings {
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Title must not be empty".to_string());
        }

        if self.ticks_per_sec == 0 {
            return Err("ticks_per_sec must be at least 1".to_string());
        }

        if self.ticks_per_sec > 1000 {
            return Err(format!(
                "ticks_per_sec={} is finer than the 1 ms sleep resolution",
                self.ticks_per_sec
            ));
        }

        if self.on_color == self.off_color {
            return Err("on_color and off_color must differ".to_string());
        }

        Ok(())
    }

    pub(crate) fn board_options(&self) -> BoardOptions {
        BoardOptions {
            ticks_per_sec: self.ticks_per_sec,
            on_color: self.on_color.into(),
            off_color: self.off_color.into(),
        }
    }
}
