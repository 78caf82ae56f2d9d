//! Board simulation layer.
//!
//! Lets firmware written against a small embedded board (a 96x64
//! monochrome OLED, a user LED, a 4-digit scoreboard and a push button)
//! run on a desktop. The board model lives here; the window that shows it
//! is supplied by the caller through [`host::Host`].

pub mod board;
pub mod button;
pub mod color;
pub mod error;
pub mod font;
pub mod host;
pub mod input;
pub mod segments;
pub mod surface;

pub use board::{Board, BoardOptions, Resources};
pub use error::BoardError;
pub use host::{BitmapHandle, CursorHandle, Host, WidgetId};
pub use input::{Dispatch, HostEvent, InputRouter};
