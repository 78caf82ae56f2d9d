//! The seam between the board model and whatever window system shows it.
//!
//! The board never creates windows or loads resources itself. It only
//! refers to host objects through the opaque handles below and pushes
//! visual updates through [`Host`].

use crate::color::Rgb;

/// Identifier of a host widget (a child control of the board window).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(pub u32);

/// Handle of a bitmap the host has already loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitmapHandle(pub u32);

/// Handle of a host mouse cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CursorHandle(pub u32);

/// Output primitives of the host window.
///
/// Called both from the event-dispatch thread and from the firmware
/// thread, hence `Send + Sync` and `&self` receivers.
pub trait Host: Send + Sync {
    /// Paint a full `width` x `height` frame (row-major) into `target`.
    fn present_surface(&self, target: WidgetId, width: usize, height: usize, pixels: &[Rgb]);

    /// Make `target` show `bitmap`, repainting just that widget.
    fn show_bitmap(&self, target: WidgetId, bitmap: BitmapHandle);

    /// Cursor shown while the pointer hovers over `target`.
    fn set_cursor(&self, target: WidgetId, cursor: CursorHandle);

    /// Text of the RUNNING/PAUSED status label.
    fn set_status(&self, text: &str);

    /// Give keyboard focus back to the board window.
    fn focus_main(&self);

    /// Ask the host event loop to stop with `code`.
    fn post_quit(&self, code: i32);
}
