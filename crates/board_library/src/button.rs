use crate::host::{BitmapHandle, CursorHandle, Host, WidgetId};
use log::debug;

/// What a paint of the button revealed about the user's input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    /// up -> down since the previous paint
    Depressed,
    /// down -> up since the previous paint
    Released,
    Unchanged,
}

/// Host request to paint an owner-drawn widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaintRequest {
    pub widget: WidgetId,
    /// Whether the host currently shows the widget as pushed in
    pub pressed: bool,
}

/// Push button whose look is supplied by the board (up/down bitmaps).
///
/// Press semantics come from edge detection over the pressed flag seen on
/// consecutive paints; the button itself knows nothing about what a press
/// means.
#[derive(Debug, Clone)]
pub struct OwnerDrawnButton {
    widget: WidgetId,
    up: BitmapHandle,
    down: BitmapHandle,
    cursor: CursorHandle,
    pressed: bool,
}

impl OwnerDrawnButton {
    pub fn new(
        widget: WidgetId,
        up: BitmapHandle,
        down: BitmapHandle,
        cursor: CursorHandle,
    ) -> Self {
        Self {
            widget,
            up,
            down,
            cursor,
            pressed: false,
        }
    }

    pub fn widget(&self) -> WidgetId {
        self.widget
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Records the latest pressed flag and reports the edge, if any.
    pub fn transition(&mut self, pressed: bool) -> ButtonEvent {
        let event = match (self.pressed, pressed) {
            (false, true) => ButtonEvent::Depressed,
            (true, false) => ButtonEvent::Released,
            _ => ButtonEvent::Unchanged,
        };
        self.pressed = pressed;
        event
    }

    /// Handles one paint request: blits the matching bitmap, sets the
    /// hover cursor and returns the press/release edge.
    pub fn draw<H: Host + ?Sized>(&mut self, host: &H, paint: PaintRequest) -> ButtonEvent {
        debug_assert_eq!(paint.widget, self.widget, "paint for another widget");

        let bitmap = if paint.pressed { self.down } else { self.up };
        host.show_bitmap(self.widget, bitmap);
        host.set_cursor(self.widget, self.cursor);

        let event = self.transition(paint.pressed);
        if event != ButtonEvent::Unchanged {
            debug!("button {:?}: {event:?}", self.widget);
        }
        event
    }
}
