//! Host input -> board state.
//!
//! | event                  | effect                               |
//! |------------------------|--------------------------------------|
//! | wheel forward          | pause                                |
//! | wheel backward         | resume                               |
//! | SPACE                  | toggle pause                         |
//! | user button pressed    | pause, LED on                        |
//! | user button released   | resume, LED off                      |
//! | OK / Cancel / destroy  | post quit (0)                        |
//! | quit message           | stop the event loop                  |

use crate::board::{Board, widgets};
use crate::button::{ButtonEvent, OwnerDrawnButton, PaintRequest};
use crate::host::Host;
use log::{debug, info};
use num_derive::FromPrimitive;
use std::sync::Arc;

/// Virtual key codes the board reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum KeyCode {
    Space = 0x20,
}

/// Command ids delivered by the host (dialog buttons and child controls).
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum Command {
    Ok = 1,
    Cancel = 2,
    /// click notification of the user button (same id as the widget)
    User = 1006,
}

/// Raw events coming out of the host window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// Wheel rotation; only the sign matters (>= 0 is forward)
    Wheel { delta: i16 },
    KeyDown(u32),
    Command(u32),
    Paint(PaintRequest),
    /// The board window is being destroyed
    Destroy,
    /// Quit message picked up by the event loop
    Quit(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Continue,
    Quit(i32),
}

/// Event-thread side of the board: owns the user button and feeds
/// decoded input into the shared [`Board`].
pub struct InputRouter<H: Host> {
    board: Arc<Board<H>>,
    button: OwnerDrawnButton,
}

impl<H: Host> InputRouter<H> {
    pub fn new(board: Arc<Board<H>>, button: OwnerDrawnButton) -> Self {
        debug_assert_eq!(button.widget(), widgets::USER_BUTTON);
        Self { board, button }
    }

    pub fn board(&self) -> &Arc<Board<H>> {
        &self.board
    }

    pub fn button(&self) -> &OwnerDrawnButton {
        &self.button
    }

    pub fn dispatch(&mut self, event: HostEvent) -> Dispatch {
        match event {
            HostEvent::Wheel { delta } => {
                self.board.set_paused(delta >= 0);
            }
            HostEvent::KeyDown(code) => {
                let key: Option<KeyCode> = num::FromPrimitive::from_u32(code);
                if key == Some(KeyCode::Space) {
                    self.board.toggle_paused();
                }
            }
            HostEvent::Command(id) => {
                let command: Option<Command> = num::FromPrimitive::from_u32(id);
                match command {
                    Some(Command::Ok | Command::Cancel) => {
                        self.board.host().post_quit(0);
                    }
                    Some(Command::User) => {
                        // keep keyboard input (SPACE) going to the board window
                        self.board.host().focus_main();
                    }
                    None => debug!("unhandled command {id}"),
                }
            }
            HostEvent::Paint(paint) if paint.widget == self.button.widget() => {
                match self.button.draw(self.board.host(), paint) {
                    ButtonEvent::Depressed => {
                        self.board.set_paused(true);
                        self.board.set_led(true);
                    }
                    ButtonEvent::Released => {
                        self.board.set_paused(false);
                        self.board.set_led(false);
                    }
                    ButtonEvent::Unchanged => {}
                }
            }
            HostEvent::Paint(_) => {}
            HostEvent::Destroy => {
                self.board.host().post_quit(0);
            }
            HostEvent::Quit(code) => {
                info!("event loop quitting ({code})");
                return Dispatch::Quit(code);
            }
        }
        Dispatch::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardOptions, Resources};
    use crate::host::mock::{HostCall, RecordingHost};
    use crate::host::{BitmapHandle, CursorHandle, WidgetId};

    fn router() -> InputRouter<RecordingHost> {
        let resources = Resources {
            led_off: BitmapHandle(1),
            led_on: BitmapHandle(2),
            digits: std::array::from_fn(|i| BitmapHandle(10 + i as u32)),
        };
        let board =
            Board::new(RecordingHost::new(), &resources, BoardOptions::default()).unwrap();
        let button = OwnerDrawnButton::new(
            widgets::USER_BUTTON,
            BitmapHandle(30),
            BitmapHandle(31),
            CursorHandle(1),
        );
        InputRouter::new(Arc::new(board), button)
    }

    fn paint(pressed: bool) -> HostEvent {
        HostEvent::Paint(PaintRequest {
            widget: widgets::USER_BUTTON,
            pressed,
        })
    }

    #[test]
    fn user_command_id_matches_button_widget() {
        assert_eq!(Command::User as u32, widgets::USER_BUTTON.0);
    }

    #[test]
    fn space_toggles() {
        let mut r = router();
        r.dispatch(HostEvent::KeyDown(0x20));
        assert!(r.board().is_paused());
        r.dispatch(HostEvent::KeyDown(0x20));
        assert!(!r.board().is_paused());
    }

    #[test]
    fn other_keys_are_ignored() {
        let mut r = router();
        assert_eq!(r.dispatch(HostEvent::KeyDown(0x41)), Dispatch::Continue);
        assert!(!r.board().is_paused());
        assert!(r.board().host().calls().is_empty());
    }

    #[test]
    fn wheel_sets_state_regardless_of_current() {
        let mut r = router();
        for start in [false, true] {
            r.board().set_paused(start);
            r.dispatch(HostEvent::Wheel { delta: 120 });
            assert!(r.board().is_paused());
            r.dispatch(HostEvent::Wheel { delta: 120 });
            assert!(r.board().is_paused());
        }
        for start in [false, true] {
            r.board().set_paused(start);
            r.dispatch(HostEvent::Wheel { delta: -120 });
            assert!(!r.board().is_paused());
        }
    }

    #[test]
    fn button_press_and_release_drive_pause_and_led() {
        let mut r = router();

        r.dispatch(paint(false));
        assert!(!r.board().is_paused());
        assert_eq!(r.board().led_state(), 0);

        r.dispatch(paint(true));
        assert!(r.board().is_paused());
        assert_eq!(r.board().led_state(), 1);

        // repaint while held down changes nothing
        r.dispatch(paint(true));
        assert!(r.board().is_paused());
        assert_eq!(r.board().led_state(), 1);

        r.dispatch(paint(false));
        assert!(!r.board().is_paused());
        assert_eq!(r.board().led_state(), 0);
    }

    #[test]
    fn paint_for_other_widgets_is_ignored() {
        let mut r = router();
        r.dispatch(HostEvent::Paint(PaintRequest {
            widget: WidgetId(1),
            pressed: true,
        }));
        assert!(!r.button().is_pressed());
        assert!(r.board().host().calls().is_empty());
    }

    #[test]
    fn close_commands_post_quit() {
        for event in [
            HostEvent::Command(Command::Ok as u32),
            HostEvent::Command(Command::Cancel as u32),
            HostEvent::Destroy,
        ] {
            let mut r = router();
            assert_eq!(r.dispatch(event), Dispatch::Continue);
            assert_eq!(r.board().host().calls(), [HostCall::Quit(0)]);
        }
    }

    #[test]
    fn user_command_returns_focus() {
        let mut r = router();
        r.dispatch(HostEvent::Command(Command::User as u32));
        assert_eq!(r.board().host().calls(), [HostCall::Focus]);
    }

    #[test]
    fn quit_message_stops_the_loop() {
        let mut r = router();
        assert_eq!(r.dispatch(HostEvent::Quit(7)), Dispatch::Quit(7));
    }
}
