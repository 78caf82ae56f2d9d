//! Multi-segment displays: a row of host widgets, each showing one bitmap
//! out of a palette shared by all segments.
//!
//! Used for the user LED (1 segment, off/on) and the 4-digit scoreboard
//! (4 segments, digits 0-9).

use crate::error::BoardError;
use crate::host::{BitmapHandle, Host, WidgetId};
use log::warn;

#[derive(Debug, Clone, Copy)]
struct Segment {
    widget: WidgetId,
    state: usize,
}

/// A fully bound segment display.
///
/// Only obtainable through [`SegmentDisplayBuilder::build`], so every
/// segment has a widget and every state has a bitmap.
#[derive(Debug, Clone)]
pub struct SegmentDisplay {
    segments: Vec<Segment>,
    bitmaps: Vec<BitmapHandle>,
}

impl SegmentDisplay {
    pub fn builder(segment_count: usize, bitmap_count: usize) -> SegmentDisplayBuilder {
        SegmentDisplayBuilder {
            segments: vec![None; segment_count],
            bitmaps: vec![None; bitmap_count],
            error: None,
        }
    }

    pub fn state(&self, index: usize) -> Option<usize> {
        self.segments.get(index).map(|s| s.state)
    }

    pub fn states(&self) -> Vec<usize> {
        self.segments.iter().map(|s| s.state).collect()
    }

    /// Switches segment `index` to bitmap `state` and repaints that widget
    /// right away.
    ///
    /// `index` must name a bound segment and `state` a bound bitmap.
    pub fn set_segment<H: Host + ?Sized>(&mut self, host: &H, index: usize, state: usize) {
        let in_range = index < self.segments.len() && state < self.bitmaps.len();
        debug_assert!(
            in_range,
            "segment {index} / state {state} outside {}x{} display",
            self.segments.len(),
            self.bitmaps.len()
        );
        if !in_range {
            warn!("ignoring segment {index} <- state {state}");
            return;
        }

        let segment = &mut self.segments[index];
        segment.state = state;
        host.show_bitmap(segment.widget, self.bitmaps[state]);
    }

    /// Shows `n` in decimal, segment 0 holding the ones digit.
    ///
    /// Only one digit per segment fits; higher digits are dropped, so on
    /// a 4-digit board 12345 reads as 2345.
    pub fn show_number<H: Host + ?Sized>(&mut self, host: &H, n: u32) {
        for (index, digit) in decimal_digits(n, self.segments.len()).enumerate() {
            self.set_segment(host, index, digit);
        }
    }
}

/// The `count` lowest decimal digits of `n`, least significant first.
pub fn decimal_digits(n: u32, count: usize) -> impl Iterator<Item = usize> {
    (0..count).scan(n, |rest, _| {
        let digit = (*rest % 10) as usize;
        *rest /= 10;
        Some(digit)
    })
}

/// Collects widget and bitmap bindings for a [`SegmentDisplay`].
#[derive(Debug, Clone)]
pub struct SegmentDisplayBuilder {
    segments: Vec<Option<WidgetId>>,
    bitmaps: Vec<Option<BitmapHandle>>,
    error: Option<BoardError>,
}

impl SegmentDisplayBuilder {
    pub fn segment(mut self, index: usize, widget: WidgetId) -> Self {
        let count = self.segments.len();
        match self.segments.get_mut(index) {
            Some(slot) => *slot = Some(widget),
            None => {
                self.error
                    .get_or_insert(BoardError::SegmentIndexOutOfRange { index, count });
            }
        }
        self
    }

    pub fn bitmap(mut self, index: usize, bitmap: BitmapHandle) -> Self {
        let count = self.bitmaps.len();
        match self.bitmaps.get_mut(index) {
            Some(slot) => *slot = Some(bitmap),
            None => {
                self.error
                    .get_or_insert(BoardError::BitmapIndexOutOfRange { index, count });
            }
        }
        self
    }

    /// Binds segments `0..` to `widgets` in order.
    pub fn segments(self, widgets: impl IntoIterator<Item = WidgetId>) -> Self {
        widgets
            .into_iter()
            .enumerate()
            .fold(self, |b, (index, widget)| b.segment(index, widget))
    }

    /// Binds bitmaps `0..` to `bitmaps` in order.
    pub fn bitmaps(self, bitmaps: impl IntoIterator<Item = BitmapHandle>) -> Self {
        bitmaps
            .into_iter()
            .enumerate()
            .fold(self, |b, (index, bitmap)| b.bitmap(index, bitmap))
    }

    /// Fails on the first bad index, then on the first unbound slot.
    pub fn build(self) -> Result<SegmentDisplay, BoardError> {
        if let Some(err) = self.error {
            return Err(err);
        }

        let segments = self
            .segments
            .into_iter()
            .enumerate()
            .map(|(index, widget)| {
                widget
                    .map(|widget| Segment { widget, state: 0 })
                    .ok_or(BoardError::UnboundSegment(index))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let bitmaps = self
            .bitmaps
            .into_iter()
            .enumerate()
            .map(|(index, bitmap)| bitmap.ok_or(BoardError::UnboundBitmap(index)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SegmentDisplay { segments, bitmaps })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::mock::{HostCall, RecordingHost};

    fn widgets(n: u32) -> impl Iterator<Item = WidgetId> {
        (0..n).map(|i| WidgetId(100 + i))
    }

    fn digits() -> impl Iterator<Item = BitmapHandle> {
        (0..10).map(|i| BitmapHandle(200 + i))
    }

    fn scoreboard() -> SegmentDisplay {
        SegmentDisplay::builder(4, 10)
            .segments(widgets(4))
            .bitmaps(digits())
            .build()
            .unwrap()
    }

    #[test]
    fn digits_are_least_significant_first() {
        assert_eq!(decimal_digits(1234, 4).collect::<Vec<_>>(), [4, 3, 2, 1]);
        assert_eq!(decimal_digits(0, 4).collect::<Vec<_>>(), [0, 0, 0, 0]);
        assert_eq!(decimal_digits(7, 2).collect::<Vec<_>>(), [7, 0]);
    }

    #[test]
    fn numbers_past_four_digits_keep_low_digits() {
        assert_eq!(
            decimal_digits(12345, 4).collect::<Vec<_>>(),
            decimal_digits(2345, 4).collect::<Vec<_>>()
        );
        assert_eq!(
            decimal_digits(u32::MAX, 4).collect::<Vec<_>>(),
            [5, 9, 2, 7]
        );
    }

    #[test]
    fn new_display_starts_in_state_zero() {
        assert_eq!(scoreboard().states(), [0, 0, 0, 0]);
    }

    #[test]
    fn set_segment_repaints_only_that_widget() {
        let host = RecordingHost::new();
        let mut display = scoreboard();
        display.set_segment(&host, 2, 7);
        assert_eq!(display.states(), [0, 0, 7, 0]);
        assert_eq!(
            host.calls(),
            [HostCall::Bitmap(WidgetId(102), BitmapHandle(207))]
        );
    }

    #[test]
    fn show_number_updates_every_segment() {
        let host = RecordingHost::new();
        let mut display = scoreboard();
        display.show_number(&host, 1234);
        assert_eq!(display.states(), [4, 3, 2, 1]);
        assert_eq!(host.calls().len(), 4);

        display.show_number(&host, 12345);
        assert_eq!(display.states(), [5, 4, 3, 2]);
    }

    #[test]
    fn build_requires_every_segment() {
        let err = SegmentDisplay::builder(4, 10)
            .segment(0, WidgetId(1))
            .segment(1, WidgetId(2))
            .segment(3, WidgetId(4))
            .bitmaps(digits())
            .build()
            .unwrap_err();
        assert_eq!(err, BoardError::UnboundSegment(2));
    }

    #[test]
    fn build_requires_every_bitmap() {
        let err = SegmentDisplay::builder(1, 2)
            .segment(0, WidgetId(1))
            .bitmap(0, BitmapHandle(1))
            .build()
            .unwrap_err();
        assert_eq!(err, BoardError::UnboundBitmap(1));
    }

    #[test]
    fn out_of_range_binding_fails_the_build() {
        let err = SegmentDisplay::builder(1, 2)
            .segment(1, WidgetId(1))
            .bitmaps([BitmapHandle(1), BitmapHandle(2)])
            .build()
            .unwrap_err();
        assert_eq!(err, BoardError::SegmentIndexOutOfRange { index: 1, count: 1 });

        let err = SegmentDisplay::builder(1, 2)
            .segment(0, WidgetId(1))
            .bitmaps([BitmapHandle(1), BitmapHandle(2), BitmapHandle(3)])
            .build()
            .unwrap_err();
        assert_eq!(err, BoardError::BitmapIndexOutOfRange { index: 2, count: 2 });
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn state_past_palette_panics_in_debug() {
        let host = RecordingHost::new();
        scoreboard().set_segment(&host, 0, 10);
    }
}
