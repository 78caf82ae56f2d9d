use std::fmt;

/// Errors surfaced while assembling or feeding the board.
///
/// Everything else in this crate is a caller contract (see the individual
/// operations) and is checked with `debug_assert!`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// A segment was never bound to a host widget
    UnboundSegment(usize),
    /// A bitmap slot was never bound to a host bitmap
    UnboundBitmap(usize),
    /// Segment index past the display's segment count
    SegmentIndexOutOfRange { index: usize, count: usize },
    /// Bitmap index past the display's bitmap count
    BitmapIndexOutOfRange { index: usize, count: usize },
    /// Packed bitmap smaller than the surface it should cover
    BitmapTooShort { expected: usize, actual: usize },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnboundSegment(index) => write!(f, "segment {index} has no host widget"),
            Self::UnboundBitmap(index) => write!(f, "bitmap {index} has no host bitmap"),
            Self::SegmentIndexOutOfRange { index, count } => {
                write!(f, "segment index {index} out of range (display has {count})")
            }
            Self::BitmapIndexOutOfRange { index, count } => {
                write!(f, "bitmap index {index} out of range (display has {count})")
            }
            Self::BitmapTooShort { expected, actual } => {
                write!(f, "packed bitmap is {actual} bytes, expected at least {expected}")
            }
        }
    }
}

impl std::error::Error for BoardError {}
