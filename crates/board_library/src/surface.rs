use crate::color::Rgb;
use crate::error::BoardError;
use crate::host::{Host, WidgetId};
use log::{trace, warn};

/// Monochrome pixel grid shown through one host widget.
///
/// Mutations only touch the backing store; nothing reaches the host until
/// [`PixelSurface::redraw`] flushes the whole grid.
///
/// Coordinates are a caller contract: `x < width`, `y < height`. Debug
/// builds panic on a violation, release builds drop the write.
pub struct PixelSurface {
    width: usize,
    height: usize,
    target: WidgetId,
    off_color: Rgb,
    // row-major, `None` = pixel off
    pixels: Vec<Option<Rgb>>,
}

impl PixelSurface {
    pub fn new(width: usize, height: usize, target: WidgetId, off_color: Rgb) -> Self {
        Self {
            width,
            height,
            target,
            off_color,
            pixels: vec![None; width * height],
        }
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        let inside = x < self.width && y < self.height;
        debug_assert!(
            inside,
            "pixel ({x}, {y}) outside {}x{} surface",
            self.width, self.height
        );
        if inside {
            Some(y * self.width + x)
        } else {
            warn!(
                "dropping pixel ({x}, {y}) outside {}x{} surface",
                self.width, self.height
            );
            None
        }
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgb) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx] = Some(color);
        }
    }

    pub fn clear_pixel(&mut self, x: usize, y: usize) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx] = None;
        }
    }

    /// Turns every pixel off.
    pub fn clear(&mut self) {
        self.pixels.fill(None);
    }

    pub fn is_on(&self, x: usize, y: usize) -> bool {
        self.index(x, y)
            .is_some_and(|idx| self.pixels[idx].is_some())
    }

    /// Color the pixel is rendered with (its own color when on, `off_color` otherwise).
    pub fn color(&self, x: usize, y: usize) -> Rgb {
        self.index(x, y)
            .and_then(|idx| self.pixels[idx])
            .unwrap_or(self.off_color)
    }

    /// Unpacks a 1bpp bitmap covering the whole surface.
    ///
    /// The layout is the one of page-addressed OLED controllers: pixel
    /// `(x, y)` is bit `y % 8` (LSB first) of byte `x + (y / 8) * width`.
    /// Set bits become `on_color`, clear bits turn the pixel off.
    pub fn load_packed(&mut self, bitmap: &[u8], on_color: Rgb) -> Result<(), BoardError> {
        let expected = self.width * self.height.div_ceil(8);
        if bitmap.len() < expected {
            return Err(BoardError::BitmapTooShort {
                expected,
                actual: bitmap.len(),
            });
        }

        for y in 0..self.height {
            let band = (y / 8) * self.width;
            let mask = 1u8 << (y % 8);
            for x in 0..self.width {
                self.pixels[y * self.width + x] = if bitmap[band + x] & mask != 0 {
                    Some(on_color)
                } else {
                    None
                };
            }
        }
        Ok(())
    }

    /// Row-major frame as the host should paint it.
    pub fn render(&self) -> Vec<Rgb> {
        self.pixels
            .iter()
            .map(|p| p.unwrap_or(self.off_color))
            .collect()
    }

    /// Flushes all `width * height` pixels to the host in one pass.
    pub fn redraw<H: Host + ?Sized>(&self, host: &H) {
        trace!("redraw {}x{} surface", self.width, self.height);
        host.present_surface(self.target, self.width, self.height, &self.render());
    }
}
