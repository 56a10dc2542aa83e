//! 1-bit framebuffer in the host's memory layout
//!
//! 240 rows of 52 bytes; only the first 50 bytes of each row are visible.
//! Bit 7 of a byte is the leftmost pixel. A set bit is white.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::Pixel;

/// Visible width in pixels
pub const WIDTH: usize = 400;

/// Visible height in pixels
pub const HEIGHT: usize = 240;

/// Bytes per row, including padding
pub const ROW_STRIDE: usize = 52;

const BUFFER_LEN: usize = ROW_STRIDE * HEIGHT;

/// Framebuffer with changed-row tracking
pub struct FrameBuffer {
    bytes: [u8; BUFFER_LEN],
    /// First and last row written since the last flush
    updated: Option<(u16, u16)>,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// An all-white framebuffer
    pub const fn new() -> Self {
        Self {
            bytes: [0xFF; BUFFER_LEN],
            updated: None,
        }
    }

    /// Fill with white and mark every row updated
    pub fn clear(&mut self) {
        self.bytes.fill(0xFF);
        self.updated = Some((0, HEIGHT as u16 - 1));
    }

    fn locate(x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || y < 0 || x as usize >= WIDTH || y as usize >= HEIGHT {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        Some((y * ROW_STRIDE + x / 8, 0x80 >> (x % 8)))
    }

    /// Pixel color, `None` outside the visible area
    pub fn pixel(&self, x: i32, y: i32) -> Option<BinaryColor> {
        Self::locate(x, y).map(|(index, bit)| {
            if self.bytes[index] & bit != 0 {
                BinaryColor::Off
            } else {
                BinaryColor::On
            }
        })
    }

    /// Whether the pixel is black; pixels outside the screen are not
    pub fn is_black(&self, x: i32, y: i32) -> bool {
        self.pixel(x, y) == Some(BinaryColor::On)
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: BinaryColor) {
        let Some((index, bit)) = Self::locate(x, y) else {
            return;
        };
        match color {
            BinaryColor::Off => self.bytes[index] |= bit,
            BinaryColor::On => self.bytes[index] &= !bit,
        }
        let row = y as u16;
        self.updated = Some(match self.updated {
            Some((first, last)) => (first.min(row), last.max(row)),
            None => (row, row),
        });
    }

    /// Raw buffer
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// One row, including padding bytes
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        (y < HEIGHT).then(|| &self.bytes[y * ROW_STRIDE..(y + 1) * ROW_STRIDE])
    }

    /// Inclusive range of rows written since the previous call
    pub fn take_updated_rows(&mut self) -> Option<(u16, u16)> {
        self.updated.take()
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color);
        }
        Ok(())
    }
}
