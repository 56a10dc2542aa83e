//! Dithered brightness patterns
//!
//! A 1-bit display cannot show 16 brightness levels directly, so each
//! level is approximated by an 8x8 ordered-dither tile. The tile for a
//! given coverage is derived from the classic Bayer matrix: a pixel is
//! white when its matrix entry reaches the threshold for that coverage.

use annulus_protocol::Level;

/// 8x8 ordered-dither (Bayer) matrix, values 0..=63
pub const BAYER_8X8: [[u8; 8]; 8] = [
    [0, 32, 8, 40, 2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44, 4, 36, 14, 46, 6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [3, 35, 11, 43, 1, 33, 9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47, 7, 39, 13, 45, 5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21],
];

/// Number of levels in a [`PatternTable`]
pub const N_LEVELS: usize = Level::MAX as usize + 1;

/// An 8x8 1-bit tile with an opacity mask
///
/// Row `y` is one byte in the host's layout: Bayer column `c` is bit `c`,
/// and the display shows the most significant bit leftmost. A set data
/// bit paints white, a cleared one black. A set mask bit means the pixel
/// is opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pattern {
    data: [u8; 8],
    mask: [u8; 8],
}

impl Pattern {
    /// Fully opaque white tile
    pub const WHITE: Pattern = Pattern {
        data: [0xFF; 8],
        mask: [0xFF; 8],
    };

    /// Fully opaque black tile
    pub const BLACK: Pattern = Pattern {
        data: [0x00; 8],
        mask: [0xFF; 8],
    };

    /// Build the dither tile for `alpha` white coverage
    ///
    /// `alpha` is clamped to `0.0..=1.0`. The black pixel count equals
    /// `round((1 - alpha) * 64)`.
    pub fn with_alpha(alpha: f32) -> Self {
        let alpha = alpha.clamp(0.0, 1.0);
        let threshold = libm::roundf((1.0 - alpha) * 64.0) as u8;

        let mut data = [0u8; 8];
        for (row, bits) in data.iter_mut().enumerate() {
            for (col, &entry) in BAYER_8X8[row].iter().enumerate() {
                if entry >= threshold {
                    *bits |= 1 << col;
                }
            }
        }

        Self {
            data,
            mask: [0xFF; 8],
        }
    }

    /// Tile for a brightness level
    ///
    /// Level 0 (LED off) is all white, level 15 (full) all black.
    pub fn for_level(level: Level) -> Self {
        Self::with_alpha(1.0 - level.get() as f32 / Level::MAX as f32)
    }

    /// Data rows
    pub fn data(&self) -> &[u8; 8] {
        &self.data
    }

    /// Mask rows
    pub fn mask(&self) -> &[u8; 8] {
        &self.mask
    }

    /// 16-byte host layout: eight data rows followed by eight mask rows
    pub fn to_bytes(&self) -> [u8; 16] {
        let mut bytes = [0u8; 16];
        bytes[..8].copy_from_slice(&self.data);
        bytes[8..].copy_from_slice(&self.mask);
        bytes
    }

    /// Number of white pixels in the tile
    pub fn white_count(&self) -> u32 {
        self.data.iter().map(|row| row.count_ones()).sum()
    }

    /// Whether the tile is white at screen position (`x`, `y`)
    ///
    /// The tile repeats from the screen origin.
    pub fn is_white_at(&self, x: i32, y: i32) -> bool {
        let (row, bit) = Self::locate(x, y);
        self.data[row] & bit != 0
    }

    /// Whether the tile is opaque at screen position (`x`, `y`)
    pub fn is_opaque_at(&self, x: i32, y: i32) -> bool {
        let (row, bit) = Self::locate(x, y);
        self.mask[row] & bit != 0
    }

    /// Row and bit of a screen pixel; bit 7 is the leftmost pixel
    fn locate(x: i32, y: i32) -> (usize, u8) {
        ((y & 7) as usize, 0x80 >> (x & 7))
    }
}

/// Precomputed tiles for every brightness level
#[derive(Debug, Clone)]
pub struct PatternTable {
    levels: [Pattern; N_LEVELS],
}

impl PatternTable {
    /// Build the table once at start-up
    pub fn new() -> Self {
        let mut levels = [Pattern::WHITE; N_LEVELS];
        for (value, pattern) in levels.iter_mut().enumerate() {
            *pattern = Pattern::for_level(Level::masked(value as u8));
        }
        Self { levels }
    }

    /// Tile for `level`
    pub fn get(&self, level: Level) -> &Pattern {
        &self.levels[level.index()]
    }
}

impl Default for PatternTable {
    fn default() -> Self {
        Self::new()
    }
}
