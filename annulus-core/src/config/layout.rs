//! Ring layout configuration

use annulus_protocol::{Level, RingId, N_RINGS};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::{outer_bounds, LED_ANGLE};
use crate::traits::Point;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// TOML parsing failed
    TomlParse,
    /// Radius is not a positive finite number
    InvalidRadius,
    /// LED arm does not fit between the padding and the rim
    InvalidLedLength,
    /// Padding is negative or swallows the whole ring
    InvalidPadding,
    /// Ring outline extends past the display edge
    OffScreen(RingId),
    /// Select level is above the maximum brightness level
    InvalidSelectLevel,
    /// Refresh rate is not a positive finite number
    InvalidRefreshRate,
    /// Two ring outlines intersect
    Overlap(RingId, RingId),
}

/// Screen layout of the surface
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Layout {
    /// Display width in pixels
    pub display_width: u32,
    /// Display height in pixels
    pub display_height: u32,
    /// Ring centers in screen coordinates, indexed by ring
    pub centers: [Point; N_RINGS],
    /// Distance from the ring center to the LED tips
    pub radius: f32,
    /// Half the gap between neighbouring LEDs at their base
    pub led_padding: f32,
    /// Radial length of each LED
    pub led_length: f32,
    /// Brightness level of the key fill while a ring is selected
    pub select_level: u8,
    /// Display refresh rate requested from the host (Hz)
    pub refresh_rate: f32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            display_width: 400,
            display_height: 240,
            centers: [
                Point::new(68, 172),
                Point::new(156, 68),
                Point::new(244, 172),
                Point::new(332, 68),
            ],
            radius: 65.0,
            led_padding: 0.5,
            led_length: 15.0,
            select_level: 2,
            refresh_rate: 50.0,
        }
    }
}

impl Layout {
    /// Parse a layout from TOML text
    ///
    /// Missing keys keep their default values. The result is validated.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let layout: Layout = toml::from_str(text).map_err(|_| {
            warn!("Layout TOML parse error");
            ConfigError::TomlParse
        })?;
        layout.validate()?;
        Ok(layout)
    }

    /// Center of `ring`
    pub fn center(&self, ring: RingId) -> Point {
        self.centers[ring.index()]
    }

    /// Top-left corner of the ring's bounding square
    pub fn anchor(&self, ring: RingId) -> Point {
        let center = self.center(ring);
        let radius = self.radius as i32;
        Point::new(center.x - radius, center.y - radius)
    }

    /// Key fill level for selected rings
    pub fn select_level(&self) -> Level {
        Level::masked(self.select_level)
    }

    /// Check that the layout can be drawn
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(ConfigError::InvalidRadius);
        }

        let padding = self.led_padding as f64;
        let inner_radius = padding / libm::sin(LED_ANGLE / 2.0);
        if !self.led_padding.is_finite() || padding < 0.0 || inner_radius >= self.radius as f64 {
            return Err(ConfigError::InvalidPadding);
        }

        // The arm must fit on the LED and leave room for the key fill
        let length = self.led_length as f64;
        let height = self.radius as f64 - inner_radius;
        if !self.led_length.is_finite()
            || length <= 0.0
            || length >= height
            || self.radius as f64 - length - padding - 2.0 <= 0.0
        {
            return Err(ConfigError::InvalidLedLength);
        }

        if self.select_level > Level::MAX {
            return Err(ConfigError::InvalidSelectLevel);
        }

        if !self.refresh_rate.is_finite() || self.refresh_rate <= 0.0 {
            return Err(ConfigError::InvalidRefreshRate);
        }

        for ring in RingId::ALL {
            let bounds = outer_bounds(self.center(ring), self.radius);
            let fits = bounds.x >= 0
                && bounds.y >= 0
                && bounds.x as i64 + bounds.width as i64 <= self.display_width as i64
                && bounds.y as i64 + bounds.height as i64 <= self.display_height as i64;
            if !fits {
                return Err(ConfigError::OffScreen(ring));
            }
        }

        let spacing = 2.0 * (self.radius as f64 + 3.0);
        for (i, a) in RingId::ALL.iter().enumerate() {
            for b in RingId::ALL.iter().skip(i + 1) {
                let (pa, pb) = (self.center(*a), self.center(*b));
                let dx = (pa.x - pb.x) as f64;
                let dy = (pa.y - pb.y) as f64;
                if dx * dx + dy * dy < spacing * spacing {
                    return Err(ConfigError::Overlap(*a, *b));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_is_valid() {
        let layout = Layout::default();
        assert_eq!(layout.validate(), Ok(()));
        assert_eq!(layout.anchor(RingId::ALL[0]), Point::new(3, 107));
        assert_eq!(layout.select_level(), Level::masked(2));
    }

    #[test]
    fn test_rejects_bad_radius() {
        let layout = Layout {
            radius: 0.0,
            ..Layout::default()
        };
        assert_eq!(layout.validate(), Err(ConfigError::InvalidRadius));

        let layout = Layout {
            radius: f32::NAN,
            ..Layout::default()
        };
        assert_eq!(layout.validate(), Err(ConfigError::InvalidRadius));
    }

    #[test]
    fn test_rejects_bad_padding() {
        let layout = Layout {
            led_padding: -1.0,
            ..Layout::default()
        };
        assert_eq!(layout.validate(), Err(ConfigError::InvalidPadding));

        // 7.0 / sin(pi / 64) is well past the rim
        let layout = Layout {
            led_padding: 7.0,
            ..Layout::default()
        };
        assert_eq!(layout.validate(), Err(ConfigError::InvalidPadding));
    }

    #[test]
    fn test_rejects_bad_led_length() {
        let layout = Layout {
            led_length: 0.0,
            ..Layout::default()
        };
        assert_eq!(layout.validate(), Err(ConfigError::InvalidLedLength));

        let layout = Layout {
            led_length: 60.0,
            ..Layout::default()
        };
        assert_eq!(layout.validate(), Err(ConfigError::InvalidLedLength));
    }

    #[test]
    fn test_rejects_bad_select_level() {
        let layout = Layout {
            select_level: 16,
            ..Layout::default()
        };
        assert_eq!(layout.validate(), Err(ConfigError::InvalidSelectLevel));
    }

    #[test]
    fn test_rejects_bad_refresh_rate() {
        let layout = Layout {
            refresh_rate: 0.0,
            ..Layout::default()
        };
        assert_eq!(layout.validate(), Err(ConfigError::InvalidRefreshRate));
    }

    #[test]
    fn test_rejects_off_screen_ring() {
        let mut layout = Layout::default();
        layout.centers[3] = Point::new(340, 68);
        assert_eq!(
            layout.validate(),
            Err(ConfigError::OffScreen(RingId::ALL[3]))
        );

        let layout = Layout {
            display_height: 200,
            ..Layout::default()
        };
        assert_eq!(
            layout.validate(),
            Err(ConfigError::OffScreen(RingId::ALL[0]))
        );
    }

    #[test]
    fn test_rejects_overlap() {
        let mut layout = Layout::default();
        layout.centers[1] = Point::new(150, 80);
        assert_eq!(
            layout.validate(),
            Err(ConfigError::Overlap(RingId::ALL[0], RingId::ALL[1]))
        );
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_from_toml_partial() {
        let layout = Layout::from_toml_str("select_level = 5\nrefresh_rate = 30.0\n").unwrap();
        assert_eq!(layout.select_level, 5);
        assert_eq!(layout.refresh_rate, 30.0);
        assert_eq!(layout.centers, Layout::default().centers);
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_from_toml_centers() {
        let text = "centers = [\n  { x = 68, y = 172 },\n  { x = 156, y = 68 },\n  { x = 244, y = 172 },\n  { x = 332, y = 68 },\n]\n";
        let layout = Layout::from_toml_str(text).unwrap();
        assert_eq!(layout, Layout::default());
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_from_toml_errors() {
        assert_eq!(
            Layout::from_toml_str("radius = \"big\""),
            Err(ConfigError::TomlParse)
        );
        assert_eq!(
            Layout::from_toml_str("select_level = 20"),
            Err(ConfigError::InvalidSelectLevel)
        );
    }
}
