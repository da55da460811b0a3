use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::ConfigError;

pub const DEFAULT_TILE_SIZE: f64 = 10.0;
pub const DEFAULT_ZOOM: f64 = 1.0;
/// Range of a tile edge on screen (`tile_size * zoom`), in pixels.
pub const MIN_TILE_PIXELS: f64 = 1.0;
pub const MAX_TILE_PIXELS: f64 = 65_536.0;

/// Pixel-space pan applied before tile mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Offset {
    pub top: f64,
    pub left: f64,
}

impl Offset {
    pub fn new(top: f64, left: f64) -> Self {
        Self { top, left }
    }

    /// Replaces non-finite components with 0.
    pub fn sanitized(self) -> Self {
        let component = |name: &str, value: f64| {
            if value.is_finite() {
                value
            } else {
                log::warn!("offset.{} = {} is not finite, using 0", name, value);
                0.0
            }
        };
        Self {
            top: component("top", self.top),
            left: component("left", self.left),
        }
    }
}

/// Raw grid configuration as read from a file or built by a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub tile_size: f64,
    pub offset: Offset,
    pub zoom: f64,
    pub line_color: String,
    pub fill_color: String,
    pub background_color: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            offset: Offset::default(),
            zoom: DEFAULT_ZOOM,
            line_color: "#ccc".to_string(),
            fill_color: "#ccc".to_string(),
            background_color: "#fff".to_string(),
        }
    }
}

impl GridConfig {
    pub fn with_tile_size(tile_size: f64) -> Self {
        Self {
            tile_size,
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Single validation step: every invalid field is replaced by its
    /// default and reported with a warning.
    pub fn validate(&self) -> GridSettings {
        let tile_size = validate_tile_size(self.tile_size);
        GridSettings {
            tile_size,
            offset: self.offset.sanitized(),
            zoom: validate_zoom(self.zoom, tile_size),
            line_color: validate_color("line_color", &self.line_color, Color::LIGHT_GRAY),
            fill_color: validate_color("fill_color", &self.fill_color, Color::LIGHT_GRAY),
            background_color: validate_color("background_color", &self.background_color, Color::WHITE),
        }
    }
}

/// Validated grid parameters. Every field holds a usable value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSettings {
    pub tile_size: f64,
    pub offset: Offset,
    pub zoom: f64,
    pub line_color: Color,
    pub fill_color: Color,
    pub background_color: Color,
}

impl Default for GridSettings {
    fn default() -> Self {
        GridConfig::default().validate()
    }
}

pub fn validate_tile_size(tile_size: f64) -> f64 {
    if !(tile_size.is_finite() && tile_size > 0.0) {
        log::warn!("tile_size = {} is not a positive number, using {}", tile_size, DEFAULT_TILE_SIZE);
        return DEFAULT_TILE_SIZE;
    }

    let clamped = tile_size.clamp(MIN_TILE_PIXELS, MAX_TILE_PIXELS);
    if clamped != tile_size {
        log::warn!("tile_size = {} is out of range, using {}", tile_size, clamped);
    }
    clamped
}

/// Validates a zoom factor for tiles of `tile_size` pixels. The result keeps
/// a zoomed tile between `MIN_TILE_PIXELS` and `MAX_TILE_PIXELS` wide.
pub fn validate_zoom(zoom: f64, tile_size: f64) -> f64 {
    let zoom = if zoom.is_finite() && zoom > 0.0 {
        zoom
    } else {
        log::warn!("zoom = {} is not a positive number, using {}", zoom, DEFAULT_ZOOM);
        DEFAULT_ZOOM
    };

    let clamped = zoom.clamp(MIN_TILE_PIXELS / tile_size, MAX_TILE_PIXELS / tile_size);
    if clamped != zoom {
        log::warn!("zoom = {} puts {}px tiles out of range, using {}", zoom, tile_size, clamped);
    }
    clamped
}

fn validate_color(field: &str, value: &str, fallback: Color) -> Color {
    Color::parse(value).unwrap_or_else(|| {
        log::warn!("{} = {:?} is not a color, using {}", field, value, fallback);
        fallback
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate_unchanged() {
        let settings = GridConfig::default().validate();
        assert_eq!(settings.tile_size, 10.0);
        assert_eq!(settings.zoom, 1.0);
        assert_eq!(settings.offset, Offset::default());
        assert_eq!(settings.line_color, Color::LIGHT_GRAY);
        assert_eq!(settings.background_color, Color::WHITE);
    }

    #[test]
    fn bad_tile_size_defaults_to_ten() {
        for bad in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert_eq!(GridConfig::with_tile_size(bad).validate().tile_size, 10.0);
        }
        assert_eq!(GridConfig::with_tile_size(20.0).validate().tile_size, 20.0);
    }

    #[test]
    fn bad_zoom_falls_back_to_one() {
        for bad in [0.0, -1.0, f64::NAN] {
            let config = GridConfig { zoom: bad, ..GridConfig::default() };
            assert_eq!(config.validate().zoom, 1.0);
        }
    }

    #[test]
    fn tile_size_is_kept_within_pixel_range() {
        assert_eq!(GridConfig::with_tile_size(1e-6).validate().tile_size, MIN_TILE_PIXELS);
        assert_eq!(GridConfig::with_tile_size(1e12).validate().tile_size, MAX_TILE_PIXELS);
        assert_eq!(GridConfig::with_tile_size(7.5).validate().tile_size, 7.5);
    }

    #[test]
    fn zoom_keeps_tiles_at_least_one_pixel() {
        assert_eq!(validate_zoom(1e-4, 10.0), 0.1);
        assert_eq!(validate_zoom(1e300, 10.0), MAX_TILE_PIXELS / 10.0);
        assert_eq!(validate_zoom(0.5, 10.0), 0.5);

        let config = GridConfig {
            tile_size: 4.0,
            zoom: 0.01,
            ..GridConfig::default()
        };
        assert_eq!(config.validate().zoom, 0.25);
    }

    #[test]
    fn non_finite_offset_is_zeroed() {
        let config = GridConfig {
            offset: Offset::new(f64::NAN, 15.0),
            ..GridConfig::default()
        };
        assert_eq!(config.validate().offset, Offset::new(0.0, 15.0));
    }

    #[test]
    fn unparsable_color_uses_fallback() {
        let config = GridConfig {
            fill_color: "not a color".to_string(),
            ..GridConfig::default()
        };
        assert_eq!(config.validate().fill_color, Color::LIGHT_GRAY);
    }

    #[test]
    fn json_missing_fields_use_defaults() {
        let config = GridConfig::from_json_str(r#"{ "tile_size": 20, "offset": { "left": 5 } }"#).unwrap();
        assert_eq!(config.tile_size, 20.0);
        assert_eq!(config.offset, Offset::new(0.0, 5.0));
        assert_eq!(config.zoom, 1.0);
        assert_eq!(config.line_color, "#ccc");
    }

    #[test]
    fn json_errors_are_reported() {
        let err = GridConfig::from_json_str("{ tile_size: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = GridConfig::load("/nonexistent/tiled_canvas.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
