use serde::Deserialize;

use crate::render::{ContainerId, TextureId};

use super::error::ConfigError;

/// Stroke capture tuning.
///
/// Every field has a default, so partial TOML files deserialize cleanly:
///
/// ```toml
/// max_width = 60.0
/// speed_scale = 4.0
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DrawConfig {
    /// Distance in front of the camera of the plane strokes are drawn on.
    pub distance_from_camera: f32,
    pub min_width: f32,
    pub max_width: f32,
    /// Point cap per stroke; reaching it closes the draw gate.
    pub max_points: usize,
    /// Minimum pointer travel, in logical pixels, before a new point is added.
    pub min_pixel_move: f32,
    /// Multiplier from world-space travel per sample to segment width.
    pub speed_scale: f32,

    pub line_texture: Option<TextureId>,
    pub end_cap_texture: Option<TextureId>,
    pub end_cap_name: String,
    /// Canvas every stroke is parented under.
    pub container: ContainerId,

    pub mouse_input_enabled: bool,
    pub touch_input_enabled: bool,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            distance_from_camera: 100.0,
            min_width: 5.0,
            max_width: 40.0,
            max_points: 5000,
            min_pixel_move: 1.0,
            speed_scale: 3.0,
            line_texture: None,
            end_cap_texture: None,
            end_cap_name: "RoundCap".to_string(),
            container: ContainerId::default(),
            mouse_input_enabled: true,
            touch_input_enabled: true,
        }
    }
}

impl DrawConfig {
    /// Squared movement threshold compared against squared pointer travel.
    #[inline]
    pub fn min_move_squared(&self) -> f32 {
        self.min_pixel_move * self.min_pixel_move
    }

    /// Maps a drag speed to a segment width in `[min_width, max_width]`.
    #[inline]
    pub fn width_for_speed(&self, speed: f32) -> f32 {
        if speed.is_nan() {
            return self.min_width;
        }
        speed.clamp(self.min_width, self.max_width)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("distance_from_camera", self.distance_from_camera)?;
        positive("min_width", self.min_width)?;
        positive("max_width", self.max_width)?;
        positive("speed_scale", self.speed_scale)?;

        finite("min_pixel_move", self.min_pixel_move)?;
        if self.min_pixel_move < 0.0 {
            return Err(ConfigError::Negative { field: "min_pixel_move", value: self.min_pixel_move });
        }

        if self.min_width > self.max_width {
            return Err(ConfigError::WidthRange { min: self.min_width, max: self.max_width });
        }
        if self.max_points == 0 {
            return Err(ConfigError::ZeroPointCap);
        }
        if self.end_cap_name.is_empty() {
            return Err(ConfigError::EmptyEndCapName);
        }
        Ok(())
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() { Ok(()) } else { Err(ConfigError::NonFinite { field, value }) }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 { Ok(()) } else { Err(ConfigError::NotPositive { field, value }) }
}
