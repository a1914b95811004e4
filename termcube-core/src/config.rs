/// Runtime configuration, loaded from TOML.
///
/// Every field has a default, so an empty file (or no file at all) yields the
/// stock look and feel.
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub cube: CubeConfig,
    pub animation: AnimationConfig,
    pub camera: CameraConfig,
    pub render: RenderConfig,
}

/// Spacing of the 27 units and of the stickers on them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CubeConfig {
    /// Gap between neighbouring units. Lattice spacing is `1 + unit_padding`.
    pub unit_padding: f32,
    /// Sticker inset. Each face sits `0.5 * (1 + face_padding)` from its unit center.
    pub face_padding: f32,
}

impl CubeConfig {
    /// Distance between the centers of two adjacent lattice slots.
    pub fn spacing(&self) -> f32 {
        1.0 + self.unit_padding
    }
}

impl Default for CubeConfig {
    fn default() -> Self {
        Self {
            unit_padding: 0.4,
            face_padding: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationConfig {
    /// Per-tick easing factor: `p' = easing * p + (1 - easing)`.
    pub easing: f64,
    /// Progress past which a transform is forced to complete.
    pub settle_threshold: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            easing: 0.9,
            settle_threshold: 0.99,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    /// Orbit radius around the origin.
    pub radius: f32,
    /// Vertical field of view.
    pub fov_degrees: f32,
    /// Velocity added per orbit keypress (radians per tick).
    pub velocity_step: f32,
    /// Velocities are divided by this every tick.
    pub damping: f32,
    /// Velocities smaller than this snap to zero.
    pub rest_epsilon: f32,
    /// Soft bound for both yaw and pitch (radians).
    pub iso_bound: f32,
    /// Fraction of the bound blended in per tick while outside it.
    pub iso_pull: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            radius: 8.0,
            fov_degrees: 70.0,
            velocity_step: 0.05,
            damping: 1.1,
            rest_epsilon: 0.001,
            iso_bound: 0.6,
            iso_pull: 0.01,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Glyph written for every rasterized cell.
    pub fill_char: char,
    pub cull_backfaces: bool,
    pub target_fps: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fill_char: '@',
            cull_backfaces: true,
            target_fps: 60,
        }
    }
}

impl Config {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn check(ok: bool, msg: &str) -> Result<(), ConfigError> {
            if ok {
                Ok(())
            } else {
                Err(ConfigError::Invalid(msg.to_string()))
            }
        }

        check(self.cube.unit_padding >= 0.0, "cube.unit_padding must be >= 0")?;
        check(self.cube.face_padding >= 0.0, "cube.face_padding must be >= 0")?;
        check(
            (0.0..1.0).contains(&self.animation.easing),
            "animation.easing must be in [0, 1)",
        )?;
        check(
            self.animation.settle_threshold > 0.0 && self.animation.settle_threshold < 1.0,
            "animation.settle_threshold must be in (0, 1)",
        )?;
        check(self.camera.radius > 0.0, "camera.radius must be > 0")?;
        check(
            self.camera.fov_degrees > 0.0 && self.camera.fov_degrees < 180.0,
            "camera.fov_degrees must be in (0, 180)",
        )?;
        check(self.camera.damping > 1.0, "camera.damping must be > 1")?;
        check(self.camera.rest_epsilon >= 0.0, "camera.rest_epsilon must be >= 0")?;
        check(
            (0.0..=1.0).contains(&self.camera.iso_pull),
            "camera.iso_pull must be in [0, 1]",
        )?;
        check(self.render.target_fps > 0, "render.target_fps must be > 0")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert!((config.cube.spacing() - 1.4).abs() < 1e-6);
    }

    #[test]
    fn test_partial_override() {
        let config = Config::from_toml_str(
            r##"
            [camera]
            radius = 10.0

            [render]
            fill_char = "#"
            cull_backfaces = false
            "##,
        )
        .unwrap();
        assert_eq!(config.camera.radius, 10.0);
        assert_eq!(config.camera.fov_degrees, 70.0);
        assert_eq!(config.render.fill_char, '#');
        assert!(!config.render.cull_backfaces);
        assert_eq!(config.animation, AnimationConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Config::from_toml_str("[animation]\neasing = 1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = Config::from_toml_str("[camera]\ndamping = 0.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_unknown_field_is_parse_error() {
        let err = Config::from_toml_str("[cube]\nwobble = 3\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Config::load("/nonexistent/termcube.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
