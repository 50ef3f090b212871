//! Renderer Settings & Material Configuration
//!
//! Pure data consumed by the binding protocol. Both structs deserialize from
//! JSON with every field optional, so a config file only lists overrides.
//!
//! ```rust,ignore
//! use actor_material::renderer::RenderSettings;
//!
//! let settings = RenderSettings::from_json_str(r#"{ "rim_intensity": 2.0 }"#)?;
//! assert_eq!(settings.main_light_intensity, 1.0);
//! ```

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use glam::{Quat, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::resources::{Attribute, AttributeSet};

// ---------------------------------------------------------------------------
// RenderSettings
// ---------------------------------------------------------------------------

/// Renderer-wide lighting and post-process parameters.
///
/// # Fields
///
/// | Field                  | Description                                  | Default              |
/// |------------------------|----------------------------------------------|----------------------|
/// | `main_light_angle_a`   | Main light rotation about Z (degrees)        | `-30.0`              |
/// | `main_light_angle_b`   | Main light rotation about X (degrees)        | `18.0`               |
/// | `main_light_intensity` | Scales sky color and specular                | `1.0`                |
/// | `specular_intensity`   | Global specular multiplier                   | `1.0`                |
/// | `sky_color`            | Hemisphere upper color                       | `(0.55, 0.55, 0.55)` |
/// | `ground_color`         | Hemisphere lower color                       | `(0.12, 0.02, 0.07)` |
/// | `rim_angle`            | Rim light rotation about Z (degrees)         | `60.0`               |
/// | `rim_intensity`        | Rim light factor                             | `1.5`                |
/// | `rim_width`            | Rim falloff width                            | `0.65`               |
/// | `rim_color`            | Rim light color                              | `(1.0, 0.7, 0.65)`   |
/// | `bloom_threshold`      | Luminance above which pixels glow            | `0.8`                |
/// | `dof_focal_distance`   | Depth of the focal plane                     | `1000.0`             |
/// | `dof_near`             | Near blur plane                              | `0.0`                |
/// | `dof_far`              | Far blur plane                               | `2000.0`             |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    // === Main Light ===
    pub main_light_angle_a: f32,
    pub main_light_angle_b: f32,
    pub main_light_intensity: f32,
    pub specular_intensity: f32,

    // === Hemisphere Ambient ===
    pub sky_color: Vec4,
    pub ground_color: Vec4,

    // === Rim Light ===
    pub rim_angle: f32,
    pub rim_intensity: f32,
    pub rim_width: f32,
    pub rim_color: Vec4,

    // === Post Processing ===
    pub bloom_threshold: f32,
    pub dof_focal_distance: f32,
    pub dof_near: f32,
    pub dof_far: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            main_light_angle_a: -30.0,
            main_light_angle_b: 18.0,
            main_light_intensity: 1.0,
            specular_intensity: 1.0,
            sky_color: Vec4::new(0.55, 0.55, 0.55, 1.0),
            ground_color: Vec4::new(0.117, 0.015, 0.07, 1.0),
            rim_angle: 60.0,
            rim_intensity: 1.5,
            rim_width: 0.65,
            rim_color: Vec4::new(1.0, 0.70, 0.65, 1.0),
            bloom_threshold: 0.8,
            dof_focal_distance: 1000.0,
            dof_near: 0.0,
            dof_far: 2000.0,
        }
    }
}

impl RenderSettings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Direction of the main light: straight down, rotated about Z by angle A,
    /// then about X by angle B, normalized.
    #[must_use]
    pub fn main_light_direction(&self) -> Vec3 {
        let rotation = Quat::from_rotation_x(self.main_light_angle_b.to_radians())
            * Quat::from_rotation_z(self.main_light_angle_a.to_radians());
        (rotation * Vec3::NEG_Y).normalize()
    }

    /// Rim light direction: `camera_up` rotated about Z by the rim angle, normalized.
    #[must_use]
    pub fn rim_light_direction(&self, camera_up: Vec3) -> Vec3 {
        (Quat::from_rotation_z(self.rim_angle.to_radians()) * camera_up).normalize()
    }

    /// Sky color scaled by the main light intensity.
    #[inline]
    #[must_use]
    pub fn lit_sky_color(&self) -> Vec4 {
        self.sky_color * self.main_light_intensity
    }
}

// ---------------------------------------------------------------------------
// MaterialConfig
// ---------------------------------------------------------------------------

/// Per-family material configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialConfig {
    /// Vertex shader source every variant of the family is compiled from.
    pub vertex_shader: Cow<'static, str>,
    /// Pixel shader source every variant of the family is compiled from.
    pub pixel_shader: Cow<'static, str>,
    /// Directory relative layer file names are resolved against.
    pub texture_root: Option<PathBuf>,
    /// Capacity of the bone matrix uniform array.
    pub max_bones: usize,
    /// Attributes a new instance starts with.
    pub attributes: AttributeSet,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            vertex_shader: Cow::Borrowed("skinned_material.vert"),
            pixel_shader: Cow::Borrowed("skinned_material.frag"),
            texture_root: None,
            max_bones: 200,
            attributes: AttributeSet::from_attributes(&[Attribute::Lighting, Attribute::Texturing]),
        }
    }
}

impl MaterialConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Joins a layer file name onto the texture root, unless it is absolute.
    #[must_use]
    pub fn resolve_texture_path(&self, file_name: &Path) -> PathBuf {
        match &self.texture_root {
            Some(root) if file_name.is_relative() => root.join(file_name),
            _ => file_name.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings =
            RenderSettings::from_json_str(r#"{ "rim_intensity": 2.0, "dof_far": 50.0 }"#).unwrap();
        assert_eq!(settings.rim_intensity, 2.0);
        assert_eq!(settings.dof_far, 50.0);
        assert_eq!(settings.main_light_intensity, 1.0);
        assert_eq!(settings.rim_color, RenderSettings::default().rim_color);
    }

    #[test]
    fn test_bad_json_is_config_error() {
        let err = RenderSettings::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, crate::errors::MaterialError::ConfigParse(_)));
    }

    #[test]
    fn test_zero_angles_point_light_down() {
        let settings = RenderSettings {
            main_light_angle_a: 0.0,
            main_light_angle_b: 0.0,
            ..Default::default()
        };
        assert!(settings.main_light_direction().abs_diff_eq(Vec3::NEG_Y, 1e-6));
    }

    #[test]
    fn test_light_directions_are_unit_length() {
        let settings = RenderSettings::default();
        assert!((settings.main_light_direction().length() - 1.0).abs() < 1e-5);
        let rim = settings.rim_light_direction(Vec3::new(0.0, 3.0, 0.0));
        assert!((rim.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_rim_rotation_about_z() {
        let settings = RenderSettings {
            rim_angle: 90.0,
            ..Default::default()
        };
        let rim = settings.rim_light_direction(Vec3::Y);
        assert!(rim.abs_diff_eq(Vec3::NEG_X, 1e-5));
    }

    #[test]
    fn test_texture_root_only_applies_to_relative_paths() {
        let config = MaterialConfig {
            texture_root: Some(PathBuf::from("assets/textures")),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_texture_path(Path::new("skin.dds")),
            PathBuf::from("assets/textures/skin.dds")
        );
        let absolute = std::env::temp_dir().join("skin.dds");
        assert_eq!(config.resolve_texture_path(&absolute), absolute);
    }

    #[test]
    fn test_material_config_defaults() {
        let config = MaterialConfig::from_json_str(r#"{ "max_bones": 64 }"#).unwrap();
        assert_eq!(config.max_bones, 64);
        assert!(config.attributes.contains(Attribute::Lighting));
        assert!(config.attributes.contains(Attribute::Texturing));
        assert!(!config.attributes.contains(Attribute::Skinning));
    }
}
