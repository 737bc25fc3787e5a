// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Pipeline configuration.
//!
//! Settings are immutable for the duration of a frame. They are plain serde
//! structs and can be loaded from RON:
//!
//! ```
//! use umbra_core::renderer::settings::{PipelineSettings, ShadowFilterMode};
//!
//! let settings = PipelineSettings::from_ron_str(
//!     "(dynamic_batching: true, shadows: (directional: (filter: Pcf5x5)))",
//! ).unwrap();
//! assert!(settings.dynamic_batching);
//! assert_eq!(settings.shadows.directional.filter, ShadowFilterMode::Pcf5x5);
//! assert_eq!(settings.shadows.max_distance, 100.0);
//! ```

use crate::renderer::shader_ids;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of cascades per directional light.
pub const MAX_CASCADES: usize = 4;

/// Error raised while loading or saving pipeline settings.
#[derive(Debug)]
pub enum SettingsError {
    /// The RON text could not be parsed.
    Parse(ron::error::SpannedError),
    /// The settings could not be serialized.
    Serialize(ron::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Parse(e) => write!(f, "Failed to parse pipeline settings: {e}"),
            SettingsError::Serialize(e) => {
                write!(f, "Failed to serialize pipeline settings: {e}")
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Parse(e) => Some(e),
            SettingsError::Serialize(e) => Some(e),
        }
    }
}

/// Edge length of the directional shadow atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShadowMapSize {
    /// 256 x 256.
    S256,
    /// 512 x 512.
    S512,
    /// 1024 x 1024.
    S1024,
    /// 2048 x 2048.
    S2048,
    /// 4096 x 4096.
    S4096,
}

impl ShadowMapSize {
    /// Edge length in pixels.
    pub const fn pixels(self) -> u32 {
        match self {
            ShadowMapSize::S256 => 256,
            ShadowMapSize::S512 => 512,
            ShadowMapSize::S1024 => 1024,
            ShadowMapSize::S2048 => 2048,
            ShadowMapSize::S4096 => 4096,
        }
    }
}

/// Percentage-closer filter kernel used when sampling directional shadows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShadowFilterMode {
    /// 2x2 hardware filter (no keyword).
    Pcf2x2,
    /// 3x3 tent filter.
    Pcf3x3,
    /// 5x5 tent filter.
    Pcf5x5,
    /// 7x7 tent filter.
    Pcf7x7,
}

impl ShadowFilterMode {
    /// Zero-based position in the declaration order; `0` selects no keyword.
    pub const fn ordinal(self) -> usize {
        match self {
            ShadowFilterMode::Pcf2x2 => 0,
            ShadowFilterMode::Pcf3x3 => 1,
            ShadowFilterMode::Pcf5x5 => 2,
            ShadowFilterMode::Pcf7x7 => 3,
        }
    }
}

/// How adjacent cascades are blended in shading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CascadeBlendMode {
    /// Hard switch between cascades (no keyword).
    Hard,
    /// Soft blend across the fade band.
    Soft,
    /// Dithered transition.
    Dither,
}

impl CascadeBlendMode {
    /// Zero-based position in the declaration order; `0` selects no keyword.
    pub const fn ordinal(self) -> usize {
        match self {
            CascadeBlendMode::Hard => 0,
            CascadeBlendMode::Soft => 1,
            CascadeBlendMode::Dither => 2,
        }
    }
}

/// Directional shadow atlas and cascade configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionalShadowSettings {
    /// Atlas edge length.
    pub atlas_size: ShadowMapSize,
    /// Filter kernel.
    pub filter: ShadowFilterMode,
    /// Number of cascades, in `[1, 4]`.
    pub cascade_count: u32,
    /// Split ratios of the first three cascades, each in `[0, 1]`.
    pub cascade_ratios: [f32; 3],
    /// Fraction of each cascade used for fading, in `[0.001, 1]`.
    pub cascade_fade: f32,
    /// Blend mode between cascades.
    pub cascade_blend: CascadeBlendMode,
}

impl Default for DirectionalShadowSettings {
    fn default() -> Self {
        Self {
            atlas_size: ShadowMapSize::S1024,
            filter: ShadowFilterMode::Pcf3x3,
            cascade_count: 4,
            cascade_ratios: [0.1, 0.25, 0.5],
            cascade_fade: 0.1,
            cascade_blend: CascadeBlendMode::Hard,
        }
    }
}

/// Shadow configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowSettings {
    /// Maximum shadow distance in world units.
    pub max_distance: f32,
    /// Fraction of `max_distance` used to fade shadows out, in `[0.001, 1]`.
    pub distance_fade: f32,
    /// Directional light shadows.
    pub directional: DirectionalShadowSettings,
}

impl Default for ShadowSettings {
    fn default() -> Self {
        Self {
            max_distance: 100.0,
            distance_fade: 0.1,
            directional: DirectionalShadowSettings::default(),
        }
    }
}

impl ShadowSettings {
    /// Returns a copy with every field clamped to its documented range.
    ///
    /// Non-finite values fall back to the defaults.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let finite_or = |v: f32, d: f32| if v.is_finite() { v } else { d };

        let dir = &self.directional;
        let mut ratios = dir.cascade_ratios;
        for (r, d) in ratios.iter_mut().zip(defaults.directional.cascade_ratios) {
            *r = finite_or(*r, d).clamp(0.0, 1.0);
        }

        Self {
            max_distance: finite_or(self.max_distance, defaults.max_distance).max(0.0),
            distance_fade: finite_or(self.distance_fade, defaults.distance_fade).clamp(0.001, 1.0),
            directional: DirectionalShadowSettings {
                atlas_size: dir.atlas_size,
                filter: dir.filter,
                cascade_count: dir.cascade_count.clamp(1, MAX_CASCADES as u32),
                cascade_ratios: ratios,
                cascade_fade: finite_or(dir.cascade_fade, defaults.directional.cascade_fade)
                    .clamp(0.001, 1.0),
                cascade_blend: dir.cascade_blend,
            },
        }
    }
}

/// Lighting configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingSettings {
    /// Whether per-object light indices are computed and used by shading.
    pub use_lights_per_object: bool,
    /// Keyword toggled to match `use_lights_per_object`.
    pub per_object_keyword: String,
}

impl Default for LightingSettings {
    fn default() -> Self {
        Self {
            use_lights_per_object: true,
            per_object_keyword: shader_ids::LIGHTS_PER_OBJECT_KEYWORD.to_string(),
        }
    }
}

/// Top-level pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    /// Let the backend merge small draws dynamically.
    pub dynamic_batching: bool,
    /// Let the backend instance identical draws.
    pub gpu_instancing: bool,
    /// Lighting configuration.
    pub lighting: LightingSettings,
    /// Shadow configuration.
    pub shadows: ShadowSettings,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            dynamic_batching: false,
            gpu_instancing: true,
            lighting: LightingSettings::default(),
            shadows: ShadowSettings::default(),
        }
    }
}

impl PipelineSettings {
    /// Parses settings from RON text. Missing fields take their default value.
    pub fn from_ron_str(text: &str) -> Result<Self, SettingsError> {
        ron::de::from_str(text).map_err(SettingsError::Parse)
    }

    /// Serializes the settings to pretty-printed RON.
    pub fn to_ron_string(&self) -> Result<String, SettingsError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(SettingsError::Serialize)
    }

    /// Returns a copy with sanitized shadow settings.
    pub fn sanitized(&self) -> Self {
        let shadows = self.shadows.sanitized();
        if shadows != self.shadows {
            log::warn!(
                "PipelineSettings: out-of-range shadow settings clamped to {:?}",
                shadows
            );
        }
        Self {
            shadows,
            ..self.clone()
        }
    }
}
