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

//! Defines the visible-light record produced by culling.
//!
//! A [`VisibleLight`] is read-only for the duration of a frame. Its
//! local-to-world matrix carries everything the packer needs: the third column
//! is the light's forward axis and the fourth column its world position.

use crate::math::{LinearRgba, Mat4, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// The kind of a visible light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LightKind {
    /// Infinitely distant light with parallel rays (e.g. the sun).
    Directional,
    /// Omnidirectional light with a finite range.
    Point,
    /// Cone-shaped light with a finite range.
    Spot,
}

/// The shadow mode of a light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LightShadows {
    /// The light casts no shadows.
    #[default]
    None,
    /// Hard-edged shadows.
    Hard,
    /// Filtered shadows.
    Soft,
}

/// A light that survived culling for the current camera.
///
/// # Examples
///
/// ```
/// use umbra_core::renderer::light::{LightKind, LightShadows, VisibleLight};
/// use umbra_core::math::{LinearRgba, Mat4};
///
/// let sun = VisibleLight::directional(Mat4::from_rotation_x(-0.8), LinearRgba::WHITE)
///     .with_shadows(LightShadows::Soft, 1.0);
/// assert_eq!(sun.kind, LightKind::Directional);
/// assert!(sun.casts_shadows());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleLight {
    /// The kind of light.
    pub kind: LightKind,
    /// Local-to-world transform of the light.
    pub local_to_world: Mat4,
    /// Color already multiplied by intensity.
    pub final_color: LinearRgba,
    /// Range in world units (point and spot lights).
    pub range: f32,
    /// Full cone angle in degrees (spot lights).
    pub spot_angle: f32,
    /// Shadow mode.
    pub shadows: LightShadows,
    /// Shadow strength in `[0, 1]`.
    pub shadow_strength: f32,
    /// Slope-scaled depth bias applied while rendering this light's shadow casters.
    pub shadow_bias: f32,
    /// Normal offset applied while sampling this light's shadows.
    pub shadow_normal_bias: f32,
    /// Near-plane offset used when fitting cascade projections.
    pub shadow_near_plane: f32,
}

impl VisibleLight {
    fn base(kind: LightKind, local_to_world: Mat4, final_color: LinearRgba) -> Self {
        Self {
            kind,
            local_to_world,
            final_color,
            range: 10.0,
            spot_angle: 30.0,
            shadows: LightShadows::None,
            shadow_strength: 1.0,
            shadow_bias: 0.05,
            shadow_normal_bias: 0.4,
            shadow_near_plane: 0.2,
        }
    }

    /// Creates a directional light.
    pub fn directional(local_to_world: Mat4, final_color: LinearRgba) -> Self {
        Self::base(LightKind::Directional, local_to_world, final_color)
    }

    /// Creates a point light at `position`.
    pub fn point(position: Vec3, range: f32, final_color: LinearRgba) -> Self {
        Self {
            range,
            ..Self::base(
                LightKind::Point,
                Mat4::from_translation(position),
                final_color,
            )
        }
    }

    /// Creates a spot light from a full transform.
    pub fn spot(
        local_to_world: Mat4,
        range: f32,
        spot_angle: f32,
        final_color: LinearRgba,
    ) -> Self {
        Self {
            range,
            spot_angle,
            ..Self::base(LightKind::Spot, local_to_world, final_color)
        }
    }

    /// Sets the shadow mode and strength.
    pub fn with_shadows(mut self, shadows: LightShadows, strength: f32) -> Self {
        self.shadows = shadows;
        self.shadow_strength = strength;
        self
    }

    /// Sets the depth bias, normal bias and near-plane offset used for shadows.
    pub fn with_shadow_bias(mut self, bias: f32, normal_bias: f32, near_plane: f32) -> Self {
        self.shadow_bias = bias;
        self.shadow_normal_bias = normal_bias;
        self.shadow_near_plane = near_plane;
        self
    }

    /// The light's forward axis in world space (third column of the transform).
    #[inline]
    pub fn forward(&self) -> Vec4 {
        self.local_to_world.cols[2]
    }

    /// The light's world position (fourth column of the transform).
    #[inline]
    pub fn position(&self) -> Vec4 {
        self.local_to_world.cols[3]
    }

    /// Returns `true` if the light requests shadows with a non-zero strength.
    #[inline]
    pub fn casts_shadows(&self) -> bool {
        self.shadows != LightShadows::None && self.shadow_strength > 0.0
    }
}
