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

//! Per-camera directional shadow state.

use crate::math::{Mat4, Vec4};
use crate::renderer::settings::MAX_CASCADES;
use crate::renderer::texture::RenderTextureId;

/// Maximum number of directional lights that get a shadow slot per camera.
pub const MAX_SHADOWED_DIRECTIONAL_LIGHTS: usize = 4;

/// Maximum number of atlas tiles (lights × cascades).
pub const MAX_SHADOW_TILES: usize = MAX_SHADOWED_DIRECTIONAL_LIGHTS * MAX_CASCADES;

/// Depth direction of the backend's clip space.
///
/// Injected by whoever owns the backend; never guessed from global state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DepthConvention {
    /// Near maps to 0, far maps to 1.
    #[default]
    Standard,
    /// Near maps to 1, far maps to 0.
    Reversed,
}

impl DepthConvention {
    /// Returns `true` for reversed depth.
    #[inline]
    pub fn is_reversed(self) -> bool {
        self == DepthConvention::Reversed
    }
}

/// A directional light that was granted a shadow slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowedDirectionalLight {
    /// Index into the visible lights.
    pub visible_light_index: usize,
    /// Slope-scaled depth bias used while drawing casters.
    pub slope_scale_bias: f32,
    /// Near-plane offset passed to cascade fitting.
    pub near_plane_offset: f32,
}

/// Shadow data produced for one camera.
///
/// Reset at the start of every camera's shadow setup so nothing carries over
/// between cameras.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowFrameData {
    /// Selected casters, in slot order.
    pub casters: Vec<ShadowedDirectionalLight>,
    /// World-to-atlas matrices, indexed by tile.
    pub matrices: [Mat4; MAX_SHADOW_TILES],
    /// `(strength, first tile, normal bias, 0)` indexed by visible light index.
    pub light_shadow_data: [Vec4; MAX_SHADOWED_DIRECTIONAL_LIGHTS],
    /// Cascade culling spheres, radius squared in `w`.
    pub cascade_culling_spheres: [Vec4; MAX_CASCADES],
    /// `(1 / radius², filter size · √2, 0, 0)` per cascade.
    pub cascade_data: [Vec4; MAX_CASCADES],
    /// The temporary atlas texture, while it is held.
    pub atlas: Option<RenderTextureId>,
}

impl ShadowFrameData {
    /// Creates empty shadow data.
    pub fn new() -> Self {
        Self {
            casters: Vec::with_capacity(MAX_SHADOWED_DIRECTIONAL_LIGHTS),
            matrices: [Mat4::ZERO; MAX_SHADOW_TILES],
            light_shadow_data: [Vec4::ZERO; MAX_SHADOWED_DIRECTIONAL_LIGHTS],
            cascade_culling_spheres: [Vec4::ZERO; MAX_CASCADES],
            cascade_data: [Vec4::ZERO; MAX_CASCADES],
            atlas: None,
        }
    }

    /// Clears selection and all arrays. The atlas handle is left alone; it is
    /// owned by the acquire/release pair.
    pub fn reset(&mut self) {
        let atlas = self.atlas.take();
        *self = Self {
            atlas,
            ..Self::new()
        };
    }

    /// Number of selected casters.
    #[inline]
    pub fn caster_count(&self) -> usize {
        self.casters.len()
    }
}

impl Default for ShadowFrameData {
    fn default() -> Self {
        Self::new()
    }
}
