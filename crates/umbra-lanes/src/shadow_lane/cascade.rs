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

//! Cascade requests and per-cascade shading data.

use umbra_core::{
    math::{Vec3, Vec4, SQRT_2},
    renderer::{
        CascadeRequest, DirectionalShadowSettings, ShadowFilterMode, ShadowFrameData,
        ShadowedDirectionalLight,
    },
};

/// Blend culling factor ceiling; reduced by the cascade fade.
const CASCADE_CULLING_BASE: f32 = 0.8;

/// Builds the matrix request for cascade `cascade_index` of `caster`.
pub fn cascade_request(
    caster: &ShadowedDirectionalLight,
    cascade_index: usize,
    settings: &DirectionalShadowSettings,
    tile_size: u32,
) -> CascadeRequest {
    let [r0, r1, r2] = settings.cascade_ratios;
    CascadeRequest {
        light_index: caster.visible_light_index,
        cascade_index,
        cascade_count: settings.cascade_count as usize,
        ratios: Vec3::new(r0, r1, r2),
        tile_size,
        near_plane_offset: caster.near_plane_offset,
    }
}

/// Share of casters already covered by the previous cascade that culling may
/// skip.
#[inline]
pub fn blend_culling_factor(cascade_fade: f32) -> f32 {
    (CASCADE_CULLING_BASE - cascade_fade).max(0.0)
}

/// Shrinks `culling_sphere` by the filter footprint and returns the sphere to
/// store (radius squared in `w`) together with `(1 / r², filter · √2, 0, 0)`.
pub fn cascade_data(culling_sphere: Vec4, tile_size: u32, filter: ShadowFilterMode) -> (Vec4, Vec4) {
    let texel_size = 2.0 * culling_sphere.w / tile_size as f32;
    let filter_size = texel_size * (filter.ordinal() as f32 + 1.0);

    let mut sphere = culling_sphere;
    sphere.w -= filter_size;
    sphere.w *= sphere.w;

    (sphere, Vec4::new(1.0 / sphere.w, filter_size * SQRT_2, 0.0, 0.0))
}

/// Stores the shading data of `cascade_index` into `shadows`.
pub fn set_cascade_data(
    shadows: &mut ShadowFrameData,
    cascade_index: usize,
    culling_sphere: Vec4,
    tile_size: u32,
    filter: ShadowFilterMode,
) {
    let (sphere, data) = cascade_data(culling_sphere, tile_size, filter);
    shadows.cascade_culling_spheres[cascade_index] = sphere;
    shadows.cascade_data[cascade_index] = data;
}
