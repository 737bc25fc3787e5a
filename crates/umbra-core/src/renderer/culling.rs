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

//! Contracts with the external scene culling system.
//!
//! Culling is not performed here. A [`CullingProvider`] turns a camera into
//! [`CullingResults`], which the lanes then query for visible lights, shadow
//! caster bounds and per-cascade matrices.

use crate::math::{Aabb, Mat4, Vec3, Vec4};
use crate::renderer::camera::Camera;
use crate::renderer::light::VisibleLight;

/// Parameters used to cull one camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CullingParameters {
    /// Maximum distance at which shadow casters are kept.
    pub shadow_distance: f32,
    /// Layer mask of renderers to consider.
    pub culling_mask: u32,
}

impl Default for CullingParameters {
    fn default() -> Self {
        Self {
            shadow_distance: 0.0,
            culling_mask: u32::MAX,
        }
    }
}

/// Per-cascade culling data for shadow caster drawing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShadowSplitData {
    /// Cascade bounding sphere: `xyz` center, `w` radius.
    pub culling_sphere: Vec4,
    /// Fraction of casters inside the previous cascade that may be culled.
    pub shadow_cascade_blend_culling_factor: f32,
}

/// View, projection and split data for one (light, cascade) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CascadeMatrices {
    /// Light-space view matrix.
    pub view: Mat4,
    /// Orthographic projection covering the cascade.
    pub projection: Mat4,
    /// Culling data for caster drawing.
    pub split_data: ShadowSplitData,
}

/// Arguments of a per-cascade matrix request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CascadeRequest {
    /// Visible light index.
    pub light_index: usize,
    /// Cascade index, in `0..cascade_count`.
    pub cascade_index: usize,
    /// Total cascade count.
    pub cascade_count: usize,
    /// Split ratios of the first three cascades.
    pub ratios: Vec3,
    /// Tile edge length in pixels.
    pub tile_size: u32,
    /// Near-plane offset of the light.
    pub near_plane_offset: f32,
}

/// The culled view of the scene for one camera.
pub trait CullingResults {
    /// Lights visible to the camera, in the order the light arrays are filled.
    fn visible_lights(&self) -> &[VisibleLight];

    /// Bounds of the shadow casters affected by the light, or `None` if it has none.
    fn shadow_caster_bounds(&self, visible_light_index: usize) -> Option<Aabb>;

    /// Computes cascade matrices for a directional light, or `None` if the
    /// cascade cannot be fitted.
    fn compute_directional_shadow_matrices(
        &self,
        request: &CascadeRequest,
    ) -> Option<CascadeMatrices>;

    /// Per-object light index map: visible light index to shading index (`-1` = unused).
    fn light_index_map(&self) -> Vec<i32>;

    /// Replaces the per-object light index map.
    fn set_light_index_map(&mut self, map: Vec<i32>);
}

/// Produces culling results for cameras.
pub trait CullingProvider {
    /// Returns culling parameters for `camera`, or `None` if the camera cannot be culled
    /// (e.g. degenerate viewport).
    fn culling_parameters(&self, camera: &Camera) -> Option<CullingParameters>;

    /// Culls the scene for `camera`.
    fn cull(&mut self, camera: &Camera, parameters: &CullingParameters) -> Box<dyn CullingResults>;
}
