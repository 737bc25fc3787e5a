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

//! Test doubles shared by the lane tests.

use std::cell::RefCell;
use umbra_core::{
    math::{Aabb, Mat4, Vec3, Vec4},
    renderer::{
        Camera, CascadeMatrices, CascadeRequest, CommandBuffer, CullingResults, DrawingSettings,
        FilteringSettings, RenderBackend, RenderCommand, RenderError, RenderTextureId,
        ResourceError, ShadowDrawingSettings, ShadowSplitData, TextureDescriptor, VisibleLight,
    },
};

/// Culling results with caster bounds for every light unless listed otherwise.
pub struct MockCulling {
    pub lights: Vec<VisibleLight>,
    pub without_casters: Vec<usize>,
    pub missing_cascades: Vec<(usize, usize)>,
    pub requests: RefCell<Vec<CascadeRequest>>,
    pub index_map: Vec<i32>,
}

impl MockCulling {
    pub fn new(lights: Vec<VisibleLight>) -> Self {
        Self {
            lights,
            without_casters: Vec::new(),
            missing_cascades: Vec::new(),
            requests: RefCell::new(Vec::new()),
            index_map: Vec::new(),
        }
    }

    /// Sphere radius handed out for a cascade.
    pub fn sphere_radius(cascade_index: usize) -> f32 {
        10.0 * (cascade_index as f32 + 1.0)
    }
}

impl CullingResults for MockCulling {
    fn visible_lights(&self) -> &[VisibleLight] {
        &self.lights
    }

    fn shadow_caster_bounds(&self, visible_light_index: usize) -> Option<Aabb> {
        if self.without_casters.contains(&visible_light_index) {
            None
        } else {
            Some(Aabb::from_min_max(Vec3::new(-1.0, -1.0, -1.0), Vec3::ONE))
        }
    }

    fn compute_directional_shadow_matrices(
        &self,
        request: &CascadeRequest,
    ) -> Option<CascadeMatrices> {
        self.requests.borrow_mut().push(*request);
        if self
            .missing_cascades
            .contains(&(request.light_index, request.cascade_index))
        {
            return None;
        }
        Some(CascadeMatrices {
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            split_data: ShadowSplitData {
                culling_sphere: Vec4::new(0.0, 0.0, 0.0, Self::sphere_radius(request.cascade_index)),
                shadow_cascade_blend_culling_factor: 0.5,
            },
        })
    }

    fn light_index_map(&self) -> Vec<i32> {
        self.index_map.clone()
    }

    fn set_light_index_map(&mut self, map: Vec<i32>) {
        self.index_map = map;
    }
}

/// Records what the lanes ask of the backend.
#[derive(Default)]
pub struct MockBackend {
    pub executed: Vec<(String, Vec<RenderCommand>)>,
    pub acquired: Vec<TextureDescriptor>,
    pub released: Vec<RenderTextureId>,
    pub shadow_draws: Vec<ShadowDrawingSettings>,
    pub draws: Vec<(DrawingSettings, FilteringSettings)>,
    pub camera_setups: usize,
    pub skybox_available: bool,
    pub skybox_draws: usize,
    pub fail_allocation: bool,
}

impl RenderBackend for MockBackend {
    fn execute_command_buffer(&mut self, buffer: &CommandBuffer) -> Result<(), RenderError> {
        self.executed
            .push((buffer.name().to_string(), buffer.commands().to_vec()));
        Ok(())
    }

    fn get_temporary_texture(
        &mut self,
        descriptor: &TextureDescriptor,
    ) -> Result<RenderTextureId, RenderError> {
        if self.fail_allocation {
            return Err(ResourceError::TextureAllocationFailed {
                size: descriptor.width,
                reason: "out of memory".into(),
            }
            .into());
        }
        self.acquired.push(*descriptor);
        Ok(RenderTextureId(self.acquired.len() as u64))
    }

    fn release_temporary_texture(&mut self, texture: RenderTextureId) -> Result<(), RenderError> {
        self.released.push(texture);
        Ok(())
    }

    fn draw_shadows(
        &mut self,
        _culling: &dyn CullingResults,
        settings: &ShadowDrawingSettings,
    ) -> Result<(), RenderError> {
        self.shadow_draws.push(*settings);
        Ok(())
    }

    fn setup_camera_properties(&mut self, _camera: &Camera) -> Result<(), RenderError> {
        self.camera_setups += 1;
        Ok(())
    }

    fn draw_renderers(
        &mut self,
        _culling: &dyn CullingResults,
        drawing: &DrawingSettings,
        filtering: &FilteringSettings,
    ) -> Result<(), RenderError> {
        self.draws.push((drawing.clone(), *filtering));
        Ok(())
    }

    fn has_skybox(&self, _camera: &Camera) -> bool {
        self.skybox_available
    }

    fn draw_skybox(&mut self, _camera: &Camera) -> Result<(), RenderError> {
        self.skybox_draws += 1;
        Ok(())
    }

    fn emit_scene_view_geometry(&mut self, _camera: &Camera) {}

    fn submit(&mut self) -> Result<(), RenderError> {
        Ok(())
    }
}
