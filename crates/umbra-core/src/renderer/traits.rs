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

//! The backend contract.

use crate::renderer::camera::Camera;
use crate::renderer::command::CommandBuffer;
use crate::renderer::culling::CullingResults;
use crate::renderer::drawing::{DrawingSettings, FilteringSettings, ShadowDrawingSettings};
use crate::renderer::error::RenderError;
use crate::renderer::texture::{RenderTextureId, TextureDescriptor};

/// The GPU-facing side of the pipeline.
///
/// A backend executes recorded command buffers, owns temporary textures and
/// performs the actual draws. All calls are synchronous from the pipeline's
/// point of view; work is queued, never awaited.
pub trait RenderBackend {
    /// Executes the recorded commands. The buffer is not cleared.
    fn execute_command_buffer(&mut self, buffer: &CommandBuffer) -> Result<(), RenderError>;

    /// Allocates a temporary render texture.
    fn get_temporary_texture(
        &mut self,
        descriptor: &TextureDescriptor,
    ) -> Result<RenderTextureId, RenderError>;

    /// Releases a texture obtained from [`get_temporary_texture`](Self::get_temporary_texture).
    fn release_temporary_texture(&mut self, texture: RenderTextureId) -> Result<(), RenderError>;

    /// Draws the shadow casters of one light for one cascade into the bound target.
    fn draw_shadows(
        &mut self,
        culling: &dyn CullingResults,
        settings: &ShadowDrawingSettings,
    ) -> Result<(), RenderError>;

    /// Binds the camera's view, projection and per-camera globals.
    fn setup_camera_properties(&mut self, camera: &Camera) -> Result<(), RenderError>;

    /// Draws visible renderers.
    fn draw_renderers(
        &mut self,
        culling: &dyn CullingResults,
        drawing: &DrawingSettings,
        filtering: &FilteringSettings,
    ) -> Result<(), RenderError>;

    /// Returns `true` if a skybox is available for the camera.
    fn has_skybox(&self, camera: &Camera) -> bool;

    /// Draws the skybox.
    fn draw_skybox(&mut self, camera: &Camera) -> Result<(), RenderError>;

    /// Emits editor-only world geometry (gizmos, UI) for a scene view camera.
    /// Called before culling.
    fn emit_scene_view_geometry(&mut self, camera: &Camera);

    /// Submits all queued work for the camera.
    fn submit(&mut self) -> Result<(), RenderError>;
}
