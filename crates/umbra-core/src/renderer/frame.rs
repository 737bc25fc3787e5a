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

//! Per-frame mutable state shared by the lanes of one camera.

use crate::renderer::command::CommandBuffer;
use crate::renderer::lighting::LightArrays;
use crate::renderer::shadow::ShadowFrameData;

/// Name of the camera command buffer.
pub const CAMERA_BUFFER_NAME: &str = "Render Buffer";
/// Name of the shadow command buffer.
pub const SHADOW_BUFFER_NAME: &str = "Render Shadows";

/// Scratch state owned by the frame orchestrator and lent to lanes per camera.
#[derive(Debug, Clone)]
pub struct FrameContext {
    /// Visible light arrays.
    pub lights: LightArrays,
    /// Directional shadow state.
    pub shadows: ShadowFrameData,
    /// Camera-level command buffer.
    pub camera_buffer: CommandBuffer,
    /// Shadow rendering command buffer.
    pub shadow_buffer: CommandBuffer,
}

impl FrameContext {
    /// Creates an empty context with named buffers.
    pub fn new() -> Self {
        Self {
            lights: LightArrays::new(),
            shadows: ShadowFrameData::new(),
            camera_buffer: CommandBuffer::new(CAMERA_BUFFER_NAME),
            shadow_buffer: CommandBuffer::new(SHADOW_BUFFER_NAME),
        }
    }

    /// Discards recorded commands and light data left by a previous camera.
    pub fn begin_camera(&mut self) {
        self.lights.clear();
        self.camera_buffer.clear();
        self.shadow_buffer.clear();
    }
}

impl Default for FrameContext {
    fn default() -> Self {
        Self::new()
    }
}
