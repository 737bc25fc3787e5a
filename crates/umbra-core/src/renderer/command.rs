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

//! A recorded list of state changes and global uniform writes.
//!
//! Lanes record into a [`CommandBuffer`], hand it to
//! [`RenderBackend::execute_command_buffer`](super::traits::RenderBackend::execute_command_buffer)
//! and then [`clear`](CommandBuffer::clear) it for reuse. Recording never fails;
//! only execution can.

use crate::math::{LinearRgba, Mat4, Rect, Vec4};
use crate::renderer::texture::{LoadAction, RenderTextureId, StoreAction};

/// A single recorded command.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Bind a render target for subsequent draws.
    SetRenderTarget {
        /// Target texture.
        target: RenderTextureId,
        /// Load action for existing contents.
        load: LoadAction,
        /// Store action at pass end.
        store: StoreAction,
    },
    /// Clear the bound target.
    ClearRenderTarget {
        /// Clear the depth buffer.
        clear_depth: bool,
        /// Clear the color buffer.
        clear_color: bool,
        /// Clear color, used when `clear_color` is set.
        color: LinearRgba,
    },
    /// Restrict rasterization to a pixel rectangle.
    SetViewport(Rect),
    /// Set the view and projection matrices for subsequent draws.
    SetViewProjectionMatrices {
        /// World-to-view matrix.
        view: Mat4,
        /// View-to-clip matrix.
        projection: Mat4,
    },
    /// Set the global depth bias for subsequent draws.
    SetGlobalDepthBias {
        /// Constant bias.
        bias: f32,
        /// Slope-scaled bias.
        slope_bias: f32,
    },
    /// Set a global integer uniform.
    SetGlobalInt {
        /// Binding name.
        name: String,
        /// Value.
        value: i32,
    },
    /// Set a global vector uniform.
    SetGlobalVector {
        /// Binding name.
        name: String,
        /// Value.
        value: Vec4,
    },
    /// Set a global vector array uniform.
    SetGlobalVectorArray {
        /// Binding name.
        name: String,
        /// Values.
        values: Vec<Vec4>,
    },
    /// Set a global matrix array uniform.
    SetGlobalMatrixArray {
        /// Binding name.
        name: String,
        /// Values.
        values: Vec<Mat4>,
    },
    /// Bind a texture globally.
    SetGlobalTexture {
        /// Binding name.
        name: String,
        /// Texture handle.
        texture: RenderTextureId,
    },
    /// Enable a shader keyword globally.
    EnableKeyword(String),
    /// Disable a shader keyword globally.
    DisableKeyword(String),
}

/// A named, reusable list of [`RenderCommand`]s.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandBuffer {
    name: String,
    commands: Vec<RenderCommand>,
}

impl CommandBuffer {
    /// Creates an empty command buffer.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commands: Vec::new(),
        }
    }

    /// The buffer's name, shown in backend captures and errors.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The commands recorded so far.
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Number of recorded commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if nothing is recorded.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drops every recorded command.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Records a render target bind.
    pub fn set_render_target(
        &mut self,
        target: RenderTextureId,
        load: LoadAction,
        store: StoreAction,
    ) {
        self.commands.push(RenderCommand::SetRenderTarget {
            target,
            load,
            store,
        });
    }

    /// Records a clear of the bound target.
    pub fn clear_render_target(&mut self, clear_depth: bool, clear_color: bool, color: LinearRgba) {
        self.commands.push(RenderCommand::ClearRenderTarget {
            clear_depth,
            clear_color,
            color,
        });
    }

    /// Records a viewport change.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.commands.push(RenderCommand::SetViewport(viewport));
    }

    /// Records a view/projection change.
    pub fn set_view_projection_matrices(&mut self, view: Mat4, projection: Mat4) {
        self.commands
            .push(RenderCommand::SetViewProjectionMatrices { view, projection });
    }

    /// Records a global depth bias change.
    pub fn set_global_depth_bias(&mut self, bias: f32, slope_bias: f32) {
        self.commands
            .push(RenderCommand::SetGlobalDepthBias { bias, slope_bias });
    }

    /// Records a global integer write.
    pub fn set_global_int(&mut self, name: &str, value: i32) {
        self.commands.push(RenderCommand::SetGlobalInt {
            name: name.to_string(),
            value,
        });
    }

    /// Records a global vector write.
    pub fn set_global_vector(&mut self, name: &str, value: Vec4) {
        self.commands.push(RenderCommand::SetGlobalVector {
            name: name.to_string(),
            value,
        });
    }

    /// Records a global vector array write. The values are copied.
    pub fn set_global_vector_array(&mut self, name: &str, values: &[Vec4]) {
        self.commands.push(RenderCommand::SetGlobalVectorArray {
            name: name.to_string(),
            values: values.to_vec(),
        });
    }

    /// Records a global matrix array write. The values are copied.
    pub fn set_global_matrix_array(&mut self, name: &str, values: &[Mat4]) {
        self.commands.push(RenderCommand::SetGlobalMatrixArray {
            name: name.to_string(),
            values: values.to_vec(),
        });
    }

    /// Records a global texture bind.
    pub fn set_global_texture(&mut self, name: &str, texture: RenderTextureId) {
        self.commands.push(RenderCommand::SetGlobalTexture {
            name: name.to_string(),
            texture,
        });
    }

    /// Records a keyword enable.
    pub fn enable_keyword(&mut self, keyword: &str) {
        self.commands
            .push(RenderCommand::EnableKeyword(keyword.to_string()));
    }

    /// Records a keyword disable.
    pub fn disable_keyword(&mut self, keyword: &str) {
        self.commands
            .push(RenderCommand::DisableKeyword(keyword.to_string()));
    }

    /// Records an enable or disable depending on `enabled`.
    pub fn set_keyword(&mut self, keyword: &str, enabled: bool) {
        if enabled {
            self.enable_keyword(keyword);
        } else {
            self.disable_keyword(keyword);
        }
    }
}
