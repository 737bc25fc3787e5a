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

//! Camera description consumed by the frame orchestrator.

/// Where a camera renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CameraKind {
    /// A regular in-game camera.
    #[default]
    Game,
    /// The editor scene view; world geometry for it must be emitted before culling.
    SceneView,
    /// Asset preview cameras.
    Preview,
}

/// How a camera clears its target before drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClearFlags {
    /// Clear depth and draw the skybox behind everything.
    #[default]
    Skybox,
    /// Clear to a solid color.
    SolidColor,
    /// Clear depth only.
    Depth,
    /// Don't clear.
    Nothing,
}

/// A camera to be rendered this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Name used in logs and frame reports.
    pub name: String,
    /// Camera kind.
    pub kind: CameraKind,
    /// Clear behaviour.
    pub clear_flags: ClearFlags,
    /// Near clip plane distance.
    pub near_clip: f32,
    /// Far clip plane distance. Shadow distance never exceeds it.
    pub far_clip: f32,
}

impl Camera {
    /// Creates a game camera with default clip planes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: CameraKind::Game,
            clear_flags: ClearFlags::Skybox,
            near_clip: 0.3,
            far_clip: 1000.0,
        }
    }

    /// Sets the camera kind.
    pub fn with_kind(mut self, kind: CameraKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the clear flags.
    pub fn with_clear_flags(mut self, clear_flags: ClearFlags) -> Self {
        self.clear_flags = clear_flags;
        self
    }

    /// Sets the far clip distance.
    pub fn with_far_clip(mut self, far_clip: f32) -> Self {
        self.far_clip = far_clip;
        self
    }

    /// Returns `true` for the editor scene view.
    #[inline]
    pub fn is_scene_view(&self) -> bool {
        self.kind == CameraKind::SceneView
    }
}
