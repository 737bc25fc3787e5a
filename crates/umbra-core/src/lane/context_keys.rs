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

//! Context key types for [`LaneContext`](super::LaneContext).
//!
//! Newtypes shared by the agent and the lanes.
//!
//! | Key                       | Written by   | Meaning                                   |
//! |---------------------------|--------------|-------------------------------------------|
//! | [`ActiveCamera`]          | agent        | Camera currently being rendered           |
//! | [`ResolvedPerObjectData`] | light lane   | Per-object data flags for the draw passes |
//! | [`PackedLightCount`]      | light lane   | Lights written into the light arrays      |
//!
//! Borrowed data travels as `Slot<FrameContext>`, `Slot<dyn CullingResults>`,
//! `Slot<dyn RenderBackend>`, `Ref<PipelineSettings>` and a plain
//! [`DepthConvention`](crate::renderer::DepthConvention).

use crate::renderer::{Camera, PerObjectData};

/// The camera being rendered.
#[derive(Debug, Clone)]
pub struct ActiveCamera(pub Camera);

/// Per-object data chosen for the camera's draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPerObjectData(pub PerObjectData);

/// Number of lights packed into the light arrays for the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedLightCount(pub usize);
