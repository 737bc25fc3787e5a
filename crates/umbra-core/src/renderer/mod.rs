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

//! Backend-agnostic rendering contracts for light and shadow preparation.
//!
//! This module defines the data the lanes exchange (light arrays, shadow frame
//! data, command buffers) and the traits of the external collaborators: the
//! culling system ([`CullingProvider`], [`CullingResults`]) and the GPU
//! backend ([`RenderBackend`]). The lanes in `umbra-lanes` and the agent in
//! `umbra-agents` only ever talk to these traits.

pub mod camera;
pub mod command;
pub mod culling;
pub mod drawing;
pub mod error;
pub mod frame;
pub mod light;
pub mod lighting;
pub mod settings;
pub mod shader_ids;
pub mod shadow;
pub mod texture;
pub mod traits;

pub use self::camera::{Camera, CameraKind, ClearFlags};
pub use self::command::{CommandBuffer, RenderCommand};
pub use self::culling::{
    CascadeMatrices, CascadeRequest, CullingParameters, CullingProvider, CullingResults,
    ShadowSplitData,
};
pub use self::drawing::{
    DrawingSettings, FilteringSettings, PerObjectData, RenderQueueRange, ShadowDrawingSettings,
    SortingCriteria,
};
pub use self::error::{RenderError, ResourceError};
pub use self::frame::FrameContext;
pub use self::light::{LightKind, LightShadows, VisibleLight};
pub use self::lighting::{LightArrays, MAX_VISIBLE_LIGHTS};
pub use self::settings::{
    CascadeBlendMode, DirectionalShadowSettings, LightingSettings, PipelineSettings,
    SettingsError, ShadowFilterMode, ShadowMapSize, ShadowSettings, MAX_CASCADES,
};
pub use self::shadow::{
    DepthConvention, ShadowFrameData, ShadowedDirectionalLight, MAX_SHADOWED_DIRECTIONAL_LIGHTS,
    MAX_SHADOW_TILES,
};
pub use self::texture::{
    FilterMode, LoadAction, RenderTextureFormat, RenderTextureId, StoreAction, TextureDescriptor,
};
pub use self::traits::RenderBackend;
