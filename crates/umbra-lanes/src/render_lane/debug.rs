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

//! Highlights renderers that only provide legacy shader passes.

use crate::error::DrawError;
use umbra_core::{
    lane::{Lane, LaneContext, LaneError, LaneKind, Slot},
    renderer::{
        shader_ids, CullingResults, DrawingSettings, FilteringSettings, RenderBackend,
        RenderQueueRange, SortingCriteria,
    },
};

/// Draws every renderer matching a legacy pass (`ForwardBase`, `PrepassBase`)
/// with the error shader, so unsupported materials stand out.
///
/// Runs after the transparent pass. The render agent installs it by default in
/// debug builds.
#[derive(Debug, Clone)]
pub struct FallbackShaderDebugLane {
    /// Shader substituted for every matched pass.
    pub error_shader: String,
}

impl Default for FallbackShaderDebugLane {
    fn default() -> Self {
        Self {
            error_shader: shader_ids::ERROR_SHADER.to_string(),
        }
    }
}

impl FallbackShaderDebugLane {
    /// Creates a new `FallbackShaderDebugLane` using the built-in error shader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drawing settings for the legacy passes with the error shader override.
    pub fn drawing_settings(&self) -> DrawingSettings {
        DrawingSettings {
            override_shader: Some(self.error_shader.clone()),
            ..DrawingSettings::new(&shader_ids::LEGACY_PASSES, SortingCriteria::Unsorted)
        }
    }
}

impl Lane for FallbackShaderDebugLane {
    fn strategy_name(&self) -> &'static str {
        "FallbackShaderDebug"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Debug
    }

    fn execute(&self, ctx: &mut LaneContext) -> Result<(), LaneError> {
        let culling = ctx
            .get::<Slot<dyn CullingResults>>()
            .ok_or(LaneError::missing("Slot<dyn CullingResults>"))?
            .get_ref();
        let backend = ctx
            .get::<Slot<dyn RenderBackend>>()
            .ok_or(LaneError::missing("Slot<dyn RenderBackend>"))?
            .get();

        backend
            .draw_renderers(
                culling,
                &self.drawing_settings(),
                &FilteringSettings::new(RenderQueueRange::ALL),
            )
            .map_err(|source| DrawError::Pass {
                pass: "fallback shader debug draw",
                source,
            })?;
        Ok(())
    }
}
