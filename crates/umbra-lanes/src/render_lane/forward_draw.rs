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

//! Issues the camera's forward draws: opaque, skybox, transparent.
//!
//! The lane does not render anything itself. It describes each pass to the
//! backend with the forward shader passes, the per-object data resolved by the
//! light packing lane, and the batching switches from the pipeline settings.

use crate::error::DrawError;
use umbra_core::{
    lane::{ActiveCamera, Lane, LaneContext, LaneError, LaneKind, Ref, ResolvedPerObjectData, Slot},
    renderer::{
        shader_ids, ClearFlags, CullingResults, DrawingSettings, FilteringSettings, PerObjectData,
        PipelineSettings, RenderBackend, RenderError, RenderQueueRange, SortingCriteria,
    },
};

/// Cost multiplier per visible light, used by [`Lane::estimate_cost`].
const LIGHT_COST_FACTOR: f32 = 0.05;

/// Builds drawing settings for the forward passes.
pub fn forward_drawing_settings(
    settings: &PipelineSettings,
    per_object_data: PerObjectData,
    sorting: SortingCriteria,
) -> DrawingSettings {
    DrawingSettings {
        per_object_data,
        enable_dynamic_batching: settings.dynamic_batching,
        enable_instancing: settings.gpu_instancing,
        ..DrawingSettings::new(&shader_ids::FORWARD_PASSES, sorting)
    }
}

fn draw_error(pass: &'static str) -> impl FnOnce(RenderError) -> DrawError {
    move |source| DrawError::Pass { pass, source }
}

/// Sets up camera properties and draws opaque geometry, the skybox and
/// transparent geometry, in that order.
#[derive(Debug, Default)]
pub struct ForwardDrawLane;

impl ForwardDrawLane {
    /// Creates a new `ForwardDrawLane`.
    pub fn new() -> Self {
        Self
    }
}

impl Lane for ForwardDrawLane {
    fn strategy_name(&self) -> &'static str {
        "ForwardDraw"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Render
    }

    fn estimate_cost(&self, ctx: &LaneContext) -> f32 {
        let lights = ctx
            .get::<Slot<dyn CullingResults>>()
            .map(|slot| slot.get_ref().visible_lights().len())
            .unwrap_or(0);
        1.0 + LIGHT_COST_FACTOR * lights as f32
    }

    fn execute(&self, ctx: &mut LaneContext) -> Result<(), LaneError> {
        let camera = &ctx
            .get::<ActiveCamera>()
            .ok_or(LaneError::missing("ActiveCamera"))?
            .0;
        let per_object = ctx
            .get::<ResolvedPerObjectData>()
            .ok_or(LaneError::missing("ResolvedPerObjectData"))?
            .0;
        let settings = ctx
            .get::<Ref<PipelineSettings>>()
            .ok_or(LaneError::missing("Ref<PipelineSettings>"))?
            .get();
        let culling = ctx
            .get::<Slot<dyn CullingResults>>()
            .ok_or(LaneError::missing("Slot<dyn CullingResults>"))?
            .get_ref();
        let backend = ctx
            .get::<Slot<dyn RenderBackend>>()
            .ok_or(LaneError::missing("Slot<dyn RenderBackend>"))?
            .get();

        backend
            .setup_camera_properties(camera)
            .map_err(draw_error("camera setup"))?;

        let opaque = forward_drawing_settings(settings, per_object, SortingCriteria::CommonOpaque);
        backend
            .draw_renderers(
                culling,
                &opaque,
                &FilteringSettings::new(RenderQueueRange::OPAQUE),
            )
            .map_err(draw_error("opaque draw"))?;

        if camera.clear_flags == ClearFlags::Skybox && backend.has_skybox(camera) {
            backend.draw_skybox(camera).map_err(draw_error("skybox draw"))?;
        }

        let transparent =
            forward_drawing_settings(settings, per_object, SortingCriteria::CommonTransparent);
        backend
            .draw_renderers(
                culling,
                &transparent,
                &FilteringSettings::new(RenderQueueRange::TRANSPARENT),
            )
            .map_err(draw_error("transparent draw"))?;

        log::trace!("ForwardDrawLane: drew camera '{}'", camera.name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockBackend, MockCulling};
    use umbra_core::renderer::Camera;

    #[test]
    fn forward_settings_follow_pipeline_switches() {
        let mut settings = PipelineSettings::default();
        settings.dynamic_batching = true;
        settings.gpu_instancing = false;

        let drawing = forward_drawing_settings(
            &settings,
            PerObjectData::LIGHT_DATA,
            SortingCriteria::CommonTransparent,
        );
        assert_eq!(drawing.shader_passes, vec!["SRPDefaultUnlit", "UmbraLightMode"]);
        assert_eq!(drawing.sorting, SortingCriteria::CommonTransparent);
        assert_eq!(drawing.per_object_data, PerObjectData::LIGHT_DATA);
        assert!(drawing.enable_dynamic_batching);
        assert!(!drawing.enable_instancing);
        assert!(drawing.override_shader.is_none());
    }

    fn run_lane(camera: Camera, skybox_available: bool) -> MockBackend {
        let mut culling = MockCulling::new(Vec::new());
        let mut backend = MockBackend {
            skybox_available,
            ..Default::default()
        };
        let settings = PipelineSettings::default();

        let mut ctx = LaneContext::new();
        ctx.insert(ActiveCamera(camera));
        ctx.insert(ResolvedPerObjectData(PerObjectData::NONE));
        ctx.insert(Slot::<dyn CullingResults>::new(&mut culling));
        ctx.insert(Slot::<dyn RenderBackend>::new(&mut backend));
        ctx.insert(Ref::new(&settings));
        ForwardDrawLane::new().execute(&mut ctx).unwrap();
        drop(ctx);
        backend
    }

    #[test]
    fn lane_draws_opaque_then_transparent() {
        let backend = run_lane(Camera::new("Main"), true);
        assert_eq!(backend.camera_setups, 1);
        assert_eq!(backend.skybox_draws, 1);
        let queues: Vec<_> = backend.draws.iter().map(|(_, f)| f.queue_range).collect();
        assert_eq!(queues, vec![RenderQueueRange::OPAQUE, RenderQueueRange::TRANSPARENT]);
        assert_eq!(backend.draws[0].0.sorting, SortingCriteria::CommonOpaque);
    }

    #[test]
    fn skybox_needs_skybox_clear_flags() {
        let camera = Camera::new("Main").with_clear_flags(ClearFlags::SolidColor);
        assert_eq!(run_lane(camera, true).skybox_draws, 0);
        assert_eq!(run_lane(Camera::new("Main"), false).skybox_draws, 0);
    }
}

