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

//! Defines the RenderAgent, the per-frame orchestrator of the light and shadow lanes.

use anyhow::Context;
use umbra_core::{
    lane::{ActiveCamera, Lane, LaneContext, PackedLightCount, Ref, Slot},
    math::LinearRgba,
    renderer::{
        Camera, CullingProvider, CullingResults, DepthConvention, FrameContext, PipelineSettings,
        RenderBackend,
    },
};
use umbra_lanes::{
    render_lane::{FallbackShaderDebugLane, ForwardDrawLane, LightPackingLane},
    shadow_lane::{release_shadow_resources, DirectionalShadowLane},
};

/// Summary of one [`RenderAgent::render`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Cameras that went through every lane.
    pub cameras_rendered: usize,
    /// Cameras skipped because they could not be culled.
    pub cameras_skipped: usize,
    /// Shadowed directional lights, summed over cameras.
    pub shadow_casters: usize,
    /// Lights written into the light arrays, summed over cameras.
    pub packed_lights: usize,
}

/// Per-camera numbers folded into the [`FrameReport`].
struct CameraStats {
    shadow_casters: usize,
    packed_lights: usize,
}

/// The agent responsible for rendering every camera of a frame.
pub struct RenderAgent {
    // GPU side: executes command buffers and performs draws.
    backend: Box<dyn RenderBackend>,
    // Scene side: produces culling results per camera.
    culling: Box<dyn CullingProvider>,
    // Scratch state reused by every camera.
    frame: FrameContext,
    // Sanitized configuration, fixed for the agent's lifetime.
    settings: PipelineSettings,
    // Clip-space depth direction of the backend.
    depth: DepthConvention,
    // Shadow, light and draw lanes, in execution order.
    lanes: Vec<Box<dyn Lane>>,
    // Optional post-pass run after the draw lanes.
    debug_lane: Option<Box<dyn Lane>>,
    // Report of the last render() call.
    last_report: FrameReport,
    // Total number of frames rendered since agent creation.
    frame_count: u64,
}

impl RenderAgent {
    /// Creates a new `RenderAgent`.
    ///
    /// Settings are sanitized once here. The fallback shader debug lane is
    /// installed in debug builds; see [`set_debug_lane`](Self::set_debug_lane).
    pub fn new(
        backend: Box<dyn RenderBackend>,
        culling: Box<dyn CullingProvider>,
        settings: PipelineSettings,
    ) -> Self {
        let debug_lane: Option<Box<dyn Lane>> = if cfg!(debug_assertions) {
            Some(Box::new(FallbackShaderDebugLane::new()))
        } else {
            None
        };

        Self {
            backend,
            culling,
            frame: FrameContext::new(),
            settings: settings.sanitized(),
            depth: DepthConvention::default(),
            lanes: vec![
                Box::new(DirectionalShadowLane::new()),
                Box::new(LightPackingLane::new()),
                Box::new(ForwardDrawLane::new()),
            ],
            debug_lane,
            last_report: FrameReport::default(),
            frame_count: 0,
        }
    }

    /// Sets the backend's depth convention. Defaults to [`DepthConvention::Standard`].
    pub fn with_depth_convention(mut self, depth: DepthConvention) -> Self {
        self.depth = depth;
        self
    }

    /// Replaces the debug post-pass. `None` disables it.
    pub fn set_debug_lane(&mut self, lane: Option<Box<dyn Lane>>) {
        self.debug_lane = lane;
    }

    /// Returns `true` if a debug post-pass is installed.
    pub fn has_debug_lane(&self) -> bool {
        self.debug_lane.is_some()
    }

    /// The sanitized settings in use.
    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// The depth convention passed to the shadow lane.
    pub fn depth_convention(&self) -> DepthConvention {
        self.depth
    }

    /// The report of the last frame.
    pub fn last_report(&self) -> FrameReport {
        self.last_report
    }

    /// Number of frames rendered so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Renders `cameras` in order.
    ///
    /// Cameras that cannot be culled are skipped with a warning. The first
    /// failing camera aborts the frame, after its shadow resources were
    /// released.
    pub fn render(&mut self, cameras: &[Camera]) -> anyhow::Result<FrameReport> {
        let mut report = FrameReport::default();

        self.clear_frame()?;

        for camera in cameras {
            let Some(mut parameters) = self.culling.culling_parameters(camera) else {
                log::warn!(
                    "RenderAgent: camera '{}' has no culling parameters, skipped",
                    camera.name
                );
                report.cameras_skipped += 1;
                continue;
            };
            parameters.shadow_distance = self.settings.shadows.max_distance.min(camera.far_clip);

            if camera.is_scene_view() {
                self.backend.emit_scene_view_geometry(camera);
            }

            let mut culling = self.culling.cull(camera, &parameters);
            self.frame.begin_camera();

            let rendered = self.render_camera(camera, culling.as_mut());
            let released = release_shadow_resources(&mut self.frame, self.backend.as_mut());

            if let (Err(_), Err(release_err)) = (&rendered, &released) {
                log::error!(
                    "RenderAgent: releasing shadow resources of failed camera '{}' also failed: {release_err}",
                    camera.name
                );
            }
            let stats =
                rendered.with_context(|| format!("failed to render camera '{}'", camera.name))?;
            released.with_context(|| {
                format!("failed to release shadow resources of camera '{}'", camera.name)
            })?;

            log::debug!(
                "RenderAgent: camera '{}' rendered with {} shadow casters and {} lights",
                camera.name,
                stats.shadow_casters,
                stats.packed_lights
            );
            report.cameras_rendered += 1;
            report.shadow_casters += stats.shadow_casters;
            report.packed_lights += stats.packed_lights;
        }

        self.frame_count += 1;
        self.last_report = report;
        Ok(report)
    }

    /// Clears depth and color of the frame's render target.
    fn clear_frame(&mut self) -> anyhow::Result<()> {
        let buffer = &mut self.frame.camera_buffer;
        buffer.clear_render_target(true, true, LinearRgba::TRANSPARENT);
        let result = self.backend.execute_command_buffer(buffer);
        buffer.clear();
        result.context("failed to clear the frame render target")
    }

    /// Runs the lanes for one culled camera, then submits.
    fn render_camera(
        &mut self,
        camera: &Camera,
        culling: &mut (dyn CullingResults + 'static),
    ) -> anyhow::Result<CameraStats> {
        let mut ctx = LaneContext::new();
        ctx.insert(ActiveCamera(camera.clone()));
        ctx.insert(Slot::new(&mut self.frame));
        ctx.insert(Slot::<dyn CullingResults>::new(culling));
        ctx.insert(Slot::<dyn RenderBackend>::new(self.backend.as_mut()));
        ctx.insert(Ref::new(&self.settings));
        ctx.insert(self.depth);

        for lane in self.lanes.iter().chain(self.debug_lane.iter()) {
            log::trace!(
                "RenderAgent: running {} lane '{}' (cost {:.2})",
                lane.lane_kind(),
                lane.strategy_name(),
                lane.estimate_cost(&ctx)
            );
            lane.execute(&mut ctx)
                .with_context(|| format!("{} lane failed", lane.strategy_name()))?;
        }

        let packed_lights = ctx.get::<PackedLightCount>().map_or(0, |count| count.0);
        drop(ctx);

        if let Err(err) = self.backend.submit() {
            log::error!("RenderAgent: submit failed for camera '{}': {err}", camera.name);
            return Err(err).context("submit failed");
        }

        Ok(CameraStats {
            shadow_casters: self.frame.shadows.caster_count(),
            packed_lights,
        })
    }
}
