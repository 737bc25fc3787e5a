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

//! Integration tests for the per-camera frame sequence of the RenderAgent.

use approx::assert_relative_eq;
use std::sync::{Arc, Mutex};
use umbra_agents::render_agent::{FrameReport, RenderAgent};
use umbra_core::{
    math::{Aabb, LinearRgba, Mat4, Vec3, Vec4},
    renderer::{
        Camera, CameraKind, CascadeMatrices, CascadeRequest, ClearFlags, CommandBuffer,
        CullingParameters, CullingProvider, CullingResults, DrawingSettings, FilteringSettings,
        LightShadows, PipelineSettings, RenderBackend, RenderCommand, RenderError,
        RenderQueueRange, RenderTextureId, ShadowDrawingSettings, ShadowSplitData,
        TextureDescriptor, VisibleLight,
    },
};
use umbra_lanes::render_lane::FallbackShaderDebugLane;

// --- Test Setup: a shared event log fed by both collaborators ---

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Cull(String, CullingParameters),
    SceneViewGeometry(String),
    Execute(String, Vec<RenderCommand>),
    Acquire(TextureDescriptor),
    Release(RenderTextureId),
    DrawShadows(usize),
    SetupCamera(String),
    Draw(DrawingSettings, FilteringSettings),
    Skybox,
    Submit,
}

type Log = Arc<Mutex<Vec<Event>>>;

struct SceneCulling {
    lights: Vec<VisibleLight>,
    index_map: Vec<i32>,
}

impl CullingResults for SceneCulling {
    fn visible_lights(&self) -> &[VisibleLight] {
        &self.lights
    }

    fn shadow_caster_bounds(&self, _visible_light_index: usize) -> Option<Aabb> {
        Some(Aabb::from_min_max(Vec3::new(-5.0, 0.0, -5.0), Vec3::new(5.0, 2.0, 5.0)))
    }

    fn compute_directional_shadow_matrices(
        &self,
        _request: &CascadeRequest,
    ) -> Option<CascadeMatrices> {
        Some(CascadeMatrices {
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            split_data: ShadowSplitData {
                culling_sphere: Vec4::new(0.0, 0.0, 0.0, 20.0),
                shadow_cascade_blend_culling_factor: 0.0,
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

struct SceneProvider {
    log: Log,
    lights: Vec<VisibleLight>,
    uncullable: Vec<String>,
}

impl CullingProvider for SceneProvider {
    fn culling_parameters(&self, camera: &Camera) -> Option<CullingParameters> {
        if self.uncullable.contains(&camera.name) {
            None
        } else {
            Some(CullingParameters::default())
        }
    }

    fn cull(&mut self, camera: &Camera, parameters: &CullingParameters) -> Box<dyn CullingResults> {
        self.log
            .lock()
            .unwrap()
            .push(Event::Cull(camera.name.clone(), *parameters));
        Box::new(SceneCulling {
            lights: self.lights.clone(),
            index_map: (0..self.lights.len() as i32).collect(),
        })
    }
}

struct RecordingBackend {
    log: Log,
    next_texture: u64,
    skybox: bool,
    fail_opaque: bool,
}

impl RecordingBackend {
    fn push(&self, event: Event) {
        self.log.lock().unwrap().push(event);
    }
}

impl RenderBackend for RecordingBackend {
    fn execute_command_buffer(&mut self, buffer: &CommandBuffer) -> Result<(), RenderError> {
        self.push(Event::Execute(
            buffer.name().to_string(),
            buffer.commands().to_vec(),
        ));
        Ok(())
    }

    fn get_temporary_texture(
        &mut self,
        descriptor: &TextureDescriptor,
    ) -> Result<RenderTextureId, RenderError> {
        self.next_texture += 1;
        self.push(Event::Acquire(*descriptor));
        Ok(RenderTextureId(self.next_texture))
    }

    fn release_temporary_texture(&mut self, texture: RenderTextureId) -> Result<(), RenderError> {
        self.push(Event::Release(texture));
        Ok(())
    }

    fn draw_shadows(
        &mut self,
        _culling: &dyn CullingResults,
        settings: &ShadowDrawingSettings,
    ) -> Result<(), RenderError> {
        self.push(Event::DrawShadows(settings.light_index));
        Ok(())
    }

    fn setup_camera_properties(&mut self, camera: &Camera) -> Result<(), RenderError> {
        self.push(Event::SetupCamera(camera.name.clone()));
        Ok(())
    }

    fn draw_renderers(
        &mut self,
        _culling: &dyn CullingResults,
        drawing: &DrawingSettings,
        filtering: &FilteringSettings,
    ) -> Result<(), RenderError> {
        if self.fail_opaque && filtering.queue_range == RenderQueueRange::OPAQUE {
            return Err(RenderError::DrawFailed("opaque queue rejected".into()));
        }
        self.push(Event::Draw(drawing.clone(), *filtering));
        Ok(())
    }

    fn has_skybox(&self, _camera: &Camera) -> bool {
        self.skybox
    }

    fn draw_skybox(&mut self, _camera: &Camera) -> Result<(), RenderError> {
        self.push(Event::Skybox);
        Ok(())
    }

    fn emit_scene_view_geometry(&mut self, camera: &Camera) {
        self.push(Event::SceneViewGeometry(camera.name.clone()));
    }

    fn submit(&mut self) -> Result<(), RenderError> {
        self.push(Event::Submit);
        Ok(())
    }
}

struct Harness {
    log: Log,
    lights: Vec<VisibleLight>,
    uncullable: Vec<String>,
    skybox: bool,
    fail_opaque: bool,
    settings: PipelineSettings,
}

impl Harness {
    fn new(lights: Vec<VisibleLight>) -> Self {
        Self {
            log: Arc::new(Mutex::new(Vec::new())),
            lights,
            uncullable: Vec::new(),
            skybox: true,
            fail_opaque: false,
            settings: PipelineSettings::default(),
        }
    }

    fn agent(&self) -> RenderAgent {
        let backend = RecordingBackend {
            log: self.log.clone(),
            next_texture: 0,
            skybox: self.skybox,
            fail_opaque: self.fail_opaque,
        };
        let provider = SceneProvider {
            log: self.log.clone(),
            lights: self.lights.clone(),
            uncullable: self.uncullable.clone(),
        };
        let mut agent = RenderAgent::new(Box::new(backend), Box::new(provider), self.settings.clone());
        agent.set_debug_lane(None);
        agent
    }

    fn events(&self) -> Vec<Event> {
        self.log.lock().unwrap().clone()
    }
}

fn shadowed_sun() -> VisibleLight {
    VisibleLight::directional(Mat4::from_rotation_x(-0.8), LinearRgba::WHITE)
        .with_shadows(LightShadows::Soft, 1.0)
}

fn position(events: &[Event], pred: impl Fn(&Event) -> bool) -> usize {
    events
        .iter()
        .position(pred)
        .expect("event not recorded")
}

fn is_draw(queue: RenderQueueRange) -> impl Fn(&Event) -> bool {
    move |e| matches!(e, Event::Draw(_, f) if f.queue_range == queue)
}

// ---

#[test]
fn test_camera_steps_run_in_order() {
    let harness = Harness::new(vec![
        shadowed_sun(),
        VisibleLight::point(Vec3::new(0.0, 2.0, 0.0), 8.0, LinearRgba::rgb(1.0, 0.5, 0.2)),
    ]);
    let mut agent = harness.agent();

    let report = agent.render(&[Camera::new("Main")]).unwrap();
    assert_eq!(
        report,
        FrameReport {
            cameras_rendered: 1,
            cameras_skipped: 0,
            shadow_casters: 1,
            packed_lights: 2,
        }
    );

    let events = harness.events();
    assert!(matches!(
        &events[0],
        Event::Execute(name, cmds) if name == "Render Buffer"
            && cmds == &[RenderCommand::ClearRenderTarget {
                clear_depth: true,
                clear_color: true,
                color: LinearRgba::TRANSPARENT,
            }]
    ));

    let cull = position(&events, |e| matches!(e, Event::Cull(..)));
    let acquire = position(&events, |e| matches!(e, Event::Acquire(_)));
    let first_shadow_draw = position(&events, |e| matches!(e, Event::DrawShadows(0)));
    let light_upload = position(&events, |e| {
        matches!(e, Event::Execute(name, cmds) if name == "Render Buffer"
            && cmds.iter().any(|c| matches!(c, RenderCommand::SetGlobalVectorArray { name, .. } if name == "_VisibleLightColors")))
    });
    let setup = position(&events, |e| matches!(e, Event::SetupCamera(_)));
    let opaque = position(&events, is_draw(RenderQueueRange::OPAQUE));
    let skybox = position(&events, |e| matches!(e, Event::Skybox));
    let transparent = position(&events, is_draw(RenderQueueRange::TRANSPARENT));
    let submit = position(&events, |e| matches!(e, Event::Submit));
    let release = position(&events, |e| matches!(e, Event::Release(_)));

    let order = [
        cull,
        acquire,
        first_shadow_draw,
        light_upload,
        setup,
        opaque,
        skybox,
        transparent,
        submit,
        release,
    ];
    assert!(order.windows(2).all(|w| w[0] < w[1]), "unexpected order: {order:?}");

    // Four cascades of the single caster.
    let shadow_draws = events
        .iter()
        .filter(|e| matches!(e, Event::DrawShadows(_)))
        .count();
    assert_eq!(shadow_draws, 4);
}

#[test]
fn test_forward_draws_use_lit_passes_and_settings() {
    let mut harness = Harness::new(vec![shadowed_sun()]);
    harness.settings.dynamic_batching = true;
    let mut agent = harness.agent();
    agent.render(&[Camera::new("Main")]).unwrap();

    let events = harness.events();
    let Event::Draw(opaque, _) = &events[position(&events, is_draw(RenderQueueRange::OPAQUE))]
    else {
        unreachable!()
    };
    assert_eq!(opaque.shader_passes, vec!["SRPDefaultUnlit", "UmbraLightMode"]);
    assert!(opaque.enable_dynamic_batching);
    assert!(opaque.enable_instancing);
    assert!(!opaque.per_object_data.is_empty());
}

#[test]
fn test_shadow_distance_is_clamped_to_far_plane() {
    let harness = Harness::new(Vec::new());
    let mut agent = harness.agent();
    agent
        .render(&[
            Camera::new("Near").with_far_clip(50.0),
            Camera::new("Far").with_far_clip(1000.0),
        ])
        .unwrap();

    let distances: Vec<(String, f32)> = harness
        .events()
        .into_iter()
        .filter_map(|e| match e {
            Event::Cull(name, params) => Some((name, params.shadow_distance)),
            _ => None,
        })
        .collect();
    let names: Vec<&str> = distances.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["Near", "Far"]);
    assert_relative_eq!(distances[0].1, 50.0);
    assert_relative_eq!(distances[1].1, 100.0);
}

#[test]
fn test_uncullable_camera_is_skipped() {
    let mut harness = Harness::new(vec![shadowed_sun()]);
    harness.uncullable.push("Broken".into());
    let mut agent = harness.agent();

    let report = agent
        .render(&[Camera::new("Broken"), Camera::new("Main")])
        .unwrap();
    assert_eq!(report.cameras_skipped, 1);
    assert_eq!(report.cameras_rendered, 1);

    let setups: Vec<Event> = harness
        .events()
        .into_iter()
        .filter(|e| matches!(e, Event::SetupCamera(_)))
        .collect();
    assert_eq!(setups, vec![Event::SetupCamera("Main".into())]);
}

#[test]
fn test_scene_view_geometry_is_emitted_before_culling() {
    let harness = Harness::new(Vec::new());
    let mut agent = harness.agent();
    agent
        .render(&[Camera::new("Scene").with_kind(CameraKind::SceneView)])
        .unwrap();

    let events = harness.events();
    let emitted = position(&events, |e| matches!(e, Event::SceneViewGeometry(_)));
    let cull = position(&events, |e| matches!(e, Event::Cull(..)));
    assert!(emitted < cull);

    // Game cameras never emit it.
    let harness = Harness::new(Vec::new());
    harness.agent().render(&[Camera::new("Game")]).unwrap();
    assert!(!harness
        .events()
        .iter()
        .any(|e| matches!(e, Event::SceneViewGeometry(_))));
}

#[test]
fn test_skybox_requires_flag_and_availability() {
    let harness = Harness::new(Vec::new());
    harness
        .agent()
        .render(&[Camera::new("Solid").with_clear_flags(ClearFlags::SolidColor)])
        .unwrap();
    assert!(!harness.events().contains(&Event::Skybox));

    let mut harness = Harness::new(Vec::new());
    harness.skybox = false;
    harness.agent().render(&[Camera::new("Main")]).unwrap();
    assert!(!harness.events().contains(&Event::Skybox));
}

#[test]
fn test_failed_camera_still_releases_shadow_atlas() {
    let mut harness = Harness::new(vec![shadowed_sun()]);
    harness.fail_opaque = true;
    let mut agent = harness.agent();

    let err = agent.render(&[Camera::new("Main")]).unwrap_err();
    assert!(format!("{err:#}").contains("failed to render camera 'Main'"));

    let events = harness.events();
    assert!(events.contains(&Event::Release(RenderTextureId(1))));
    assert!(!events.contains(&Event::Submit));
}

#[test]
fn test_camera_without_casters_skips_atlas() {
    let harness = Harness::new(vec![VisibleLight::point(
        Vec3::ZERO,
        4.0,
        LinearRgba::WHITE,
    )]);
    let mut agent = harness.agent();
    let report = agent.render(&[Camera::new("Main")]).unwrap();
    assert_eq!(report.shadow_casters, 0);
    assert_eq!(report.packed_lights, 1);

    let events = harness.events();
    assert!(!events.iter().any(|e| matches!(e, Event::Acquire(_) | Event::Release(_))));
    // The release step still flushes the (empty) shadow buffer after submit.
    let submit = position(&events, |e| matches!(e, Event::Submit));
    assert!(matches!(
        &events[submit + 1],
        Event::Execute(name, cmds) if name == "Render Shadows" && cmds.is_empty()
    ));
}

#[test]
fn test_per_object_keyword_is_flushed_without_lights() {
    let harness = Harness::new(Vec::new());
    let mut agent = harness.agent();
    let report = agent.render(&[Camera::new("Empty")]).unwrap();
    assert_eq!(report.packed_lights, 0);

    let keyword = Event::Execute(
        "Render Buffer".into(),
        vec![RenderCommand::EnableKeyword("_LIGHTS_PER_OBJECT".into())],
    );
    assert!(harness.events().contains(&keyword));
}

#[test]
fn test_debug_lane_draws_after_transparent() {
    let harness = Harness::new(Vec::new());
    let mut agent = harness.agent();
    assert!(!agent.has_debug_lane());
    agent.set_debug_lane(Some(Box::new(FallbackShaderDebugLane::new())));

    agent.render(&[Camera::new("Main")]).unwrap();
    let events = harness.events();
    let debug = position(&events, |e| {
        matches!(e, Event::Draw(d, _) if d.override_shader.as_deref() == Some("Hidden/InternalErrorShader"))
    });
    let transparent = position(&events, is_draw(RenderQueueRange::TRANSPARENT));
    let submit = position(&events, |e| matches!(e, Event::Submit));
    assert!(transparent < debug && debug < submit);
}

#[test]
fn test_settings_are_sanitized_and_frames_counted() {
    let mut harness = Harness::new(Vec::new());
    harness.settings =
        PipelineSettings::from_ron_str("(shadows: (max_distance: -3.0, directional: (cascade_count: 9)))")
            .unwrap();
    let mut agent = harness.agent();
    assert_eq!(agent.settings().shadows.directional.cascade_count, 4);
    assert_eq!(agent.settings().shadows.max_distance, 0.0);

    agent.render(&[]).unwrap();
    agent.render(&[Camera::new("Main")]).unwrap();
    assert_eq!(agent.frame_count(), 2);
    assert_eq!(agent.last_report().cameras_rendered, 1);
}
