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

//! Visible light packing and upload.
//!
//! Shading reads at most [`MAX_VISIBLE_LIGHTS`] lights from four parallel
//! arrays. Directional lights store their direction (`w = 0`); point and spot
//! lights store their position (`w = 1`). The attenuation vector is
//! `(1 / range², 0, spot scale, spot offset)` and evaluates to a constant 1 for
//! directional lights.

use crate::error::LightingError;
use umbra_core::{
    lane::{Lane, LaneContext, LaneError, LaneKind, PackedLightCount, Ref, ResolvedPerObjectData, Slot},
    math::{degrees_to_radians, Vec4, EPSILON},
    renderer::{
        shader_ids, CommandBuffer, CullingResults, FrameContext, LightArrays, LightKind,
        LightingSettings, PerObjectData, PipelineSettings, RenderBackend, VisibleLight,
        MAX_VISIBLE_LIGHTS,
    },
};

/// Share of the outer cone where spot lights are at full intensity, as `46 / 64`.
const SPOT_INNER_RATIO: f32 = (64.0 - 18.0) / 64.0;

/// Smallest spot falloff band, keeping the attenuation scale finite.
const MIN_SPOT_ANGLE_RANGE: f32 = 0.001;

/// Writes the first [`MAX_VISIBLE_LIGHTS`] lights into `arrays` and returns how
/// many were written. Slots past the returned count are left untouched.
pub fn pack_visible_lights(arrays: &mut LightArrays, lights: &[VisibleLight]) -> usize {
    let count = lights.len().min(MAX_VISIBLE_LIGHTS);

    for (i, light) in lights.iter().take(count).enumerate() {
        arrays.colors[i] = light.final_color.to_vec4();
        let mut attenuation = Vec4::new(0.0, 0.0, 1.0, 1.0);

        match light.kind {
            LightKind::Directional => {
                arrays.directions_or_positions[i] = Vec4::from_vec3(-light.forward().truncate(), 0.0);
            }
            LightKind::Point | LightKind::Spot => {
                arrays.directions_or_positions[i] = Vec4::from_vec3(light.position().truncate(), 1.0);
                attenuation.x = 1.0 / (light.range * light.range).max(EPSILON);

                if light.kind == LightKind::Spot {
                    arrays.spot_directions[i] = Vec4::from_vec3(-light.forward().truncate(), 0.0);

                    let outer_rad = degrees_to_radians(0.5 * light.spot_angle);
                    let outer_cos = outer_rad.cos();
                    let inner_cos = (SPOT_INNER_RATIO * outer_rad.tan()).atan().cos();
                    let angle_range = (inner_cos - outer_cos).max(MIN_SPOT_ANGLE_RANGE);
                    attenuation.z = 1.0 / angle_range;
                    attenuation.w = -outer_cos * attenuation.z;
                }
            }
        }

        arrays.attenuations[i] = attenuation;
    }

    count
}

/// Hides lights that did not fit in the arrays from per-object light lists.
///
/// When more than [`MAX_VISIBLE_LIGHTS`] lights are visible, every index-map
/// entry at or past that position becomes `-1`. Earlier entries are unchanged.
pub fn remap_light_index_map(culling: &mut dyn CullingResults) {
    if culling.visible_lights().len() <= MAX_VISIBLE_LIGHTS {
        return;
    }
    let mut map = culling.light_index_map();
    for entry in map.iter_mut().skip(MAX_VISIBLE_LIGHTS) {
        *entry = -1;
    }
    culling.set_light_index_map(map);
}

/// Records the four light arrays into `buffer`, executes and clears it, then
/// zeroes the arrays.
///
/// The buffer and arrays are reset even when execution fails.
pub fn upload(
    arrays: &mut LightArrays,
    buffer: &mut CommandBuffer,
    backend: &mut dyn RenderBackend,
) -> Result<(), LightingError> {
    buffer.set_global_vector_array(shader_ids::VISIBLE_LIGHT_COLORS, &arrays.colors);
    buffer.set_global_vector_array(
        shader_ids::VISIBLE_LIGHT_DIRECTIONS_OR_POSITIONS,
        &arrays.directions_or_positions,
    );
    buffer.set_global_vector_array(shader_ids::VISIBLE_LIGHT_ATTENUATIONS, &arrays.attenuations);
    buffer.set_global_vector_array(
        shader_ids::VISIBLE_LIGHT_SPOT_DIRECTIONS,
        &arrays.spot_directions,
    );

    let result = backend.execute_command_buffer(buffer);
    buffer.clear();
    arrays.clear();
    result.map_err(LightingError::Upload)
}

/// Chooses the per-object data for the camera's draws and records the
/// matching keyword toggle.
pub fn per_object_data(settings: &LightingSettings, buffer: &mut CommandBuffer) -> PerObjectData {
    buffer.set_keyword(&settings.per_object_keyword, settings.use_lights_per_object);
    if settings.use_lights_per_object {
        PerObjectData::LIGHT_DATA | PerObjectData::LIGHT_INDICES
    } else {
        PerObjectData::NONE
    }
}

/// Packs and uploads the visible lights of the current camera.
///
/// Reads `Slot<FrameContext>`, `Slot<dyn CullingResults>`,
/// `Slot<dyn RenderBackend>` and `Ref<PipelineSettings>`; writes
/// [`ResolvedPerObjectData`] and [`PackedLightCount`].
#[derive(Debug, Default)]
pub struct LightPackingLane;

impl LightPackingLane {
    /// Creates a new `LightPackingLane`.
    pub fn new() -> Self {
        Self
    }
}

impl Lane for LightPackingLane {
    fn strategy_name(&self) -> &'static str {
        "LightPacking"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Lighting
    }

    fn execute(&self, ctx: &mut LaneContext) -> Result<(), LaneError> {
        let frame = ctx
            .get::<Slot<FrameContext>>()
            .ok_or(LaneError::missing("Slot<FrameContext>"))?
            .get();
        let culling = ctx
            .get::<Slot<dyn CullingResults>>()
            .ok_or(LaneError::missing("Slot<dyn CullingResults>"))?
            .get();
        let backend = ctx
            .get::<Slot<dyn RenderBackend>>()
            .ok_or(LaneError::missing("Slot<dyn RenderBackend>"))?
            .get();
        let settings = ctx
            .get::<Ref<PipelineSettings>>()
            .ok_or(LaneError::missing("Ref<PipelineSettings>"))?
            .get();

        let per_object = per_object_data(&settings.lighting, &mut frame.camera_buffer);

        let visible = culling.visible_lights().len();
        let packed = if visible > 0 {
            let packed = pack_visible_lights(&mut frame.lights, culling.visible_lights());
            remap_light_index_map(culling);
            upload(&mut frame.lights, &mut frame.camera_buffer, backend)?;
            if visible > packed {
                log::debug!(
                    "LightPackingLane: {} of {} visible lights exceed the array capacity",
                    visible - packed,
                    visible
                );
            }
            packed
        } else {
            let result = backend.execute_command_buffer(&frame.camera_buffer);
            frame.camera_buffer.clear();
            result.map_err(LightingError::Keyword)?;
            0
        };

        log::trace!("LightPackingLane: packed {packed} lights, per-object data {per_object:?}");

        ctx.insert(ResolvedPerObjectData(per_object));
        ctx.insert(PackedLightCount(packed));
        Ok(())
    }
}
