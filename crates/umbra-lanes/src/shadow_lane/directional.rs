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

//! Directional shadow lane - renders cascaded shadow maps into a shared atlas.
//!
//! Per camera the lane selects up to four shadowed directional lights, then,
//! if any were selected, acquires a depth atlas and draws every
//! `(light, cascade)` pair into its own tile. The atlas stays bound as a
//! global until [`release_shadow_resources`] is called at the end of the
//! camera.

use super::{
    atlas::AtlasLayout,
    caster_selection::select_shadow_casters,
    cascade::{blend_culling_factor, cascade_request, set_cascade_data},
};
use crate::{error::ShadowError, render_lane::select_variant};
use umbra_core::{
    lane::{Lane, LaneContext, LaneError, LaneKind, Ref, Slot},
    math::{LinearRgba, Vec4, EPSILON},
    renderer::{
        shader_ids, CommandBuffer, CullingResults, DepthConvention, FrameContext, LightKind,
        LoadAction, PipelineSettings, RenderBackend, ShadowDrawingSettings, ShadowSettings,
        StoreAction, TextureDescriptor, MAX_SHADOWED_DIRECTIONAL_LIGHTS,
    },
};

/// Cost of one atlas tile, used by [`Lane::estimate_cost`].
const TILE_COST: f32 = 0.1;

fn flush(
    buffer: &mut CommandBuffer,
    backend: &mut dyn RenderBackend,
    stage: &'static str,
) -> Result<(), ShadowError> {
    let result = backend.execute_command_buffer(buffer);
    buffer.clear();
    result.map_err(|source| ShadowError::Execute { stage, source })
}

/// `(1 / max distance, 1 / distance fade, 1 / (1 - f²), 0)` with
/// `f = 1 - cascade fade`.
pub fn shadow_distance_fade(settings: &ShadowSettings) -> Vec4 {
    let f = 1.0 - settings.directional.cascade_fade;
    Vec4::new(
        1.0 / settings.max_distance.max(EPSILON),
        1.0 / settings.distance_fade.max(EPSILON),
        1.0 / (1.0 - f * f).max(EPSILON),
        0.0,
    )
}

/// Draws every selected caster's cascades into a freshly acquired atlas and
/// records the shading globals.
///
/// Must only be called with at least one caster selected in `frame.shadows`.
/// The atlas handle is stored in `frame.shadows.atlas` as soon as it exists,
/// so a later failure still leaves it to [`release_shadow_resources`].
pub fn render_directional_shadows(
    frame: &mut FrameContext,
    culling: &dyn CullingResults,
    backend: &mut dyn RenderBackend,
    settings: &ShadowSettings,
    depth: DepthConvention,
) -> Result<(), ShadowError> {
    let FrameContext {
        shadows,
        shadow_buffer: buffer,
        ..
    } = frame;
    let dir = &settings.directional;
    let atlas_size = dir.atlas_size.pixels();

    let atlas = backend
        .get_temporary_texture(&TextureDescriptor::shadow_map(atlas_size))
        .map_err(|source| ShadowError::AtlasAllocation {
            size: atlas_size,
            source,
        })?;
    shadows.atlas = Some(atlas);

    buffer.set_render_target(atlas, LoadAction::DontCare, StoreAction::Store);
    buffer.clear_render_target(true, false, LinearRgba::TRANSPARENT);
    flush(buffer, backend, "atlas clear")?;

    let cascade_count = dir.cascade_count as usize;
    let layout = AtlasLayout::new(atlas_size, shadows.caster_count(), cascade_count);
    let culling_factor = blend_culling_factor(dir.cascade_fade);

    for slot in 0..shadows.caster_count() {
        let caster = shadows.casters[slot];

        for cascade in 0..cascade_count {
            let request = cascade_request(&caster, cascade, dir, layout.tile_size);
            let Some(matrices) = culling.compute_directional_shadow_matrices(&request) else {
                log::warn!(
                    "DirectionalShadowLane: no cascade {cascade} for light {}, tile skipped",
                    caster.visible_light_index
                );
                continue;
            };

            let mut split_data = matrices.split_data;
            if slot == 0 {
                set_cascade_data(
                    shadows,
                    cascade,
                    split_data.culling_sphere,
                    layout.tile_size,
                    dir.filter,
                );
            }
            split_data.shadow_cascade_blend_culling_factor = culling_factor;

            let tile = layout.tile(
                slot * cascade_count + cascade,
                matrices.projection * matrices.view,
                depth,
            );
            buffer.set_viewport(tile.viewport);
            shadows.matrices[tile.index] = tile.matrix;
            buffer.set_view_projection_matrices(matrices.view, matrices.projection);
            buffer.set_global_depth_bias(0.0, caster.slope_scale_bias);
            flush(buffer, backend, "tile setup")?;

            backend
                .draw_shadows(
                    culling,
                    &ShadowDrawingSettings {
                        light_index: caster.visible_light_index,
                        split_data,
                    },
                )
                .map_err(|source| ShadowError::DrawCasters {
                    light_index: caster.visible_light_index,
                    cascade,
                    source,
                })?;
            buffer.set_global_depth_bias(0.0, 0.0);

            log::trace!(
                "DirectionalShadowLane: light {} cascade {cascade} -> tile {}",
                caster.visible_light_index,
                tile.index
            );
        }
    }

    buffer.set_global_matrix_array(shader_ids::DIRECTIONAL_SHADOW_MATRICES, &shadows.matrices);
    buffer.set_global_vector_array(
        shader_ids::DIRECTIONAL_LIGHT_SHADOW_DATA,
        &shadows.light_shadow_data,
    );
    buffer.set_global_texture(shader_ids::DIRECTIONAL_SHADOW_ATLAS, atlas);
    buffer.set_global_int(shader_ids::CASCADE_COUNT, cascade_count as i32);
    buffer.set_global_vector_array(
        shader_ids::CASCADE_CULLING_SPHERES,
        &shadows.cascade_culling_spheres,
    );
    buffer.set_global_vector(shader_ids::SHADOW_DISTANCE_FADE, shadow_distance_fade(settings));
    buffer.set_global_vector_array(shader_ids::CASCADE_DATA, &shadows.cascade_data);
    select_variant(
        buffer,
        &shader_ids::CASCADE_BLEND_KEYWORDS,
        dir.cascade_blend.ordinal(),
    );
    select_variant(
        buffer,
        &shader_ids::DIRECTIONAL_FILTER_KEYWORDS,
        dir.filter.ordinal(),
    );
    let size = atlas_size as f32;
    buffer.set_global_vector(
        shader_ids::SHADOW_ATLAS_SIZE,
        Vec4::new(size, 1.0 / size, 0.0, 0.0),
    );
    flush(buffer, backend, "shadow globals")
}

/// Releases the atlas if one is held, then flushes the shadow buffer.
///
/// Safe to call with no atlas. The flush still runs when the release fails;
/// the first error is returned.
pub fn release_shadow_resources(
    frame: &mut FrameContext,
    backend: &mut dyn RenderBackend,
) -> Result<(), ShadowError> {
    let released = match frame.shadows.atlas.take() {
        Some(atlas) => backend
            .release_temporary_texture(atlas)
            .map_err(ShadowError::Release),
        None => Ok(()),
    };
    let flushed = flush(&mut frame.shadow_buffer, backend, "release");
    released.and(flushed)
}

/// Selects shadowed directional lights and renders their cascades.
///
/// Reads `Slot<FrameContext>`, `Slot<dyn CullingResults>`,
/// `Slot<dyn RenderBackend>`, `Ref<PipelineSettings>` and a
/// [`DepthConvention`] from the context.
#[derive(Debug, Default)]
pub struct DirectionalShadowLane;

impl DirectionalShadowLane {
    /// Creates a new `DirectionalShadowLane`.
    pub fn new() -> Self {
        Self
    }
}

impl Lane for DirectionalShadowLane {
    fn strategy_name(&self) -> &'static str {
        "DirectionalShadow"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Shadow
    }

    fn estimate_cost(&self, ctx: &LaneContext) -> f32 {
        let casters = ctx
            .get::<Slot<dyn CullingResults>>()
            .map(|slot| {
                slot.get_ref()
                    .visible_lights()
                    .iter()
                    .filter(|l| l.kind == LightKind::Directional && l.casts_shadows())
                    .count()
                    .min(MAX_SHADOWED_DIRECTIONAL_LIGHTS)
            })
            .unwrap_or(0);
        let cascades = ctx
            .get::<Ref<PipelineSettings>>()
            .map(|s| s.get().shadows.directional.cascade_count)
            .unwrap_or(1);
        TILE_COST * (casters as u32 * cascades) as f32
    }

    fn execute(&self, ctx: &mut LaneContext) -> Result<(), LaneError> {
        let frame = ctx
            .get::<Slot<FrameContext>>()
            .ok_or(LaneError::missing("Slot<FrameContext>"))?
            .get();
        let culling = ctx
            .get::<Slot<dyn CullingResults>>()
            .ok_or(LaneError::missing("Slot<dyn CullingResults>"))?
            .get_ref();
        let backend = ctx
            .get::<Slot<dyn RenderBackend>>()
            .ok_or(LaneError::missing("Slot<dyn RenderBackend>"))?
            .get();
        let settings = &ctx
            .get::<Ref<PipelineSettings>>()
            .ok_or(LaneError::missing("Ref<PipelineSettings>"))?
            .get()
            .shadows;
        let depth = *ctx
            .get::<DepthConvention>()
            .ok_or(LaneError::missing("DepthConvention"))?;

        let cascade_count = settings.directional.cascade_count as usize;
        let casters = select_shadow_casters(&mut frame.shadows, culling, cascade_count);
        if casters == 0 {
            log::trace!("DirectionalShadowLane: no shadowed directional lights");
            return Ok(());
        }

        render_directional_shadows(frame, culling, backend, settings, depth)?;
        log::debug!(
            "DirectionalShadowLane: rendered {casters} lights x {cascade_count} cascades into a {}px atlas",
            settings.directional.atlas_size.pixels()
        );
        Ok(())
    }
}
