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

//! Picks which directional lights get a slot in the shadow atlas.

use umbra_core::{
    math::Vec4,
    renderer::{
        CullingResults, LightKind, ShadowFrameData, ShadowedDirectionalLight, VisibleLight,
        MAX_SHADOWED_DIRECTIONAL_LIGHTS,
    },
};

/// Tries to give `light` the next free shadow slot.
///
/// Returns `(strength, first tile, normal bias, 0)` when the light was
/// reserved and [`Vec4::ZERO`] otherwise. A light is refused when every slot is
/// taken, when it does not cast shadows, or when culling found no caster in
/// its range.
pub fn reserve_directional_shadows(
    shadows: &mut ShadowFrameData,
    culling: &dyn CullingResults,
    light: &VisibleLight,
    visible_light_index: usize,
    cascade_count: usize,
) -> Vec4 {
    if shadows.caster_count() >= MAX_SHADOWED_DIRECTIONAL_LIGHTS
        || !light.casts_shadows()
        || culling.shadow_caster_bounds(visible_light_index).is_none()
    {
        return Vec4::ZERO;
    }

    let slot = shadows.caster_count();
    shadows.casters.push(ShadowedDirectionalLight {
        visible_light_index,
        slope_scale_bias: light.shadow_bias,
        near_plane_offset: light.shadow_near_plane,
    });

    Vec4::new(
        light.shadow_strength,
        (cascade_count * slot) as f32,
        light.shadow_normal_bias,
        0.0,
    )
}

/// Resets `shadows` and reserves slots for the visible directional lights, in
/// visible order. Returns the number of selected casters.
pub fn select_shadow_casters(
    shadows: &mut ShadowFrameData,
    culling: &dyn CullingResults,
    cascade_count: usize,
) -> usize {
    shadows.reset();

    for (index, light) in culling.visible_lights().iter().enumerate() {
        if light.kind != LightKind::Directional {
            continue;
        }

        let data = reserve_directional_shadows(shadows, culling, light, index, cascade_count);
        match shadows.light_shadow_data.get_mut(index) {
            Some(slot) => *slot = data,
            None if data != Vec4::ZERO => log::warn!(
                "ShadowCasterSelection: shadow data of visible light {index} does not fit the \
                 {MAX_SHADOWED_DIRECTIONAL_LIGHTS}-entry array and was dropped"
            ),
            None => {}
        }
    }

    log::trace!(
        "ShadowCasterSelection: {} of {} visible lights cast directional shadows",
        shadows.caster_count(),
        culling.visible_lights().len()
    );
    shadows.caster_count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockCulling;
    use umbra_core::{
        math::{LinearRgba, Mat4, Vec3},
        renderer::LightShadows,
    };

    fn shadowed_sun(strength: f32) -> VisibleLight {
        VisibleLight::directional(Mat4::IDENTITY, LinearRgba::WHITE)
            .with_shadows(LightShadows::Soft, strength)
            .with_shadow_bias(0.5, 0.3, 0.1)
    }

    #[test]
    fn first_four_directional_casters_win() {
        let lights = vec![shadowed_sun(1.0); 6];
        let culling = MockCulling::new(lights);
        let mut shadows = ShadowFrameData::new();

        let count = select_shadow_casters(&mut shadows, &culling, 4);
        assert_eq!(count, 4);
        let order: Vec<usize> = shadows
            .casters
            .iter()
            .map(|c| c.visible_light_index)
            .collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
        assert_eq!(shadows.light_shadow_data[2], Vec4::new(1.0, 8.0, 0.3, 0.0));
        assert_eq!(shadows.casters[3].slope_scale_bias, 0.5);
        assert_eq!(shadows.casters[3].near_plane_offset, 0.1);
    }

    #[test]
    fn refused_lights_yield_zero_and_do_not_consume_slots() {
        let lights = vec![
            VisibleLight::point(Vec3::ZERO, 5.0, LinearRgba::WHITE),
            shadowed_sun(0.0),
            VisibleLight::directional(Mat4::IDENTITY, LinearRgba::WHITE),
            shadowed_sun(0.7),
            shadowed_sun(0.9),
        ];
        let mut culling = MockCulling::new(lights);
        culling.without_casters.push(4);
        let mut shadows = ShadowFrameData::new();

        let count = select_shadow_casters(&mut shadows, &culling, 2);
        assert_eq!(count, 1);
        assert_eq!(shadows.casters[0].visible_light_index, 3);
        assert_eq!(shadows.light_shadow_data[0], Vec4::ZERO);
        assert_eq!(shadows.light_shadow_data[1], Vec4::ZERO);
        assert_eq!(shadows.light_shadow_data[2], Vec4::ZERO);
        assert_eq!(shadows.light_shadow_data[3], Vec4::new(0.7, 0.0, 0.3, 0.0));
    }

    #[test]
    fn selection_starts_from_scratch_every_camera() {
        let culling = MockCulling::new(vec![shadowed_sun(1.0)]);
        let mut shadows = ShadowFrameData::new();

        select_shadow_casters(&mut shadows, &culling, 4);
        let count = select_shadow_casters(&mut shadows, &MockCulling::new(Vec::new()), 4);
        assert_eq!(count, 0);
        assert_eq!(shadows.light_shadow_data[0], Vec4::ZERO);
    }
}
