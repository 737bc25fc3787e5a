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

//! Names of the global shader bindings, keywords and passes.
//!
//! Shading code binds these by name, so they are fixed for the lifetime of the
//! pipeline.

// --- Light arrays ---

/// `Vec4[8]`: final light colors.
pub const VISIBLE_LIGHT_COLORS: &str = "_VisibleLightColors";
/// `Vec4[8]`: directions (`w = 0`) or positions (`w = 1`).
pub const VISIBLE_LIGHT_DIRECTIONS_OR_POSITIONS: &str = "_VisibleLightDirectionsOrPositions";
/// `Vec4[8]`: range and spot attenuation factors.
pub const VISIBLE_LIGHT_ATTENUATIONS: &str = "_VisibleLightAttenuations";
/// `Vec4[8]`: spot directions.
pub const VISIBLE_LIGHT_SPOT_DIRECTIONS: &str = "_VisibleLightSpotDirections";

// --- Directional shadows ---

/// `Texture`: the shadow atlas.
pub const DIRECTIONAL_SHADOW_ATLAS: &str = "_DirectionalShadowAtlas";
/// `Mat4[16]`: world-to-atlas matrices, one per tile.
pub const DIRECTIONAL_SHADOW_MATRICES: &str = "_DirectionalShadowMatrices";
/// `Vec4[4]`: `(strength, first tile, normal bias, 0)` per visible light.
pub const DIRECTIONAL_LIGHT_SHADOW_DATA: &str = "_DirectionalLightShadowData";
/// `int`: active cascade count.
pub const CASCADE_COUNT: &str = "_CascadeCount";
/// `Vec4[4]`: cascade culling spheres, radius squared in `w`.
pub const CASCADE_CULLING_SPHERES: &str = "_CascadeCullingSpheres";
/// `Vec4[4]`: `(1 / radius², filter size · √2, 0, 0)` per cascade.
pub const CASCADE_DATA: &str = "_CascadeData";
/// `Vec4`: `(1 / max distance, 1 / distance fade, 1 / (1 − f²), 0)`.
pub const SHADOW_DISTANCE_FADE: &str = "_ShadowDistanceFade";
/// `Vec4`: `(atlas size, 1 / atlas size, 0, 0)`.
pub const SHADOW_ATLAS_SIZE: &str = "_ShadowAtlasSize";

// --- Keywords ---

/// Enabled when per-object light indices are in use.
pub const LIGHTS_PER_OBJECT_KEYWORD: &str = "_LIGHTS_PER_OBJECT";

/// PCF variants, selected by [`ShadowFilterMode::ordinal`](super::settings::ShadowFilterMode::ordinal).
pub const DIRECTIONAL_FILTER_KEYWORDS: [&str; 3] = [
    "_DIRECTIONAL_PCF3",
    "_DIRECTIONAL_PCF5",
    "_DIRECTIONAL_PCF7",
];

/// Cascade blend variants, selected by [`CascadeBlendMode::ordinal`](super::settings::CascadeBlendMode::ordinal).
pub const CASCADE_BLEND_KEYWORDS: [&str; 2] = ["_CASCADE_BLEND_SOFT", "_CASCADE_BLEND_DITHER"];

// --- Passes ---

/// Shader pass tags drawn by the opaque and transparent passes.
pub const FORWARD_PASSES: [&str; 2] = ["SRPDefaultUnlit", "UmbraLightMode"];

/// Legacy pass tags highlighted by the fallback-shader debug pass.
pub const LEGACY_PASSES: [&str; 2] = ["ForwardBase", "PrepassBase"];

/// Shader used to draw objects that only provide legacy passes.
pub const ERROR_SHADER: &str = "Hidden/InternalErrorShader";
