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

//! Temporary render textures.

/// Backend handle of a temporary render texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderTextureId(pub u64);

/// Layout of a temporary texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderTextureFormat {
    /// Depth only, sampled with depth comparison.
    Shadowmap,
    /// Linear color.
    Color,
}

/// Sampling filter of a temporary texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterMode {
    #[allow(missing_docs)]
    Point,
    #[allow(missing_docs)]
    Bilinear,
}

/// A request for a temporary render texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureDescriptor {
    #[allow(missing_docs)]
    pub width: u32,
    #[allow(missing_docs)]
    pub height: u32,
    /// Depth buffer bits, `0` for none.
    pub depth_bits: u32,
    #[allow(missing_docs)]
    pub filter: FilterMode,
    #[allow(missing_docs)]
    pub format: RenderTextureFormat,
}

impl TextureDescriptor {
    /// The square shadow atlas: 32 depth bits, bilinear, shadowmap format.
    pub fn shadow_map(size: u32) -> Self {
        Self {
            width: size,
            height: size,
            depth_bits: 32,
            filter: FilterMode::Bilinear,
            format: RenderTextureFormat::Shadowmap,
        }
    }
}

/// Handling of a target's previous contents when it is bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadAction {
    /// Keep them.
    Load,
    /// They will be overwritten; the backend may skip loading.
    DontCare,
}

/// Handling of a target's contents after the pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreAction {
    /// Keep them for later sampling.
    Store,
    /// Discard them.
    DontCare,
}
