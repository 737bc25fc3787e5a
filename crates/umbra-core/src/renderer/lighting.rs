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

//! GPU layout of the per-camera visible light arrays.

use crate::math::Vec4;

/// Maximum number of lights shading code can read per camera.
pub const MAX_VISIBLE_LIGHTS: usize = 8;

/// Four parallel fixed-size arrays describing the visible lights.
///
/// Slot `i` of every array describes the same light. Unused slots are zero,
/// which is transparent black for colors and a harmless direction for the rest.
///
/// This struct is `#[repr(C)]` and `Pod` so a backend can upload it verbatim.
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct LightArrays {
    /// Final light colors.
    pub colors: [Vec4; MAX_VISIBLE_LIGHTS],
    /// Directions (`w = 0`) for directional lights, positions (`w = 1`) otherwise.
    pub directions_or_positions: [Vec4; MAX_VISIBLE_LIGHTS],
    /// `(1 / range², 0, spot scale, spot offset)`.
    pub attenuations: [Vec4; MAX_VISIBLE_LIGHTS],
    /// Spot light directions.
    pub spot_directions: [Vec4; MAX_VISIBLE_LIGHTS],
}

impl LightArrays {
    /// Creates zeroed arrays.
    pub fn new() -> Self {
        bytemuck::Zeroable::zeroed()
    }

    /// Resets every slot of every array to zero.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Returns `true` if every slot is zero.
    pub fn is_cleared(&self) -> bool {
        self.as_bytes().iter().all(|b| *b == 0)
    }

    /// Raw bytes for upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

impl Default for LightArrays {
    fn default() -> Self {
        Self::new()
    }
}
