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

//! Draw request descriptions passed to the backend.

use crate::renderer::culling::ShadowSplitData;

/// Flags selecting which per-object data the backend must provide to shading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PerObjectData {
    bits: u32,
}

impl PerObjectData {
    /// No per-object data.
    pub const NONE: Self = Self { bits: 0 };
    /// Per-object light data (count and offsets).
    pub const LIGHT_DATA: Self = Self { bits: 1 << 0 };
    /// Per-object light index list.
    pub const LIGHT_INDICES: Self = Self { bits: 1 << 1 };

    /// Creates flags from raw bits.
    pub const fn from_bits(bits: u32) -> Self {
        Self { bits }
    }

    /// Returns the raw bits.
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    /// Checks if every bit of `other` is set.
    pub const fn contains(&self, other: Self) -> bool {
        (self.bits & other.bits) == other.bits
    }

    /// Checks if no flag is set.
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

impl std::ops::BitOr for PerObjectData {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self {
            bits: self.bits | rhs.bits,
        }
    }
}

impl std::ops::BitOrAssign for PerObjectData {
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits |= rhs.bits;
    }
}

/// Sorting applied by the backend before drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortingCriteria {
    /// No sorting.
    Unsorted,
    /// Front to back, grouped by material.
    CommonOpaque,
    /// Back to front.
    CommonTransparent,
}

/// An inclusive range of render queue values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderQueueRange {
    /// Lowest included queue.
    pub lower: u32,
    /// Highest included queue.
    pub upper: u32,
}

impl RenderQueueRange {
    /// Opaque and alpha-tested geometry.
    pub const OPAQUE: Self = Self {
        lower: 0,
        upper: 2500,
    };
    /// Blended geometry.
    pub const TRANSPARENT: Self = Self {
        lower: 2501,
        upper: 5000,
    };
    /// Every queue.
    pub const ALL: Self = Self {
        lower: 0,
        upper: 5000,
    };
}

/// How to draw a set of renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingSettings {
    /// Shader pass tags to draw, in order.
    pub shader_passes: Vec<String>,
    /// Sorting applied before drawing.
    pub sorting: SortingCriteria,
    /// Per-object data required by shading.
    pub per_object_data: PerObjectData,
    /// Allow dynamic batching.
    pub enable_dynamic_batching: bool,
    /// Allow GPU instancing.
    pub enable_instancing: bool,
    /// Replace every matched pass with this shader.
    pub override_shader: Option<String>,
}

impl DrawingSettings {
    /// Creates settings drawing `passes` with the given sorting and nothing else enabled.
    pub fn new<S: AsRef<str>>(passes: &[S], sorting: SortingCriteria) -> Self {
        Self {
            shader_passes: passes.iter().map(|p| p.as_ref().to_string()).collect(),
            sorting,
            per_object_data: PerObjectData::NONE,
            enable_dynamic_batching: false,
            enable_instancing: false,
            override_shader: None,
        }
    }
}

/// Which renderers a draw call considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilteringSettings {
    /// Render queue range.
    pub queue_range: RenderQueueRange,
}

impl FilteringSettings {
    /// Filters to the given queue range.
    pub const fn new(queue_range: RenderQueueRange) -> Self {
        Self { queue_range }
    }
}

/// Shadow caster draw request for one cascade of one light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowDrawingSettings {
    /// Visible light index whose casters are drawn.
    pub light_index: usize,
    /// Split data limiting which casters are drawn.
    pub split_data: ShadowSplitData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_object_flags_combine() {
        let flags = PerObjectData::LIGHT_DATA | PerObjectData::LIGHT_INDICES;
        assert!(flags.contains(PerObjectData::LIGHT_DATA));
        assert!(flags.contains(PerObjectData::LIGHT_INDICES));
        assert_eq!(flags.bits(), 0b11);
        assert!(PerObjectData::NONE.is_empty());
        assert_eq!(PerObjectData::default(), PerObjectData::NONE);
    }

    #[test]
    fn queue_ranges_do_not_overlap() {
        assert!(RenderQueueRange::OPAQUE.upper < RenderQueueRange::TRANSPARENT.lower);
    }
}
