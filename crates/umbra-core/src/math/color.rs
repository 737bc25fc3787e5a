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

//! Linear color.

use crate::math::vector::Vec4;
use serde::{Deserialize, Serialize};
use std::ops::Mul;

/// A linear RGBA color.
///
/// Light colors are stored premultiplied by intensity, so channels can go
/// above `1.0`.
#[derive(
    Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize,
)]
#[repr(C)]
pub struct LinearRgba {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Alpha.
    pub a: f32,
}

impl LinearRgba {
    /// `(1, 1, 1, 1)`.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// `(0, 0, 0, 0)`, the clear color of render targets.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// A color from all four channels.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// An opaque color.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// The channels as `(r, g, b, a)`, the layout of the light color array.
    #[inline]
    pub fn to_vec4(&self) -> Vec4 {
        Vec4::new(self.r, self.g, self.b, self.a)
    }
}

impl Default for LinearRgba {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Scales RGB by an intensity. Alpha is kept.
impl Mul<f32> for LinearRgba {
    type Output = Self;

    #[inline]
    fn mul(self, intensity: f32) -> Self {
        Self::new(self.r * intensity, self.g * intensity, self.b * intensity, self.a)
    }
}
