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

//! Math used by light packing and shadow atlas setup.
//!
//! Vectors, a column-major [`Mat4`], a linear color, bounding boxes and pixel
//! rectangles. Types that are uploaded to the GPU are `#[repr(C)]` and
//! `bytemuck::Pod`. Angles are in radians unless a name says otherwise.

pub mod color;
pub mod geometry;
pub mod matrix;
pub mod vector;

pub use self::color::LinearRgba;
pub use self::geometry::{Aabb, Rect};
pub use self::matrix::Mat4;
pub use self::vector::{Vec2, Vec3, Vec4};

pub use std::f32::consts::{FRAC_PI_2, PI, SQRT_2};

/// Floor for divisors and tolerance for float comparisons.
pub const EPSILON: f32 = 1e-5;

/// Converts degrees to radians.
///
/// ```
/// use umbra_core::math::{degrees_to_radians, PI};
/// assert_eq!(degrees_to_radians(90.0), PI / 2.0);
/// ```
#[inline]
pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees * (PI / 180.0)
}
