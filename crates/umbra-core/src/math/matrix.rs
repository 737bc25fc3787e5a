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

//! Column-major `Mat4`.

use super::{Vec3, Vec4};
use approx::{AbsDiffEq, RelativeEq};
use std::ops::Mul;

/// A 4x4 column-major matrix.
///
/// Light transforms, shadow view and projection pairs, and the world to atlas
/// matrices uploaded for shading all use it. Row helpers exist because the
/// atlas remap works on rows.
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Mat4 {
    /// `cols[i]` is column `i`.
    pub cols: [Vec4; 4],
}

impl Mat4 {
    #[allow(missing_docs)]
    pub const IDENTITY: Self = Self::from_cols(Vec4::X, Vec4::Y, Vec4::Z, Vec4::W);
    /// All zeros, the value of unused shadow matrix slots.
    pub const ZERO: Self = Self::from_cols(Vec4::ZERO, Vec4::ZERO, Vec4::ZERO, Vec4::ZERO);

    #[allow(missing_docs)]
    #[inline]
    pub const fn from_cols(c0: Vec4, c1: Vec4, c2: Vec4, c3: Vec4) -> Self {
        Self {
            cols: [c0, c1, c2, c3],
        }
    }

    /// Row `index`. Panics unless `index < 4`.
    #[inline]
    pub fn get_row(&self, index: usize) -> Vec4 {
        Vec4::new(
            self.cols[0][index],
            self.cols[1][index],
            self.cols[2][index],
            self.cols[3][index],
        )
    }

    /// Overwrites row `index`. Panics unless `index < 4`.
    #[inline]
    pub fn set_row(&mut self, index: usize, row: Vec4) {
        for (c, col) in self.cols.iter_mut().enumerate() {
            col[index] = row[c];
        }
    }

    /// Translation by `v`.
    #[inline]
    pub fn from_translation(v: Vec3) -> Self {
        Self::from_cols(Vec4::X, Vec4::Y, Vec4::Z, Vec4::from_vec3(v, 1.0))
    }

    /// Rotation of `angle` radians around +X.
    #[inline]
    pub fn from_rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols(
            Vec4::X,
            Vec4::new(0.0, c, s, 0.0),
            Vec4::new(0.0, -s, c, 0.0),
            Vec4::W,
        )
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    #[inline]
    fn mul(self, v: Vec4) -> Vec4 {
        self.cols[0] * v.x + self.cols[1] * v.y + self.cols[2] * v.z + self.cols[3] * v.w
    }
}

impl Mul for Mat4 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self {
            cols: rhs.cols.map(|col| self * col),
        }
    }
}

impl AbsDiffEq for Mat4 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.cols
            .iter()
            .zip(&other.cols)
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Mat4 {
    fn default_max_relative() -> f32 {
        f32::EPSILON
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.cols
            .iter()
            .zip(&other.cols)
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{EPSILON, FRAC_PI_2};
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_is_neutral() {
        assert_eq!(Mat4::default(), Mat4::IDENTITY);
        let t = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t * Mat4::IDENTITY, t);
        assert_eq!(Mat4::IDENTITY * t, t);
    }

    #[test]
    fn test_rows_are_transposed_columns() {
        let mut m = Mat4::from_translation(Vec3::new(5.0, 6.0, 7.0));
        assert_eq!(m.get_row(0), Vec4::new(1.0, 0.0, 0.0, 5.0));
        m.set_row(3, Vec4::new(9.0, 8.0, 7.0, 6.0));
        assert_eq!(m.get_row(3), Vec4::new(9.0, 8.0, 7.0, 6.0));
        assert_eq!(m.cols[0].w, 9.0);
        assert_eq!(m.cols[3].w, 6.0);
    }

    #[test]
    fn test_translation_moves_points_only() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(m * Vec4::W, Vec4::new(1.0, 2.0, 3.0, 1.0));
        assert_eq!(m * Vec4::Z, Vec4::Z);
    }

    #[test]
    fn test_product_applies_right_operand_first() {
        let rotate = Mat4::from_rotation_x(FRAC_PI_2);
        let translate = Mat4::from_translation(Vec3::new(0.0, 0.0, 2.0));
        // Y rotates onto Z, then moves two units along Z.
        let p = (translate * rotate) * Vec4::new(0.0, 1.0, 0.0, 1.0);
        assert_relative_eq!(p, Vec4::new(0.0, 0.0, 3.0, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_mat4_is_pod() {
        assert_eq!(bytemuck::bytes_of(&Mat4::IDENTITY).len(), 64);
    }
}
