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

//! Shadow atlas tiling.
//!
//! The atlas is a square depth texture divided into a `split × split` grid.
//! Tiles are numbered row-major: tile `t` lives at column `t % split`, row
//! `t / split`.

use umbra_core::{
    math::{Mat4, Rect, Vec2},
    renderer::DepthConvention,
};

/// Number of tiles per atlas row for `tile_count` tiles.
pub fn atlas_split(tile_count: usize) -> u32 {
    match tile_count {
        0..=1 => 1,
        2..=4 => 2,
        _ => 4,
    }
}

/// Grid layout of one frame's shadow atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtlasLayout {
    /// Atlas edge length in pixels.
    pub atlas_size: u32,
    /// Tiles per row and per column.
    pub split: u32,
    /// Tile edge length in pixels.
    pub tile_size: u32,
}

impl AtlasLayout {
    /// Lays out `casters × cascade_count` tiles in an atlas of `atlas_size` pixels.
    pub fn new(atlas_size: u32, casters: usize, cascade_count: usize) -> Self {
        let split = atlas_split(casters * cascade_count);
        Self {
            atlas_size,
            split,
            tile_size: atlas_size / split,
        }
    }

    /// Grid coordinates of `tile`, in tiles.
    pub fn tile_offset(&self, tile: usize) -> Vec2 {
        let split = self.split as usize;
        Vec2::new((tile % split) as f32, (tile / split) as f32)
    }

    /// Pixel viewport of the tile at `offset`.
    pub fn tile_viewport(&self, offset: Vec2) -> Rect {
        let tile = self.tile_size as f32;
        Rect::new(offset.x * tile, offset.y * tile, tile, tile)
    }

    /// Places the light clip space `view_projection` into tile `index`.
    pub fn tile(&self, index: usize, view_projection: Mat4, depth: DepthConvention) -> AtlasTile {
        let offset = self.tile_offset(index);
        AtlasTile {
            index,
            viewport: self.tile_viewport(offset),
            matrix: convert_to_atlas_matrix(view_projection, offset, self.split, depth),
        }
    }
}

/// One `(light, cascade)` tile of the atlas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtlasTile {
    /// Row-major tile index, `slot * cascade_count + cascade`.
    pub index: usize,
    /// Pixel rectangle rendered into.
    pub viewport: Rect,
    /// World to atlas UV and depth.
    pub matrix: Mat4,
}

/// Maps a light's clip space into its atlas tile.
///
/// The result takes world space straight to atlas UV and depth in `[0, 1]`:
/// rows 0 and 1 are remapped from `[-1, 1]` into the tile at `offset`, row 2
/// from `[-1, 1]` into `[0, 1]`. With reversed depth, row 2 is negated first.
pub fn convert_to_atlas_matrix(
    mut m: Mat4,
    offset: Vec2,
    split: u32,
    depth: DepthConvention,
) -> Mat4 {
    if depth.is_reversed() {
        let z = m.get_row(2);
        m.set_row(2, -z);
    }

    let scale = 1.0 / split as f32;
    let r0 = m.get_row(0);
    let r1 = m.get_row(1);
    let r2 = m.get_row(2);
    let r3 = m.get_row(3);

    m.set_row(0, ((r0 + r3) * 0.5 + r3 * offset.x) * scale);
    m.set_row(1, ((r1 + r3) * 0.5 + r3 * offset.y) * scale);
    m.set_row(2, (r2 + r3) * 0.5);
    m
}
