//! Nine-patch regeneration.
//!
//! Recomputes the 16 vertex positions and 16 UVs of a nine-slice plane in
//! place, without ever touching the triangulation. Positions are shaped by
//! `width`/`height`/`padding` in world units; UVs by the pixel slice
//! boundaries relative to the bound image's dimensions. Both kernels write
//! into the existing buffers — no allocation per call, so regenerating every
//! frame produces no garbage.

use bevy::mesh::{Mesh, VertexAttributeValues};
use bevy::prelude::*;

use crate::config::Slice9;
use crate::grid::grid_cell;

/// Recompute vertex positions for the given plane size and border padding.
///
/// Outer ring at the plane extremes (±width/2, ±height/2), inner rings inset
/// by exactly `padding` on the relevant axis. Corner cells never move while
/// width/height are unchanged. Z is left alone.
pub fn patch_positions(positions: &mut [[f32; 3]], width: f32, height: f32, padding: f32) {
    let w2 = width / 2.0;
    let h2 = height / 2.0;
    let columns = [-w2, -w2 + padding, w2 - padding, w2];
    let rows = [h2, h2 - padding, -h2 + padding, -h2];

    for (index, position) in positions.iter_mut().enumerate() {
        let (col, row) = grid_cell(index);
        position[0] = columns[col];
        position[1] = rows[row];
    }
}

/// Recompute UVs from the texture-space slice boundaries.
///
/// Inner columns sit at `left/image_width` and `right/image_width`, inner
/// rows at `top/image_height` and `bottom/image_height` (v = 0 at the image
/// top, Bevy's convention). Padding never leaks into UV space.
///
/// With `using_atlas` set, every UV — extreme corners included — is remapped
/// linearly into the `[uv_atlas_min, uv_atlas_max]` sub-rectangle.
pub fn patch_uvs(uvs: &mut [[f32; 2]], slice: &Slice9, image_width: f32, image_height: f32) {
    let columns = [0.0, slice.left / image_width, slice.right / image_width, 1.0];
    let rows = [0.0, slice.top / image_height, slice.bottom / image_height, 1.0];

    for (index, uv) in uvs.iter_mut().enumerate() {
        let (col, row) = grid_cell(index);
        let mut u = columns[col];
        let mut v = rows[row];

        if slice.using_atlas {
            u = slice.uv_atlas_min.x + u * (slice.uv_atlas_max.x - slice.uv_atlas_min.x);
            v = slice.uv_atlas_min.y + v * (slice.uv_atlas_max.y - slice.uv_atlas_min.y);
        }

        uv[0] = u;
        uv[1] = v;
    }
}

/// Apply both kernels to a mesh's attribute buffers in place.
///
/// Callers hold the precondition guard: in material-owned mode with no bound
/// texture this must not be called at all (there is nothing meaningful to
/// map); in custom-material mode pass `Vec2::ONE` so UV insets equal the raw
/// pixel values. Mutating the mesh through `Assets::get_mut` marks it
/// changed, so the renderer re-uploads both buffers.
pub fn regenerate_mesh(mesh: &mut Mesh, slice: &Slice9, image_size: Vec2) {
    if let Some(VertexAttributeValues::Float32x3(positions)) =
        mesh.attribute_mut(Mesh::ATTRIBUTE_POSITION)
    {
        patch_positions(positions, slice.width, slice.height, slice.padding);
    }

    if let Some(VertexAttributeValues::Float32x2(uvs)) = mesh.attribute_mut(Mesh::ATTRIBUTE_UV_0) {
        patch_uvs(uvs, slice, image_size.x, image_size.y);
    }
}
