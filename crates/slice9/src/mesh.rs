//! Plane mesh construction.
//!
//! Builds the initial 4x4-grid plane at a given size: 16 vertices, uniform
//! spacing, UVs seeded at the full 0..1 extents, and the fixed triangulation
//! from [`grid`](crate::grid). The nine-slice shaping happens later, in
//! place, via [`regen`](crate::regen) — this builder never touches materials
//! or textures.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, Mesh, PrimitiveTopology};

use crate::grid::{grid_cell, grid_indices, PATCH_DIM, VERTEX_COUNT};

/// Build a plane subdivided into a 4x4 control grid, centered on the origin
/// and facing +Z.
///
/// Row 0 sits along the top edge (+Y), matching the layout diagram in
/// [`grid`](crate::grid), and UVs follow Bevy's convention (v = 0 at the top
/// of the image). Zero or negative sizes are not validated here; that is the
/// caller's configuration layer.
pub fn build_plane_mesh(width: f32, height: f32) -> Mesh {
    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(VERTEX_COUNT);
    let mut normals: Vec<[f32; 3]> = Vec::with_capacity(VERTEX_COUNT);
    let mut uvs: Vec<[f32; 2]> = Vec::with_capacity(VERTEX_COUNT);

    let step = PATCH_DIM as f32;

    for index in 0..VERTEX_COUNT {
        let (col, row) = grid_cell(index);
        let u = col as f32 / step;
        let v = row as f32 / step;

        positions.push([-width / 2.0 + u * width, height / 2.0 - v * height, 0.0]);
        normals.push([0.0, 0.0, 1.0]);
        uvs.push([u, v]);
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    );

    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(grid_indices().to_vec()));

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::mesh::VertexAttributeValues;

    fn positions(mesh: &Mesh) -> &Vec<[f32; 3]> {
        match mesh.attribute(Mesh::ATTRIBUTE_POSITION) {
            Some(VertexAttributeValues::Float32x3(values)) => values,
            _ => panic!("missing position attribute"),
        }
    }

    fn uvs(mesh: &Mesh) -> &Vec<[f32; 2]> {
        match mesh.attribute(Mesh::ATTRIBUTE_UV_0) {
            Some(VertexAttributeValues::Float32x2(values)) => values,
            _ => panic!("missing uv attribute"),
        }
    }

    #[test]
    fn test_vertex_and_index_counts() {
        let mesh = build_plane_mesh(2.0, 1.0);
        assert_eq!(positions(&mesh).len(), 16);
        assert_eq!(uvs(&mesh).len(), 16);
        assert_eq!(mesh.indices().map(|i| i.len()), Some(54));
    }

    #[test]
    fn test_corner_placement() {
        let mesh = build_plane_mesh(2.0, 1.0);
        let pos = positions(&mesh);

        assert_eq!(pos[0], [-1.0, 0.5, 0.0]);
        assert_eq!(pos[3], [1.0, 0.5, 0.0]);
        assert_eq!(pos[12], [-1.0, -0.5, 0.0]);
        assert_eq!(pos[15], [1.0, -0.5, 0.0]);
    }

    #[test]
    fn test_uvs_span_full_extent() {
        let mesh = build_plane_mesh(1.0, 1.0);
        let uv = uvs(&mesh);

        assert_eq!(uv[0], [0.0, 0.0]);
        assert_eq!(uv[3], [1.0, 0.0]);
        assert_eq!(uv[12], [0.0, 1.0]);
        assert_eq!(uv[15], [1.0, 1.0]);

        // Uniform interior spacing before any nine-slice shaping
        assert!((uv[5][0] - 1.0 / 3.0).abs() < 0.001);
        assert!((uv[5][1] - 1.0 / 3.0).abs() < 0.001);
    }
}
