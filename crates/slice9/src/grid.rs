//! Control-grid layout for the nine-slice plane.
//!
//! The plane is a fixed 4x4 grid of vertices, row-major with row 0 along the
//! top edge:
//!
//! ```text
//!  0--1------------2--3
//!  |  |            |  |
//!  4--5------------6--7
//!  |  |            |  |
//!  8--9-----------10--11
//!  |  |            |  |
//! 12--13----------14--15
//! ```
//!
//! Columns 0/3 and rows 0/3 form the outer ring (the plane extremes); columns
//! 1/2 and rows 1/2 are the inner rings that the padding and texture insets
//! move around. Everything that touches a vertex index goes through
//! [`grid_cell`] so the layout lives in exactly one place.

/// Vertices per axis.
pub const GRID_DIM: usize = 4;

/// Total vertex count of the control grid.
pub const VERTEX_COUNT: usize = GRID_DIM * GRID_DIM;

/// Quads per axis (3x3 patches).
pub const PATCH_DIM: usize = GRID_DIM - 1;

/// Index count of the fixed triangulation: 9 quads, 2 triangles each.
pub const INDEX_COUNT: usize = PATCH_DIM * PATCH_DIM * 6;

/// Map a vertex index to its (column, row) cell in the 4x4 grid.
#[inline]
pub const fn grid_cell(index: usize) -> (usize, usize) {
    (index % GRID_DIM, index / GRID_DIM)
}

/// Fixed triangulation connecting the 4x4 grid into a 3x3 grid of quads.
///
/// Two triangles per quad, counter-clockwise winding for a front face toward
/// +Z (row index grows downward, so the quad's bottom row is `index + 4`).
/// Computed once at mesh creation and never again.
pub fn grid_indices() -> [u32; INDEX_COUNT] {
    let mut indices = [0u32; INDEX_COUNT];
    let mut cursor = 0;

    for row in 0..PATCH_DIM {
        for col in 0..PATCH_DIM {
            let top_left = (row * GRID_DIM + col) as u32;
            let top_right = top_left + 1;
            let bottom_left = top_left + GRID_DIM as u32;
            let bottom_right = bottom_left + 1;

            // Triangle 1: top-left, bottom-left, bottom-right
            indices[cursor] = top_left;
            indices[cursor + 1] = bottom_left;
            indices[cursor + 2] = bottom_right;

            // Triangle 2: top-left, bottom-right, top-right
            indices[cursor + 3] = top_left;
            indices[cursor + 4] = bottom_right;
            indices[cursor + 5] = top_right;

            cursor += 6;
        }
    }

    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_cell_corners() {
        assert_eq!(grid_cell(0), (0, 0));
        assert_eq!(grid_cell(3), (3, 0));
        assert_eq!(grid_cell(12), (0, 3));
        assert_eq!(grid_cell(15), (3, 3));
    }

    #[test]
    fn test_grid_cell_inner_ring() {
        assert_eq!(grid_cell(5), (1, 1));
        assert_eq!(grid_cell(6), (2, 1));
        assert_eq!(grid_cell(9), (1, 2));
        assert_eq!(grid_cell(10), (2, 2));
    }

    #[test]
    fn test_grid_indices_cover_all_vertices() {
        let indices = grid_indices();
        assert_eq!(indices.len(), 54);

        for &i in indices.iter() {
            assert!((i as usize) < VERTEX_COUNT);
        }
        // Every vertex participates in at least one triangle
        for vertex in 0..VERTEX_COUNT as u32 {
            assert!(indices.contains(&vertex));
        }
    }

    #[test]
    fn test_first_quad_triangulation() {
        let indices = grid_indices();
        assert_eq!(&indices[0..6], &[0, 4, 5, 0, 5, 1]);
    }

    #[test]
    fn test_winding_faces_positive_z() {
        // With row 0 at the top (+Y) and columns growing toward +X, each
        // triangle's cross product must point toward +Z.
        let indices = grid_indices();
        let position = |i: u32| {
            let (col, row) = grid_cell(i as usize);
            (col as f32, -(row as f32))
        };

        for tri in indices.chunks(3) {
            let (ax, ay) = position(tri[0]);
            let (bx, by) = position(tri[1]);
            let (cx, cy) = position(tri[2]);
            let cross = (bx - ax) * (cy - ay) - (by - ay) * (cx - ax);
            assert!(cross > 0.0);
        }
    }
}
