//! Vertex-buffer helpers for the presentation layer.
//!
//! Vertices are the particles in row-major order. Normals are left to the
//! renderer.

use crate::float::Float;
use crate::particle::Particle;
use alloc::vec::Vec as AllocVec;

/// Two counter-clockwise triangles per grid cell, viewed from +z.
///
/// With row 0 at the top, cell `(row, col)` with corners
/// `a = (row, col)`, `b = (row + 1, col)`, `c = (row + 1, col + 1)`,
/// `d = (row, col + 1)` yields `[a, b, d]` and `[b, c, d]`.
///
/// Indices are `u32`; `ClothConfig::validate` rejects grids with more
/// vertices than that, so a validated grid never truncates.
pub fn triangle_indices(rows: usize, cols: usize) -> AllocVec<u32> {
    debug_assert!(rows.saturating_mul(cols) <= u32::MAX as usize);
    let cells = rows.saturating_sub(1) * cols.saturating_sub(1);
    let mut indices = AllocVec::with_capacity(cells * 6);
    for row in 0..rows.saturating_sub(1) {
        for col in 0..cols.saturating_sub(1) {
            let a = (row * cols + col) as u32;
            let b = ((row + 1) * cols + col) as u32;
            let c = ((row + 1) * cols + col + 1) as u32;
            let d = (row * cols + col + 1) as u32;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    indices
}

/// Texture coordinates, `u` across columns and `v` up from the bottom row.
pub fn uvs(rows: usize, cols: usize) -> AllocVec<[f32; 2]> {
    let u_span = cols.saturating_sub(1).max(1) as f32;
    let v_span = rows.saturating_sub(1).max(1) as f32;
    let mut out = AllocVec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            out.push([col as f32 / u_span, 1.0 - row as f32 / v_span]);
        }
    }
    out
}

/// Replace `out` with flat `[x0, y0, z0, x1, ...]`, reusing its allocation.
pub fn write_positions<F: Float>(particles: &[Particle<F>], out: &mut AllocVec<F>) {
    out.clear();
    out.reserve(particles.len() * 3);
    for p in particles {
        out.extend_from_slice(&p.pos.to_array());
    }
}
