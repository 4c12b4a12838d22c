//! Particle store: a fixed `rows x cols` grid of Verlet particles.

use crate::error::ClothError;
use crate::float::Float;
use crate::particle::Particle;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

/// Owns the kinematic state of every particle in the cloth.
///
/// Particle at (row, col) has index `row * cols + col`. The particle count is
/// fixed for the lifetime of the grid.
#[derive(Clone, Debug)]
pub struct ParticleGrid<F: Float> {
    particles: AllocVec<Particle<F>>,
    rows: usize,
    cols: usize,
    spacing: F,
}

impl<F: Float> ParticleGrid<F> {
    /// Lay the grid out in the z = 0 plane, centred on x, with the top row
    /// pinned.
    ///
    /// `(row, col)` starts at
    /// `((col - cols/2) * spacing, (rows/2 - row) * spacing + vertical_offset, 0)`,
    /// so row 0 is the highest row and y decreases as the row index grows.
    pub fn initialize(rows: usize, cols: usize, spacing: F, vertical_offset: F) -> Self {
        let half_cols = F::from_usize(cols) * F::half();
        let half_rows = F::from_usize(rows) * F::half();
        let mut particles = AllocVec::with_capacity(rows * cols);

        for row in 0..rows {
            for col in 0..cols {
                let x = (F::from_usize(col) - half_cols) * spacing;
                let y = (half_rows - F::from_usize(row)) * spacing + vertical_offset;
                let pos = Vec3::new(x, y, F::zero());
                if row == 0 {
                    particles.push(Particle::pinned(pos));
                } else {
                    particles.push(Particle::new(pos));
                }
            }
        }

        ParticleGrid { particles, rows, cols, spacing }
    }

    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Inverse of [`index`](Self::index).
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }

    fn check(&self, index: usize) -> Result<(), ClothError> {
        if index < self.particles.len() {
            Ok(())
        } else {
            Err(ClothError::ParticleOutOfBounds { index, count: self.particles.len() })
        }
    }

    pub fn pin(&mut self, index: usize) -> Result<(), ClothError> {
        self.check(index)?;
        self.particles[index].pin();
        Ok(())
    }

    pub fn unpin(&mut self, index: usize) -> Result<(), ClothError> {
        self.check(index)?;
        self.particles[index].unpin();
        Ok(())
    }

    pub fn positions(&self) -> AllocVec<[F; 3]> {
        self.particles.iter().map(|p| p.pos.to_array()).collect()
    }

    /// # Panics
    ///
    /// Panics if `(row, col)` lies outside the grid.
    pub fn position_at(&self, row: usize, col: usize) -> Vec3<F> {
        self.particles[self.index(row, col)].pos
    }

    pub fn particles(&self) -> &[Particle<F>] { &self.particles }
    pub fn particles_mut(&mut self) -> &mut [Particle<F>] { &mut self.particles }
    pub fn particle(&self, index: usize) -> Option<&Particle<F>> { self.particles.get(index) }
    pub fn rows(&self) -> usize { self.rows }
    pub fn cols(&self) -> usize { self.cols }
    pub fn spacing(&self) -> F { self.spacing }
    pub fn len(&self) -> usize { self.particles.len() }
    pub fn is_empty(&self) -> bool { self.particles.is_empty() }
}
