/*
 * Spatial Grid Module
 *
 * This module defines the SpatialGrid struct for efficient neighbour lookups.
 * It divides the canvas into square cells one interaction radius wide, so any
 * two particles close enough to interact sit in the same or adjacent cells.
 *
 * The grid is an arena: the cell vectors are cleared and refilled every frame
 * rather than reallocated, and cells are addressed by a packed row-major index.
 */

use nannou::prelude::*;

pub struct SpatialGrid {
    pub cell_size: f32,
    pub cols: usize,
    pub rows: usize,
    cells: Vec<Vec<usize>>,
}

impl SpatialGrid {
    pub fn new(cell_size: f32, width: f32, height: f32) -> Self {
        let mut grid = Self {
            cell_size: cell_size.max(f32::EPSILON),
            cols: 0,
            rows: 0,
            cells: Vec::new(),
        };
        grid.resize(width, height);
        grid
    }

    // Recompute the grid dimensions; existing cell allocations are kept
    pub fn resize(&mut self, width: f32, height: f32) {
        self.cols = ((width / self.cell_size).ceil() as usize).max(1);
        self.rows = ((height / self.cell_size).ceil() as usize).max(1);
        self.cells.resize_with(self.cols * self.rows, Vec::new);
        self.cells.truncate(self.cols * self.rows);
        self.clear();
    }

    pub fn set_cell_size(&mut self, cell_size: f32, width: f32, height: f32) {
        self.cell_size = cell_size.max(f32::EPSILON);
        self.resize(width, height);
    }

    // Clear the grid
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    /// Cell coordinates of a canvas position. Positions outside the canvas
    /// land in the nearest edge cell, so every particle has exactly one cell.
    #[inline]
    pub fn cell_coords(&self, pos: Vec2) -> (usize, usize) {
        let cx = (pos.x / self.cell_size).floor().max(0.0) as usize;
        let cy = (pos.y / self.cell_size).floor().max(0.0) as usize;
        (cx.min(self.cols - 1), cy.min(self.rows - 1))
    }

    #[inline]
    pub fn cell_index(&self, pos: Vec2) -> usize {
        let (cx, cy) = self.cell_coords(pos);
        cy * self.cols + cx
    }

    // Insert a particle into the grid
    #[inline]
    pub fn insert(&mut self, particle_index: usize, position: Vec2) {
        let cell_index = self.cell_index(position);
        self.cells[cell_index].push(particle_index);
    }

    /// Clear and refill the grid from the current positions.
    pub fn rebuild<I>(&mut self, positions: I)
    where
        I: IntoIterator<Item = Vec2>,
    {
        self.clear();
        for (i, position) in positions.into_iter().enumerate() {
            self.insert(i, position);
        }
    }

    pub fn cell(&self, cx: usize, cy: usize) -> &[usize] {
        &self.cells[cy * self.cols + cx]
    }

    pub fn occupied_cells(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Visit every unordered pair of particles whose cells are equal or
    /// adjacent, each pair exactly once with `i < j`. The visiting order is
    /// deterministic for a given set of positions.
    pub fn for_each_candidate_pair<F>(&self, mut f: F)
    where
        F: FnMut(usize, usize),
    {
        let cols = self.cols as isize;
        let rows = self.rows as isize;

        for cy in 0..rows {
            for cx in 0..cols {
                let cell = &self.cells[(cy * cols + cx) as usize];
                if cell.is_empty() {
                    continue;
                }

                // Check the cell and its neighbours (3x3 grid)
                for dx in -1..=1 {
                    let nx = cx + dx;
                    if nx < 0 || nx >= cols {
                        continue;
                    }

                    for dy in -1..=1 {
                        let ny = cy + dy;
                        if ny < 0 || ny >= rows {
                            continue;
                        }

                        let neighbour = &self.cells[(ny * cols + nx) as usize];
                        for &i in cell {
                            for &j in neighbour {
                                if i < j {
                                    f(i, j);
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Reference O(n²) scan: every pair closer than `radius`, as `(i, j)` with `i < j`.
pub fn brute_force_pairs(positions: &[Vec2], radius: f32) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for i in 0..positions.len() {
        for j in (i + 1)..positions.len() {
            if positions[i].distance(positions[j]) < radius {
                pairs.push((i, j));
            }
        }
    }
    pairs
}
