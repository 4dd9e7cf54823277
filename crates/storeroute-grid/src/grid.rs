//! Traversal-cost grid.
//!
//! Built once from a single-channel intensity surface (a grayscale map of the
//! store) and read-only afterwards. Brighter pixels are easier to cross:
//! `cost = clamp(255 - intensity, 1, 255)`, so every cell stays traversable
//! at a cost of at least 1.

use image::GrayImage;
use log::info;
use std::path::Path;
use storeroute_core::{Coordinate, Result, RouteError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CostGrid {
    rows: usize,
    cols: usize,
    /// Row-major cell costs, each in `1..=255`
    costs: Vec<u8>,
}

#[inline]
fn intensity_to_cost(intensity: u8) -> u8 {
    (255 - intensity).max(1)
}

impl CostGrid {
    /// Build from row-major intensities.
    pub fn from_intensity(rows: usize, cols: usize, intensity: Vec<u8>) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(RouteError::MapLoad(format!(
                "grid must not be empty, got {rows}x{cols}"
            )));
        }
        if intensity.len() != rows * cols {
            return Err(RouteError::MapLoad(format!(
                "expected {} intensity values for a {rows}x{cols} grid, got {}",
                rows * cols,
                intensity.len()
            )));
        }
        if rows > i32::MAX as usize || cols > i32::MAX as usize {
            return Err(RouteError::MapLoad(format!("grid {rows}x{cols} is too large")));
        }

        let costs = intensity.into_iter().map(intensity_to_cost).collect();
        Ok(Self { rows, cols, costs })
    }

    /// Build from an 8-bit grayscale image; image rows become grid rows.
    pub fn from_luma(image: &GrayImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        Self::from_intensity(height as usize, width as usize, image.as_raw().clone())
    }

    /// Decode a map image from disk. Colour images are converted to luma.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|e| {
                RouteError::MapLoad(format!("failed to read map image {}: {}", path.display(), e))
            })?
            .into_luma8();

        let grid = Self::from_luma(&image)?;
        info!(
            "Loaded cost grid {}x{} from {}",
            grid.rows,
            grid.cols,
            path.display()
        );
        Ok(grid)
    }

    /// Grid where every cell has the same cost (at least 1).
    pub fn uniform(rows: usize, cols: usize, cost: u8) -> Self {
        Self {
            rows,
            cols,
            costs: vec![cost.max(1); rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        coord.row >= 0
            && coord.col >= 0
            && (coord.row as usize) < self.rows
            && (coord.col as usize) < self.cols
    }

    /// Flat index of an in-bounds cell.
    pub fn index_of(&self, coord: Coordinate) -> Result<usize> {
        if !self.contains(coord) {
            return Err(RouteError::OutOfBounds {
                coordinate: coord,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(coord.row as usize * self.cols + coord.col as usize)
    }

    #[inline]
    pub fn coordinate_of(&self, index: usize) -> Coordinate {
        Coordinate::new((index / self.cols) as i32, (index % self.cols) as i32)
    }

    pub fn cost(&self, coord: Coordinate) -> Result<u8> {
        self.index_of(coord).map(|i| self.costs[i])
    }

    #[inline(always)]
    pub(crate) fn cost_at(&self, index: usize) -> u8 {
        self.costs[index]
    }
}
