//! Owned numeric grids and convolution kernels.
//!
//! `Grid` is the unit of exchange between pipeline stages: a contiguous
//! row-major buffer of `f64` samples with fixed dimensions. Stages never
//! mutate an input grid; each one allocates and returns a fresh output.
//! Samples are double precision throughout, including accumulation.

use crate::util::{EdgeScreenError, EdgeScreenResult};

#[cfg(feature = "image-io")]
pub mod io;

/// Owned 2D grid of `f64` samples in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    data: Vec<f64>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Creates a grid from a row-major buffer of exactly `width * height`
    /// samples.
    pub fn from_vec(data: Vec<f64>, width: usize, height: usize) -> EdgeScreenResult<Self> {
        let needed = checked_area(width, height)?;
        if data.len() < needed {
            return Err(EdgeScreenError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(EdgeScreenError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates a zero-filled grid.
    pub fn zeros(width: usize, height: usize) -> EdgeScreenResult<Self> {
        Self::constant(width, height, 0.0)
    }

    /// Creates a grid with every cell set to `value`.
    pub fn constant(width: usize, height: usize, value: f64) -> EdgeScreenResult<Self> {
        let needed = checked_area(width, height)?;
        Ok(Self {
            data: vec![value; needed],
            width,
            height,
        })
    }

    /// Returns the grid width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the grid height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the backing row-major slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Returns the sample at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// Returns row `y` as a contiguous slice.
    pub fn row(&self, y: usize) -> Option<&[f64]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        self.data.get(start..start + self.width)
    }

    /// Returns true when `other` has the same width and height.
    pub fn same_shape(&self, other: &Grid) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Returns the maximum sample value.
    pub fn max_value(&self) -> f64 {
        self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

fn checked_area(width: usize, height: usize) -> EdgeScreenResult<usize> {
    if width == 0 || height == 0 {
        return Err(EdgeScreenError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(EdgeScreenError::InvalidDimensions { width, height })
}

/// Small odd-dimensioned convolution operator. Never mutated once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    grid: Grid,
}

impl Kernel {
    /// Wraps a grid as a kernel. Both dimensions must be odd.
    pub fn from_grid(grid: Grid) -> EdgeScreenResult<Self> {
        if grid.width() % 2 == 0 || grid.height() % 2 == 0 {
            return Err(EdgeScreenError::InvalidInput(
                "kernel dimensions must be odd",
            ));
        }
        Ok(Self { grid })
    }

    /// Builds a kernel from a row-major buffer.
    pub fn from_vec(data: Vec<f64>, width: usize, height: usize) -> EdgeScreenResult<Self> {
        Self::from_grid(Grid::from_vec(data, width, height)?)
    }

    /// The 5x5 Gaussian blur kernel with coefficients over 159.
    pub fn gaussian_5x5() -> Self {
        #[rustfmt::skip]
        let weights = [
            2.0, 4.0, 5.0, 4.0, 2.0,
            4.0, 9.0, 12.0, 9.0, 4.0,
            5.0, 12.0, 15.0, 12.0, 5.0,
            4.0, 9.0, 12.0, 9.0, 4.0,
            2.0, 4.0, 5.0, 4.0, 2.0,
        ];
        let data = weights.iter().map(|w| w / 159.0).collect();
        Self::from_vec(data, 5, 5).expect("5x5 dimensions are odd")
    }

    /// Returns the kernel width in cells.
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    /// Returns the kernel height in cells.
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Returns the kernel weights as a grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }
}
