//! Same-shape 2D convolution with reflect padding.
//!
//! The output cell at `(x, y)` is the product-sum of the kernel aligned with
//! the input neighborhood centered at `(x, y)`. Out-of-range taps reflect
//! off the border with the edge sample duplicated (`d c b a | a b c d`), so
//! every cell, border included, is fully defined.

use crate::grid::{Grid, Kernel};
use crate::util::{EdgeScreenError, EdgeScreenResult};

/// Convolves `image` with `kernel`, producing a grid of the same shape.
///
/// Fails with `DimensionMismatch` when the kernel exceeds the image in
/// either axis.
pub fn convolve(image: &Grid, kernel: &Kernel) -> EdgeScreenResult<Grid> {
    let width = image.width();
    let height = image.height();
    let k_width = kernel.width();
    let k_height = kernel.height();
    if k_width > width || k_height > height {
        return Err(EdgeScreenError::DimensionMismatch {
            a_width: k_width,
            a_height: k_height,
            b_width: width,
            b_height: height,
        });
    }

    let half_w = (k_width / 2) as isize;
    let half_h = (k_height / 2) as isize;
    let mut out = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0.0f64;
            for ky in 0..k_height {
                let sy = reflect(y as isize + ky as isize - half_h, height);
                let img_row = image.row(sy).expect("reflected row index is in range");
                let k_row = kernel.grid().row(ky).expect("kernel row index is in range");
                for (kx, weight) in k_row.iter().enumerate() {
                    let sx = reflect(x as isize + kx as isize - half_w, width);
                    acc += img_row[sx] * weight;
                }
            }
            out.push(acc);
        }
    }
    Grid::from_vec(out, width, height)
}

/// Reflects an out-of-range index back into `[0, len)`, duplicating the edge
/// sample. A single bounce suffices: the kernel never exceeds the image, so
/// indices overshoot by less than `len`.
fn reflect(idx: isize, len: usize) -> usize {
    let len = len as isize;
    let idx = if idx < 0 {
        -idx - 1
    } else if idx >= len {
        2 * len - 1 - idx
    } else {
        idx
    };
    idx as usize
}

#[cfg(test)]
mod tests {
    use super::reflect;

    #[test]
    fn reflect_duplicates_edge_samples() {
        assert_eq!(reflect(-1, 5), 0);
        assert_eq!(reflect(-2, 5), 1);
        assert_eq!(reflect(0, 5), 0);
        assert_eq!(reflect(4, 5), 4);
        assert_eq!(reflect(5, 5), 4);
        assert_eq!(reflect(6, 5), 3);
    }
}
