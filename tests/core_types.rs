use edgescreen::{EdgeScreenError, Grid, Kernel, ThresholdRange};

#[test]
fn grid_rejects_zero_dimensions() {
    let err = Grid::from_vec(vec![0.0; 4], 0, 1).err().unwrap();
    assert_eq!(
        err,
        EdgeScreenError::InvalidDimensions {
            width: 0,
            height: 1,
        }
    );

    let err = Grid::zeros(1, 0).err().unwrap();
    assert_eq!(
        err,
        EdgeScreenError::InvalidDimensions {
            width: 1,
            height: 0,
        }
    );
}

#[test]
fn grid_rejects_short_buffer() {
    let err = Grid::from_vec(vec![0.0; 3], 2, 2).err().unwrap();
    assert_eq!(err, EdgeScreenError::BufferTooSmall { needed: 4, got: 3 });
}

#[test]
fn grid_rejects_oversized_buffer() {
    let err = Grid::from_vec(vec![0.0; 5], 2, 2).err().unwrap();
    assert_eq!(
        err,
        EdgeScreenError::InvalidDimensions {
            width: 2,
            height: 2,
        }
    );
}

#[test]
fn grid_accessors_match_layout() {
    let data: Vec<f64> = (0..12).map(f64::from).collect();
    let grid = Grid::from_vec(data, 4, 3).unwrap();

    assert_eq!(grid.width(), 4);
    assert_eq!(grid.height(), 3);
    assert_eq!(grid.get(2, 1), Some(6.0));
    assert_eq!(grid.get(4, 0), None);
    assert_eq!(grid.row(2).unwrap(), &[8.0, 9.0, 10.0, 11.0]);
    assert!(grid.row(3).is_none());
    assert_eq!(grid.max_value(), 11.0);
    assert!(grid.same_shape(&Grid::zeros(4, 3).unwrap()));
    assert!(!grid.same_shape(&Grid::zeros(3, 4).unwrap()));
}

#[test]
fn kernel_rejects_even_dimensions() {
    let err = Kernel::from_vec(vec![0.0; 4], 2, 2).err().unwrap();
    assert_eq!(
        err,
        EdgeScreenError::InvalidInput("kernel dimensions must be odd")
    );
}

#[test]
fn gaussian_kernel_weights_sum_to_one() {
    let kernel = Kernel::gaussian_5x5();
    assert_eq!(kernel.width(), 5);
    assert_eq!(kernel.height(), 5);
    let sum: f64 = kernel.grid().as_slice().iter().sum();
    assert!((sum - 1.0).abs() < 1e-12);
}

#[test]
fn threshold_range_rejects_inverted_bounds() {
    let err = ThresholdRange::new(2.0, 1.0).err().unwrap();
    assert_eq!(
        err,
        EdgeScreenError::InvalidInput("threshold range requires low <= high")
    );
    assert!(ThresholdRange::new(f64::NAN, 1.0).is_err());

    let range = ThresholdRange::new(1.0, 2.0).unwrap();
    assert_eq!(range.low(), 1.0);
    assert_eq!(range.high(), 2.0);
}
