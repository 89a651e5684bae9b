extern crate rustdct;

use std::sync::Arc;

use rustdct::algorithm::Type2And3Naive;
use rustdct::{DctPlanner, TransformType2And3};

use crate::error::{Error, Result};
use crate::image::grid::Grid;
use crate::numerics::dct::{orthonormal_scale, CosineTransform, Normalization};
use crate::Float;

/**
 * One axis of the separable transform: a rustdct DCT-II/DCT-III pair plus the scaling that
 * turns rustdct's raw convention into `Normalization`.
 */
struct Axis {
    dct: Arc<dyn TransformType2And3<Float>>,
    forward_scales: Option<Vec<Float>>,
    inverse_scales: Vec<Float>,
    scratch: Vec<Float>
}

impl Axis {

    fn new(dct: Arc<dyn TransformType2And3<Float>>, len: usize, normalization: Normalization) -> Axis {
        let scratch = vec![0.0; dct.get_scratch_len()];
        // rustdct's DCT-III halves its first input, which the inverse scales compensate for
        let (forward_scales, inverse_scales) = match normalization {
            Normalization::Orthonormal => {
                let scales = (0..len).map(|k| orthonormal_scale(k, len)).collect::<Vec<Float>>();
                let inverse = scales.iter().enumerate().map(|(k, s)| match k { 0 => 2.0*s, _ => *s }).collect();
                (Some(scales), inverse)
            },
            Normalization::Unnormalized => (None, vec![2.0/(len as Float); len])
        };
        Axis { dct, forward_scales, inverse_scales, scratch }
    }

    fn forward(&mut self, values: &mut [Float]) -> () {
        self.dct.process_dct2_with_scratch(values, &mut self.scratch);
        if let Some(scales) = &self.forward_scales {
            for (v, s) in values.iter_mut().zip(scales) {
                *v *= s;
            }
        }
    }

    fn inverse(&mut self, values: &mut [Float]) -> () {
        for (v, s) in values.iter_mut().zip(&self.inverse_scales) {
            *v *= s;
        }
        self.dct.process_dct3_with_scratch(values, &mut self.scratch);
    }
}

/**
 * 2-D DCT applied as 1-D passes over rows, then columns (reversed for the inverse).
 * Columns go through a reused gather buffer.
 */
pub struct SeparableDct {
    height: usize,
    width: usize,
    normalization: Normalization,
    name: &'static str,
    rows: Axis,
    cols: Axis,
    column: Vec<Float>
}

impl SeparableDct {

    /**
     * Orthonormal transform on rustdct's planned, FFT based algorithms.
     */
    pub fn fft(height: usize, width: usize) -> SeparableDct {
        let mut planner = DctPlanner::<Float>::new();
        // rustdct does not plan zero length transforms; empty grids never reach them
        let row_dct = planner.plan_dct2(width.max(1));
        let col_dct = planner.plan_dct2(height.max(1));
        SeparableDct::with_axes(height, width, Normalization::Orthonormal, "fft", row_dct, col_dct)
    }

    /**
     * O(n^2) per axis transform on rustdct's naive algorithm, in either normalization.
     */
    pub fn direct(height: usize, width: usize, normalization: Normalization) -> SeparableDct {
        let row_dct: Arc<dyn TransformType2And3<Float>> = Arc::new(Type2And3Naive::new(width.max(1)));
        let col_dct: Arc<dyn TransformType2And3<Float>> = Arc::new(Type2And3Naive::new(height.max(1)));
        SeparableDct::with_axes(height, width, normalization, "direct", row_dct, col_dct)
    }

    fn with_axes(
        height: usize,
        width: usize,
        normalization: Normalization,
        name: &'static str,
        row_dct: Arc<dyn TransformType2And3<Float>>,
        col_dct: Arc<dyn TransformType2And3<Float>>) -> SeparableDct {
        SeparableDct {
            height,
            width,
            normalization,
            name,
            rows: Axis::new(row_dct, width, normalization),
            cols: Axis::new(col_dct, height, normalization),
            column: vec![0.0; height]
        }
    }

    fn check_shape(&self, grid: &Grid) -> Result<()> {
        match grid.height() == self.height && grid.width() == self.width {
            true => Ok(()),
            false => Err(Error::invalid_argument(format!("grid {}x{} does not match planned {}x{}", grid.height(), grid.width(), self.height, self.width)))
        }
    }

    fn gather_column(&mut self, grid: &Grid, col: usize) -> () {
        for r in 0..self.height {
            self.column[r] = grid.get(r, col);
        }
    }

    fn scatter_column(&self, grid: &mut Grid, col: usize) -> () {
        for r in 0..self.height {
            grid.set(r, col, self.column[r]);
        }
    }
}

impl CosineTransform for SeparableDct {

    fn forward(&mut self, grid: &mut Grid) -> Result<()> {
        self.check_shape(grid)?;
        if grid.is_empty() {
            return Ok(());
        }

        for r in 0..self.height {
            self.rows.forward(grid.row_mut(r));
        }
        for c in 0..self.width {
            self.gather_column(grid, c);
            self.cols.forward(&mut self.column);
            self.scatter_column(grid, c);
        }
        Ok(())
    }

    fn inverse(&mut self, grid: &mut Grid) -> Result<()> {
        self.check_shape(grid)?;
        if grid.is_empty() {
            return Ok(());
        }

        for c in 0..self.width {
            self.gather_column(grid, c);
            self.cols.inverse(&mut self.column);
            self.scatter_column(grid, c);
        }
        for r in 0..self.height {
            self.rows.inverse(grid.row_mut(r));
        }
        Ok(())
    }

    fn normalization(&self) -> Normalization {
        self.normalization
    }

    fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    fn name(&self) -> &str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unnormalized_axis_matches_cosine_sum() {
        let n = 5;
        let dct: Arc<dyn TransformType2And3<Float>> = Arc::new(Type2And3Naive::new(n));
        let mut axis = Axis::new(dct, n, Normalization::Unnormalized);
        let input = [1.0, -2.0, 0.5, 3.0, 0.25];
        let mut values = input;
        axis.forward(&mut values);
        for k in 0..n {
            let expected = input.iter().enumerate()
                .map(|(i, x)| x*(crate::float::consts::PI*(k as Float)*((i as Float) + 0.5)/(n as Float)).cos())
                .sum::<Float>();
            assert!((values[k] - expected).abs() < 1e-12);
        }
        axis.inverse(&mut values);
        for (v, x) in values.iter().zip(&input) {
            assert!((v - x).abs() < 1e-12);
        }
    }

    #[test]
    fn wrong_shape_is_rejected() {
        let mut transform = SeparableDct::direct(3, 4, Normalization::Orthonormal);
        assert!(transform.forward(&mut Grid::zeros(4, 3)).is_err());
        assert!(transform.inverse(&mut Grid::zeros(3, 5)).is_err());
        assert!(transform.forward(&mut Grid::zeros(3, 4)).is_ok());
    }
}
