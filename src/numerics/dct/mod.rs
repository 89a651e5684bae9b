use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::image::grid::Grid;
use crate::Float;

pub mod separable;

pub use self::separable::SeparableDct;

/**
 * Scaling convention of a 2-D DCT-II / DCT-III pair.
 *
 * `Orthonormal`: forward is the orthonormal DCT-II and inverse is its transpose.
 * `Unnormalized`: forward is `X_k = sum_n x_n cos(pi k (n + 1/2) / N)` along each axis and inverse
 * is its exact inverse, so the transpose of inverse is forward followed by `adjoint_weight`.
 */
#[derive(Debug,Copy,Clone,PartialEq,Eq,Serialize,Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    Orthonormal,
    Unnormalized
}

impl Normalization {

    /**
     * Factor applied to coefficient `(row, col)` after the forward transform so that the result
     * equals the transpose of `inverse` applied to the same grid.
     */
    pub fn adjoint_weight(&self, row: usize, col: usize, height: usize, width: usize) -> Float {
        match self {
            Normalization::Orthonormal => 1.0,
            Normalization::Unnormalized => unnormalized_axis_weight(row, height)*unnormalized_axis_weight(col, width)
        }
    }

    pub fn adjoint_weights(&self, height: usize, width: usize) -> Option<Grid> {
        match self {
            Normalization::Orthonormal => None,
            Normalization::Unnormalized => {
                let mut weights = Grid::zeros(height, width);
                for r in 0..height {
                    for c in 0..width {
                        weights.set(r, c, self.adjoint_weight(r, c, height, width));
                    }
                }
                Some(weights)
            }
        }
    }
}

fn unnormalized_axis_weight(k: usize, n: usize) -> Float {
    let w = match k {
        0 => 0.5,
        _ => 1.0
    };
    2.0*w/(n as Float)
}

/**
 * Separable 2-D cosine transform over a fixed `height x width` shape.
 * Both directions work in place and reject grids of any other shape.
 */
pub trait CosineTransform {
    fn forward(&mut self, grid: &mut Grid) -> Result<()>;
    fn inverse(&mut self, grid: &mut Grid) -> Result<()>;
    fn normalization(&self) -> Normalization;
    fn shape(&self) -> (usize, usize);
    fn name(&self) -> &str;
}

impl fmt::Debug for dyn CosineTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Display for dyn CosineTransform {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (height, width) = self.shape();
        write!(f, "{}_{}x{}_{:?}", self.name(), height, width, self.normalization())
    }
}

fn orthonormal_scale(k: usize, n: usize) -> Float {
    match k {
        0 => (1.0/(n as Float)).sqrt(),
        _ => (2.0/(n as Float)).sqrt()
    }
}
