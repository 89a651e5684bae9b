
use crate::error::{Error, Result};
use crate::image::grid::Grid;
use crate::numerics::dct::{CosineTransform, Normalization};
use crate::Float;

/**
 * Linear map from cosine coefficients to pixel intensities and its transpose.
 *
 * `forward` runs the inverse transform over the whole grid, `restrict` keeps the sampled positions
 * and `adjoint` is the exact transpose of `restrict . forward` applied to a grid that is zero off
 * the sample set. For orthonormal backends the adjoint is the forward transform; unnormalized
 * backends additionally scale each coefficient by the precomputed `adjoint_weights`.
 */
#[derive(Debug)]
pub struct MeasurementOperator {
    height: usize,
    width: usize,
    transform: Box<dyn CosineTransform>,
    adjoint_weights: Option<Grid>
}

impl MeasurementOperator {

    pub fn new(transform: Box<dyn CosineTransform>) -> MeasurementOperator {
        let (height, width) = transform.shape();
        let adjoint_weights = transform.normalization().adjoint_weights(height, width);
        MeasurementOperator { height, width, transform, adjoint_weights }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn len(&self) -> usize {
        self.height*self.width
    }

    pub fn normalization(&self) -> Normalization {
        self.transform.normalization()
    }

    fn check_shape(&self, grid: &Grid) -> Result<()> {
        match grid.height() == self.height && grid.width() == self.width {
            true => Ok(()),
            false => Err(Error::invalid_argument(format!("grid {}x{} does not match operator {}x{}", grid.height(), grid.width(), self.height, self.width)))
        }
    }

    /**
     * Full pixel-domain estimate of `coefficients`, written into `estimate`.
     */
    pub fn forward(&mut self, coefficients: &Grid, estimate: &mut Grid) -> Result<()> {
        self.check_shape(coefficients)?;
        self.check_shape(estimate)?;
        estimate.copy_from_slice(coefficients.as_slice());
        self.forward_in_place(estimate)
    }

    pub(crate) fn forward_in_place(&mut self, grid: &mut Grid) -> Result<()> {
        self.transform.inverse(grid)
    }

    pub fn restrict(&self, estimate: &Grid, indices: &[usize]) -> Result<Vec<Float>> {
        self.check_shape(estimate)?;
        check_indices(indices, self.len())?;
        let values = estimate.as_slice();
        Ok(indices.iter().map(|&idx| values[idx]).collect())
    }

    /**
     * Transpose of `restrict`: writes `values` at `indices` into a zeroed `target`.
     */
    pub fn embed(&self, values: &[Float], indices: &[usize], target: &mut Grid) -> Result<()> {
        self.check_shape(target)?;
        check_indices(indices, self.len())?;
        if values.len() != indices.len() {
            return Err(Error::invalid_argument(format!("{} values for {} indices", values.len(), indices.len())));
        }
        target.fill(0.0);
        let data = target.as_mut_slice();
        for (&idx, &v) in indices.iter().zip(values) {
            data[idx] = v;
        }
        Ok(())
    }

    /**
     * Maps a pixel-domain grid that is zero outside the sample set to coefficient space, in place.
     * No factor 2 is applied here.
     */
    pub fn adjoint(&mut self, grid: &mut Grid) -> Result<()> {
        self.transform.forward(grid)?;
        if let Some(weights) = &self.adjoint_weights {
            for (v, w) in grid.as_mut_slice().iter_mut().zip(weights.as_slice()) {
                *v *= w;
            }
        }
        Ok(())
    }
}

fn check_indices(indices: &[usize], len: usize) -> Result<()> {
    match indices.iter().find(|&&idx| idx >= len) {
        Some(idx) => Err(Error::invalid_argument(format!("index {} outside grid of {} entries", idx, len))),
        None => Ok(())
    }
}
