extern crate argmin;

use std::cell::RefCell;

use argmin::core::{CostFunction, Error as ArgminError, Gradient};

use crate::error::{Error, Result};
use crate::image::grid::Grid;
use crate::numerics::lbfgs::Param;
use crate::sensing::{operator::MeasurementOperator, sample_set::SampleSet};
use crate::Float;

struct Workspace {
    operator: MeasurementOperator,
    estimate: Grid,
    residual: Grid
}

/**
 * Sum of squared residuals at the sampled pixels and its gradient w.r.t. the coefficients.
 *
 * cost = sum_i (A x - b)_i^2, gradient = 2 A^T (A x - b) with A = restrict . forward.
 * Both scratch grids are allocated once and overwritten on every call.
 */
pub struct ObjectiveEvaluator<'a> {
    samples: &'a SampleSet,
    len: usize,
    workspace: RefCell<Workspace>
}

impl<'a> ObjectiveEvaluator<'a> {

    pub fn new(operator: MeasurementOperator, samples: &'a SampleSet) -> Result<ObjectiveEvaluator<'a>> {
        let (height, width) = (operator.height(), operator.width());
        if samples.height() != height || samples.width() != width {
            return Err(Error::invalid_argument(format!("sample set of a {}x{} image does not match operator {}x{}", samples.height(), samples.width(), height, width)));
        }
        let workspace = Workspace { operator, estimate: Grid::zeros(height, width), residual: Grid::zeros(height, width) };
        Ok(ObjectiveEvaluator { samples, len: height*width, workspace: RefCell::new(workspace) })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn into_operator(self) -> MeasurementOperator {
        self.workspace.into_inner().operator
    }

    /**
     * Cost and gradient for `coefficients`. Fails if either slice has the wrong length.
     */
    pub fn cost_and_gradient(&self, coefficients: &[Float], gradient: &mut [Float]) -> Result<Float> {
        if gradient.len() != self.len {
            return Err(Error::invalid_argument(format!("expected a gradient of length {}, got {}", self.len, gradient.len())));
        }
        self.evaluate(coefficients, Some(gradient))
    }

    fn evaluate(&self, x: &[Float], gradient: Option<&mut [Float]>) -> Result<Float> {
        if x.len() != self.len {
            return Err(Error::invalid_argument(format!("expected {} coefficients, got {}", self.len, x.len())));
        }
        let mut workspace = self.workspace.borrow_mut();
        let Workspace { operator, estimate, residual } = &mut *workspace;

        estimate.copy_from_slice(x);
        operator.forward_in_place(estimate)?;

        residual.fill(0.0);
        let predicted = estimate.as_slice();
        let residual_values = residual.as_mut_slice();
        let mut cost = 0.0;
        for (idx, observed) in self.samples.iter() {
            let r = predicted[idx] - observed as Float;
            cost += r*r;
            residual_values[idx] = r;
        }

        if let Some(g) = gradient {
            operator.adjoint(residual)?;
            for (g_i, r_i) in g.iter_mut().zip(residual.as_slice()) {
                *g_i = 2.0*r_i;
            }
        }
        Ok(cost)
    }
}

impl<'a> CostFunction for ObjectiveEvaluator<'a> {
    type Param = Param;
    type Output = Float;

    fn cost(&self, param: &Param) -> std::result::Result<Float, ArgminError> {
        Ok(self.evaluate(param, None)?)
    }
}

impl<'a> Gradient for ObjectiveEvaluator<'a> {
    type Param = Param;
    type Gradient = Param;

    fn gradient(&self, param: &Param) -> std::result::Result<Param, ArgminError> {
        let mut g = vec![0.0; self.len];
        self.evaluate(param, Some(g.as_mut_slice()))?;
        Ok(g)
    }
}
