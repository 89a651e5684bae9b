extern crate rand;

use log::{info, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::image::{Image, grid::Grid};
use crate::numerics::dct::{CosineTransform, Normalization, SeparableDct};
use crate::numerics::lbfgs::{self, LbfgsParameters, Status};
use crate::sensing::{evaluator::ObjectiveEvaluator, operator::MeasurementOperator, sample_set::SampleSet};
use crate::Float;

#[derive(Debug,Copy,Clone,PartialEq,Eq,Serialize,Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformKind {
    Fft,
    Direct,
    DirectUnnormalized
}

impl TransformKind {
    pub fn build(&self, height: usize, width: usize) -> Box<dyn CosineTransform> {
        match self {
            TransformKind::Fft => Box::new(SeparableDct::fft(height, width)),
            TransformKind::Direct => Box::new(SeparableDct::direct(height, width, Normalization::Orthonormal)),
            TransformKind::DirectUnnormalized => Box::new(SeparableDct::direct(height, width, Normalization::Unnormalized))
        }
    }
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct RecoveryParameters {
    /// k = floor(n * sample_fraction) unless `sample_count` is set
    pub sample_fraction: Float,
    pub sample_count: Option<usize>,
    pub sparsity_weight: Float,
    pub initial_value: Float,
    pub seed: Option<u64>,
    pub transform: TransformKind,
    pub solver: LbfgsParameters
}

impl Default for RecoveryParameters {
    fn default() -> RecoveryParameters {
        RecoveryParameters {
            sample_fraction: 0.1,
            sample_count: None,
            sparsity_weight: 5.0,
            initial_value: 1.0,
            seed: None,
            transform: TransformKind::Fft,
            solver: LbfgsParameters::default()
        }
    }
}

impl RecoveryParameters {

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.sample_fraction) {
            return Err(Error::invalid_argument(format!("sample_fraction {} outside [0,1]", self.sample_fraction)));
        }
        if !(self.sparsity_weight >= 0.0) {
            return Err(Error::invalid_argument(format!("sparsity_weight {} must be non-negative", self.sparsity_weight)));
        }
        if !self.initial_value.is_finite() {
            return Err(Error::invalid_argument("initial_value must be finite"));
        }
        self.solver.validate()
    }

    pub fn sample_count(&self, n: usize) -> usize {
        match self.sample_count {
            Some(k) => k,
            None => (((n as Float)*self.sample_fraction).floor() as usize).min(n)
        }
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy()
        }
    }
}

#[derive(Debug,Clone)]
pub struct RecoveryResult {
    pub image: Image,
    pub coefficients: Grid,
    pub samples: SampleSet,
    pub status: Status,
    pub cost: Float,
    pub iterations: u64
}

impl RecoveryResult {
    /**
     * Strict policy: a solver run that did not converge becomes an error.
     */
    pub fn ensure_converged(&self) -> Result<()> {
        match self.status.is_success() {
            true => Ok(()),
            false => Err(Error::NumericFailure(format!("solver stopped after {} iterations: {}", self.iterations, self.status)))
        }
    }
}

/**
 * One recovery run: `new -> sample -> optimize -> reconstruct`. Every stage consumes the previous one.
 */
#[derive(Debug)]
pub struct RecoveryDriver {
    image: Image,
    parameters: RecoveryParameters
}

#[derive(Debug)]
pub struct Sampled {
    parameters: RecoveryParameters,
    samples: SampleSet
}

#[derive(Debug)]
pub struct Optimized {
    samples: SampleSet,
    operator: MeasurementOperator,
    coefficients: Grid,
    status: Status,
    cost: Float,
    iterations: u64
}

impl RecoveryDriver {

    pub fn new(image: Image, parameters: RecoveryParameters) -> Result<RecoveryDriver> {
        parameters.validate()?;
        Ok(RecoveryDriver { image, parameters })
    }

    pub fn run<R: Rng + ?Sized>(image: Image, parameters: RecoveryParameters, rng: &mut R) -> Result<RecoveryResult> {
        RecoveryDriver::new(image, parameters)?.sample(rng)?.optimize()?.reconstruct()
    }

    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> Result<Sampled> {
        let n = self.image.size();
        let k = self.parameters.sample_count(n);
        let samples = SampleSet::draw(&self.image, k, rng)?;
        info!("Sampled {} of {} pixels ({}x{})", samples.len(), n, self.image.height(), self.image.width());
        Ok(Sampled { parameters: self.parameters, samples })
    }

    /**
     * Skips the random draw and recovers from a given sample set of this image.
     */
    pub fn with_samples(self, samples: SampleSet) -> Result<Sampled> {
        if samples.height() != self.image.height() || samples.width() != self.image.width() {
            return Err(Error::invalid_argument("sample set does not belong to an image of this size"));
        }
        Ok(Sampled { parameters: self.parameters, samples })
    }
}

impl Sampled {

    pub fn samples(&self) -> &SampleSet {
        &self.samples
    }

    /**
     * Runs OWL-QN with L1 weight `sparsity_weight` from a constant start. A run that stops early is
     * logged and still yields its last iterate.
     */
    pub fn optimize(self) -> Result<Optimized> {
        let (height, width) = (self.samples.height(), self.samples.width());
        let operator = MeasurementOperator::new(self.parameters.transform.build(height, width));
        let evaluator = ObjectiveEvaluator::new(operator, &self.samples)?;
        let start = vec![self.parameters.initial_value; height*width];

        info!("Running OWL-QN over {} coefficients, sparsity weight {}", start.len(), self.parameters.sparsity_weight);
        let lbfgs::Minimum { problem, x, cost, status, iterations } =
            lbfgs::minimize(evaluator, start, &self.parameters.solver, self.parameters.sparsity_weight, true)?;

        match status.is_success() {
            true => info!("Solver {} after {} iterations, cost {:.6e}", status, iterations, cost),
            false => warn!("Solver stopped early ({}) after {} iterations, cost {:.6e}; reconstructing from the last iterate", status, iterations, cost)
        };

        let operator = problem.into_operator();
        let coefficients = Grid::from_vec(height, width, x)?;
        Ok(Optimized { samples: self.samples, operator, coefficients, status, cost, iterations })
    }
}

impl Optimized {

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn cost(&self) -> Float {
        self.cost
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn coefficients(&self) -> &Grid {
        &self.coefficients
    }

    pub fn reconstruct(mut self) -> Result<RecoveryResult> {
        let mut restored = Grid::zeros(self.coefficients.height(), self.coefficients.width());
        self.operator.forward(&self.coefficients, &mut restored)?;
        Ok(RecoveryResult {
            image: Image::from_grid(&restored),
            coefficients: self.coefficients,
            samples: self.samples,
            status: self.status,
            cost: self.cost,
            iterations: self.iterations
        })
    }
}
