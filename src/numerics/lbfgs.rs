extern crate argmin;

use std::fmt;

use argmin::core::observers::{Observe, ObserverMode};
use argmin::core::{CostFunction, Error as ArgminError, Executor, Gradient, State, TerminationReason, TerminationStatus, KV};
use argmin::solver::linesearch::condition::ArmijoCondition;
use argmin::solver::linesearch::BacktrackingLineSearch;
use argmin::solver::quasinewton::LBFGS;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::Float;

pub type Param = Vec<Float>;

type Search = BacktrackingLineSearch<Param, Param, ArmijoCondition<Float>, Float>;
type Solver = LBFGS<Search, Param, Param, Float>;

/**
 * L-BFGS settings. With a positive L1 weight argmin runs the orthant-wise variant (OWL-QN);
 * the line search is always Armijo backtracking.
 */
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct LbfgsParameters {
    /// number of stored curvature pairs
    pub history: usize,
    /// 0 means no limit
    pub max_iterations: u64,
    pub tolerance_grad: Float,
    pub tolerance_cost: Float,
    /// sufficient decrease constant of the Armijo condition
    pub armijo: Float,
    /// step contraction factor per backtracking trial
    pub contraction: Float
}

impl Default for LbfgsParameters {
    fn default() -> LbfgsParameters {
        LbfgsParameters {
            history: 6,
            max_iterations: 0,
            tolerance_grad: 1e-8,
            tolerance_cost: 1e-12,
            armijo: 1e-4,
            contraction: 0.5
        }
    }
}

impl LbfgsParameters {

    pub fn validate(&self) -> Result<()> {
        let check = |ok: bool, msg: &str| match ok {
            true => Ok(()),
            false => Err(Error::invalid_argument(msg))
        };
        check(self.history > 0, "history must be positive")?;
        check(self.tolerance_grad >= 0.0, "tolerance_grad must be non-negative")?;
        check(self.tolerance_cost >= 0.0, "tolerance_cost must be non-negative")?;
        check(self.armijo > 0.0 && self.armijo < 1.0, "armijo must lie in (0, 1)")?;
        check(self.contraction > 0.0 && self.contraction < 1.0, "contraction must lie in (0, 1)")
    }

    fn solver(&self, l1_weight: Float) -> std::result::Result<Solver, ArgminError> {
        let linesearch = BacktrackingLineSearch::new(ArmijoCondition::new(self.armijo)?).rho(self.contraction)?;
        let lbfgs = LBFGS::new(linesearch, self.history)
            .with_tolerance_grad(self.tolerance_grad)?
            .with_tolerance_cost(self.tolerance_cost)?;
        match l1_weight > 0.0 {
            true => lbfgs.with_l1_regularization(l1_weight),
            false => Ok(lbfgs)
        }
    }
}

#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum Status {
    Converged,
    TargetCostReached,
    MaximumIterations,
    Aborted,
    NotTerminated
}

impl Status {

    pub fn from_termination(status: &TerminationStatus) -> Status {
        match status {
            TerminationStatus::NotTerminated => Status::NotTerminated,
            TerminationStatus::Terminated(TerminationReason::SolverConverged) => Status::Converged,
            TerminationStatus::Terminated(TerminationReason::TargetCostReached) => Status::TargetCostReached,
            TerminationStatus::Terminated(TerminationReason::MaxItersReached) => Status::MaximumIterations,
            TerminationStatus::Terminated(_) => Status::Aborted
        }
    }

    pub fn is_success(&self) -> bool {
        match self {
            Status::Converged | Status::TargetCostReached => true,
            _ => false
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            Status::Converged => "converged",
            Status::TargetCostReached => "reached the target cost",
            Status::MaximumIterations => "reached the iteration limit",
            Status::Aborted => "aborted",
            Status::NotTerminated => "did not terminate"
        };
        write!(f, "{}", text)
    }
}

/**
 * Logs every iteration at debug level.
 */
pub struct LoggingObserver;

impl<I: State<Float = Float>> Observe<I> for LoggingObserver {
    fn observe_iter(&mut self, state: &I, _kv: &KV) -> std::result::Result<(), ArgminError> {
        debug!("it: {}, cost: {:.6e}, best: {:.6e}", state.get_iter(), state.get_cost(), state.get_best_cost());
        Ok(())
    }
}

#[derive(Debug)]
pub struct Minimum<O> {
    /// the problem, handed back for reuse
    pub problem: O,
    pub x: Param,
    /// smooth cost plus `l1_weight * ||x||_1` at `x`
    pub cost: Float,
    pub status: Status,
    pub iterations: u64
}

/**
 * Minimizes `f(x) + l1_weight * ||x||_1` from `x0`. The returned point is the last iterate, also
 * when the run stopped early; only failures inside argmin become errors.
 */
pub fn minimize<O>(problem: O, x0: Param, parameters: &LbfgsParameters, l1_weight: Float, log_progress: bool) -> Result<Minimum<O>>
    where O: CostFunction<Param = Param, Output = Float> + Gradient<Param = Param, Gradient = Param> {

    parameters.validate()?;
    if !(l1_weight >= 0.0) {
        return Err(Error::invalid_argument(format!("l1 weight {} must be non-negative", l1_weight)));
    }
    let solver = parameters.solver(l1_weight).map_err(|e| Error::invalid_argument(e.to_string()))?;

    let max_iterations = parameters.max_iterations;
    let executor = Executor::new(problem, solver).configure(|state| {
        let state = state.param(x0);
        match max_iterations {
            0 => state,
            n => state.max_iters(n)
        }
    });
    let executor = match log_progress {
        true => executor.add_observer(LoggingObserver, ObserverMode::Always),
        false => executor
    };

    let mut result = executor.run().map_err(|e| Error::NumericFailure(e.to_string()))?;
    let state = result.state();
    let status = Status::from_termination(state.get_termination_status());
    let iterations = state.get_iter();
    let x = state.get_param().or_else(|| state.get_best_param()).cloned()
        .ok_or_else(|| Error::NumericFailure("solver returned no iterate".to_string()))?;

    let problem = result.problem.take_problem()
        .ok_or_else(|| Error::NumericFailure("solver did not hand back its problem".to_string()))?;
    let smooth = problem.cost(&x).map_err(|e| Error::NumericFailure(e.to_string()))?;
    let cost = smooth + l1_weight*x.iter().map(|v| v.abs()).sum::<Float>();

    Ok(Minimum { problem, x, cost, status, iterations })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn termination_reasons_map_to_status() {
        let converged = TerminationStatus::Terminated(TerminationReason::SolverConverged);
        let limit = TerminationStatus::Terminated(TerminationReason::MaxItersReached);
        assert_eq!(Status::from_termination(&converged), Status::Converged);
        assert_eq!(Status::from_termination(&limit), Status::MaximumIterations);
        assert_eq!(Status::from_termination(&TerminationStatus::NotTerminated), Status::NotTerminated);
        assert!(Status::Converged.is_success());
        assert!(!Status::MaximumIterations.is_success());
    }

    #[test]
    fn defaults_are_valid_and_checked() {
        assert!(LbfgsParameters::default().validate().is_ok());
        assert!(LbfgsParameters { history: 0, ..LbfgsParameters::default() }.validate().is_err());
        assert!(LbfgsParameters { contraction: 1.0, ..LbfgsParameters::default() }.validate().is_err());
        assert!(LbfgsParameters { armijo: 0.0, ..LbfgsParameters::default() }.validate().is_err());
    }
}
