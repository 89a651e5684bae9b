//! Compressed-sensing recovery of grayscale images from a random subset of their pixels.
//!
//! The image is modelled as sparse under a 2-D cosine transform. A sample set of observed
//! pixels drives an orthant-wise L-BFGS run over the transform coefficients, and the
//! converged coefficients are inverse transformed into the restored image.

pub mod error;
pub mod image;
pub mod io;
pub mod numerics;
pub mod sensing;

macro_rules! define_float {
    ($f:tt) => {
        pub use std::$f as float;
        pub type Float = $f;
    }
}

define_float!(f64);

pub use crate::error::{Error, Result};
pub use crate::image::{Image, grid::Grid};
pub use crate::sensing::{
    sample_set::SampleSet,
    driver::{RecoveryDriver, RecoveryParameters, RecoveryResult, TransformKind},
};
