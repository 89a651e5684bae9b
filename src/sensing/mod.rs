pub mod sampler;
pub mod sample_set;
pub mod operator;
pub mod evaluator;
pub mod driver;
