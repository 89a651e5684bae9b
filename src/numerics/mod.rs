use crate::Float;

pub mod dct;
pub mod lbfgs;

pub fn dot(a: &[Float], b: &[Float]) -> Float {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| x*y).sum()
}
