extern crate rand;

use std::collections::HashMap;

use rand::Rng;

use crate::error::{Error, Result};

/**
 * Default number of observed pixels for an image of `n` pixels.
 */
pub fn default_sample_count(n: usize) -> usize {
    n / 10
}

/**
 * Draws `k` distinct indices from `0..n`, every k-subset equally likely, returned in increasing order.
 *
 * Partial Fisher-Yates over the virtual array `0..n`: only the first `k` slots are materialized, slots
 * at or beyond `k` live in `displaced` once they have been swapped. O(k log k) time, O(k) memory.
 */
pub fn sample_indices<R: Rng + ?Sized>(n: usize, k: usize, rng: &mut R) -> Result<Vec<usize>> {
    if k > n {
        return Err(Error::invalid_argument(format!("cannot draw {} samples from {} pixels", k, n)));
    }

    let mut selected = (0..k).collect::<Vec<usize>>();
    let mut displaced = HashMap::<usize, usize>::new();

    for j in 0..k {
        let idx = rng.gen_range(j..n);
        if idx != j {
            match idx < k {
                true => selected.swap(j, idx),
                false => {
                    let slot = displaced.entry(idx).or_insert(idx);
                    std::mem::swap(&mut selected[j], slot);
                }
            }
        }
    }

    selected.sort_unstable();
    Ok(selected)
}
