use rand::Rng;

use crate::error::{Error, Result};
use crate::image::Image;
use crate::sensing::sampler::sample_indices;

/**
 * Observed pixels of an image: strictly increasing flat indices and the intensities found there.
 * `values[i]` is the pixel at `indices[i]`. Fixed once built.
 */
#[derive(Debug,Clone,PartialEq)]
pub struct SampleSet {
    height: usize,
    width: usize,
    indices: Vec<usize>,
    values: Vec<u8>
}

impl SampleSet {

    pub fn from_image(image: &Image, indices: Vec<usize>) -> Result<SampleSet> {
        if !indices.windows(2).all(|w| w[0] < w[1]) {
            return Err(Error::invalid_argument("sample indices must be strictly increasing"));
        }
        if let Some(&last) = indices.last() {
            if last >= image.size() {
                return Err(Error::invalid_argument(format!("sample index {} outside image of {} pixels", last, image.size())));
            }
        }

        let pixels = image.as_slice();
        let values = indices.iter().map(|&idx| pixels[idx]).collect::<Vec<u8>>();
        Ok(SampleSet { height: image.height(), width: image.width(), indices, values })
    }

    pub fn draw<R: Rng + ?Sized>(image: &Image, k: usize, rng: &mut R) -> Result<SampleSet> {
        let indices = sample_indices(image.size(), k, rng)?;
        SampleSet::from_image(image, indices)
    }

    pub fn full(image: &Image) -> SampleSet {
        SampleSet {
            height: image.height(),
            width: image.width(),
            indices: (0..image.size()).collect(),
            values: image.as_slice().to_vec()
        }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn values(&self) -> &[u8] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, u8)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /**
     * Observed pixels at their positions, black everywhere else.
     */
    pub fn squeezed(&self) -> Image {
        let mut image = Image::from_element(self.width, self.height, 0);
        for (idx, value) in self.iter() {
            image.set_flat(idx, value);
        }
        image
    }
}
