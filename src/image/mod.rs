extern crate image as image_rs;

use image_rs::GrayImage;

use crate::error::{Error, Result};
use crate::Float;
use self::grid::Grid;

pub mod grid;
pub mod metrics;

/**
 * Row-major 8-bit grayscale image. Pixel index `idx` maps to `(idx / width, idx % width)`.
 */
#[derive(Debug,Clone,PartialEq)]
pub struct Image {
    width: usize,
    height: usize,
    data: Vec<u8>
}

impl Image {

    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Image> {
        if data.len() != width*height {
            return Err(Error::invalid_argument(format!("image buffer holds {} samples, expected {}x{}={}", data.len(), height, width, width*height)));
        }
        Ok(Image { width, height, data })
    }

    pub fn from_element(width: usize, height: usize, value: u8) -> Image {
        Image { width, height, data: vec![value; width*height] }
    }

    pub fn from_gray_image(image: &GrayImage) -> Image {
        let (width, height) = image.dimensions();
        Image { width: width as usize, height: height as usize, data: image.as_raw().clone() }
    }

    /**
     * Quantizes a real grid to 8 bit by rounding to nearest and saturating to [0,255].
     */
    pub fn from_grid(grid: &Grid) -> Image {
        let data = grid.as_slice().iter().map(|&v| quantize(v)).collect();
        Image { width: grid.width(), height: grid.height(), data }
    }

    pub fn to_image(&self) -> GrayImage {
        // Dimensions and buffer length are kept consistent by every constructor.
        GrayImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            image_rs::Luma([self.data[y as usize*self.width + x as usize]])
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn size(&self) -> usize {
        self.width*self.height
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.data[row*self.width + col]
    }

    pub(crate) fn set_flat(&mut self, idx: usize, value: u8) -> () {
        self.data[idx] = value;
    }
}

fn quantize(value: Float) -> u8 {
    match value.round() {
        v if v.is_nan() => 0,
        v if v <= 0.0 => 0,
        v if v >= 255.0 => 255,
        v => v as u8
    }
}
