extern crate image as image_rs;

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::image::Image;
use crate::sensing::driver::RecoveryParameters;

pub const SAMPLE_IMAGE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/sample.pgm");

pub fn load_image_as_gray(file_path: &Path) -> Result<Image> {
    let gray_image = image_rs::open(file_path).map_err(|e| Error::io_failure(file_path, e))?.into_luma8();
    Ok(Image::from_gray_image(&gray_image))
}

/**
 * Encoding is chosen from the file extension.
 */
pub fn save_image(file_path: &Path, image: &Image) -> Result<()> {
    image.to_image().save(file_path).map_err(|e| Error::io_failure(file_path, e))
}

pub fn load_parameters(file_path: &Path) -> Result<RecoveryParameters> {
    let contents = fs::read_to_string(file_path).map_err(|e| Error::io_failure(file_path, e))?;
    let parameters: RecoveryParameters = serde_yaml::from_str(&contents).map_err(|e| Error::io_failure(file_path, e))?;
    parameters.validate()?;
    Ok(parameters)
}

pub fn write_parameters(file_path: &Path, parameters: &RecoveryParameters) -> Result<()> {
    let serialized = serde_yaml::to_string(parameters).map_err(|e| Error::io_failure(file_path, e))?;
    fs::write(file_path, serialized).map_err(|e| Error::io_failure(file_path, e))
}
