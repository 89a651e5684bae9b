use crate::error::{Error, Result};
use crate::image::Image;
use crate::Float;

fn check_dimensions(a: &Image, b: &Image) -> Result<()> {
    match (a.width() == b.width(), a.height() == b.height()) {
        (true, true) => Ok(()),
        _ => Err(Error::invalid_argument(format!("image sizes differ: {}x{} vs {}x{}", a.height(), a.width(), b.height(), b.width())))
    }
}

pub fn mean_squared_error(a: &Image, b: &Image) -> Result<Float> {
    check_dimensions(a, b)?;
    if a.size() == 0 {
        return Ok(0.0);
    }
    let sum = a.as_slice().iter().zip(b.as_slice()).map(|(&x, &y)| (x as Float - y as Float).powi(2)).sum::<Float>();
    Ok(sum / a.size() as Float)
}

/**
 * Peak signal to noise ratio in dB for 8-bit images. Identical images give infinity.
 */
pub fn psnr(a: &Image, b: &Image) -> Result<Float> {
    let mse = mean_squared_error(a, b)?;
    Ok(match mse {
        v if v == 0.0 => Float::INFINITY,
        v => 10.0*(255.0*255.0/v).log10()
    })
}
