//! `image` crate interop.

use crate::{DetectError, DetectedLine, HoughParams, LineDetector};
use hough_core::{RasterBuffer, RasterError, Sample};

/// Copy an 8-bit grayscale image into a raster with maximum value 255.
pub fn raster_from_gray(img: &::image::GrayImage) -> Result<RasterBuffer, RasterError> {
    let mut raster = RasterBuffer::new(img.width() as usize, img.height() as usize, 255)?;
    for (dst, &src) in raster.samples_mut().iter_mut().zip(img.as_raw()) {
        *dst = src as Sample;
    }
    Ok(raster)
}

/// Convert a raster into an `image::GrayImage`, clamping samples to `0..=255`.
pub fn raster_to_gray(raster: &RasterBuffer) -> Result<::image::GrayImage, DetectError> {
    let invalid = || DetectError::InvalidGrayDimensions {
        width: u32::try_from(raster.width()).unwrap_or(u32::MAX),
        height: u32::try_from(raster.height()).unwrap_or(u32::MAX),
    };
    let width = u32::try_from(raster.width()).map_err(|_| invalid())?;
    let height = u32::try_from(raster.height()).map_err(|_| invalid())?;
    let pixels = raster
        .samples()
        .iter()
        .map(|&v| v.clamp(0, 255) as u8)
        .collect();
    ::image::GrayImage::from_raw(width, height, pixels).ok_or_else(invalid)
}

/// Run the detector end-to-end on an `image::GrayImage`.
pub fn detect_line_gray(
    img: &::image::GrayImage,
    params: HoughParams,
) -> Result<(::image::GrayImage, DetectedLine), DetectError> {
    if img.width() == 0 || img.height() == 0 {
        return Err(DetectError::InvalidGrayDimensions {
            width: img.width(),
            height: img.height(),
        });
    }
    let detector = LineDetector::new(params)?;
    let src = raster_from_gray(img)?;
    let detection = detector.detect(&src)?;
    Ok((raster_to_gray(&detection.image)?, detection.line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::image::{GrayImage, Luma};

    #[test]
    fn gray_round_trip_preserves_pixels() {
        let img = GrayImage::from_fn(7, 3, |x, y| Luma([(x * 30 + y) as u8]));
        let raster = raster_from_gray(&img).expect("raster");
        assert_eq!(raster.at(6, 2), 182);
        assert_eq!(raster_to_gray(&raster).expect("gray"), img);
    }

    #[test]
    fn detects_on_gray_image() {
        let img = GrayImage::from_fn(24, 24, |x, y| Luma([if y >= x { 200 } else { 0 }]));
        let (out, line) = detect_line_gray(&img, HoughParams::default()).expect("detect");
        assert!(line.is_supported());
        assert_eq!(out.dimensions(), (24, 24));
        assert_ne!(out, img, "the detected line is drawn across the bright half");
    }

    #[test]
    fn rejects_empty_image() {
        let img = GrayImage::new(0, 5);
        assert!(matches!(
            detect_line_gray(&img, HoughParams::default()),
            Err(DetectError::InvalidGrayDimensions { .. })
        ));
    }
}
