//! Image preprocessing for model input.

use image::RgbImage;
use image::imageops::FilterType;
use ndarray::Array4;

/// Convert RGB pixels into an NCHW float tensor for the model.
///
/// The image is resized to `input_size` x `input_size` and channel values
/// are scaled to [0, 1].
pub fn to_input_tensor(pixels: &RgbImage, input_size: u32) -> Array4<f32> {
    let resized = if pixels.dimensions() == (input_size, input_size) {
        pixels.clone()
    } else {
        image::imageops::resize(pixels, input_size, input_size, FilterType::Triangle)
    };

    let side = input_size as usize;
    let mut tensor = Array4::<f32>::zeros((1, 3, side, side));
    for (x, y, pixel) in resized.enumerate_pixels() {
        for channel in 0..3 {
            tensor[[0, channel, y as usize, x as usize]] = f32::from(pixel.0[channel]) / 255.0;
        }
    }

    tensor
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_tensor_shape_and_scaling() {
        let pixels = RgbImage::from_pixel(8, 8, image::Rgb([255, 0, 51]));
        let tensor = to_input_tensor(&pixels, 8);

        assert_eq!(tensor.shape(), &[1, 3, 8, 8]);
        assert_eq!(tensor[[0, 0, 0, 0]], 1.0);
        assert_eq!(tensor[[0, 1, 0, 0]], 0.0);
        assert_eq!(tensor[[0, 2, 0, 0]], 0.2);
    }

    #[test]
    fn test_resizes_to_input_size() {
        let pixels = RgbImage::from_pixel(31, 17, image::Rgb([128, 128, 128]));
        let tensor = to_input_tensor(&pixels, 16);

        assert_eq!(tensor.shape(), &[1, 3, 16, 16]);
        for value in &tensor {
            assert!((0.0..=1.0).contains(value));
        }
    }
}
