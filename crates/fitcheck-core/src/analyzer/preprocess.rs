//! Image preprocessing for CLIP inference.
//!
//! CLIP ViT-B/32 expects:
//! - Shortest edge resized to 224, then a 224×224 center crop
//! - Normalization: per-channel (pixel/255 - mean) / std with CLIP's
//!   published statistics
//! - Channel order: RGB
//! - Tensor layout: NCHW [batch, channels, height, width]

use image::DynamicImage;
use ndarray::Array4;

/// Number of color channels (RGB).
const CHANNELS: usize = 3;

/// CLIP normalization mean (RGB).
const NORM_MEAN: [f32; 3] = [0.48145466, 0.4578275, 0.40821073];

/// CLIP normalization std (RGB).
const NORM_STD: [f32; 3] = [0.26862954, 0.26130258, 0.27577711];

/// Preprocess an image for CLIP vision inference.
///
/// Resizes the shortest edge to `image_size` (bicubic), center-crops to
/// `image_size × image_size`, normalizes per channel, and returns an NCHW
/// tensor suitable for ONNX Runtime.
pub fn preprocess(image: &DynamicImage, image_size: u32) -> Array4<f32> {
    let rgb = resize_and_center_crop(image, image_size);

    let size = image_size as usize;
    let mut tensor = Array4::<f32>::zeros((1, CHANNELS, size, size));

    // Access raw RGB bytes and tensor slice directly to avoid per-pixel
    // bounds-checking overhead from get_pixel() and 4D ndarray indexing.
    let raw = rgb.as_raw();
    let tensor_data = tensor.as_slice_mut().unwrap();
    for (i, pixel) in raw.chunks_exact(3).enumerate() {
        let y = i / size;
        let x = i % size;
        for (c, &val) in pixel.iter().enumerate() {
            // NCHW layout: offset = c * size * size + y * size + x
            let idx = c * size * size + y * size + x;
            tensor_data[idx] = (val as f32 / 255.0 - NORM_MEAN[c]) / NORM_STD[c];
        }
    }

    tensor
}

/// Resize so the shortest edge equals `image_size`, then crop the center
/// square. Matches CLIPProcessor's resize + center_crop steps.
fn resize_and_center_crop(image: &DynamicImage, image_size: u32) -> image::RgbImage {
    let (w, h) = (image.width(), image.height());
    let (new_w, new_h) = if w <= h {
        let scaled = (h as f64 * image_size as f64 / w as f64).round() as u32;
        (image_size, scaled.max(image_size))
    } else {
        let scaled = (w as f64 * image_size as f64 / h as f64).round() as u32;
        (scaled.max(image_size), image_size)
    };
    let resized = image.resize_exact(new_w, new_h, image::imageops::FilterType::CatmullRom);
    let x = (new_w - image_size) / 2;
    let y = (new_h - image_size) / 2;
    resized.crop_imm(x, y, image_size, image_size).to_rgb8()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbImage};

    #[test]
    fn test_preprocess_shape_landscape() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(640, 480));
        let tensor = preprocess(&img, 224);
        assert_eq!(tensor.shape(), &[1, 3, 224, 224]);
    }

    #[test]
    fn test_preprocess_shape_portrait() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(300, 900));
        let tensor = preprocess(&img, 224);
        assert_eq!(tensor.shape(), &[1, 3, 224, 224]);
    }

    #[test]
    fn test_preprocess_shape_square_small() {
        // Smaller than the target size still upscales to a full crop.
        let img = DynamicImage::ImageRgb8(RgbImage::new(64, 64));
        let tensor = preprocess(&img, 224);
        assert_eq!(tensor.shape(), &[1, 3, 224, 224]);
    }

    #[test]
    fn test_preprocess_normalization() {
        // White image (255, 255, 255) -> (1.0 - mean[c]) / std[c] per channel.
        let img =
            DynamicImage::ImageRgb8(RgbImage::from_pixel(300, 300, image::Rgb([255, 255, 255])));
        let tensor = preprocess(&img, 224);
        let red = tensor[[0, 0, 0, 0]];
        assert!((red - (1.0 - NORM_MEAN[0]) / NORM_STD[0]).abs() < 0.01);

        // Black image (0, 0, 0) -> -mean[c] / std[c].
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(300, 300, image::Rgb([0, 0, 0])));
        let tensor = preprocess(&img, 224);
        let blue = tensor[[0, 2, 0, 0]];
        assert!((blue - (-NORM_MEAN[2] / NORM_STD[2])).abs() < 0.01);
    }

    #[test]
    fn test_center_crop_square_output() {
        let rgb = resize_and_center_crop(&DynamicImage::ImageRgb8(RgbImage::new(1000, 400)), 224);
        assert_eq!(rgb.width(), 224);
        assert_eq!(rgb.height(), 224);
    }
}
