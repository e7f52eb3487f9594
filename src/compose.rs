use std::path::Path;

use image::{DynamicImage, Rgb, RgbImage, imageops};
use tracing::info;

use crate::error::{SkucardError, SkucardResult};

/// Side length of the square hero canvas.
pub const TARGET_DIMENSION: u32 = 800;

/// Decode a source image and normalize it onto a white square canvas.
///
/// Alpha, palette, and grayscale representations are converted to plain RGB;
/// whatever they encoded beyond the three channels is intentionally discarded.
/// Sources larger than the canvas are downscaled uniformly to fit, never
/// upscaled, then pasted centered. The returned canvas is the hero artifact
/// and must not be mutated by later card drawing.
pub fn normalize(path: &Path) -> SkucardResult<RgbImage> {
    let decoded = image::open(path)
        .map_err(|e| SkucardError::decode(format!("open '{}': {e}", path.display())))?;

    let mut rgb = match decoded {
        DynamicImage::ImageRgb8(rgb) => rgb,
        other => other.to_rgb8(),
    };

    let (src_w, src_h) = rgb.dimensions();
    if src_w > TARGET_DIMENSION || src_h > TARGET_DIMENSION {
        let shrunk = DynamicImage::ImageRgb8(rgb).resize(
            TARGET_DIMENSION,
            TARGET_DIMENSION,
            imageops::FilterType::Lanczos3,
        );
        rgb = shrunk.into_rgb8();
        info!(
            "downscaled '{}' from {src_w}x{src_h} to {}x{}",
            path.display(),
            rgb.width(),
            rgb.height()
        );
    }

    let mut canvas = RgbImage::from_pixel(TARGET_DIMENSION, TARGET_DIMENSION, Rgb([255, 255, 255]));
    let x = i64::from((TARGET_DIMENSION - rgb.width()) / 2);
    let y = i64::from((TARGET_DIMENSION - rgb.height()) / 2);
    imageops::replace(&mut canvas, &rgb, x, y);
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "skucard_{name}_{}_{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ))
    }

    fn write_png(dir: &Path, file: &str, img: &RgbImage) -> PathBuf {
        std::fs::create_dir_all(dir).unwrap();
        let path = dir.join(file);
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn full_size_source_passes_through_with_zero_padding() {
        let tmp = temp_dir("compose_noop");
        let mut src = RgbImage::from_pixel(800, 800, Rgb([255, 0, 0]));
        src.put_pixel(0, 0, Rgb([0, 255, 0]));
        src.put_pixel(799, 799, Rgb([0, 0, 255]));
        let path = write_png(&tmp, "sku.png", &src);

        let hero = normalize(&path).unwrap();
        assert_eq!(hero.dimensions(), (800, 800));
        assert_eq!(*hero.get_pixel(0, 0), Rgb([0, 255, 0]));
        assert_eq!(*hero.get_pixel(799, 799), Rgb([0, 0, 255]));
        assert_eq!(*hero.get_pixel(400, 400), Rgb([255, 0, 0]));

        std::fs::remove_dir_all(&tmp).ok();
    }

    #[test]
    fn wide_source_downscales_to_fit_and_pads_vertically() {
        let tmp = temp_dir("compose_downscale");
        let src = RgbImage::from_pixel(1600, 800, Rgb([255, 0, 0]));
        let path = write_png(&tmp, "wide.png", &src);

        let hero = normalize(&path).unwrap();
        assert_eq!(hero.dimensions(), (800, 800));
        // 1600x800 fits as 800x400, centered: rows 200..600 carry the image.
        assert_eq!(*hero.get_pixel(400, 100), Rgb([255, 255, 255]));
        assert_eq!(*hero.get_pixel(400, 400), Rgb([255, 0, 0]));
        assert_eq!(*hero.get_pixel(400, 700), Rgb([255, 255, 255]));
        assert_eq!(*hero.get_pixel(0, 400), Rgb([255, 0, 0]));
        assert_eq!(*hero.get_pixel(799, 400), Rgb([255, 0, 0]));

        std::fs::remove_dir_all(&tmp).ok();
    }

    #[test]
    fn small_source_is_centered_without_upscaling() {
        let tmp = temp_dir("compose_small");
        let src = RgbImage::from_pixel(100, 60, Rgb([0, 0, 255]));
        let path = write_png(&tmp, "small.png", &src);

        let hero = normalize(&path).unwrap();
        assert_eq!(hero.dimensions(), (800, 800));
        // Offsets are (800-100)/2 = 350 and (800-60)/2 = 370.
        assert_eq!(*hero.get_pixel(350, 370), Rgb([0, 0, 255]));
        assert_eq!(*hero.get_pixel(449, 429), Rgb([0, 0, 255]));
        assert_eq!(*hero.get_pixel(349, 370), Rgb([255, 255, 255]));
        assert_eq!(*hero.get_pixel(350, 369), Rgb([255, 255, 255]));
        assert_eq!(*hero.get_pixel(450, 430), Rgb([255, 255, 255]));

        std::fs::remove_dir_all(&tmp).ok();
    }

    #[test]
    fn alpha_channel_is_discarded() {
        let tmp = temp_dir("compose_alpha");
        let src = image::RgbaImage::from_pixel(10, 10, image::Rgba([255, 0, 0, 0]));
        std::fs::create_dir_all(&tmp).unwrap();
        let path = tmp.join("rgba.png");
        src.save(&path).unwrap();

        let hero = normalize(&path).unwrap();
        assert_eq!(*hero.get_pixel(400, 400), Rgb([255, 0, 0]));

        std::fs::remove_dir_all(&tmp).ok();
    }

    #[test]
    fn undecodable_source_is_a_decode_error() {
        let tmp = temp_dir("compose_garbage");
        std::fs::create_dir_all(&tmp).unwrap();
        let path = tmp.join("bad.png");
        std::fs::write(&path, b"not an image").unwrap();

        let err = normalize(&path).unwrap_err();
        assert!(err.to_string().contains("decode error:"));

        std::fs::remove_dir_all(&tmp).ok();
    }
}
