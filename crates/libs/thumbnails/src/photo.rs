use color_eyre::eyre::{Result, eyre};
use fast_image_resize::images::Image;
use fast_image_resize::{PixelType, Resizer};
use image::{DynamicImage, ImageBuffer, ImageReader, Rgba};
use std::fs;
use std::num::NonZeroU32;
use std::path::Path;

/// Renders a bounded-dimension derivative of a photo.
///
/// The output keeps the source's aspect ratio and container format (the
/// target extension decides the encoder). Sources already within the bound
/// are re-encoded at their original size, never upscaled.
pub fn render_photo_thumbnail(
    input_path: &Path,
    output_path: &Path,
    max_dimension: u32,
) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let img = ImageReader::open(input_path)?
        .with_guessed_format()?
        .decode()?;

    let (orig_w, orig_h) = (img.width(), img.height());
    let longest = orig_w.max(orig_h);
    if longest <= max_dimension {
        return save_by_extension(&img, output_path);
    }

    let target_w =
        ((u64::from(orig_w) * u64::from(max_dimension)) / u64::from(longest)).max(1) as u32;
    let target_h =
        ((u64::from(orig_h) * u64::from(max_dimension)) / u64::from(longest)).max(1) as u32;

    let src_img = img.into_rgba8();
    let src_image = Image::from_vec_u8(
        NonZeroU32::new(orig_w)
            .ok_or_else(|| eyre!("source image width is zero"))?
            .into(),
        NonZeroU32::new(orig_h)
            .ok_or_else(|| eyre!("source image height is zero"))?
            .into(),
        src_img.into_raw(),
        PixelType::U8x4,
    )?;

    let mut dst_img = Image::new(
        NonZeroU32::new(target_w)
            .ok_or_else(|| eyre!("target width is zero"))?
            .into(),
        NonZeroU32::new(target_h)
            .ok_or_else(|| eyre!("target height is zero"))?
            .into(),
        PixelType::U8x4,
    );

    let mut resizer = Resizer::new();
    resizer.resize(&src_image, &mut dst_img, None)?;

    let resized = ImageBuffer::<Rgba<u8>, _>::from_raw(target_w, target_h, dst_img.into_vec())
        .ok_or_else(|| eyre!("Failed to construct resized image"))?;

    save_by_extension(&DynamicImage::ImageRgba8(resized), output_path)
}

// JPEG cannot carry an alpha channel, everything else is saved as decoded.
fn save_by_extension(img: &DynamicImage, output_path: &Path) -> Result<()> {
    let extension = output_path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => img.to_rgb8().save(output_path)?,
        _ => img.save(output_path)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;
    use tempfile::TempDir;

    fn write_png(dir: &TempDir, name: &str, width: u32, height: u32) -> std::path::PathBuf {
        let path = dir.path().join(name);
        RgbaImage::from_pixel(width, height, Rgba([120, 40, 200, 255]))
            .save(&path)
            .expect("write test png");
        path
    }

    #[test]
    fn resizes_landscape_to_bound() -> Result<()> {
        let dir = TempDir::new()?;
        let source = write_png(&dir, "wide.png", 800, 200);
        let target = dir.path().join("thumbs").join("wide.png");

        render_photo_thumbnail(&source, &target, 400)?;

        let thumb = ImageReader::open(&target)?.decode()?;
        assert_eq!((thumb.width(), thumb.height()), (400, 100));
        Ok(())
    }

    #[test]
    fn does_not_upscale_small_sources() -> Result<()> {
        let dir = TempDir::new()?;
        let source = write_png(&dir, "tiny.png", 8, 4);
        let target = dir.path().join("tiny_thumb.png");

        render_photo_thumbnail(&source, &target, 400)?;

        let thumb = ImageReader::open(&target)?.decode()?;
        assert_eq!((thumb.width(), thumb.height()), (8, 4));
        Ok(())
    }

    #[test]
    fn encodes_jpeg_targets_without_alpha() -> Result<()> {
        let dir = TempDir::new()?;
        let source = dir.path().join("photo.jpg");
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(600, 900, Rgba([10, 20, 30, 255])))
            .to_rgb8()
            .save(&source)?;
        let target = dir.path().join("photo_thumb.jpg");

        render_photo_thumbnail(&source, &target, 400)?;

        let thumb = ImageReader::open(&target)?.decode()?;
        assert_eq!((thumb.width(), thumb.height()), (266, 400));
        Ok(())
    }

    #[test]
    fn rejects_undecodable_sources() -> Result<()> {
        let dir = TempDir::new()?;
        let source = dir.path().join("not_an_image.png");
        fs::write(&source, b"definitely not a png")?;
        let target = dir.path().join("thumb.png");

        assert!(render_photo_thumbnail(&source, &target, 400).is_err());
        assert!(!target.exists());
        Ok(())
    }
}
