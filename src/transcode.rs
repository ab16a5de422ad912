use crate::constants::{LIBDEFLATER_HIGH_LEVEL, LIBDEFLATER_LOW_LEVEL, ZOPFLI_ITERATIONS};
use crate::error::{ConvertError, Result};
use crate::options::{CropBox, OutputFormat, TranscodeOptions};
use image::{DynamicImage, GenericImageView, ImageReader};
use oxipng::{Deflaters, InFile, Options, OutFile};
use std::fs;
use std::num::NonZeroU8;
use std::path::{Path, PathBuf};

/// Read-only metadata for one side of a transcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMeta {
    pub bytes: u64,
    pub width: u32,
    pub height: u32,
    pub format: String,
}

/// Everything the batch needs to know about one completed transcode.
#[derive(Debug, Clone)]
pub struct TranscodeOutcome {
    pub output_path: PathBuf,
    pub original: ImageMeta,
    pub optimized: ImageMeta,
}

/// Converts one source file to the target format, applying the optional
/// cover-fit crop, and reports input/output metadata.
pub fn transcode(
    source: &Path,
    output_path: &Path,
    options: &TranscodeOptions,
) -> Result<TranscodeOutcome> {
    let (img, original) = load_image_with_metadata(source)?;

    let img = match options.crop {
        Some(crop) => apply_cover_crop(img, crop),
        None => img,
    };

    save_image(&img, output_path, options)?;

    let optimized = ImageMeta {
        bytes: fs::metadata(output_path)?.len(),
        width: img.width(),
        height: img.height(),
        format: options.format.to_string(),
    };

    Ok(TranscodeOutcome {
        output_path: output_path.to_path_buf(),
        original,
        optimized,
    })
}

/// Loads an image file along with its byte size, dimensions and format tag.
pub fn load_image_with_metadata(input_path: &Path) -> Result<(DynamicImage, ImageMeta)> {
    let file_size = fs::metadata(input_path)?.len();

    let reader = ImageReader::open(input_path)?.with_guessed_format()?;
    let format = reader
        .format()
        .map(|f| format!("{:?}", f))
        .unwrap_or_else(|| "Unknown".to_string());

    let img = reader.decode()?;
    let (width, height) = img.dimensions();

    Ok((
        img,
        ImageMeta {
            bytes: file_size,
            width,
            height,
            format,
        },
    ))
}

/// Cover-fit crop: scale to fully cover the requested box, then center-crop
/// the excess. Aspect ratio is preserved, never letterboxed.
pub fn apply_cover_crop(img: DynamicImage, crop: CropBox) -> DynamicImage {
    img.resize_to_fill(
        crop.width,
        crop.height,
        image::imageops::FilterType::Lanczos3,
    )
}

fn save_image(img: &DynamicImage, output: &Path, options: &TranscodeOptions) -> Result<()> {
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)
            .map_err(|_| ConvertError::DirectoryCreationFailed(parent.to_path_buf()))?;
    }

    match options.format {
        OutputFormat::WebP => {
            img.save_with_format(output, image::ImageFormat::WebP)?;
        }
        OutputFormat::Png => {
            save_optimized_png(img, output, options.quality)?;
        }
    }

    Ok(())
}

/// PNG output goes through oxipng, with the deflater tier picked from the
/// quality setting: >=90 Zopfli, >=70 high libdeflater, otherwise low.
fn save_optimized_png(img: &DynamicImage, output: &Path, quality: u8) -> Result<()> {
    let temp_path = output.with_extension("temp.png");
    img.save_with_format(&temp_path, image::ImageFormat::Png)?;

    struct TempFileGuard(PathBuf);
    impl Drop for TempFileGuard {
        fn drop(&mut self) {
            let _ = fs::remove_file(&self.0);
        }
    }
    let _guard = TempFileGuard(temp_path.clone());

    let mut oxipng_options = Options::from_preset(4);
    oxipng_options.force = true;

    if quality >= 90 {
        oxipng_options.deflate = Deflaters::Zopfli {
            iterations: NonZeroU8::new(ZOPFLI_ITERATIONS)
                .ok_or_else(|| ConvertError::PngOptimization("invalid zopfli config".into()))?,
        };
    } else if quality >= 70 {
        oxipng_options.deflate = Deflaters::Libdeflater {
            compression: LIBDEFLATER_HIGH_LEVEL,
        };
    } else {
        oxipng_options.deflate = Deflaters::Libdeflater {
            compression: LIBDEFLATER_LOW_LEVEL,
        };
    }

    let in_file = InFile::Path(temp_path.clone());
    let out_file = OutFile::Path {
        path: Some(output.to_path_buf()),
        preserve_attrs: false,
    };
    oxipng::optimize(&in_file, &out_file, &oxipng_options)
        .map_err(|e| ConvertError::PngOptimization(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_test_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        let img = DynamicImage::new_rgb8(width, height);
        img.save_with_format(&path, image::ImageFormat::Png)
            .unwrap();
        path
    }

    #[test]
    fn test_apply_cover_crop_landscape_to_square() {
        let img = DynamicImage::new_rgb8(200, 100);
        let cropped = apply_cover_crop(img, CropBox {
            width: 80,
            height: 80,
        });
        assert_eq!(cropped.dimensions(), (80, 80));
    }

    #[test]
    fn test_apply_cover_crop_portrait_to_wide() {
        let img = DynamicImage::new_rgb8(100, 300);
        let cropped = apply_cover_crop(img, CropBox {
            width: 90,
            height: 30,
        });
        assert_eq!(cropped.dimensions(), (90, 30));
    }

    #[test]
    fn test_load_image_with_metadata() {
        let temp_dir = TempDir::new().unwrap();
        let source = write_test_png(temp_dir.path(), "input.png", 64, 32);

        let (img, meta) = load_image_with_metadata(&source).unwrap();
        assert_eq!(img.dimensions(), (64, 32));
        assert_eq!(meta.width, 64);
        assert_eq!(meta.height, 32);
        assert_eq!(meta.format, "Png");
        assert!(meta.bytes > 0);
    }

    #[test]
    fn test_load_image_with_metadata_missing_file() {
        let result = load_image_with_metadata(Path::new("nonexistent.png"));
        assert!(matches!(result, Err(ConvertError::Io(_))));
    }

    #[test]
    fn test_transcode_to_webp() {
        let temp_dir = TempDir::new().unwrap();
        let source = write_test_png(temp_dir.path(), "input.png", 64, 32);
        let output = temp_dir.path().join("output.webp");

        let options = TranscodeOptions::new(OutputFormat::WebP, Some(80), None);
        let outcome = transcode(&source, &output, &options).unwrap();

        assert!(output.exists());
        assert_eq!(outcome.original.format, "Png");
        assert_eq!(outcome.optimized.format, "WebP");
        assert_eq!(outcome.optimized.width, 64);
        assert_eq!(outcome.optimized.height, 32);
        assert!(outcome.optimized.bytes > 0);
    }

    #[test]
    fn test_transcode_to_png_with_crop() {
        let temp_dir = TempDir::new().unwrap();
        let source = write_test_png(temp_dir.path(), "input.png", 100, 60);
        let output = temp_dir.path().join("output.png");

        let crop = CropBox {
            width: 40,
            height: 40,
        };
        let options = TranscodeOptions::new(OutputFormat::Png, Some(50), Some(crop));
        let outcome = transcode(&source, &output, &options).unwrap();

        assert!(output.exists());
        assert_eq!(outcome.optimized.width, 40);
        assert_eq!(outcome.optimized.height, 40);
        // Cleaned up by the temp file guard
        assert!(!output.with_extension("temp.png").exists());
    }

    #[test]
    fn test_transcode_creates_output_directory() {
        let temp_dir = TempDir::new().unwrap();
        let source = write_test_png(temp_dir.path(), "input.png", 16, 16);
        let output = temp_dir.path().join("nested").join("output.webp");

        let options = TranscodeOptions::new(OutputFormat::WebP, None, None);
        transcode(&source, &output, &options).unwrap();
        assert!(output.exists());
    }

    #[test]
    fn test_transcode_undecodable_file() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("broken.png");
        fs::write(&source, b"not actually a png").unwrap();
        let output = temp_dir.path().join("output.webp");

        let options = TranscodeOptions::new(OutputFormat::WebP, None, None);
        let result = transcode(&source, &output, &options);
        assert!(result.is_err());
    }
}
