/// Output format and batch-wide option handling
///
/// Replaces string-based format plumbing with a closed enum and keeps the
/// whole batch configuration in one immutable struct.
use crate::constants::{DEFAULT_QUALITY, MAX_QUALITY, MIN_QUALITY};
use crate::error::{ConvertError, Result};
use image::ImageFormat;
use std::fmt;
use std::str::FromStr;

/// Supported output image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// WebP format with modern compression
    WebP,
    /// PNG format with lossless compression
    Png,
}

impl OutputFormat {
    /// Returns the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::WebP => "webp",
            OutputFormat::Png => "png",
        }
    }

    /// Convert to the image crate's ImageFormat
    pub fn to_image_format(&self) -> ImageFormat {
        match self {
            OutputFormat::WebP => ImageFormat::WebP,
            OutputFormat::Png => ImageFormat::Png,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::WebP => "WebP",
            OutputFormat::Png => "PNG",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for OutputFormat {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "webp" => Ok(OutputFormat::WebP),
            "png" => Ok(OutputFormat::Png),
            _ => Err(ConvertError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Target box for cover-fit cropping: scale to fully cover width x height,
/// then center-crop the excess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropBox {
    pub width: u32,
    pub height: u32,
}

impl CropBox {
    /// Parses the interactive crop input, `"<width> <height>"`.
    /// Anything other than exactly two positive integers is rejected.
    pub fn parse(input: &str) -> Result<Self> {
        let tokens: Vec<&str> = input.split_whitespace().collect();
        if tokens.len() != 2 {
            return Err(ConvertError::InvalidDimensions(input.to_string()));
        }

        let width: u32 = tokens[0]
            .parse()
            .map_err(|_| ConvertError::InvalidDimensions(input.to_string()))?;
        let height: u32 = tokens[1]
            .parse()
            .map_err(|_| ConvertError::InvalidDimensions(input.to_string()))?;

        if width == 0 || height == 0 {
            return Err(ConvertError::InvalidDimensions(input.to_string()));
        }

        Ok(CropBox { width, height })
    }
}

/// Clamps an out-of-range quality into [0, 100].
pub fn clamp_quality(quality: i64) -> u8 {
    quality.clamp(MIN_QUALITY as i64, MAX_QUALITY as i64) as u8
}

/// Immutable configuration for one batch run, shared by every file.
#[derive(Debug, Clone)]
pub struct TranscodeOptions {
    pub format: OutputFormat,
    pub quality: u8,
    pub crop: Option<CropBox>,
}

impl TranscodeOptions {
    pub fn new(format: OutputFormat, quality: Option<i64>, crop: Option<CropBox>) -> Self {
        Self {
            format,
            quality: quality.map(clamp_quality).unwrap_or(DEFAULT_QUALITY),
            crop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("webp").unwrap(), OutputFormat::WebP);
        assert_eq!(OutputFormat::from_str("WebP").unwrap(), OutputFormat::WebP);
        assert_eq!(OutputFormat::from_str("PNG").unwrap(), OutputFormat::Png);

        assert!(OutputFormat::from_str("jpeg").is_err());
        assert!(OutputFormat::from_str("").is_err());
    }

    #[test]
    fn test_output_format_extension() {
        assert_eq!(OutputFormat::WebP.extension(), "webp");
        assert_eq!(OutputFormat::Png.extension(), "png");
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(format!("{}", OutputFormat::WebP), "WebP");
        assert_eq!(format!("{}", OutputFormat::Png), "PNG");
    }

    #[test]
    fn test_crop_box_parse() {
        let crop = CropBox::parse("800 600").unwrap();
        assert_eq!(crop.width, 800);
        assert_eq!(crop.height, 600);
    }

    #[test]
    fn test_crop_box_parse_extra_whitespace() {
        let crop = CropBox::parse("  800   600 ").unwrap();
        assert_eq!(crop.width, 800);
        assert_eq!(crop.height, 600);
    }

    #[test]
    fn test_crop_box_parse_non_numeric() {
        let result = CropBox::parse("abc 600");
        assert!(matches!(result, Err(ConvertError::InvalidDimensions(_))));
    }

    #[test]
    fn test_crop_box_parse_one_token() {
        let result = CropBox::parse("800");
        assert!(matches!(result, Err(ConvertError::InvalidDimensions(_))));
    }

    #[test]
    fn test_crop_box_parse_three_tokens() {
        let result = CropBox::parse("800 600 400");
        assert!(matches!(result, Err(ConvertError::InvalidDimensions(_))));
    }

    #[test]
    fn test_crop_box_parse_zero_dimension() {
        let result = CropBox::parse("0 600");
        assert!(matches!(result, Err(ConvertError::InvalidDimensions(_))));
    }

    #[test]
    fn test_clamp_quality() {
        assert_eq!(clamp_quality(150), 100);
        assert_eq!(clamp_quality(-5), 0);
        assert_eq!(clamp_quality(80), 80);
        assert_eq!(clamp_quality(0), 0);
        assert_eq!(clamp_quality(100), 100);
    }

    #[test]
    fn test_transcode_options_default_quality() {
        let options = TranscodeOptions::new(OutputFormat::WebP, None, None);
        assert_eq!(options.quality, 80);
        assert_eq!(options.format, OutputFormat::WebP);
        assert!(options.crop.is_none());
    }

    #[test]
    fn test_transcode_options_clamped_quality() {
        let options = TranscodeOptions::new(OutputFormat::Png, Some(150), None);
        assert_eq!(options.quality, 100);

        let options = TranscodeOptions::new(OutputFormat::Png, Some(-5), None);
        assert_eq!(options.quality, 0);
    }
}
