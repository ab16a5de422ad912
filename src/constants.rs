pub const DEFAULT_QUALITY: u8 = 80;
pub const MIN_QUALITY: u8 = 0;
pub const MAX_QUALITY: u8 = 100;

/// Extensions picked up when a directory is given as input.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Where fetched URL inputs are written, relative to the working directory.
pub const DOWNLOADS_DIR: &str = "downloads";

/// Per-source-directory output subdirectory name.
pub const OPTIMIZED_DIR: &str = "optimized";

/// Fallback stem when a URL path has no usable basename.
pub const DEFAULT_DOWNLOAD_STEM: &str = "download";

pub const DOWNLOAD_TIMEOUT_SECS: u64 = 30;

pub const ZOPFLI_ITERATIONS: u8 = 15;
pub const LIBDEFLATER_HIGH_LEVEL: u8 = 12;
pub const LIBDEFLATER_LOW_LEVEL: u8 = 8;
