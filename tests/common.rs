use image::DynamicImage;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Writes a real, decodable PNG of the given dimensions.
pub fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    DynamicImage::new_rgb8(width, height)
        .save_with_format(&path, image::ImageFormat::Png)
        .unwrap();
    path
}

/// Writes a file with an image extension that no decoder accepts.
pub fn write_broken_image(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    File::create(&path)
        .unwrap()
        .write_all(b"not actually image data")
        .unwrap();
    path
}

pub fn create_temp_directory() -> TempDir {
    TempDir::new().unwrap()
}

/// A directory with two real images and one non-image file.
pub fn create_mixed_directory() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    write_png(temp_dir.path(), "a.png", 32, 32);
    write_png(temp_dir.path(), "c.png", 48, 48);
    File::create(temp_dir.path().join("b.txt"))
        .unwrap()
        .write_all(b"notes")
        .unwrap();
    temp_dir
}
