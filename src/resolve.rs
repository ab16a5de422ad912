use crate::constants::{DEFAULT_DOWNLOAD_STEM, DOWNLOADS_DIR, IMAGE_EXTENSIONS};
use crate::error::{ConvertError, Result};
use crate::fetch::fetch_url_sync;
use crate::{info, verbose};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;
use walkdir::WalkDir;

/// One user-supplied input token after quote trimming, with an optional
/// output file name override (URL inputs only).
#[derive(Debug, Clone)]
pub struct InputSpec {
    pub token: String,
    pub name_override: Option<String>,
}

impl InputSpec {
    pub fn new(raw: &str) -> Self {
        Self {
            token: trim_token(raw),
            name_override: None,
        }
    }

    pub fn with_name_override(mut self, name: Option<String>) -> Self {
        self.name_override = name.filter(|n| !n.trim().is_empty());
        self
    }
}

/// Strips whitespace and surrounding quote characters from a raw token.
pub fn trim_token(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .to_string()
}

/// Returns the parsed URL if the token is a well-formed http(s) URL.
pub fn parse_url(token: &str) -> Option<Url> {
    Url::parse(token)
        .ok()
        .filter(|u| matches!(u.scheme(), "http" | "https"))
}

pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Derives the destination file name for a URL input.
///
/// Uses the override name when given, otherwise the basename of the URL's
/// path. A name without an extension gets the extension parsed from the URL
/// path appended.
pub fn derive_download_name(url: &Url, name_override: Option<&str>) -> String {
    let url_basename = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_DOWNLOAD_STEM);

    let mut name = name_override.unwrap_or(url_basename).to_string();

    if Path::new(&name).extension().is_none() {
        if let Some(ext) = Path::new(url_basename).extension().and_then(|e| e.to_str()) {
            name = format!("{}.{}", name, ext);
        }
    }

    name
}

/// Resolves one input token into concrete local file paths.
///
/// - URL: fetched and saved under the downloads directory, one path.
/// - Existing directory: immediate image-extension entries,
///   `EmptyDirectory` if none match.
/// - Existing file: that one path.
/// - Anything else: `PathNotFound` carrying the original token.
pub fn resolve_input(spec: &InputSpec, downloads_dir: &Path) -> Result<Vec<PathBuf>> {
    if let Some(url) = parse_url(&spec.token) {
        let saved = download_to_file(&url, spec.name_override.as_deref(), downloads_dir)?;
        return Ok(vec![saved]);
    }

    let path = Path::new(&spec.token);
    if !path.exists() {
        return Err(ConvertError::PathNotFound(spec.token.clone()));
    }

    if path.is_dir() {
        return enumerate_directory(path);
    }

    Ok(vec![path.to_path_buf()])
}

/// Default downloads directory, beside the working directory.
pub fn default_downloads_dir() -> PathBuf {
    PathBuf::from(DOWNLOADS_DIR)
}

fn download_to_file(
    url: &Url,
    name_override: Option<&str>,
    downloads_dir: &Path,
) -> Result<PathBuf> {
    fs::create_dir_all(downloads_dir)
        .map_err(|_| ConvertError::DirectoryCreationFailed(downloads_dir.to_path_buf()))?;

    let file_name = derive_download_name(url, name_override);
    let destination = downloads_dir.join(file_name);

    info!("⬇️  Downloading: {}", url);
    let bytes = fetch_url_sync(url.as_str())?;
    fs::write(&destination, bytes)?;
    info!("✅ Saved to {:?}", destination);

    Ok(destination)
}

/// Enumerates the immediate image-extension entries of a directory.
/// Order follows directory enumeration order, which is not guaranteed
/// stable across filesystems.
pub fn enumerate_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type().is_file() && is_image_file(path) {
            verbose!("Found image: {:?}", path);
            files.push(path.to_path_buf());
        }
    }

    if files.is_empty() {
        return Err(ConvertError::EmptyDirectory(dir.to_path_buf()));
    }

    Ok(files)
}
