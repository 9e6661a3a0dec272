//! Team photos.
//!
//! A photo is either a remote URL or an image embedded as a base64 `data:` URL. Both are stored
//! as an opaque string on the team.

use std::{
    fs,
    path::{Path, PathBuf},
};

use base64::{Engine, engine::general_purpose::STANDARD};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read image {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Unsupported image type: {}", .0.display())]
    Unsupported(PathBuf),
}

pub fn is_data_url(photo: &str) -> bool {
    photo.starts_with("data:")
}

pub fn encode_data_url(bytes: &[u8], mime: &str) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Guesses the MIME type of an image from its file extension.
pub fn mime_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();

    Some(match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "avif" => "image/avif",
        _ => return None,
    })
}

/// Reads a local image and embeds it as a `data:` URL.
pub fn from_file(path: &Path) -> Result<String, Error> {
    let mime = mime_type(path).ok_or_else(|| Error::Unsupported(path.to_path_buf()))?;
    let bytes = fs::read(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(encode_data_url(&bytes, mime))
}

/// Placeholder shown instead of a missing photo: the first letter of the name, uppercased.
pub fn initial(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}
