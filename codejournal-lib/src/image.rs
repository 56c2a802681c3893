//! Turning image files into `data:` URLs for an entry's photo.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use base64::{Engine, engine::general_purpose::STANDARD};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The image MIME type implied by the file's extension, if it names an image format.
pub fn mime_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();

    Some(match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "avif" => "image/avif",
        "tif" | "tiff" => "image/tiff",
        _ => return None,
    })
}

/// Read `path` into a base64 `data:` URL. Returns `None` for files that aren't images.
pub fn data_url(path: &Path) -> Result<Option<String>, Error> {
    let Some(mime) = mime_type(path) else {
        debug!("Ignoring non-image file {}", path.display());
        return Ok(None);
    };

    let bytes = fs::read(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(Some(encode(mime, &bytes)))
}

fn encode(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Whether `url` holds inline image data rather than a link.
pub fn is_data_url(url: &str) -> bool {
    url.starts_with("data:")
}
