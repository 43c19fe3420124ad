//! Page image format detection.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Image formats accepted by the transcription service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    /// Portable Network Graphics
    Png,
    /// JPEG / JFIF
    Jpeg,
}

impl MediaType {
    /// The MIME label sent alongside the image bytes.
    pub fn as_mime(&self) -> &'static str {
        match self {
            MediaType::Png => "image/png",
            MediaType::Jpeg => "image/jpeg",
        }
    }

    /// Guess the media type from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(MediaType::Png),
            "jpg" | "jpeg" => Some(MediaType::Jpeg),
            _ => None,
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_mime())
    }
}

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";
const JPEG_MAGIC: &[u8] = b"\xff\xd8\xff";

/// Detect the media type from the leading bytes of an image.
///
/// Returns `Error::UnsupportedImage` when neither PNG nor JPEG magic is present.
pub fn detect_media_type_from_bytes(data: &[u8]) -> Result<MediaType> {
    if data.starts_with(PNG_MAGIC) {
        return Ok(MediaType::Png);
    }
    if data.starts_with(JPEG_MAGIC) {
        return Ok(MediaType::Jpeg);
    }
    Err(Error::UnsupportedImage(
        "missing PNG or JPEG signature".to_string(),
    ))
}

/// Detect the media type of an image file.
///
/// The file signature wins; the extension is only consulted when the file is
/// too short to carry one.
pub fn detect_media_type_from_path<P: AsRef<Path>>(path: P) -> Result<MediaType> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut header = Vec::with_capacity(PNG_MAGIC.len());
    BufReader::new(file)
        .take(PNG_MAGIC.len() as u64)
        .read_to_end(&mut header)?;

    match detect_media_type_from_bytes(&header) {
        Ok(media_type) => Ok(media_type),
        Err(err) if header.len() < PNG_MAGIC.len() => path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(MediaType::from_extension)
            .ok_or(err),
        Err(_) => Err(Error::UnsupportedImage(path.display().to_string())),
    }
}

/// Check if bytes look like a supported page image.
pub fn is_page_image_bytes(data: &[u8]) -> bool {
    detect_media_type_from_bytes(data).is_ok()
}
