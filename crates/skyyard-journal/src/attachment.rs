//! Image-attachment intake with content-based format checks.
//!
//! Formats are sniffed from magic bytes, not file extensions, so a TIFF
//! renamed to `.png` is still rejected.

use image::ImageFormat;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::JournalError;

/// Bytes to read for format sniffing; enough for every supported
/// signature.
const SNIFF_LEN: usize = 64;

/// Accepted attachment formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    Jpeg,
    Png,
    WebP,
}

impl ImageKind {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::WebP => "image/webp",
        }
    }
}

/// Transient handle to an attached image: the source path plus its sniffed
/// format. Valid for the process lifetime only; no durable copy is made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAttachment {
    pub path: PathBuf,
    pub kind: ImageKind,
}

/// Sniff a file's image format and wrap it as an attachment.
///
/// Only JPEG, PNG, and WebP are accepted; anything else (TIFF included)
/// is an `UnsupportedImage` error carrying the detected format when one
/// was recognized at all.
pub fn sniff_image(path: &Path) -> Result<ImageAttachment, JournalError> {
    let mut file = std::fs::File::open(path)?;
    let mut header = [0u8; SNIFF_LEN];
    let read = file.read(&mut header)?;

    let format = image::guess_format(&header[..read]).ok();
    let kind = match format {
        Some(ImageFormat::Jpeg) => ImageKind::Jpeg,
        Some(ImageFormat::Png) => ImageKind::Png,
        Some(ImageFormat::WebP) => ImageKind::WebP,
        other => {
            let detected = other.map(|f| format!("{:?}", f).to_lowercase());
            tracing::debug!("Rejected attachment {:?}: {:?}", path, detected);
            return Err(JournalError::UnsupportedImage { detected });
        }
    };

    Ok(ImageAttachment {
        path: path.to_path_buf(),
        kind,
    })
}
