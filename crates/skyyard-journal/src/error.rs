//! Journal error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("Unsupported image format{}", detected_suffix(.detected))]
    UnsupportedImage { detected: Option<String> },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn detected_suffix(detected: &Option<String>) -> String {
    match detected {
        Some(name) => format!(": {}", name),
        None => String::new(),
    }
}

impl JournalError {
    /// User-friendly message for UI display.
    pub fn user_message(&self) -> String {
        match self {
            Self::UnsupportedImage { .. } => {
                "Sorry, TIFF files and unsupported formats aren't supported. \
                 Please use JPG, PNG, or WebP."
                    .to_string()
            }
            Self::Io(_) => "Could not read the selected file.".to_string(),
        }
    }
}
