use std::path::{Path, PathBuf};

use super::error::{Result, UploadError};
use crate::config::UploadLimits;
use crate::format::format_file_size;

/// Audio extensions accepted for upload (native or converted server-side)
pub const ACCEPTED_EXTENSIONS: [&str; 10] = [
    "wav", "aiff", "aif", "au", "mp3", "ogg", "m4a", "aac", "flac", "opus",
];

/// A file the user wants to upload, described without reading its contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCandidate {
    /// Where the bytes come from
    pub path: PathBuf,
    /// Name sent to the service
    pub file_name: String,
    pub size_bytes: u64,
    /// Declared media type, if known
    pub mime_type: Option<String>,
}

impl UploadCandidate {
    /// Describe a file on disk, guessing its media type from the extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path).map_err(|source| UploadError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        if !metadata.is_file() {
            return Err(UploadError::NotAFile(path.to_path_buf()));
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("upload"));

        Ok(Self {
            path: path.to_path_buf(),
            mime_type: guess_mime_type(&file_name).map(String::from),
            file_name,
            size_bytes: metadata.len(),
        })
    }

    /// Lower-cased extension of the file name (empty when there is none)
    pub fn extension(&self) -> String {
        Path::new(&self.file_name)
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default()
    }
}

/// An accepted upload and what the service will do with it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPlan {
    pub candidate: UploadCandidate,
    pub extension: String,
    /// The service converts this format to WAV before analysis
    pub needs_conversion: bool,
}

impl UploadPlan {
    /// Notice shown while a converted format is uploading
    pub fn conversion_notice(&self) -> Option<String> {
        self.needs_conversion.then(|| {
            let label = if self.extension.is_empty() {
                String::from("audio")
            } else {
                self.extension.to_ascii_uppercase()
            };
            format!(
                "Your {} file will be converted to WAV format for analysis. This may take a moment.",
                label
            )
        })
    }
}

/// Media type for a file name, based on its extension
pub fn guess_mime_type(file_name: &str) -> Option<&'static str> {
    let ext = Path::new(file_name)
        .extension()?
        .to_string_lossy()
        .to_ascii_lowercase();
    let mime = match ext.as_str() {
        "wav" => "audio/wav",
        "aiff" | "aif" => "audio/aiff",
        "au" => "audio/basic",
        "mp3" => "audio/mpeg",
        "ogg" | "opus" => "audio/ogg",
        "m4a" => "audio/m4a",
        "aac" => "audio/aac",
        "flac" => "audio/flac",
        _ => return None,
    };
    Some(mime)
}

/// Check a candidate against the configured limits
///
/// The size limit is checked first and applies regardless of type.
pub fn validate_upload(candidate: &UploadCandidate, limits: &UploadLimits) -> Result<UploadPlan> {
    let max = limits.max_file_size_bytes();
    if candidate.size_bytes > max {
        return Err(UploadError::TooLarge {
            actual: format_file_size(candidate.size_bytes),
            limit: format_file_size(max),
        });
    }
    if candidate.size_bytes == 0 {
        return Err(UploadError::Empty(candidate.file_name.clone()));
    }

    let extension = candidate.extension();
    let declared_audio = candidate
        .mime_type
        .as_deref()
        .is_some_and(|mime| mime.to_ascii_lowercase().starts_with("audio/"));
    let known_extension = ACCEPTED_EXTENSIONS.contains(&extension.as_str())
        || limits.native_formats.iter().any(|f| *f == extension);

    if !declared_audio && !known_extension {
        let kind = candidate
            .mime_type
            .clone()
            .unwrap_or_else(|| if extension.is_empty() { String::from("unknown") } else { extension.clone() });
        return Err(UploadError::UnsupportedType {
            kind,
            accepted: ACCEPTED_EXTENSIONS
                .iter()
                .map(|e| e.to_ascii_uppercase())
                .collect::<Vec<_>>()
                .join(", "),
        });
    }

    let needs_conversion = !limits.native_formats.iter().any(|f| *f == extension);
    Ok(UploadPlan {
        candidate: candidate.clone(),
        extension,
        needs_conversion,
    })
}
