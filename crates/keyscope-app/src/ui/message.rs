//! Application messages for keyscope

use std::path::PathBuf;

use iced::Size;
use keyscope_core::{AnalysisResult, UploadResponse, VariationResult};

use crate::controller::RequestId;

#[derive(Debug, Clone)]
pub enum Message {
    // Upload
    /// Path typed into the file field
    PathInputChanged(String),
    /// Upload the typed path
    SubmitPath,
    /// A file is dragged over the window
    FileHovered,
    /// Dragged files left the window
    FilesHoveredLeft,
    /// A file was dropped on the window
    FileDropped(PathBuf),
    UploadFinished(RequestId, Result<UploadResponse, String>),
    AnalysisFinished(RequestId, Result<AnalysisResult, String>),
    /// Reveal delay elapsed for a completed request
    RevealResults(RequestId),

    // Results
    CopyProgression,

    // Variations
    VariationAmountChanged(u8),
    VariationStyleSelected(String),
    RequestVariation,
    /// Reply for the file id the request was made against
    VariationFinished(String, Result<VariationResult, String>),

    // Misc
    DismissToast(u64),
    /// Periodic toast expiry check
    Tick,
    WindowResized(Size),
}
