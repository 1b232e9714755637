//! Keyscope Core - analysis model, upload checks and service client
//!
//! Shared between the desktop client and the visualization widgets:
//!
//! - [`model`]: the analysis snapshot returned by the service
//! - [`upload`]: size/type checks run before any network call
//! - [`api`]: blocking HTTP client for upload, analysis and variations
//! - [`config`]: YAML client configuration
//! - [`music`]: circle-of-fifths layout and key helpers

pub mod api;
pub mod config;
pub mod format;
pub mod model;
pub mod music;
pub mod upload;

pub use model::{AnalysisResult, ConfidenceScores, UploadResponse, VariationRequest, VariationResult};
