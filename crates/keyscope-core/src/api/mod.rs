//! Blocking HTTP client for the analysis service
//!
//! All calls block the calling thread; the UI runs them on a worker pool and
//! receives the outcome as a message. There are no retries: every failure is
//! reported once and the user starts over.
//!
//! Endpoints (relative to the configured base URL):
//!
//! - `POST /api/audio/upload` (multipart, part `file`) → `{ fileId }`
//! - `GET /api/audio/analyze/{fileId}` → analysis result
//! - `POST /api/audio/generate-variation` (JSON) → opaque result

mod client;
mod error;
mod multipart;

pub use client::ApiClient;
pub use error::{ApiError, Result};
pub use multipart::MultipartBody;
