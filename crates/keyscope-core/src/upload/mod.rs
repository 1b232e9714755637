//! Client-side upload checks
//!
//! Files are checked before any network traffic: the size limit first (so an
//! oversized file is always reported as oversized), then the media type.
//! Accepted files that the service cannot analyze natively carry a
//! conversion notice for the user.

mod error;
mod validate;

pub use error::{Result, UploadError};
pub use validate::{
    guess_mime_type, validate_upload, UploadCandidate, UploadPlan, ACCEPTED_EXTENSIONS,
};
