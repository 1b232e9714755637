//! Upload and analysis flow
//!
//! A pure state machine driven by the UI: it decides what happens next but
//! never performs I/O itself. Every upload gets a fresh request id; results
//! that arrive for an older id belong to a superseded upload and are dropped.
//!
//! ```text
//! Idle -> Uploading -> Analyzing -> Complete --(1 s)--> Showing
//!   ^         |            |
//!   +---------+------------+  (any failure)
//! ```

use std::time::Duration;

use keyscope_core::config::UploadLimits;
use keyscope_core::upload::{validate_upload, UploadCandidate, UploadError, UploadPlan};
use keyscope_core::{AnalysisResult, UploadResponse};

/// Delay between "Analysis complete!" and showing the results
pub const REVEAL_DELAY: Duration = Duration::from_secs(1);

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    Idle,
    Uploading {
        request: RequestId,
        file_name: String,
    },
    Analyzing {
        request: RequestId,
        file_id: String,
    },
    /// Analysis arrived; results are revealed after [`REVEAL_DELAY`]
    Complete {
        request: RequestId,
        file_id: String,
        result: Box<AnalysisResult>,
    },
    Showing {
        file_id: String,
        result: Box<AnalysisResult>,
    },
}

/// An accepted upload the UI should now send
#[derive(Debug, Clone, PartialEq)]
pub struct Started {
    pub request: RequestId,
    pub plan: UploadPlan,
}

/// What the UI should do after a network step finishes
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Result belonged to a superseded upload
    Stale,
    /// Upload accepted; request the analysis
    Analyze { request: RequestId, file_id: String },
    /// Analysis ready; schedule the reveal
    Reveal { request: RequestId },
    /// The chain failed and the controller is back to idle
    Failed { message: String },
}

/// Progress shown while a request chain is running
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub fraction: f32,
    pub status: String,
}

#[derive(Debug, Clone)]
pub struct UploadController {
    stage: Stage,
    limits: UploadLimits,
    next_request: RequestId,
    /// Notice for formats the service converts first
    conversion_notice: Option<String>,
    /// Last results stay visible while a new upload runs
    last_shown: Option<(String, Box<AnalysisResult>)>,
}

impl UploadController {
    pub fn new(limits: UploadLimits) -> Self {
        Self {
            stage: Stage::Idle,
            limits,
            next_request: 1,
            conversion_notice: None,
            last_shown: None,
        }
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn limits(&self) -> &UploadLimits {
        &self.limits
    }

    /// Validate a file and start a new request chain
    ///
    /// A rejected file leaves the current state untouched.
    pub fn begin(&mut self, candidate: &UploadCandidate) -> Result<Started, UploadError> {
        let plan = validate_upload(candidate, &self.limits)?;

        let request = self.next_request;
        self.next_request += 1;

        if let Stage::Showing { file_id, result } = &self.stage {
            self.last_shown = Some((file_id.clone(), result.clone()));
        }
        self.conversion_notice = plan.conversion_notice();
        self.stage = Stage::Uploading {
            request,
            file_name: candidate.file_name.clone(),
        };
        log::info!(
            "Request {}: uploading '{}' ({} bytes)",
            request,
            candidate.file_name,
            candidate.size_bytes
        );

        Ok(Started { request, plan })
    }

    pub fn upload_finished(
        &mut self,
        request: RequestId,
        outcome: Result<UploadResponse, String>,
    ) -> Transition {
        if !matches!(self.stage, Stage::Uploading { request: r, .. } if r == request) {
            log::debug!("Ignoring upload result for superseded request {}", request);
            return Transition::Stale;
        }

        match outcome {
            Ok(response) => {
                log::info!("Request {}: uploaded as {}", request, response.file_id);
                self.stage = Stage::Analyzing {
                    request,
                    file_id: response.file_id.clone(),
                };
                Transition::Analyze {
                    request,
                    file_id: response.file_id,
                }
            }
            Err(e) => self.fail(format!("Error uploading file: {}", e)),
        }
    }

    pub fn analysis_finished(
        &mut self,
        request: RequestId,
        outcome: Result<AnalysisResult, String>,
    ) -> Transition {
        let file_id = match &self.stage {
            Stage::Analyzing { request: r, file_id } if *r == request => file_id.clone(),
            _ => {
                log::debug!("Ignoring analysis result for superseded request {}", request);
                return Transition::Stale;
            }
        };

        match outcome {
            Ok(result) => {
                log::info!("Request {}: analysis complete", request);
                self.stage = Stage::Complete {
                    request,
                    file_id,
                    result: Box::new(result),
                };
                Transition::Reveal { request }
            }
            Err(e) => self.fail(format!("Error analyzing audio: {}", e)),
        }
    }

    /// Move a completed analysis on screen
    ///
    /// Returns the result to display, or `None` when the request was
    /// superseded in the meantime.
    pub fn reveal(&mut self, request: RequestId) -> Option<&AnalysisResult> {
        match std::mem::replace(&mut self.stage, Stage::Idle) {
            Stage::Complete {
                request: r,
                file_id,
                result,
            } if r == request => {
                self.conversion_notice = None;
                self.last_shown = None;
                self.stage = Stage::Showing { file_id, result };
            }
            other => {
                self.stage = other;
                return None;
            }
        }
        self.result()
    }

    fn fail(&mut self, message: String) -> Transition {
        log::warn!("{}", message);
        self.conversion_notice = None;
        // Earlier results come back if a replacement upload fails
        self.stage = match self.last_shown.take() {
            Some((file_id, result)) => Stage::Showing { file_id, result },
            None => Stage::Idle,
        };
        Transition::Failed { message }
    }

    /// Results currently on screen
    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.stage {
            Stage::Showing { result, .. } => Some(result),
            _ => self.last_shown.as_ref().map(|(_, r)| r.as_ref()),
        }
    }

    /// Service id of the file whose results are on screen
    pub fn current_file_id(&self) -> Option<&str> {
        match &self.stage {
            Stage::Showing { file_id, .. } => Some(file_id),
            _ => self.last_shown.as_ref().map(|(id, _)| id.as_str()),
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(
            self.stage,
            Stage::Uploading { .. } | Stage::Analyzing { .. } | Stage::Complete { .. }
        )
    }

    pub fn conversion_notice(&self) -> Option<&str> {
        self.conversion_notice.as_deref()
    }

    pub fn progress(&self) -> Option<Progress> {
        let (fraction, status) = match &self.stage {
            Stage::Uploading { file_name, .. } => (0.3, format!("Uploading {}...", file_name)),
            Stage::Analyzing { .. } => (
                0.7,
                String::from("Analyzing audio... This may take a few minutes."),
            ),
            Stage::Complete { .. } => (1.0, String::from("Analysis complete!")),
            Stage::Idle | Stage::Showing { .. } => return None,
        };
        Some(Progress { fraction, status })
    }
}
