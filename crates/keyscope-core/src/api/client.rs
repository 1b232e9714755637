use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::error::{ApiError, Result};
use super::multipart::MultipartBody;
use crate::config::ServerConfig;
use crate::model::{AnalysisResult, UploadResponse, VariationRequest, VariationResult};
use crate::upload::UploadPlan;

const UPLOAD_PATH: &str = "/api/audio/upload";
const ANALYZE_PATH: &str = "/api/audio/analyze";
const VARIATION_PATH: &str = "/api/audio/generate-variation";

/// Bytes encoded in a path segment: all but `ALPHA / DIGIT / - . _ ~`
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Client for the analysis service
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    agent: ureq::Agent,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ServerConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build();
        Self {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Upload a validated file and return the service's id for it
    pub fn upload(&self, plan: &UploadPlan) -> Result<UploadResponse> {
        let candidate = &plan.candidate;
        let data = std::fs::read(&candidate.path)?;
        let content_type = candidate
            .mime_type
            .as_deref()
            .unwrap_or("application/octet-stream");
        self.upload_bytes(&candidate.file_name, content_type, &data)
    }

    /// Upload raw bytes as the `file` part of a multipart form
    pub fn upload_bytes(
        &self,
        file_name: &str,
        content_type: &str,
        data: &[u8],
    ) -> Result<UploadResponse> {
        let url = format!("{}{}", self.base_url, UPLOAD_PATH);
        let body = MultipartBody::file("file", file_name, content_type, data);

        log::info!("Uploading '{}' ({} bytes) to {}", file_name, data.len(), url);

        let response = self
            .agent
            .post(&url)
            .set("Content-Type", &body.content_type())
            .set("Accept", "application/json")
            .send_bytes(body.as_bytes())
            .map_err(map_ureq_error)?;

        let upload: UploadResponse = serde_json::from_reader(response.into_reader())?;
        log::info!("Upload accepted, file id {}", upload.file_id);
        Ok(upload)
    }

    /// Fetch the analysis for an uploaded file
    pub fn analyze(&self, file_id: &str) -> Result<AnalysisResult> {
        let url = format!("{}{}/{}", self.base_url, ANALYZE_PATH, encode_path_segment(file_id));
        log::info!("Requesting analysis from {}", url);

        let response = self
            .agent
            .get(&url)
            .set("Accept", "application/json")
            .call()
            .map_err(map_ureq_error)?;

        let result: AnalysisResult = serde_json::from_reader(response.into_reader())?;
        log::info!(
            "Analysis received: key={} {}, {} chords, {} pattern values",
            result.key,
            result.scale,
            result.chord_progression.len(),
            result.melodic_pattern.len()
        );
        Ok(result)
    }

    /// Ask the service for variations of an analyzed file
    pub fn generate_variation(&self, request: &VariationRequest) -> Result<VariationResult> {
        let url = format!("{}{}", self.base_url, VARIATION_PATH);
        let payload = serde_json::to_string(request)?;
        log::info!(
            "Requesting {} '{}' variation(s) for {}",
            request.amount,
            request.style,
            request.file_id
        );

        let response = self
            .agent
            .post(&url)
            .set("Content-Type", "application/json")
            .set("Accept", "application/json")
            .send_string(&payload)
            .map_err(map_ureq_error)?;

        let body = response.into_string()?;
        if body.trim().is_empty() {
            return Ok(VariationResult::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }
}

fn map_ureq_error(err: ureq::Error) -> ApiError {
    match err {
        ureq::Error::Status(status, response) => {
            let body = response.into_string().unwrap_or_default();
            log::warn!("Analysis service returned {}: {}", status, body);
            ApiError::from_status(status, &body)
        }
        ureq::Error::Transport(transport) => {
            log::warn!("Transport error: {}", transport);
            ApiError::Transport(transport.to_string())
        }
    }
}

/// Percent-encode everything outside the RFC 3986 unreserved set
fn encode_path_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::sync::mpsc;

    /// Serve exactly one HTTP response and hand back the raw request
    fn serve_once(status_line: &'static str, body: &'static str) -> (ApiClient, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            tx.send(request).unwrap();
        });

        let client = ApiClient::new(&ServerConfig {
            base_url: format!("http://{}/", addr),
            timeout_secs: 10,
        });
        (client, rx)
    }

    fn read_request(stream: &mut TcpStream) -> String {
        let mut data = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            data.extend_from_slice(&buf[..n]);

            if let Some(end) = data.windows(4).position(|w| w == b"\r\n\r\n") {
                let headers = String::from_utf8_lossy(&data[..end]).to_ascii_lowercase();
                let length = headers
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if data.len() >= end + 4 + length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&data).into_owned()
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new(&ServerConfig {
            base_url: "http://localhost:8080/".into(),
            timeout_secs: 30,
        });
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_upload_posts_multipart_and_returns_file_id() {
        let (client, requests) = serve_once("200 OK", r#"{"fileId":"f-42"}"#);

        let response = client.upload_bytes("groove.wav", "audio/wav", b"RIFFDATA").unwrap();
        assert_eq!(response.file_id, "f-42");

        let request = requests.recv().unwrap();
        assert!(request.starts_with("POST /api/audio/upload "));
        assert!(request.to_ascii_lowercase().contains("content-type: multipart/form-data; boundary="));
        assert!(request.contains("filename=\"groove.wav\""));
        assert!(request.contains("RIFFDATA"));
    }

    #[test]
    fn test_analyze_gets_result_for_file_id() {
        let (client, requests) = serve_once(
            "200 OK",
            r#"{"key":"C","scale":"major","chordProgression":["C","G","Am","F"],"melodicPattern":[0,2,4,2,0]}"#,
        );

        let result = client.analyze("take 1").unwrap();
        assert_eq!(result.key, "C");
        assert_eq!(result.chord_progression.len(), 4);

        let request = requests.recv().unwrap();
        assert!(request.starts_with("GET /api/audio/analyze/take%201 "));
    }

    #[test]
    fn test_variation_posts_json() {
        let (client, requests) = serve_once("200 OK", r#"{"variations":["C","Am"]}"#);

        let request = VariationRequest {
            file_id: "f-1".into(),
            amount: 2,
            style: "jazz".into(),
        };
        let result = client.generate_variation(&request).unwrap();
        assert_eq!(result["variations"][1], "Am");

        let raw = requests.recv().unwrap();
        assert!(raw.starts_with("POST /api/audio/generate-variation "));
        assert!(raw.contains(r#""fileId":"f-1""#));
        assert!(raw.contains(r#""style":"jazz""#));
    }

    #[test]
    fn test_error_status_carries_server_message() {
        let (client, _requests) = serve_once("400 Bad Request", r#"{"error":"Unsupported codec"}"#);

        let err = client.upload_bytes("x.wav", "audio/wav", b"x").unwrap_err();
        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Unsupported codec");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_json_is_decode_error() {
        let (client, _requests) = serve_once("200 OK", "not json");
        assert!(matches!(client.analyze("f"), Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_unreachable_server_is_transport_error() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = ApiClient::new(&ServerConfig {
            base_url: format!("http://127.0.0.1:{}", port),
            timeout_secs: 5,
        });
        assert!(matches!(client.analyze("f"), Err(ApiError::Transport(_))));
    }

    #[test]
    fn test_encode_path_segment() {
        assert_eq!(encode_path_segment("abc-1_2.wav"), "abc-1_2.wav");
        assert_eq!(encode_path_segment("a b/c"), "a%20b%2Fc");
        assert_eq!(encode_path_segment("take~2?#%"), "take~2%3F%23%25");
        assert_eq!(encode_path_segment("café"), "caf%C3%A9");
    }
}
