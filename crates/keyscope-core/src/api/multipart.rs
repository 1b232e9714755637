//! `multipart/form-data` encoding for file uploads

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static BOUNDARY_COUNTER: AtomicU64 = AtomicU64::new(1);

/// An encoded multipart body holding a single file part
#[derive(Debug, Clone)]
pub struct MultipartBody {
    boundary: String,
    bytes: Vec<u8>,
}

impl MultipartBody {
    /// Encode one file under form field `field`
    pub fn file(field: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        let boundary = new_boundary();
        let mut bytes = Vec::with_capacity(data.len() + 256);

        bytes.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        bytes.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                sanitize_quoted(field),
                sanitize_quoted(file_name)
            )
            .as_bytes(),
        );
        bytes.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
        bytes.extend_from_slice(data);
        bytes.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

        Self { boundary, bytes }
    }

    /// Value for the request's `Content-Type` header
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

fn new_boundary() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let count = BOUNDARY_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("----keyscope{:016x}{:04x}", nanos, count & 0xffff)
}

/// Quoted header parameters cannot contain quotes or line breaks
fn sanitize_quoted(value: &str) -> String {
    value
        .chars()
        .filter(|c| *c != '\r' && *c != '\n')
        .map(|c| if c == '"' { '\'' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_part_layout() {
        let body = MultipartBody::file("file", "take one.wav", "audio/wav", b"RIFF");
        let text = String::from_utf8(body.as_bytes().to_vec()).unwrap();
        let boundary = body.boundary();

        assert!(text.starts_with(&format!("--{}\r\n", boundary)));
        assert!(text.contains("name=\"file\"; filename=\"take one.wav\""));
        assert!(text.contains("Content-Type: audio/wav\r\n\r\nRIFF\r\n"));
        assert!(text.ends_with(&format!("--{}--\r\n", boundary)));
        assert_eq!(
            body.content_type(),
            format!("multipart/form-data; boundary={}", boundary)
        );
    }

    #[test]
    fn test_boundaries_are_unique() {
        let a = MultipartBody::file("file", "a.wav", "audio/wav", b"");
        let b = MultipartBody::file("file", "a.wav", "audio/wav", b"");
        assert_ne!(a.boundary(), b.boundary());
    }

    #[test]
    fn test_quotes_and_newlines_stripped_from_file_name() {
        let body = MultipartBody::file("file", "bad\"name\r\n.wav", "audio/wav", b"");
        let text = String::from_utf8_lossy(body.as_bytes()).into_owned();
        assert!(text.contains("filename=\"bad'name.wav\""));
    }
}
