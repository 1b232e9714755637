//! Wire types exchanged with the analysis service
//!
//! Field names follow the service's camelCase JSON. Every collection field is
//! optional on the wire and deserializes to an empty value, so a partially
//! filled response still produces a usable snapshot.

use serde::{Deserialize, Serialize};

/// Result of analyzing one uploaded file
///
/// Produced once per successful analysis call and treated as an immutable
/// snapshot by everything that renders it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisResult {
    /// Original file name as stored by the service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// Detected tonic, e.g. "C", "F#", "Bb"
    pub key: String,
    /// Detected scale, e.g. "major", "minor"
    pub scale: String,
    /// Tempo in BPM (only meaningful when > 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tempo: Option<f64>,
    /// Detected chords in playback order
    pub chord_progression: Vec<String>,
    /// Relative pitch / interval contour
    pub melodic_pattern: Vec<f64>,
    /// Named melodic motifs reported alongside the contour
    pub melodic_patterns: Vec<String>,
    /// Instruments the service considers dominant in the mix
    pub dominant_instruments: Vec<String>,
    /// Per-attribute certainty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<ConfidenceScores>,
}

impl AnalysisResult {
    /// Tempo rounded to whole BPM, if the service reported a positive value
    pub fn display_tempo(&self) -> Option<String> {
        self.tempo
            .filter(|bpm| bpm.is_finite() && *bpm > 0.0)
            .map(|bpm| format!("{} BPM", bpm.round() as i64))
    }

    /// Chord names joined the way they are copied to the clipboard
    pub fn progression_text(&self) -> String {
        self.chord_progression.join(" - ")
    }

    /// Whether the key/scale pair is complete enough to draw
    pub fn has_key(&self) -> bool {
        !self.key.trim().is_empty() && !self.scale.trim().is_empty()
    }
}

/// Optional 0-1 certainty for each detected attribute
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfidenceScores {
    pub key: Option<f32>,
    pub chords: Option<f32>,
    pub melody: Option<f32>,
}

impl ConfidenceScores {
    /// Labelled entries in display order
    pub fn entries(&self) -> [(&'static str, Option<f32>); 3] {
        [("Key", self.key), ("Chords", self.chords), ("Melody", self.melody)]
    }
}

/// Body returned by the upload endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub file_id: String,
}

/// Request body for the variation endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariationRequest {
    pub file_id: String,
    pub amount: u32,
    pub style: String,
}

/// Variation responses are passed through untouched
pub type VariationResult = serde_json::Value;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_service_payload() {
        let json = r#"{
            "fileName": "demo.wav",
            "key": "C",
            "scale": "major",
            "tempo": 119.6,
            "chordProgression": ["C", "G", "Am", "F"],
            "melodicPattern": [0, 2, 4, 2, 0],
            "melodicPatterns": ["ascending third"],
            "confidence": { "key": 0.9, "chords": 0.75 }
        }"#;

        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.file_name.as_deref(), Some("demo.wav"));
        assert_eq!(result.chord_progression, vec!["C", "G", "Am", "F"]);
        assert_eq!(result.melodic_pattern, vec![0.0, 2.0, 4.0, 2.0, 0.0]);
        assert_eq!(result.melodic_patterns.len(), 1);
        assert!(result.dominant_instruments.is_empty());

        let confidence = result.confidence.unwrap();
        assert_eq!(confidence.key, Some(0.9));
        assert_eq!(confidence.melody, None);
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let result: AnalysisResult = serde_json::from_str(r#"{"key": "A"}"#).unwrap();
        assert_eq!(result.key, "A");
        assert!(result.scale.is_empty());
        assert!(result.chord_progression.is_empty());
        assert!(result.tempo.is_none());
        assert!(!result.has_key());
    }

    #[test]
    fn test_display_tempo_rounds_and_skips_non_positive() {
        let mut result = AnalysisResult {
            tempo: Some(119.6),
            ..Default::default()
        };
        assert_eq!(result.display_tempo().as_deref(), Some("120 BPM"));

        result.tempo = Some(0.0);
        assert_eq!(result.display_tempo(), None);

        result.tempo = None;
        assert_eq!(result.display_tempo(), None);
    }

    #[test]
    fn test_progression_text() {
        let result = AnalysisResult {
            chord_progression: vec!["Am".into(), "F".into(), "C".into()],
            ..Default::default()
        };
        assert_eq!(result.progression_text(), "Am - F - C");
    }

    #[test]
    fn test_variation_request_uses_camel_case() {
        let request = VariationRequest {
            file_id: "abc".into(),
            amount: 2,
            style: "jazz".into(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["fileId"], "abc");
        assert_eq!(json["amount"], 2);
    }
}
