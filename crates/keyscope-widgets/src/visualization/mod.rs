//! Analysis visualizations
//!
//! Each visualization is a small state object holding its surface size and
//! the last dataset it accepted. Rendering always clears and redraws the
//! whole surface, so a render never depends on what was drawn before.
//!
//! Two states are observable: **placeholder** (no data, a centered hint) and
//! **rendered** (the last accepted dataset).

mod chord_strip;
mod confidence;
mod key_circle;
mod melodic_contour;

pub use chord_strip::{draw_chord_progression, ChordLayout, ChordVisualization, CHORD_PLACEHOLDER};
pub use confidence::{draw_confidence_meter, ConfidencePanel, METER_HEIGHT};
pub use key_circle::{draw_circle_of_fifths, KeyLayout, KeyVisualization, KEY_PLACEHOLDER};
pub use melodic_contour::{
    draw_melodic_pattern, MelodyLayout, MelodyVisualization, MELODY_PLACEHOLDER,
};

use iced::Size;
use thiserror::Error;

use crate::surface::Surface;

/// Data a visualization refuses to draw
#[derive(Debug, Error, PartialEq)]
pub enum VisualizationError {
    #[error("Melodic pattern value {value} at index {index} is not a finite number")]
    NonFiniteValue { index: usize, value: f64 },
}

pub type Result<T> = std::result::Result<T, VisualizationError>;

/// Anything that can paint itself onto a [`Surface`]
pub trait Render {
    /// Logical size the visualization wants to be laid out at
    fn size(&self) -> Size;

    /// Clear and redraw everything
    fn render<S: Surface>(&self, surface: &mut S);
}

/// How a canvas derives its height from the container width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizePolicy {
    pub min_height: f32,
    pub aspect: f32,
}

/// Circle of fifths: `height = max(200, width * 0.6)`
pub const KEY_SIZE_POLICY: SizePolicy = SizePolicy {
    min_height: 200.0,
    aspect: 0.6,
};

/// Chord strip and melody contour: `height = max(150, width * 0.3)`
pub const STRIP_SIZE_POLICY: SizePolicy = SizePolicy {
    min_height: 150.0,
    aspect: 0.3,
};

impl SizePolicy {
    pub fn size_for(&self, container_width: f32) -> Size {
        let width = if container_width.is_finite() {
            container_width.max(0.0)
        } else {
            0.0
        };
        Size::new(width, (width * self.aspect).max(self.min_height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_size(actual: Size, width: f32, height: f32) {
        assert_eq!(actual.width, width);
        assert!((actual.height - height).abs() < 1e-3, "{actual:?}");
    }

    #[test]
    fn test_size_policies() {
        assert_size(KEY_SIZE_POLICY.size_for(1000.0), 1000.0, 600.0);
        assert_size(KEY_SIZE_POLICY.size_for(200.0), 200.0, 200.0);
        assert_size(STRIP_SIZE_POLICY.size_for(800.0), 800.0, 240.0);
        assert_size(STRIP_SIZE_POLICY.size_for(300.0), 300.0, 150.0);
    }

    #[test]
    fn test_c_major_analysis_renders_all_three() {
        use crate::surface::{Brush, RecordingSurface};
        use crate::theme;

        let mut key = KeyVisualization::new(800.0);
        let mut chords = ChordVisualization::new(800.0);
        let mut melody = MelodyVisualization::new(800.0);

        key.draw_circle_of_fifths("C", "major");
        chords.draw_chord_progression(&["C", "G", "Am", "F"]);
        melody.draw_melodic_pattern(&[0.0, 2.0, 4.0, 2.0, 0.0]).unwrap();

        let mut surface = RecordingSurface::new(800.0, 480.0);
        key.render(&mut surface);
        assert!(surface.find_text("C major").is_some());
        let highlighted: Vec<_> = surface
            .texts()
            .into_iter()
            .filter(|t| t.bold && t.size == 12.0)
            .map(|t| t.content.clone())
            .collect();
        assert_eq!(highlighted, vec!["C"]);

        let mut surface = RecordingSurface::new(800.0, 240.0);
        chords.render(&mut surface);
        let names: Vec<_> = surface
            .texts()
            .into_iter()
            .filter(|t| t.bold)
            .map(|t| t.content.clone())
            .collect();
        assert_eq!(names, vec!["C", "G", "Am", "F"]);

        let mut surface = RecordingSurface::new(800.0, 240.0);
        melody.render(&mut surface);
        let dots = surface
            .fills()
            .into_iter()
            .filter(|(_, brush)| **brush == Brush::Solid(theme::PRIMARY))
            .count();
        assert_eq!(dots, 5);
        assert!(surface.find_text(MELODY_PLACEHOLDER).is_none());
    }

    #[test]
    fn test_degenerate_width() {
        assert_size(STRIP_SIZE_POLICY.size_for(-5.0), 0.0, 150.0);
        assert_size(STRIP_SIZE_POLICY.size_for(f32::NAN), 0.0, 150.0);
    }
}
