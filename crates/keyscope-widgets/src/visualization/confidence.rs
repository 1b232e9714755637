//! Horizontal confidence meters for the analysis scores

use iced::{Point, Rectangle, Size};
use keyscope_core::ConfidenceScores;

use super::Render;
use crate::primitives::rounded_rect;
use crate::surface::{Brush, Surface, TextAlign, TextSpec};
use crate::theme;

/// Height of one meter row
pub const METER_HEIGHT: f32 = 28.0;

const LABEL_WIDTH: f32 = 80.0;
const VALUE_WIDTH: f32 = 50.0;
const TRACK_HEIGHT: f32 = 8.0;
const TEXT_SIZE: f32 = 12.0;

/// Draw one labelled meter inside `area`
///
/// `value` is a 0..=1 score and is clamped; a missing score leaves the
/// track empty and shows "n/a".
pub fn draw_confidence_meter<S: Surface>(
    surface: &mut S,
    area: Rectangle,
    label: &str,
    value: Option<f32>,
) {
    let center_y = area.y + area.height / 2.0;

    surface.fill_text(
        TextSpec::new(label, Point::new(area.x, center_y), TEXT_SIZE, theme::TEXT_PRIMARY)
            .aligned(TextAlign::Left),
    );

    let track_width = (area.width - LABEL_WIDTH - VALUE_WIDTH).max(0.0);
    let track = Rectangle::new(
        Point::new(area.x + LABEL_WIDTH, center_y - TRACK_HEIGHT / 2.0),
        Size::new(track_width, TRACK_HEIGHT),
    );
    surface.fill(&rounded_rect(track, TRACK_HEIGHT / 2.0), &Brush::Solid(theme::SURFACE));

    let value = value.filter(|v| v.is_finite()).map(|v| v.clamp(0.0, 1.0));
    let readout = match value {
        Some(v) => {
            if v > 0.0 {
                let filled = Rectangle {
                    width: track.width * v,
                    ..track
                };
                surface.fill(&rounded_rect(filled, TRACK_HEIGHT / 2.0), &Brush::Solid(theme::PRIMARY));
            }
            format!("{}%", (v * 100.0).round() as u32)
        }
        None => String::from("n/a"),
    };

    surface.fill_text(
        TextSpec::new(
            readout,
            Point::new(area.x + area.width, center_y),
            TEXT_SIZE,
            theme::TEXT_SECONDARY,
        )
        .aligned(TextAlign::Right),
    );
}

/// Key, chord and melody confidence stacked vertically
#[derive(Debug, Clone, Default)]
pub struct ConfidencePanel {
    width: f32,
    scores: ConfidenceScores,
}

impl ConfidencePanel {
    pub fn new(width: f32) -> Self {
        Self {
            width: width.max(0.0),
            scores: ConfidenceScores::default(),
        }
    }

    pub fn set_scores(&mut self, scores: Option<ConfidenceScores>) {
        self.scores = scores.unwrap_or_default();
    }

    pub fn resize(&mut self, width: f32) {
        self.width = width.max(0.0);
    }

    pub fn scores(&self) -> &ConfidenceScores {
        &self.scores
    }
}

impl Render for ConfidencePanel {
    fn size(&self) -> Size {
        Size::new(self.width, METER_HEIGHT * 3.0)
    }

    fn render<S: Surface>(&self, surface: &mut S) {
        let width = surface.size().width;
        surface.clear(theme::BACKGROUND);
        for (row, (label, value)) in self.scores.entries().into_iter().enumerate() {
            let area = Rectangle::new(
                Point::new(0.0, row as f32 * METER_HEIGHT),
                Size::new(width, METER_HEIGHT),
            );
            draw_confidence_meter(surface, area, label, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    fn area() -> Rectangle {
        Rectangle::new(Point::ORIGIN, Size::new(330.0, METER_HEIGHT))
    }

    #[test]
    fn test_meter_fill_is_proportional() {
        let mut surface = RecordingSurface::new(330.0, METER_HEIGHT);
        draw_confidence_meter(&mut surface, area(), "Key", Some(0.5));

        let fills = surface.fills();
        assert_eq!(fills.len(), 2);
        // Track spans 200px; the filled part ends halfway along it
        let filled_end = fills[1]
            .0
            .points()
            .iter()
            .map(|p| p.x)
            .fold(f32::MIN, f32::max);
        assert!((filled_end - (LABEL_WIDTH + 100.0)).abs() < 1e-3);
        assert!(surface.find_text("50%").is_some());
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let mut surface = RecordingSurface::new(330.0, METER_HEIGHT);
        draw_confidence_meter(&mut surface, area(), "Chords", Some(1.7));
        assert!(surface.find_text("100%").is_some());

        let mut surface = RecordingSurface::new(330.0, METER_HEIGHT);
        draw_confidence_meter(&mut surface, area(), "Chords", Some(-0.2));
        assert!(surface.find_text("0%").is_some());
        assert_eq!(surface.fills().len(), 1);
    }

    #[test]
    fn test_missing_value_shows_na() {
        let mut surface = RecordingSurface::new(330.0, METER_HEIGHT);
        draw_confidence_meter(&mut surface, area(), "Melody", None);
        assert!(surface.find_text("n/a").is_some());
        assert_eq!(surface.fills().len(), 1);
    }

    #[test]
    fn test_panel_draws_three_rows() {
        let mut panel = ConfidencePanel::new(330.0);
        panel.set_scores(Some(ConfidenceScores {
            key: Some(0.9),
            chords: Some(0.75),
            melody: None,
        }));
        assert_eq!(panel.size().height, METER_HEIGHT * 3.0);

        let mut surface = RecordingSurface::new(330.0, METER_HEIGHT * 3.0);
        panel.render(&mut surface);
        assert!(surface.find_text("90%").is_some());
        assert!(surface.find_text("75%").is_some());
        assert!(surface.find_text("n/a").is_some());

        let melody_label = surface.find_text("Melody").unwrap();
        assert_eq!(melody_label.position.y, METER_HEIGHT * 2.5);
    }
}
