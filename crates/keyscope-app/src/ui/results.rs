//! Analysis results: summary cards, chips and the visualization canvases

use iced::widget::{button, column, container, row, text, Row};
use iced::{Alignment, Background, Border, Element, Length};
use keyscope_core::music::MusicalKey;
use keyscope_core::AnalysisResult;
use keyscope_widgets::visualization::VisualizationError;
use keyscope_widgets::{
    theme, view as canvas_view, ChordVisualization, ConfidencePanel, KeyVisualization,
    MelodyVisualization,
};

use super::message::Message;

const COLUMN_SPACING: f32 = 20.0;

/// The canvases shown for one analysis
#[derive(Debug, Clone)]
pub struct Visualizations {
    pub key: KeyVisualization,
    pub chords: ChordVisualization,
    pub melody: MelodyVisualization,
    pub confidence: ConfidencePanel,
}

impl Visualizations {
    pub fn new(content_width: f32, retain_on_resize: bool) -> Self {
        let half = half_width(content_width);
        Self {
            key: KeyVisualization::new(half).with_retention(retain_on_resize),
            chords: ChordVisualization::new(content_width).with_retention(retain_on_resize),
            melody: MelodyVisualization::new(content_width).with_retention(retain_on_resize),
            confidence: ConfidencePanel::new(half),
        }
    }

    /// Hand a new analysis to every visualization
    ///
    /// Key and chords always update; a malformed melodic pattern is reported
    /// while the other two still show the new data.
    pub fn show(&mut self, result: &AnalysisResult) -> Result<(), VisualizationError> {
        self.key.draw_circle_of_fifths(&result.key, &result.scale);
        self.chords.draw_chord_progression(&result.chord_progression);
        self.confidence.set_scores(result.confidence);
        self.melody.draw_melodic_pattern(&result.melodic_pattern)
    }

    /// Follow the container width
    pub fn resize(&mut self, content_width: f32) {
        let half = half_width(content_width);
        self.key.resize(half);
        self.chords.resize(content_width);
        self.melody.resize(content_width);
        self.confidence.resize(half);
    }
}

/// Width of one of the two top columns
fn half_width(content_width: f32) -> f32 {
    ((content_width - COLUMN_SPACING) / 2.0).max(0.0)
}

/// Relative key and Camelot code, e.g. "Relative: Am · Camelot 8B"
pub fn key_details(result: &AnalysisResult) -> Option<String> {
    let key = MusicalKey::from_analysis(&result.key, &result.scale)?;
    Some(format!("Relative: {} · Camelot {}", key.relative(), key.camelot()))
}

fn card<'a>(label: &'a str, value: String) -> Element<'a, Message> {
    container(
        column![
            text(label).size(12).color(theme::TEXT_SECONDARY),
            text(value).size(22),
        ]
        .spacing(4),
    )
    .padding(12)
    .width(Length::Fill)
    .style(|_theme| container::Style {
        background: Some(Background::Color(theme::SURFACE)),
        border: Border {
            color: theme::BORDER,
            width: 1.0,
            radius: 6.0.into(),
        },
        ..Default::default()
    })
    .into()
}

/// Numbered chips, e.g. "1 C", "2 G"
fn chips<'a>(items: &'a [String]) -> Element<'a, Message> {
    let chips = items.iter().enumerate().map(|(i, item)| -> Element<'a, Message> {
        container(
            row![
                text((i + 1).to_string()).size(11).color(theme::TEXT_SECONDARY),
                text(item.as_str()).size(14),
            ]
            .spacing(6)
            .align_y(Alignment::Center),
        )
        .padding([4, 10])
        .style(|_theme| container::Style {
            background: Some(Background::Color(theme::primary_alpha(0.15))),
            border: Border {
                color: theme::PRIMARY,
                width: 1.0,
                radius: 12.0.into(),
            },
            ..Default::default()
        })
        .into()
    });
    Row::with_children(chips).spacing(8).wrap().into()
}

fn section<'a>(title: &'a str, content: Element<'a, Message>) -> Element<'a, Message> {
    column![text(title).size(18), content].spacing(8).into()
}

pub fn view<'a>(result: &'a AnalysisResult, viz: &'a Visualizations) -> Element<'a, Message> {
    let dash = || String::from("-");

    let summary = column![
        row![
            card("Key", if result.key.is_empty() { dash() } else { result.key.clone() }),
            card("Scale", if result.scale.is_empty() { dash() } else { result.scale.clone() }),
            card("Tempo", result.display_tempo().unwrap_or_else(dash)),
        ]
        .spacing(10),
        text(key_details(result).unwrap_or_default()).size(13).color(theme::TEXT_SECONDARY),
        section("Confidence", canvas_view::confidence_meters(&viz.confidence)),
    ]
    .spacing(12)
    .width(Length::FillPortion(1));

    let top = row![
        summary,
        container(canvas_view::key_circle(&viz.key)).width(Length::FillPortion(1)),
    ]
    .spacing(COLUMN_SPACING);

    let copy = button(text("Copy progression").size(13))
        .on_press_maybe((!result.chord_progression.is_empty()).then_some(Message::CopyProgression))
        .style(button::secondary);
    let chord_header = row![text("Chord Progression").size(18), copy]
        .spacing(12)
        .align_y(Alignment::Center);

    let mut content = column![
        top,
        column![chord_header, chips(&result.chord_progression)].spacing(8),
        canvas_view::chord_strip(&viz.chords),
        section("Melodic Contour", canvas_view::melodic_contour(&viz.melody)),
    ]
    .spacing(20);

    if !result.melodic_patterns.is_empty() {
        content = content.push(section("Melodic Patterns", chips(&result.melodic_patterns)));
    }
    if !result.dominant_instruments.is_empty() {
        content = content.push(section(
            "Dominant Instruments",
            chips(&result.dominant_instruments),
        ));
    }

    content.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyscope_widgets::Render;

    fn c_major() -> AnalysisResult {
        AnalysisResult {
            key: "C".into(),
            scale: "major".into(),
            tempo: Some(119.6),
            chord_progression: vec!["C".into(), "G".into(), "Am".into(), "F".into()],
            melodic_pattern: vec![0.0, 2.0, 4.0, 2.0, 0.0],
            ..AnalysisResult::default()
        }
    }

    #[test]
    fn test_show_feeds_every_visualization() {
        let mut viz = Visualizations::new(1160.0, true);
        viz.show(&c_major()).unwrap();
        assert!(viz.key.is_rendered());
        assert!(viz.chords.is_rendered());
        assert!(viz.melody.is_rendered());
    }

    #[test]
    fn test_malformed_melody_still_updates_key_and_chords() {
        let mut viz = Visualizations::new(1160.0, true);
        let result = AnalysisResult {
            melodic_pattern: vec![1.0, f64::NAN],
            ..c_major()
        };
        assert!(viz.show(&result).is_err());
        assert!(viz.key.is_rendered());
        assert!(viz.chords.is_rendered());
        assert!(!viz.melody.is_rendered());
    }

    #[test]
    fn test_resize_splits_top_row() {
        let mut viz = Visualizations::new(1160.0, true);
        viz.resize(820.0);
        assert_eq!(viz.key.size().width, 400.0);
        assert_eq!(viz.chords.size().width, 820.0);
        assert!((viz.melody.size().height - 246.0).abs() < 1e-3);
    }

    #[test]
    fn test_key_details() {
        assert_eq!(
            key_details(&c_major()).unwrap(),
            "Relative: Am · Camelot 8B"
        );
        assert!(key_details(&AnalysisResult::default()).is_none());
    }
}
