//! Chord progression drawn as a centered row of boxes

use iced::{Color, Point, Rectangle, Size};

use super::{Render, STRIP_SIZE_POLICY};
use crate::primitives::{draw_placeholder, rounded_rect, vertical_gradient};
use crate::surface::{Shape, StrokeStyle, Surface, TextSpec};
use crate::theme;

pub const CHORD_PLACEHOLDER: &str = "Chord progression will appear here";

const PADDING: f32 = 20.0;
const GAP: f32 = 10.0;
const MIN_BOX_WIDTH: f32 = 60.0;
const CORNER_RADIUS: f32 = 8.0;
const NAME_TEXT_SIZE: f32 = 14.0;
const INDEX_TEXT_SIZE: f32 = 10.0;
const INDEX_OFFSET: f32 = 15.0;

/// Box positions for `count` chords on a surface
#[derive(Debug, Clone, PartialEq)]
pub struct ChordLayout {
    pub box_width: f32,
    pub box_height: f32,
    /// Width of all boxes plus the gaps between them
    pub total_width: f32,
    pub start_x: f32,
    pub boxes: Vec<Rectangle>,
}

impl ChordLayout {
    pub fn compute(size: Size, count: usize) -> Self {
        if count == 0 {
            return Self {
                box_width: 0.0,
                box_height: 0.0,
                total_width: 0.0,
                start_x: size.width / 2.0,
                boxes: Vec::new(),
            };
        }

        let n = count as f32;
        let box_width = ((size.width - 2.0 * PADDING) / n - GAP).max(MIN_BOX_WIDTH);
        let box_height = (size.height - 2.0 * PADDING).max(0.0);
        let total_width = n * (box_width + GAP) - GAP;
        let start_x = (size.width - total_width) / 2.0;

        let boxes = (0..count)
            .map(|i| {
                Rectangle::new(
                    Point::new(start_x + i as f32 * (box_width + GAP), PADDING),
                    Size::new(box_width, box_height),
                )
            })
            .collect();

        Self {
            box_width,
            box_height,
            total_width,
            start_x,
            boxes,
        }
    }

    pub fn center_y(&self) -> f32 {
        PADDING + self.box_height / 2.0
    }
}

/// Clear the surface and draw one box per chord, in order
pub fn draw_chord_progression<S: Surface, T: AsRef<str>>(surface: &mut S, chords: &[T]) {
    if chords.is_empty() {
        draw_placeholder(surface, CHORD_PLACEHOLDER);
        return;
    }

    let layout = ChordLayout::compute(surface.size(), chords.len());
    surface.clear(theme::BACKGROUND);

    if chords.len() > 1 {
        let y = layout.center_y();
        surface.stroke(
            &Shape::line(
                Point::new(layout.start_x, y),
                Point::new(layout.start_x + layout.total_width, y),
            ),
            &StrokeStyle::solid(theme::BORDER, 2.0),
        );
    }

    let index_color = Color {
        a: 0.8,
        ..theme::TEXT_ON_PRIMARY
    };

    for (i, (chord, rect)) in chords.iter().zip(layout.boxes.iter()).enumerate() {
        let shape = rounded_rect(*rect, CORNER_RADIUS);
        surface.fill(&shape, &vertical_gradient(*rect, theme::PRIMARY_LIGHT, theme::PRIMARY));
        surface.stroke(&shape, &StrokeStyle::solid(theme::PRIMARY_DARK, 2.0));

        let center = rect.center();
        surface.fill_text(
            TextSpec::new(chord.as_ref(), center, NAME_TEXT_SIZE, theme::TEXT_ON_PRIMARY).bold(),
        );
        surface.fill_text(TextSpec::new(
            (i + 1).to_string(),
            Point::new(center.x, center.y + INDEX_OFFSET),
            INDEX_TEXT_SIZE,
            index_color,
        ));
    }
}

/// Chord strip state
#[derive(Debug, Clone)]
pub struct ChordVisualization {
    size: Size,
    chords: Vec<String>,
    retain_on_resize: bool,
}

impl ChordVisualization {
    pub fn new(container_width: f32) -> Self {
        Self {
            size: STRIP_SIZE_POLICY.size_for(container_width),
            chords: Vec::new(),
            retain_on_resize: true,
        }
    }

    pub fn with_retention(mut self, retain_on_resize: bool) -> Self {
        self.retain_on_resize = retain_on_resize;
        self
    }

    pub fn draw_chord_progression<T: AsRef<str>>(&mut self, chords: &[T]) {
        self.chords = chords.iter().map(|c| c.as_ref().to_string()).collect();
        log::debug!("Chord visualization updated with {} chords", self.chords.len());
    }

    pub fn resize(&mut self, container_width: f32) {
        self.size = STRIP_SIZE_POLICY.size_for(container_width);
        if !self.retain_on_resize {
            self.chords.clear();
        }
    }

    pub fn is_rendered(&self) -> bool {
        !self.chords.is_empty()
    }

    pub fn chords(&self) -> &[String] {
        &self.chords
    }
}

impl Render for ChordVisualization {
    fn size(&self) -> Size {
        self.size
    }

    fn render<S: Surface>(&self, surface: &mut S) {
        draw_chord_progression(surface, &self.chords);
    }
}
