//! Circle of fifths with the detected key highlighted

use iced::{Point, Size};
use keyscope_core::music::{is_active_label, CIRCLE_OF_FIFTHS};

use super::{Render, KEY_SIZE_POLICY};
use crate::primitives::{draw_placeholder, radial_gradient};
use crate::surface::{Brush, Shape, StrokeStyle, Surface, TextSpec};
use crate::theme;

pub const KEY_PLACEHOLDER: &str = "Upload audio to see key analysis";

const MARGIN: f32 = 40.0;
const NODE_RADIUS: f32 = 20.0;
const NODE_DISTANCE: f32 = 0.8;
const NODE_TEXT_SIZE: f32 = 12.0;
const CENTER_TEXT_SIZE: f32 = 18.0;
const CAPTION_OFFSET: f32 = 25.0;

/// Geometry of the circle for a given surface size
#[derive(Debug, Clone, PartialEq)]
pub struct KeyLayout {
    pub center: Point,
    pub radius: f32,
    /// Label centers in [`CIRCLE_OF_FIFTHS`] order
    pub nodes: [Point; 12],
}

impl KeyLayout {
    pub fn compute(size: Size) -> Self {
        let center = Point::new(size.width / 2.0, size.height / 2.0);
        let radius = (center.x.min(center.y) - MARGIN).max(0.0);

        let nodes = std::array::from_fn(|i| {
            let angle = (i as f32 * 30.0 - 90.0).to_radians();
            Point::new(
                center.x + angle.cos() * radius * NODE_DISTANCE,
                center.y + angle.sin() * radius * NODE_DISTANCE,
            )
        });

        Self {
            center,
            radius,
            nodes,
        }
    }
}

/// Clear the surface and draw the circle of fifths for `key`
///
/// An empty key draws the placeholder instead.
pub fn draw_circle_of_fifths<S: Surface>(surface: &mut S, key: &str, scale: &str) {
    if key.trim().is_empty() {
        draw_placeholder(surface, KEY_PLACEHOLDER);
        return;
    }

    let layout = KeyLayout::compute(surface.size());
    surface.clear(theme::BACKGROUND);

    // Outer ring
    let ring = Shape::circle(layout.center, layout.radius);
    surface.fill(
        &ring,
        &radial_gradient(
            layout.center,
            layout.radius,
            theme::primary_alpha(0.1),
            theme::primary_alpha(0.05),
        ),
    );
    surface.stroke(&ring, &StrokeStyle::solid(theme::PRIMARY, 2.0));

    for (label, &position) in CIRCLE_OF_FIFTHS.iter().zip(layout.nodes.iter()) {
        let active = is_active_label(label, key);
        let node = Shape::circle(position, NODE_RADIUS);

        let (fill, outline, text_color) = if active {
            (theme::PRIMARY, theme::PRIMARY_DARK, theme::TEXT_ON_PRIMARY)
        } else {
            (theme::SURFACE, theme::BORDER, theme::TEXT_PRIMARY)
        };
        surface.fill(&node, &Brush::Solid(fill));
        surface.stroke(&node, &StrokeStyle::solid(outline, 2.0));

        let text = TextSpec::new(*label, position, NODE_TEXT_SIZE, text_color);
        surface.fill_text(if active { text.bold() } else { text });
    }

    let title = format!("{} {}", key.trim(), scale.trim());
    surface.fill_text(
        TextSpec::new(title.trim_end(), layout.center, CENTER_TEXT_SIZE, theme::TEXT_PRIMARY).bold(),
    );
    surface.fill_text(TextSpec::new(
        "Circle of Fifths",
        Point::new(layout.center.x, layout.center.y + CAPTION_OFFSET),
        NODE_TEXT_SIZE,
        theme::TEXT_SECONDARY,
    ));
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct KeyReading {
    key: String,
    scale: String,
}

/// Key display state
#[derive(Debug, Clone)]
pub struct KeyVisualization {
    size: Size,
    reading: Option<KeyReading>,
    retain_on_resize: bool,
}

impl KeyVisualization {
    pub fn new(container_width: f32) -> Self {
        Self {
            size: KEY_SIZE_POLICY.size_for(container_width),
            reading: None,
            retain_on_resize: true,
        }
    }

    /// Keep the last key across resizes (default) or fall back to the placeholder
    pub fn with_retention(mut self, retain_on_resize: bool) -> Self {
        self.retain_on_resize = retain_on_resize;
        self
    }

    /// Accept a new key; an empty key returns to the placeholder
    pub fn draw_circle_of_fifths(&mut self, key: &str, scale: &str) {
        self.reading = (!key.trim().is_empty()).then(|| KeyReading {
            key: key.trim().to_string(),
            scale: scale.trim().to_string(),
        });
        log::debug!("Key visualization updated: {:?}", self.reading);
    }

    pub fn resize(&mut self, container_width: f32) {
        self.size = KEY_SIZE_POLICY.size_for(container_width);
        if !self.retain_on_resize {
            self.reading = None;
        }
    }

    pub fn is_rendered(&self) -> bool {
        self.reading.is_some()
    }
}

impl Render for KeyVisualization {
    fn size(&self) -> Size {
        self.size
    }

    fn render<S: Surface>(&self, surface: &mut S) {
        match &self.reading {
            Some(reading) => draw_circle_of_fifths(surface, &reading.key, &reading.scale),
            None => draw_placeholder(surface, KEY_PLACEHOLDER),
        }
    }
}
