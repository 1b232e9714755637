//! View functions for the visualizations
//!
//! Width fills the container; height comes from the visualization's own
//! size policy.

use iced::widget::Canvas;
use iced::{Element, Length};

use crate::canvas::VisualizationCanvas;
use crate::visualization::{
    ChordVisualization, ConfidencePanel, KeyVisualization, MelodyVisualization, Render,
};

fn visualization_canvas<'a, Message: 'a, V: Render>(visualization: &'a V) -> Element<'a, Message> {
    let height = visualization.size().height;
    Canvas::new(VisualizationCanvas::new(visualization))
        .width(Length::Fill)
        .height(Length::Fixed(height))
        .into()
}

pub fn key_circle<'a, Message: 'a>(visualization: &'a KeyVisualization) -> Element<'a, Message> {
    visualization_canvas(visualization)
}

pub fn chord_strip<'a, Message: 'a>(visualization: &'a ChordVisualization) -> Element<'a, Message> {
    visualization_canvas(visualization)
}

pub fn melodic_contour<'a, Message: 'a>(
    visualization: &'a MelodyVisualization,
) -> Element<'a, Message> {
    visualization_canvas(visualization)
}

pub fn confidence_meters<'a, Message: 'a>(panel: &'a ConfidencePanel) -> Element<'a, Message> {
    visualization_canvas(panel)
}
