//! Canvas program that paints a visualization onto an iced frame

use iced::widget::canvas::{Frame, Geometry, Program};
use iced::{mouse, Rectangle, Theme};

use crate::surface::FrameSurface;
use crate::visualization::Render;

/// Borrowing canvas program for any [`Render`] implementation
///
/// The frame is sized from the widget bounds, so geometry always follows
/// the width the layout actually gave the canvas.
pub struct VisualizationCanvas<'a, V> {
    pub visualization: &'a V,
}

impl<'a, V> VisualizationCanvas<'a, V> {
    pub fn new(visualization: &'a V) -> Self {
        Self { visualization }
    }
}

impl<Message, V: Render> Program<Message> for VisualizationCanvas<'_, V> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        {
            let mut surface = FrameSurface::new(&mut frame);
            self.visualization.render(&mut surface);
        }
        vec![frame.into_geometry()]
    }
}
