use iced::{Color, Size};

use super::{Brush, Shape, StrokeStyle, Surface, TextSpec};

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear(Color),
    Fill { shape: Shape, brush: Brush },
    Stroke { shape: Shape, style: StrokeStyle },
    Text(TextSpec),
}

/// Surface that stores draw calls instead of rasterizing them
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Size,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Size::new(width, height),
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn texts(&self) -> Vec<&TextSpec> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn find_text(&self, content: &str) -> Option<&TextSpec> {
        self.texts().into_iter().find(|t| t.content == content)
    }

    pub fn fills(&self) -> Vec<(&Shape, &Brush)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Fill { shape, brush } => Some((shape, brush)),
                _ => None,
            })
            .collect()
    }

    pub fn strokes(&self) -> Vec<(&Shape, &StrokeStyle)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Stroke { shape, style } => Some((shape, style)),
                _ => None,
            })
            .collect()
    }

    pub fn take(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self, background: Color) {
        self.ops.clear();
        self.ops.push(DrawOp::Clear(background));
    }

    fn fill(&mut self, shape: &Shape, brush: &Brush) {
        self.ops.push(DrawOp::Fill {
            shape: shape.clone(),
            brush: brush.clone(),
        });
    }

    fn stroke(&mut self, shape: &Shape, style: &StrokeStyle) {
        self.ops.push(DrawOp::Stroke {
            shape: shape.clone(),
            style: style.clone(),
        });
    }

    fn fill_text(&mut self, text: TextSpec) {
        self.ops.push(DrawOp::Text(text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::Point;

    #[test]
    fn test_clear_discards_previous_ops() {
        let mut surface = RecordingSurface::new(100.0, 50.0);
        surface.fill_text(TextSpec::new("old", Point::ORIGIN, 12.0, Color::WHITE));
        surface.clear(Color::BLACK);
        assert_eq!(surface.ops(), &[DrawOp::Clear(Color::BLACK)]);
        assert!(surface.find_text("old").is_none());
    }
}
