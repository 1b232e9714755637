//! [`Surface`] adapter over an iced canvas [`Frame`]

use iced::alignment::{Horizontal, Vertical};
use iced::font::{self, Font};
use iced::widget::canvas::{
    self, fill, gradient, path, Fill, Frame, Gradient, LineDash, Path, Stroke, Style, Text,
};
use iced::{Color, Point, Radians, Size};

use super::{Brush, LineCap, LineJoin, PathCommand, Shape, StrokeStyle, Surface, TextAlign, TextSpec};

pub struct FrameSurface<'a> {
    frame: &'a mut Frame,
}

impl<'a> FrameSurface<'a> {
    pub fn new(frame: &'a mut Frame) -> Self {
        Self { frame }
    }
}

impl Surface for FrameSurface<'_> {
    fn size(&self) -> Size {
        self.frame.size()
    }

    fn clear(&mut self, background: Color) {
        let size = self.frame.size();
        self.frame.fill_rectangle(Point::ORIGIN, size, background);
    }

    fn fill(&mut self, shape: &Shape, brush: &Brush) {
        let path = to_path(shape);
        self.frame.fill(
            &path,
            Fill {
                style: to_style(brush),
                rule: fill::Rule::NonZero,
            },
        );
    }

    fn stroke(&mut self, shape: &Shape, style: &StrokeStyle) {
        let path = to_path(shape);
        let stroke = Stroke {
            style: to_style(&style.brush),
            width: style.width,
            line_cap: match style.cap {
                LineCap::Butt => canvas::LineCap::Butt,
                LineCap::Round => canvas::LineCap::Round,
            },
            line_join: match style.join {
                LineJoin::Miter => canvas::LineJoin::Miter,
                LineJoin::Round => canvas::LineJoin::Round,
            },
            line_dash: LineDash {
                segments: &style.dash,
                offset: 0,
            },
        };
        self.frame.stroke(&path, stroke);
    }

    fn fill_text(&mut self, text: TextSpec) {
        let font = if text.bold {
            Font {
                weight: font::Weight::Bold,
                ..Font::DEFAULT
            }
        } else {
            Font::DEFAULT
        };
        let align_x = match text.align {
            TextAlign::Left => Horizontal::Left,
            TextAlign::Center => Horizontal::Center,
            TextAlign::Right => Horizontal::Right,
        };
        self.frame.fill_text(Text {
            content: text.content,
            position: text.position,
            size: text.size.into(),
            color: text.color,
            font,
            align_x: align_x.into(),
            align_y: Vertical::Center.into(),
            ..Text::default()
        });
    }
}

fn to_path(shape: &Shape) -> Path {
    Path::new(|b| {
        for command in shape.commands() {
            match *command {
                PathCommand::MoveTo(p) => b.move_to(p),
                PathCommand::LineTo(p) => b.line_to(p),
                PathCommand::QuadraticTo { control, to } => b.quadratic_curve_to(control, to),
                PathCommand::Arc {
                    center,
                    radius,
                    start,
                    end,
                } => b.arc(path::Arc {
                    center,
                    radius,
                    start_angle: Radians(start),
                    end_angle: Radians(end),
                }),
                PathCommand::Close => b.close(),
            }
        }
    })
}

/// iced canvases only support linear gradients; radial brushes are
/// flattened to the average of their stops.
fn to_style(brush: &Brush) -> Style {
    match brush {
        Brush::Solid(color) => Style::Solid(*color),
        Brush::Linear { start, end, stops } => {
            let linear = stops
                .iter()
                .fold(gradient::Linear::new(*start, *end), |g, stop| {
                    g.add_stop(stop.offset, stop.color)
                });
            Style::Gradient(Gradient::Linear(linear))
        }
        Brush::Radial { .. } => Style::Solid(brush.mean_color()),
    }
}
