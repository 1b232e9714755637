//! Drawing surface abstraction
//!
//! Visualizations draw through the [`Surface`] trait instead of an iced
//! `Frame` directly. [`FrameSurface`] forwards to a canvas frame at render
//! time; [`RecordingSurface`] keeps the draw calls so layouts can be checked
//! without a renderer.

mod frame;
mod recording;

pub use frame::FrameSurface;
pub use recording::{DrawOp, RecordingSurface};

use iced::{Color, Point, Size};

/// Something visualizations can draw on
pub trait Surface {
    /// Drawable area in logical pixels
    fn size(&self) -> Size;

    /// Wipe the whole area with a solid color
    fn clear(&mut self, background: Color);

    fn fill(&mut self, shape: &Shape, brush: &Brush);

    fn stroke(&mut self, shape: &Shape, style: &StrokeStyle);

    fn fill_text(&mut self, text: TextSpec);
}

/// One path segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    QuadraticTo { control: Point, to: Point },
    /// Clockwise arc, angles in radians
    Arc {
        center: Point,
        radius: f32,
        start: f32,
        end: f32,
    },
    Close,
}

/// A renderer-independent path
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Shape {
    commands: Vec<PathCommand>,
}

impl Shape {
    /// Build a shape with a closure, the same way `canvas::Path::new` works
    pub fn new(f: impl FnOnce(&mut ShapeBuilder)) -> Self {
        let mut builder = ShapeBuilder::default();
        f(&mut builder);
        builder.build()
    }

    pub fn circle(center: Point, radius: f32) -> Self {
        Self::new(|b| {
            b.arc(center, radius, 0.0, std::f32::consts::TAU);
            b.close();
        })
    }

    pub fn line(from: Point, to: Point) -> Self {
        Self::new(|b| {
            b.move_to(from);
            b.line_to(to);
        })
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Segment end points in drawing order (arcs contribute their center)
    pub fn points(&self) -> Vec<Point> {
        self.commands
            .iter()
            .filter_map(|cmd| match *cmd {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => Some(p),
                PathCommand::QuadraticTo { to, .. } => Some(to),
                PathCommand::Arc { center, .. } => Some(center),
                PathCommand::Close => None,
            })
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct ShapeBuilder {
    commands: Vec<PathCommand>,
}

impl ShapeBuilder {
    pub fn move_to(&mut self, point: Point) {
        self.commands.push(PathCommand::MoveTo(point));
    }

    pub fn line_to(&mut self, point: Point) {
        self.commands.push(PathCommand::LineTo(point));
    }

    pub fn quadratic_curve_to(&mut self, control: Point, to: Point) {
        self.commands.push(PathCommand::QuadraticTo { control, to });
    }

    pub fn arc(&mut self, center: Point, radius: f32, start: f32, end: f32) {
        self.commands.push(PathCommand::Arc {
            center,
            radius,
            start,
            end,
        });
    }

    pub fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }

    pub fn build(self) -> Shape {
        Shape {
            commands: self.commands,
        }
    }
}

/// Color stop within a gradient, `offset` in 0..=1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Color,
}

/// How a shape or stroke is painted
#[derive(Debug, Clone, PartialEq)]
pub enum Brush {
    Solid(Color),
    Linear {
        start: Point,
        end: Point,
        stops: Vec<GradientStop>,
    },
    /// Radial gradient from `center` (offset 0) to `radius` (offset 1)
    Radial {
        center: Point,
        radius: f32,
        stops: Vec<GradientStop>,
    },
}

impl Brush {
    pub fn linear(start: Point, end: Point, stops: &[(f32, Color)]) -> Self {
        Brush::Linear {
            start,
            end,
            stops: to_stops(stops),
        }
    }

    pub fn radial(center: Point, radius: f32, stops: &[(f32, Color)]) -> Self {
        Brush::Radial {
            center,
            radius,
            stops: to_stops(stops),
        }
    }

    /// Representative flat color (average of the stops for gradients)
    pub fn mean_color(&self) -> Color {
        let stops = match self {
            Brush::Solid(color) => return *color,
            Brush::Linear { stops, .. } | Brush::Radial { stops, .. } => stops,
        };
        if stops.is_empty() {
            return Color::TRANSPARENT;
        }
        let n = stops.len() as f32;
        let (r, g, b, a) = stops.iter().fold((0.0, 0.0, 0.0, 0.0), |acc, s| {
            (acc.0 + s.color.r, acc.1 + s.color.g, acc.2 + s.color.b, acc.3 + s.color.a)
        });
        Color::from_rgba(r / n, g / n, b / n, a / n)
    }
}

impl From<Color> for Brush {
    fn from(color: Color) -> Self {
        Brush::Solid(color)
    }
}

fn to_stops(stops: &[(f32, Color)]) -> Vec<GradientStop> {
    stops
        .iter()
        .map(|&(offset, color)| GradientStop {
            offset: offset.clamp(0.0, 1.0),
            color,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    pub brush: Brush,
    pub width: f32,
    pub cap: LineCap,
    pub join: LineJoin,
    /// Alternating dash/gap lengths; empty means solid
    pub dash: Vec<f32>,
}

impl StrokeStyle {
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            brush: Brush::Solid(color),
            width,
            cap: LineCap::default(),
            join: LineJoin::default(),
            dash: Vec::new(),
        }
    }

    pub fn with_brush(mut self, brush: Brush) -> Self {
        self.brush = brush;
        self
    }

    pub fn with_dash(mut self, dash: &[f32]) -> Self {
        self.dash = dash.to_vec();
        self
    }

    pub fn rounded(mut self) -> Self {
        self.cap = LineCap::Round;
        self.join = LineJoin::Round;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// A line of text, vertically centered on `position`
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpec {
    pub content: String,
    pub position: Point,
    pub size: f32,
    pub color: Color,
    pub bold: bool,
    pub align: TextAlign,
}

impl TextSpec {
    pub fn new(content: impl Into<String>, position: Point, size: f32, color: Color) -> Self {
        Self {
            content: content.into(),
            position,
            size,
            color,
            bold: false,
            align: TextAlign::Center,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn aligned(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }
}
