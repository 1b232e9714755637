//! Melodic pattern drawn as a smoothed contour over a dashed grid

use iced::{Color, Point, Rectangle, Size};

use super::{Render, Result, VisualizationError, STRIP_SIZE_POLICY};
use crate::primitives::{dashed_grid, draw_placeholder, horizontal_gradient, vertical_gradient};
use crate::surface::{Brush, Shape, StrokeStyle, Surface};
use crate::theme;

pub const MELODY_PLACEHOLDER: &str = "Melodic pattern visualization will appear here";

const PADDING: f32 = 30.0;
const GRID_ROWS: usize = 4;
const GRID_COLUMNS: usize = 8;
const LINE_WIDTH: f32 = 3.0;
const POINT_RADIUS: f32 = 4.0;

/// Point positions for a pattern on a surface
#[derive(Debug, Clone, PartialEq)]
pub struct MelodyLayout {
    /// Inner drawing area (surface minus padding)
    pub area: Rectangle,
    /// y of the area's bottom edge
    pub baseline: f32,
    pub points: Vec<Point>,
}

impl MelodyLayout {
    /// Place each value within the middle 80% of the inner height
    ///
    /// A flat pattern has no range to normalize against and sits mid-band.
    pub fn compute(size: Size, pattern: &[f64]) -> Result<Self> {
        if let Some((index, &value)) = pattern.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(VisualizationError::NonFiniteValue { index, value });
        }

        let width = (size.width - 2.0 * PADDING).max(0.0);
        let height = (size.height - 2.0 * PADDING).max(0.0);
        let area = Rectangle::new(Point::new(PADDING, PADDING), Size::new(width, height));
        let baseline = PADDING + height;

        // Halved so `max - min` stays finite for values near f64::MAX
        let min = pattern.iter().copied().fold(f64::INFINITY, f64::min) / 2.0;
        let max = pattern.iter().copied().fold(f64::NEG_INFINITY, f64::max) / 2.0;
        let range = max - min;
        let h = f64::from(height);

        let step = if pattern.len() > 1 {
            width / (pattern.len() - 1) as f32
        } else {
            0.0
        };

        let points = pattern
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                let offset = if range > 0.0 {
                    (value / 2.0 - min) / range * h * 0.8 + h * 0.1
                } else {
                    h * 0.1 + h * 0.4
                };
                Point::new(PADDING + i as f32 * step, baseline - offset as f32)
            })
            .collect();

        Ok(Self {
            area,
            baseline,
            points,
        })
    }

    /// Contour through the points: a straight first segment, then
    /// quadratic curves bending from each previous point
    pub fn contour(&self) -> Shape {
        Shape::new(|b| self.trace(b))
    }

    /// The contour closed down to the baseline
    pub fn area_shape(&self) -> Shape {
        Shape::new(|b| {
            self.trace(b);
            if let (Some(first), Some(last)) = (self.points.first(), self.points.last()) {
                b.line_to(Point::new(last.x, self.baseline));
                b.line_to(Point::new(first.x, self.baseline));
                b.close();
            }
        })
    }

    fn trace(&self, b: &mut crate::surface::ShapeBuilder) {
        for (i, &point) in self.points.iter().enumerate() {
            match i {
                0 => b.move_to(point),
                1 => b.line_to(point),
                _ => {
                    let prev = self.points[i - 1];
                    b.quadratic_curve_to(Point::new((prev.x + point.x) / 2.0, prev.y), point);
                }
            }
        }
    }
}

/// Clear the surface and draw the contour
///
/// Malformed data is rejected before anything is drawn.
pub fn draw_melodic_pattern<S: Surface>(surface: &mut S, pattern: &[f64]) -> Result<()> {
    if pattern.is_empty() {
        draw_placeholder(surface, MELODY_PLACEHOLDER);
        return Ok(());
    }

    let layout = MelodyLayout::compute(surface.size(), pattern)?;
    surface.clear(theme::BACKGROUND);
    dashed_grid(surface, layout.area, GRID_ROWS, GRID_COLUMNS);

    let line_brush = horizontal_gradient(
        layout.area,
        &[
            theme::PRIMARY,
            theme::ACCENT,
            theme::PRIMARY,
        ],
    );
    surface.stroke(
        &layout.contour(),
        &StrokeStyle::solid(theme::PRIMARY, LINE_WIDTH)
            .with_brush(line_brush)
            .rounded(),
    );

    surface.fill(
        &layout.area_shape(),
        &vertical_gradient(layout.area, theme::primary_alpha(0.2), theme::primary_alpha(0.05)),
    );

    for &point in &layout.points {
        let dot = Shape::circle(point, POINT_RADIUS);
        surface.fill(&dot, &Brush::Solid(theme::PRIMARY));
        surface.stroke(&dot, &StrokeStyle::solid(Color::WHITE, 2.0));
    }

    Ok(())
}

/// Melody contour state
#[derive(Debug, Clone)]
pub struct MelodyVisualization {
    size: Size,
    pattern: Vec<f64>,
    retain_on_resize: bool,
}

impl MelodyVisualization {
    pub fn new(container_width: f32) -> Self {
        Self {
            size: STRIP_SIZE_POLICY.size_for(container_width),
            pattern: Vec::new(),
            retain_on_resize: true,
        }
    }

    pub fn with_retention(mut self, retain_on_resize: bool) -> Self {
        self.retain_on_resize = retain_on_resize;
        self
    }

    /// Accept a new pattern
    ///
    /// A malformed pattern is logged and rejected; the previous pattern
    /// stays on screen.
    pub fn draw_melodic_pattern(&mut self, pattern: &[f64]) -> Result<()> {
        if let Err(err) = MelodyLayout::compute(self.size, pattern) {
            log::warn!("Melodic pattern rejected: {}", err);
            return Err(err);
        }
        self.pattern = pattern.to_vec();
        log::debug!("Melody visualization updated with {} values", self.pattern.len());
        Ok(())
    }

    pub fn resize(&mut self, container_width: f32) {
        self.size = STRIP_SIZE_POLICY.size_for(container_width);
        if !self.retain_on_resize {
            self.pattern.clear();
        }
    }

    pub fn is_rendered(&self) -> bool {
        !self.pattern.is_empty()
    }
}

impl Render for MelodyVisualization {
    fn size(&self) -> Size {
        self.size
    }

    fn render<S: Surface>(&self, surface: &mut S) {
        // The pattern was validated on the way in
        if let Err(err) = draw_melodic_pattern(surface, &self.pattern) {
            log::warn!("Melody render failed: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{PathCommand, RecordingSurface};

    fn dots(surface: &RecordingSurface) -> Vec<Point> {
        surface
            .fills()
            .into_iter()
            .filter(|(_, brush)| **brush == Brush::Solid(theme::PRIMARY))
            .map(|(shape, _)| shape.points()[0])
            .collect()
    }

    #[test]
    fn test_constant_pattern_sits_mid_band() {
        let size = Size::new(800.0, 240.0);
        let layout = MelodyLayout::compute(size, &[3.0, 3.0, 3.0, 3.0]).unwrap();
        let h = 240.0 - 60.0;
        let expected_y = 240.0 - 30.0 - h * 0.5;

        assert_eq!(layout.points.len(), 4);
        for point in &layout.points {
            assert!(point.y.is_finite());
            assert!((point.y - expected_y).abs() < 1e-3);
        }
    }

    #[test]
    fn test_values_span_middle_eighty_percent() {
        let layout = MelodyLayout::compute(Size::new(460.0, 260.0), &[0.0, 10.0, 5.0]).unwrap();
        // h = 200, baseline = 230
        assert!((layout.points[0].y - (230.0 - 20.0)).abs() < 1e-3);
        assert!((layout.points[1].y - (230.0 - 180.0)).abs() < 1e-3);
        assert!((layout.points[2].y - (230.0 - 100.0)).abs() < 1e-3);

        assert_eq!(layout.points[0].x, 30.0);
        assert_eq!(layout.points[1].x, 230.0);
        assert_eq!(layout.points[2].x, 430.0);
    }

    #[test]
    fn test_extreme_range_stays_finite() {
        let layout =
            MelodyLayout::compute(Size::new(460.0, 260.0), &[-1e308, 1e308, 0.0]).unwrap();
        assert!(layout.points.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        // h = 200, baseline = 230
        assert!((layout.points[0].y - (230.0 - 20.0)).abs() < 1e-3);
        assert!((layout.points[1].y - (230.0 - 180.0)).abs() < 1e-3);
        assert!((layout.points[2].y - (230.0 - 100.0)).abs() < 1e-3);

        let mut surface = RecordingSurface::new(460.0, 260.0);
        draw_melodic_pattern(&mut surface, &[f64::MAX, -f64::MAX]).unwrap();
        assert!(dots(&surface).iter().all(|p| p.y.is_finite()));
    }

    #[test]
    fn test_line_gradient_passes_through_accent() {
        let mut surface = RecordingSurface::new(460.0, 260.0);
        draw_melodic_pattern(&mut surface, &[0.0, 2.0, 1.0]).unwrap();

        let (_, style) = surface.strokes()[14];
        match &style.brush {
            Brush::Linear { stops, .. } => {
                let colors: Vec<Color> = stops.iter().map(|s| s.color).collect();
                assert_eq!(colors, vec![theme::PRIMARY, theme::ACCENT, theme::PRIMARY]);
            }
            other => panic!("expected gradient, got {other:?}"),
        }
    }

    #[test]
    fn test_single_sample_at_left_edge() {
        let layout = MelodyLayout::compute(Size::new(400.0, 150.0), &[7.0]).unwrap();
        assert_eq!(layout.points.len(), 1);
        assert_eq!(layout.points[0].x, 30.0);
    }

    #[test]
    fn test_contour_shape() {
        let layout = MelodyLayout::compute(Size::new(460.0, 260.0), &[0.0, 4.0, 2.0, 8.0]).unwrap();
        let commands = layout.contour();
        let commands = commands.commands();

        assert!(matches!(commands[0], PathCommand::MoveTo(_)));
        assert!(matches!(commands[1], PathCommand::LineTo(_)));
        match commands[2] {
            PathCommand::QuadraticTo { control, to } => {
                let prev = layout.points[1];
                assert_eq!(control, Point::new((prev.x + to.x) / 2.0, prev.y));
                assert_eq!(to, layout.points[2]);
            }
            other => panic!("expected curve, got {other:?}"),
        }
        assert_eq!(commands.len(), 4);

        let area = layout.area_shape();
        assert_eq!(area.commands().last(), Some(&PathCommand::Close));
        assert_eq!(area.points()[5], Point::new(layout.points[0].x, layout.baseline));
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let err = MelodyLayout::compute(Size::new(400.0, 150.0), &[1.0, f64::NAN]).unwrap_err();
        assert!(matches!(err, VisualizationError::NonFiniteValue { index: 1, .. }));

        let mut surface = RecordingSurface::new(400.0, 150.0);
        assert!(draw_melodic_pattern(&mut surface, &[f64::INFINITY]).is_err());
        assert!(surface.ops().is_empty());
    }

    #[test]
    fn test_rejected_pattern_keeps_last_good_frame() {
        let mut viz = MelodyVisualization::new(800.0);
        viz.draw_melodic_pattern(&[1.0, 2.0, 3.0]).unwrap();
        assert!(viz.draw_melodic_pattern(&[1.0, f64::NAN]).is_err());

        let mut surface = RecordingSurface::new(800.0, 240.0);
        viz.render(&mut surface);
        assert_eq!(dots(&surface).len(), 3);
    }

    #[test]
    fn test_empty_pattern_draws_placeholder() {
        let mut surface = RecordingSurface::new(400.0, 150.0);
        draw_melodic_pattern(&mut surface, &[]).unwrap();
        assert!(surface.find_text(MELODY_PLACEHOLDER).is_some());
        assert!(surface.strokes().is_empty());
    }

    #[test]
    fn test_draw_order() {
        let mut surface = RecordingSurface::new(460.0, 260.0);
        draw_melodic_pattern(&mut surface, &[0.0, 2.0, 4.0, 2.0, 0.0]).unwrap();

        // grid (5 + 9), contour, then one outline per point
        let strokes = surface.strokes();
        assert_eq!(strokes.len(), 14 + 1 + 5);
        let (_, contour_style) = strokes[14];
        assert_eq!(contour_style.width, LINE_WIDTH);
        assert!(matches!(contour_style.brush, Brush::Linear { .. }));

        assert_eq!(dots(&surface).len(), 5);
    }
}
