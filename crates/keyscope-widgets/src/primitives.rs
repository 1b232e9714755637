//! Shapes and helpers shared by the visualizations

use iced::{Color, Point, Rectangle};

use crate::surface::{Brush, Shape, StrokeStyle, Surface, TextSpec};
use crate::theme;

pub const PLACEHOLDER_TEXT_SIZE: f32 = 14.0;

/// Top-to-bottom gradient across `area`
pub fn vertical_gradient(area: Rectangle, top: Color, bottom: Color) -> Brush {
    Brush::linear(
        Point::new(area.x, area.y),
        Point::new(area.x, area.y + area.height),
        &[(0.0, top), (1.0, bottom)],
    )
}

/// Left-to-right gradient across `area` through evenly spaced colors
pub fn horizontal_gradient(area: Rectangle, colors: &[Color]) -> Brush {
    let last = colors.len().saturating_sub(1).max(1) as f32;
    let stops: Vec<(f32, Color)> = colors
        .iter()
        .enumerate()
        .map(|(i, c)| (i as f32 / last, *c))
        .collect();
    Brush::linear(
        Point::new(area.x, area.y),
        Point::new(area.x + area.width, area.y),
        &stops,
    )
}

pub fn radial_gradient(center: Point, radius: f32, inner: Color, outer: Color) -> Brush {
    Brush::radial(center, radius, &[(0.0, inner), (1.0, outer)])
}

/// Rectangle with corners rounded by quadratic curves
///
/// The radius is capped at half the shorter side.
pub fn rounded_rect(rect: Rectangle, radius: f32) -> Shape {
    let r = radius.max(0.0).min(rect.width / 2.0).min(rect.height / 2.0);
    let (x, y, w, h) = (rect.x, rect.y, rect.width, rect.height);

    Shape::new(|b| {
        b.move_to(Point::new(x + r, y));
        b.line_to(Point::new(x + w - r, y));
        b.quadratic_curve_to(Point::new(x + w, y), Point::new(x + w, y + r));
        b.line_to(Point::new(x + w, y + h - r));
        b.quadratic_curve_to(Point::new(x + w, y + h), Point::new(x + w - r, y + h));
        b.line_to(Point::new(x + r, y + h));
        b.quadratic_curve_to(Point::new(x, y + h), Point::new(x, y + h - r));
        b.line_to(Point::new(x, y + r));
        b.quadratic_curve_to(Point::new(x, y), Point::new(x + r, y));
        b.close();
    })
}

/// Dashed grid over `area`: `rows` horizontal and `columns` vertical
/// divisions, with lines on both edges.
pub fn dashed_grid<S: Surface>(surface: &mut S, area: Rectangle, rows: usize, columns: usize) {
    let style = StrokeStyle::solid(theme::BORDER_LIGHT, 1.0).with_dash(&[2.0, 2.0]);

    for i in 0..=rows {
        let y = area.y + area.height * i as f32 / rows.max(1) as f32;
        surface.stroke(
            &Shape::line(Point::new(area.x, y), Point::new(area.x + area.width, y)),
            &style,
        );
    }
    for i in 0..=columns {
        let x = area.x + area.width * i as f32 / columns.max(1) as f32;
        surface.stroke(
            &Shape::line(Point::new(x, area.y), Point::new(x, area.y + area.height)),
            &style,
        );
    }
}

/// Clear the surface and show a centered hint
pub fn draw_placeholder<S: Surface>(surface: &mut S, message: &str) {
    let size = surface.size();
    surface.clear(theme::BACKGROUND);
    surface.fill_text(TextSpec::new(
        message,
        Point::new(size.width / 2.0, size.height / 2.0),
        PLACEHOLDER_TEXT_SIZE,
        theme::TEXT_SECONDARY,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    #[test]
    fn test_rounded_rect_radius_capped() {
        let shape = rounded_rect(Rectangle::new(Point::ORIGIN, iced::Size::new(10.0, 4.0)), 8.0);
        // Starts after the (capped) top-left corner
        assert_eq!(shape.points()[0], Point::new(2.0, 0.0));
    }

    #[test]
    fn test_horizontal_gradient_spreads_stops() {
        let area = Rectangle::new(Point::ORIGIN, iced::Size::new(200.0, 10.0));
        match horizontal_gradient(area, &[Color::BLACK, Color::WHITE, Color::BLACK]) {
            Brush::Linear { start, end, stops } => {
                assert_eq!(start, Point::ORIGIN);
                assert_eq!(end, Point::new(200.0, 0.0));
                let offsets: Vec<f32> = stops.iter().map(|s| s.offset).collect();
                assert_eq!(offsets, vec![0.0, 0.5, 1.0]);
            }
            other => panic!("expected linear, got {other:?}"),
        }
    }

    #[test]
    fn test_grid_line_counts() {
        let mut surface = RecordingSurface::new(100.0, 100.0);
        dashed_grid(&mut surface, Rectangle::new(Point::ORIGIN, iced::Size::new(100.0, 100.0)), 4, 8);
        let strokes = surface.strokes();
        assert_eq!(strokes.len(), 5 + 9);
        assert!(strokes.iter().all(|(_, style)| style.dash == vec![2.0, 2.0]));
    }

    #[test]
    fn test_placeholder_is_centered() {
        let mut surface = RecordingSurface::new(300.0, 200.0);
        draw_placeholder(&mut surface, "Nothing yet");
        let text = surface.find_text("Nothing yet").unwrap();
        assert_eq!(text.position, Point::new(150.0, 100.0));
        assert_eq!(text.size, PLACEHOLDER_TEXT_SIZE);
        assert_eq!(text.color, theme::TEXT_SECONDARY);
    }
}
