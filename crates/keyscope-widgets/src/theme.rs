//! Shared palette for keyscope visualizations
//!
//! All canvases draw on the dark application theme. The primary blue is the
//! analysis accent (#4A90E2); translucent variants of it tint the key circle
//! and the melody area fill.

use iced::Color;

/// Canvas background
pub const BACKGROUND: Color = Color::from_rgb(0.10, 0.10, 0.12);
/// Filled elements that are not highlighted (inactive key nodes)
pub const SURFACE: Color = Color::from_rgb(0.16, 0.16, 0.19);
/// Outlines and the chord baseline
pub const BORDER: Color = Color::from_rgb(0.30, 0.30, 0.35);
/// Dashed grid lines
pub const BORDER_LIGHT: Color = Color::from_rgb(0.22, 0.22, 0.26);

pub const TEXT_PRIMARY: Color = Color::from_rgb(0.88, 0.88, 0.90);
pub const TEXT_SECONDARY: Color = Color::from_rgb(0.60, 0.60, 0.65);
/// Text drawn on top of primary fills
pub const TEXT_ON_PRIMARY: Color = Color::WHITE;

/// Analysis accent (#4A90E2)
pub const PRIMARY: Color = Color::from_rgb(0.29, 0.565, 0.886);
pub const PRIMARY_LIGHT: Color = Color::from_rgb(0.45, 0.68, 0.93);
pub const PRIMARY_DARK: Color = Color::from_rgb(0.20, 0.42, 0.70);
/// Secondary highlight (middle of the melody line gradient)
pub const ACCENT: Color = Color::from_rgb(0.95, 0.55, 0.25);

/// Primary accent at the given opacity
pub const fn primary_alpha(alpha: f32) -> Color {
    Color::from_rgba(0.29, 0.565, 0.886, alpha)
}

/// Toast colors (Success, Error, Warning, Info)
pub const TOAST_COLORS: [Color; 4] = [
    Color::from_rgb(0.20, 0.60, 0.35), // Success - green
    Color::from_rgb(0.75, 0.22, 0.22), // Error - red
    Color::from_rgb(0.85, 0.60, 0.15), // Warning - amber
    Color::from_rgb(0.25, 0.45, 0.70), // Info - blue
];
