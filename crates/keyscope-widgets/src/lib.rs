//! Keyscope Widgets - canvas visualizations for audio analysis results
//!
//! - [`visualization`]: circle of fifths, chord strip, melodic contour and
//!   confidence meters, each as a state object with placeholder/rendered
//!   states
//! - [`surface`]: the drawing abstraction they paint through
//! - [`view`]: iced elements wrapping the visualizations in canvases

pub mod canvas;
pub mod primitives;
pub mod surface;
pub mod theme;
pub mod view;
pub mod visualization;

pub use canvas::VisualizationCanvas;
pub use surface::{RecordingSurface, Surface};
pub use visualization::{
    ChordVisualization, ConfidencePanel, KeyVisualization, MelodyVisualization, Render,
    VisualizationError,
};
