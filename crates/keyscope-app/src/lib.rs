//! Keyscope desktop client
//!
//! Upload an audio file, wait for the analysis service, then explore the
//! detected key, chords and melody.

pub mod controller;
pub mod ui;
