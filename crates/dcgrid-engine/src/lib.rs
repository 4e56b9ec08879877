//! Layout designer for the data center grid.
//!
//! [`Designer`] owns the placed items and turns user intents (place, move,
//! remove, rotate) into layout changes, re-running the power and water
//! traces and the effect passes after each structural change.

pub mod config;
pub mod designer;

pub use config::DesignerConfig;
pub use designer::{Designer, Outcome, RecomputeSummary};
