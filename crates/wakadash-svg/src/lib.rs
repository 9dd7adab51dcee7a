//! SVG rendering for wakadash
//!
//! This crate turns bucket sets into bars and lays them out as a
//! self-contained SVG document built from a small node tree.

pub mod dashboard;
pub mod node;
pub mod scale;

pub use dashboard::{Dashboard, Section, footer_timestamp};
pub use node::{Element, Node};
pub use scale::{Bar, LabelFormat, ScaleKind, ScalePolicy, build_bars};
