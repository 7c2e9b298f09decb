//! Shared canvas components used across panels.

pub mod diagrams;
pub mod section_view;

pub use diagrams::{EnvelopeDiagram, FosProfileDiagram};
pub use section_view::SectionView;
