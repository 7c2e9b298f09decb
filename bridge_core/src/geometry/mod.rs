//! # Cross-Section Geometry
//!
//! Axis-aligned rectangle arithmetic and composite section properties.
//!
//! - [`rect`]: the `Rect` value type with intersection, inverse
//!   intersection (cut), and recursive cleaving
//! - [`section`]: `CrossSection` built from a list of non-overlapping
//!   rectangles, with centroid, inertia, and first-moment calculations

pub mod rect;
pub mod section;

pub use rect::Rect;
pub use section::CrossSection;
