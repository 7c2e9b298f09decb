//! # Composite Section Properties
//!
//! A cross-section is an unordered list of non-overlapping rectangles.
//! This module derives the geometric properties the stress checks need:
//! centroid, second moment of area (parallel-axis theorem), first moment
//! of area at an arbitrary cut height, and the section width crossing a
//! given ordinate.
//!
//! ## Example
//!
//! ```rust
//! use bridge_core::geometry::{CrossSection, Rect};
//!
//! let section = CrossSection::new(vec![Rect::new(0.0, 0.0, 10.0, 10.0)]);
//! assert_eq!(section.centroid_y().unwrap(), 0.0);
//! let inertia = section.moment_of_inertia().unwrap();
//! assert!((inertia - 10.0 * 10.0_f64.powi(3) / 12.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{BridgeError, BridgeResult};
use crate::geometry::rect::{Rect, GEOM_EPS};

/// Reach of the half-plane probe used for first-moment integration (mm).
/// Far larger than any buildable section, so the probe behaves as a
/// half-plane over the section's extent.
const PROBE_REACH: f64 = 1000.0;

/// A piecewise-rectangular cross-section.
///
/// Members are assumed non-overlapping; overlap double-counts area and
/// inertia. The editors and the cleave-based classifier both produce
/// disjoint member lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossSection {
    pub members: Vec<Rect>,
}

impl CrossSection {
    pub fn new(members: Vec<Rect>) -> Self {
        CrossSection { members }
    }

    /// Build from raw vertex-list polygons, one member per polygon.
    /// Empty polygons and zero-extent bounding boxes are skipped.
    pub fn from_polygons(polygons: &[Vec<(f64, f64)>]) -> Self {
        let members = polygons
            .iter()
            .filter_map(|poly| Rect::from_vertices(poly))
            .filter(|rect| !rect.is_degenerate())
            .collect();
        CrossSection { members }
    }

    /// Total material area (mm^2)
    pub fn area(&self) -> f64 {
        self.members.iter().map(Rect::area).sum()
    }

    /// Area-weighted centroid ordinate (mm).
    ///
    /// Errors with [`BridgeError::DegenerateSection`] when the section has
    /// no usable area.
    pub fn centroid_y(&self) -> BridgeResult<f64> {
        let area = self.area();
        if area <= GEOM_EPS {
            return Err(BridgeError::degenerate_section(
                "Cross-section has zero area",
            ));
        }
        let first_moment: f64 = self.members.iter().map(|m| m.y * m.area()).sum();
        Ok(first_moment / area)
    }

    /// Second moment of area about the centroidal axis (mm^4), by the
    /// parallel-axis theorem over the member list.
    pub fn moment_of_inertia(&self) -> BridgeResult<f64> {
        let ybar = self.centroid_y()?;
        Ok(self
            .members
            .iter()
            .map(|m| m.w * m.h.powi(3) / 12.0 + m.area() * (m.y - ybar).powi(2))
            .sum())
    }

    /// First moment of area Q (mm^3) of the material on the far side of a
    /// horizontal cut at `height`, taken about the centroidal axis.
    ///
    /// The far side is away from the centroid: below the cut when the cut
    /// sits at or under the centroid, above it otherwise. Implemented by
    /// intersecting every member with an oversized probe rectangle
    /// standing in for the half-plane.
    pub fn first_moment(&self, height: f64) -> BridgeResult<f64> {
        let ybar = self.centroid_y()?;

        let left = self
            .members
            .iter()
            .map(Rect::left)
            .fold(f64::INFINITY, f64::min);
        let right = self
            .members
            .iter()
            .map(Rect::right)
            .fold(f64::NEG_INFINITY, f64::max);

        let probe_y = if height > ybar {
            height + PROBE_REACH
        } else {
            height - PROBE_REACH
        };
        let probe = Rect::new(
            (left + right) / 2.0,
            probe_y,
            (right - left) + 2.0 * PROBE_REACH,
            2.0 * PROBE_REACH,
        );

        Ok(self
            .members
            .iter()
            .map(|m| {
                let clipped = m.intersection(&probe);
                clipped.area() * (clipped.y - ybar).abs()
            })
            .sum())
    }

    /// Q at the centroidal axis, the shear-flow maximum.
    pub fn first_moment_at_centroid(&self) -> BridgeResult<f64> {
        let ybar = self.centroid_y()?;
        self.first_moment(ybar)
    }

    /// Total width of material crossing the ordinate `height` (mm).
    ///
    /// A member counts when `bottom < height <= top`, so a cut exactly at
    /// a shared seam attributes the width to the member below the seam.
    pub fn width_at(&self, height: f64) -> f64 {
        self.members
            .iter()
            .filter(|m| m.bottom() < height && height <= m.top())
            .map(|m| m.w)
            .sum()
    }

    /// Section width at the centroidal axis (mm).
    pub fn width_at_centroid(&self) -> BridgeResult<f64> {
        let ybar = self.centroid_y()?;
        Ok(self.width_at(ybar))
    }

    /// Distance from the centroid up to the section's top fibre (mm).
    pub fn centroid_to_top(&self) -> BridgeResult<f64> {
        let ybar = self.centroid_y()?;
        let top = self
            .members
            .iter()
            .map(Rect::top)
            .fold(f64::NEG_INFINITY, f64::max);
        Ok(top - ybar)
    }

    /// Distance from the centroid down to the section's bottom fibre (mm).
    pub fn centroid_to_bottom(&self) -> BridgeResult<f64> {
        let ybar = self.centroid_y()?;
        let bottom = self
            .members
            .iter()
            .map(Rect::bottom)
            .fold(f64::INFINITY, f64::min);
        Ok(ybar - bottom)
    }

    /// Flange-like members (`w > h`)
    pub fn horizontal_members(&self) -> Vec<Rect> {
        self.members
            .iter()
            .copied()
            .filter(Rect::is_horizontal)
            .collect()
    }

    /// Web-like members (`w <= h`)
    pub fn vertical_members(&self) -> Vec<Rect> {
        self.members
            .iter()
            .copied()
            .filter(|m| !m.is_horizontal())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() < tolerance
    }

    /// 100x10 flanges at y = +/-45 around a 10x80 web
    fn i_beam() -> CrossSection {
        CrossSection::new(vec![
            Rect::new(0.0, 45.0, 100.0, 10.0),
            Rect::new(0.0, 0.0, 10.0, 80.0),
            Rect::new(0.0, -45.0, 100.0, 10.0),
        ])
    }

    #[test]
    fn test_single_rectangle_textbook_values() {
        let section = CrossSection::new(vec![Rect::new(3.0, 7.0, 10.0, 12.0)]);
        assert!(approx_eq(section.centroid_y().unwrap(), 7.0, 1e-12));
        assert!(approx_eq(
            section.moment_of_inertia().unwrap(),
            10.0 * 12.0_f64.powi(3) / 12.0,
            1e-9
        ));
    }

    #[test]
    fn test_parallel_axis_two_stacked_rectangles() {
        // Two 10x10 squares centered at y = +/-10 (20 mm gap)
        let section = CrossSection::new(vec![
            Rect::new(0.0, 10.0, 10.0, 10.0),
            Rect::new(0.0, -10.0, 10.0, 10.0),
        ]);
        assert!(approx_eq(section.centroid_y().unwrap(), 0.0, 1e-12));
        let expected = 2.0 * (10.0 * 10.0_f64.powi(3) / 12.0 + 100.0 * 100.0);
        assert!(approx_eq(section.moment_of_inertia().unwrap(), expected, 1e-9));
    }

    #[test]
    fn test_i_beam_properties() {
        let section = i_beam();
        assert!(approx_eq(section.centroid_y().unwrap(), 0.0, 1e-12));

        let expected_i = 2.0 * (100.0 * 10.0_f64.powi(3) / 12.0 + 1000.0 * 45.0_f64.powi(2))
            + 10.0 * 80.0_f64.powi(3) / 12.0;
        assert!(approx_eq(section.moment_of_inertia().unwrap(), expected_i, 1e-6));

        // Q at the centroid: one flange plus half the web
        let expected_q = 1000.0 * 45.0 + 10.0 * 40.0 * 20.0;
        assert!(approx_eq(
            section.first_moment_at_centroid().unwrap(),
            expected_q,
            1e-6
        ));

        assert!(approx_eq(section.centroid_to_top().unwrap(), 50.0, 1e-12));
        assert!(approx_eq(section.centroid_to_bottom().unwrap(), 50.0, 1e-12));
    }

    #[test]
    fn test_first_moment_at_glue_seam() {
        // Cut at the web/flange seam: only the flange lies beyond it
        let section = i_beam();
        let q = section.first_moment(40.0).unwrap();
        assert!(approx_eq(q, 1000.0 * 45.0, 1e-6));
    }

    #[test]
    fn test_width_at_half_open_boundary() {
        let section = i_beam();
        assert_eq!(section.width_at(0.0), 10.0);
        // In the flange band the web has already ended
        assert_eq!(section.width_at(45.0), 100.0);
        // Exactly at the seam the width belongs to the member below
        assert_eq!(section.width_at(40.0), 10.0);
        assert_eq!(section.width_at(200.0), 0.0);
    }

    #[test]
    fn test_zero_area_section_errors() {
        let empty = CrossSection::new(vec![]);
        let error = empty.centroid_y().unwrap_err();
        assert_eq!(error.error_code(), "DEGENERATE_SECTION");
        assert!(empty.moment_of_inertia().is_err());
    }

    #[test]
    fn test_from_polygons_skips_degenerate() {
        let section = CrossSection::from_polygons(&[
            vec![(0.0, 0.0), (10.0, 0.0), (10.0, 4.0), (0.0, 4.0)],
            vec![(5.0, 5.0)],
            vec![],
        ]);
        assert_eq!(section.members.len(), 1);
        assert!(approx_eq(section.area(), 40.0, 1e-12));
    }

    #[test]
    fn test_member_partition() {
        let section = i_beam();
        assert_eq!(section.horizontal_members().len(), 2);
        assert_eq!(section.vertical_members().len(), 1);
    }
}
