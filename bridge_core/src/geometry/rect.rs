//! # Rectangle Arithmetic
//!
//! Center-based axis-aligned rectangles and the set operations the
//! buckling classifier is built on: intersection, inverse intersection
//! ("cut"), and recursive cleaving of one rectangle by a list of cutters.
//!
//! All dimensions are millimetres. A `Rect` is `{x, y, w, h}` where
//! `(x, y)` is the center; `w >= 0` and `h >= 0` always hold for rects
//! produced by this module.
//!
//! ## Example
//!
//! ```rust
//! use bridge_core::geometry::Rect;
//!
//! let a = Rect::new(0.0, 0.0, 10.0, 10.0);
//! let b = Rect::new(5.0, 0.0, 10.0, 10.0);
//!
//! // Right half of `a` is covered by `b`; the left half survives.
//! let pieces = a.cleave(&[b]);
//! assert_eq!(pieces.len(), 1);
//! assert!(pieces[0].approx_eq(&Rect::new(-2.5, 0.0, 5.0, 10.0)));
//! ```

use serde::{Deserialize, Serialize};

/// Tolerance for degenerate-extent and touching-edge decisions.
///
/// Edge-to-edge contact does not count as intersection, so cleaved
/// fragments never re-cut against the cutter that produced them.
pub const GEOM_EPS: f64 = 1e-9;

/// A center-based axis-aligned rectangle (mm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Center x ordinate
    pub x: f64,
    /// Center y ordinate
    pub y: f64,
    /// Width
    pub w: f64,
    /// Height
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Rect { x, y, w, h }
    }

    /// Bounding box of a vertex list. Input polygons are rectangular in
    /// practice; anything else collapses to its axis-aligned bounds.
    ///
    /// Returns `None` for an empty vertex list.
    pub fn from_vertices(vertices: &[(f64, f64)]) -> Option<Self> {
        let (first, rest) = vertices.split_first()?;
        let mut min_x = first.0;
        let mut max_x = first.0;
        let mut min_y = first.1;
        let mut max_y = first.1;
        for &(x, y) in rest {
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
        Some(Rect {
            x: (min_x + max_x) / 2.0,
            y: (min_y + max_y) / 2.0,
            w: max_x - min_x,
            h: max_y - min_y,
        })
    }

    /// Corner vertices, counter-clockwise from bottom-left.
    pub fn vertices(&self) -> [(f64, f64); 4] {
        [
            (self.left(), self.bottom()),
            (self.right(), self.bottom()),
            (self.right(), self.top()),
            (self.left(), self.top()),
        ]
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    pub fn left(&self) -> f64 {
        self.x - self.w / 2.0
    }

    pub fn right(&self) -> f64 {
        self.x + self.w / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.y - self.h / 2.0
    }

    pub fn top(&self) -> f64 {
        self.y + self.h / 2.0
    }

    /// True when the rectangle has no usable extent on either axis.
    pub fn is_degenerate(&self) -> bool {
        self.w <= GEOM_EPS || self.h <= GEOM_EPS
    }

    /// Flange-like member: wider than it is tall.
    pub fn is_horizontal(&self) -> bool {
        self.w > self.h
    }

    /// Approximate equality on all four fields, for float-safe tests and
    /// fragment identity checks.
    pub fn approx_eq(&self, other: &Rect) -> bool {
        (self.x - other.x).abs() < 1e-6
            && (self.y - other.y).abs() < 1e-6
            && (self.w - other.w).abs() < 1e-6
            && (self.h - other.h).abs() < 1e-6
    }

    /// Strict overlap test. Touching edges do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        (self.x - other.x).abs() < (self.w + other.w) / 2.0 - GEOM_EPS
            && (self.y - other.y).abs() < (self.h + other.h) / 2.0 - GEOM_EPS
    }

    /// Overlap rectangle, or a zero-area rectangle at the origin when the
    /// two are disjoint. Interval intersection on each axis independently.
    pub fn intersection(&self, other: &Rect) -> Rect {
        if !self.intersects(other) {
            return Rect::new(0.0, 0.0, 0.0, 0.0);
        }

        let ix1 = self.left().max(other.left());
        let ix2 = self.right().min(other.right());
        let iy1 = self.bottom().max(other.bottom());
        let iy2 = self.top().min(other.top());

        Rect {
            x: (ix1 + ix2) / 2.0,
            y: (iy1 + iy2) / 2.0,
            w: ix2 - ix1,
            h: iy2 - iy1,
        }
    }

    /// Inverse intersection: up to four rectangles covering
    /// `self minus (self ∩ cutter)`.
    ///
    /// Decomposition is fixed: full-width top and bottom strips, then left
    /// and right strips clipped to the overlap's vertical span. Correct for
    /// the axis-aligned cuts the classifier performs, not a general
    /// polygon-clipping routine.
    pub fn subtract(&self, cutter: &Rect) -> Vec<Rect> {
        if !self.intersects(cutter) {
            return vec![*self];
        }

        let inter = self.intersection(cutter);
        let mut pieces = Vec::with_capacity(4);

        if inter.top() < self.top() - GEOM_EPS {
            pieces.push(Rect {
                x: self.x,
                y: (inter.top() + self.top()) / 2.0,
                w: self.w,
                h: self.top() - inter.top(),
            });
        }

        if inter.bottom() > self.bottom() + GEOM_EPS {
            pieces.push(Rect {
                x: self.x,
                y: (self.bottom() + inter.bottom()) / 2.0,
                w: self.w,
                h: inter.bottom() - self.bottom(),
            });
        }

        let side_bottom = self.bottom().max(inter.bottom());
        let side_top = self.top().min(inter.top());
        let side_h = side_top - side_bottom;

        if inter.left() > self.left() + GEOM_EPS && side_h > GEOM_EPS {
            pieces.push(Rect {
                x: (self.left() + inter.left()) / 2.0,
                y: (side_bottom + side_top) / 2.0,
                w: inter.left() - self.left(),
                h: side_h,
            });
        }

        if inter.right() < self.right() - GEOM_EPS && side_h > GEOM_EPS {
            pieces.push(Rect {
                x: (inter.right() + self.right()) / 2.0,
                y: (side_bottom + side_top) / 2.0,
                w: self.right() - inter.right(),
                h: side_h,
            });
        }

        pieces
    }

    /// Recursively partition this rectangle against a list of cutters.
    ///
    /// Pieces are scanned in list order; when a piece intersects a cutter
    /// it is replaced in place by its cut fragments and the scan restarts
    /// from the beginning. Terminates when no piece intersects any cutter,
    /// so the result is exactly the material of `self` outside every
    /// cutter. A cutter that fully covers a piece removes it.
    pub fn cleave(&self, cutters: &[Rect]) -> Vec<Rect> {
        let mut pieces = vec![*self];
        let mut index = 0;

        while index < pieces.len() {
            let mut restart = false;
            for cutter in cutters {
                if !pieces[index].intersects(cutter) {
                    continue;
                }
                let cut = pieces[index].subtract(cutter);
                // An intersecting cutter always removes material, but
                // guard against a no-op replacement looping forever.
                if cut.len() == 1 && cut[0].approx_eq(&pieces[index]) {
                    continue;
                }
                pieces.splice(index..index + 1, cut);
                restart = true;
                break;
            }
            if restart {
                index = 0;
            } else {
                index += 1;
            }
        }

        pieces
    }

    /// Same rectangle stretched vertically, used to turn a web into a
    /// full-height cutting plane.
    pub fn heightened(&self, extra: f64) -> Rect {
        Rect {
            h: self.h + extra,
            ..*self
        }
    }

    /// Same rectangle stretched horizontally.
    pub fn widened(&self, extra: f64) -> Rect {
        Rect {
            w: self.w + extra,
            ..*self
        }
    }

    /// Same rectangle with the center shifted.
    pub fn shifted(&self, dx: f64, dy: f64) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{:.2}, {:.2}, {:.2}, {:.2}]",
            self.x, self.y, self.w, self.h
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vertices_bounding_box() {
        let rect =
            Rect::from_vertices(&[(0.0, 0.0), (10.0, 0.0), (10.0, 4.0), (0.0, 4.0)]).unwrap();
        assert!(rect.approx_eq(&Rect::new(5.0, 2.0, 10.0, 4.0)));
        assert!(Rect::from_vertices(&[]).is_none());
    }

    #[test]
    fn test_intersects_strict() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(9.0, 0.0, 10.0, 10.0)));
        // Touching edges do not count
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(20.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_intersection_symmetric() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 3.0, 10.0, 10.0);
        let ab = a.intersection(&b);
        let ba = b.intersection(&a);
        assert!(ab.approx_eq(&ba));
        assert!(ab.approx_eq(&Rect::new(2.5, 1.5, 5.0, 7.0)));
    }

    #[test]
    fn test_intersection_disjoint_is_zero_area() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(0.0, 30.0, 10.0, 10.0);
        assert_eq!(a.intersection(&b).area(), 0.0);
    }

    #[test]
    fn test_subtract_right_half() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 0.0, 10.0, 10.0);
        let pieces = a.subtract(&b);
        assert_eq!(pieces.len(), 1);
        assert!(pieces[0].approx_eq(&Rect::new(-2.5, 0.0, 5.0, 10.0)));
    }

    #[test]
    fn test_subtract_interior_cutter_yields_four_pieces() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(0.0, 0.0, 4.0, 4.0);
        let pieces = a.subtract(&b);
        assert_eq!(pieces.len(), 4);
        let total: f64 = pieces.iter().map(Rect::area).sum();
        assert!((total - (a.area() - b.area())).abs() < 1e-9);
    }

    #[test]
    fn test_cleave_disjoint_cutter_is_identity() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(50.0, 50.0, 10.0, 10.0);
        let pieces = a.cleave(&[b]);
        assert_eq!(pieces.len(), 1);
        assert!(pieces[0].approx_eq(&a));
    }

    #[test]
    fn test_cleave_containing_cutter_is_empty() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(a.cleave(&[b]).is_empty());
    }

    #[test]
    fn test_cleave_example_left_half() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 0.0, 10.0, 10.0);
        let pieces = a.cleave(&[b]);
        assert_eq!(pieces.len(), 1);
        assert!(pieces[0].approx_eq(&Rect::new(-2.5, 0.0, 5.0, 10.0)));
    }

    #[test]
    fn test_cleave_area_conservation() {
        // Area of fragments plus area covered by cutters equals the whole.
        let a = Rect::new(0.0, 0.0, 100.0, 20.0);
        let cutters = [
            Rect::new(-30.0, 0.0, 10.0, 80.0),
            Rect::new(10.0, 0.0, 10.0, 80.0),
            Rect::new(35.0, 0.0, 10.0, 80.0),
        ];
        let pieces = a.cleave(&cutters);

        let fragment_area: f64 = pieces.iter().map(Rect::area).sum();
        let covered: f64 = cutters.iter().map(|c| a.intersection(c).area()).sum();
        assert!((fragment_area + covered - a.area()).abs() < 1e-6);

        // Fragments are pairwise disjoint and clear of every cutter
        for (i, p) in pieces.iter().enumerate() {
            assert!(cutters.iter().all(|c| !p.intersects(c)));
            for q in pieces.iter().skip(i + 1) {
                assert!(!p.intersects(q));
            }
        }
    }

    #[test]
    fn test_cleave_cascading_cuts() {
        // Second cutter only touches a fragment produced by the first;
        // the restart policy still finds it.
        let a = Rect::new(0.0, 0.0, 40.0, 10.0);
        let cutters = [
            Rect::new(0.0, 0.0, 10.0, 50.0),
            Rect::new(15.0, 0.0, 6.0, 50.0),
        ];
        let pieces = a.cleave(&cutters);
        assert_eq!(pieces.len(), 3);
        let fragment_area: f64 = pieces.iter().map(Rect::area).sum();
        assert!((fragment_area - (40.0 - 10.0 - 6.0) * 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_stretch_helpers_keep_center() {
        let a = Rect::new(3.0, -2.0, 10.0, 4.0);
        let taller = a.heightened(500.0);
        assert_eq!((taller.x, taller.y), (3.0, -2.0));
        assert_eq!(taller.h, 504.0);
        let wider = a.widened(500.0);
        assert_eq!(wider.w, 510.0);
        let moved = a.shifted(0.6, 0.0);
        assert!((moved.x - 3.6).abs() < 1e-12);
    }
}
