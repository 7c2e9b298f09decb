//! # Train Pattern & Per-Placement Diagrams
//!
//! The design train is a fixed pattern of six axles: two locomotive axles
//! at the front, four freight axles behind. Offsets are measured backward
//! from the front axle; loads are per wheel line (half the axle weight,
//! since each of the two girders carries one rail).
//!
//! For one placement of the front axle, [`TrainPattern::reactions`]
//! resolves the support reactions by statics over the axles actually on
//! the deck, [`TrainPattern::sfd`] accumulates the point loads into a
//! shear-force array, and [`TrainPattern::bmd`] integrates that into a
//! bending-moment array.
//!
//! ## Example
//!
//! ```rust
//! use bridge_core::config::Span;
//! use bridge_core::loads::TrainPattern;
//!
//! let train = TrainPattern::default();
//! let span = Span::default();
//!
//! // Front axle at 1028 mm: the whole train is on the deck.
//! let reactions = train.reactions(1028.0, &span).unwrap();
//! let total: f64 = train.wheel_loads_n.iter().sum();
//! assert!((reactions.left_n + reactions.right_n - total).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::config::Span;
use crate::errors::{BridgeError, BridgeResult};

/// The moving load pattern: parallel offset/load arrays, front axle first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainPattern {
    /// Axle offsets behind the front axle (mm, non-positive)
    pub axle_offsets_mm: Vec<f64>,
    /// Load per wheel line at each axle (N, positive down)
    pub wheel_loads_n: Vec<f64>,
}

impl TrainPattern {
    /// Distance from the front axle back to the last axle (mm)
    pub fn length_mm(&self) -> f64 {
        self.axle_offsets_mm
            .iter()
            .fold(0.0, |acc, &offset| acc.max(-offset))
    }

    /// Total load of the full pattern (N)
    pub fn total_load_n(&self) -> f64 {
        self.wheel_loads_n.iter().sum()
    }

    /// Axle `(position, load)` pairs for the front axle at `front_mm`.
    pub fn axles_at(&self, front_mm: f64) -> Vec<(f64, f64)> {
        self.axle_offsets_mm
            .iter()
            .zip(&self.wheel_loads_n)
            .map(|(&offset, &load)| (front_mm + offset, load))
            .collect()
    }

    /// Axles currently on the deck (`0 <= position <= length`).
    fn axles_on_deck(&self, front_mm: f64, span: &Span) -> Vec<(f64, f64)> {
        self.axles_at(front_mm)
            .into_iter()
            .filter(|&(pos, _)| pos >= 0.0 && pos <= span.length_mm)
            .collect()
    }

    /// Support reactions for one placement, by statics over the axles on
    /// the deck: moments about the left support give the right reaction,
    /// force balance gives the left.
    pub fn reactions(&self, front_mm: f64, span: &Span) -> BridgeResult<Reactions> {
        if self.axle_offsets_mm.len() != self.wheel_loads_n.len() {
            return Err(BridgeError::invalid_input(
                "train",
                format!(
                    "{} offsets / {} loads",
                    self.axle_offsets_mm.len(),
                    self.wheel_loads_n.len()
                ),
                "Axle offset and load arrays must have equal length",
            ));
        }
        let clear_span = span.clear_span_mm();
        if clear_span <= 0.0 {
            return Err(BridgeError::invalid_input(
                "span",
                clear_span.to_string(),
                "Clear span must be positive",
            ));
        }

        let on_deck = self.axles_on_deck(front_mm, span);
        let total: f64 = on_deck.iter().map(|&(_, load)| load).sum();
        let moment_about_left: f64 = on_deck
            .iter()
            .map(|&(pos, load)| (pos - span.support_left_mm) * load)
            .sum();

        let right = moment_about_left / clear_span;
        Ok(Reactions {
            left_n: total - right,
            right_n: right,
        })
    }

    /// Shear-force diagram for one placement: one value per millimetre
    /// station, positive up, built by running accumulation of the point
    /// loads (reactions up, axles down) from left to right.
    pub fn sfd(&self, front_mm: f64, span: &Span) -> BridgeResult<Vec<f64>> {
        let reactions = self.reactions(front_mm, span)?;
        let stations = span.stations();

        let mut point_loads = vec![0.0; stations];
        let mut apply = |pos_mm: f64, force: f64| {
            let station = pos_mm.round() as i64;
            if (0..stations as i64).contains(&station) {
                point_loads[station as usize] += force;
            }
        };
        apply(span.support_left_mm, reactions.left_n);
        apply(span.support_right_mm, reactions.right_n);
        for (pos, load) in self.axles_on_deck(front_mm, span) {
            apply(pos, -load);
        }

        let mut shear = Vec::with_capacity(stations);
        let mut running = 0.0;
        for load in point_loads {
            running += load;
            shear.push(running);
        }
        Ok(shear)
    }

    /// Bending-moment diagram for one placement (N·mm): running sum of
    /// the shear array, so `moment[i]` integrates the shear over stations
    /// `0..i`.
    pub fn bmd(&self, front_mm: f64, span: &Span) -> BridgeResult<Vec<f64>> {
        let shear = self.sfd(front_mm, span)?;
        let mut moment = Vec::with_capacity(shear.len());
        let mut running = 0.0;
        for value in &shear {
            moment.push(running);
            running += value;
        }
        Ok(moment)
    }
}

impl Default for TrainPattern {
    /// The competition train: two 91 N locomotive wheel lines up front,
    /// four 67.5 N freight wheel lines behind.
    fn default() -> Self {
        TrainPattern {
            axle_offsets_mm: vec![0.0, -176.0, -340.0, -516.0, -680.0, -856.0],
            wheel_loads_n: vec![91.0, 91.0, 67.5, 67.5, 67.5, 67.5],
        }
    }
}

/// Support reactions for one train placement (N, positive up).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reactions {
    pub left_n: f64,
    pub right_n: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() < tolerance
    }

    #[test]
    fn test_pattern_shape() {
        let train = TrainPattern::default();
        assert_eq!(train.length_mm(), 856.0);
        assert!(approx_eq(train.total_load_n(), 452.0, 1e-12));
    }

    #[test]
    fn test_reactions_equilibrium_full_train() {
        let train = TrainPattern::default();
        let span = Span::default();
        let reactions = train.reactions(1028.0, &span).unwrap();

        // Force balance
        assert!(approx_eq(
            reactions.left_n + reactions.right_n,
            452.0,
            1e-9
        ));

        // Moment balance about the left support
        let moment_loads: f64 = train
            .axles_at(1028.0)
            .iter()
            .map(|&(pos, load)| (pos - 25.0) * load)
            .sum();
        assert!(approx_eq(
            reactions.right_n * 1200.0,
            moment_loads,
            1e-6
        ));
    }

    #[test]
    fn test_reactions_partial_train() {
        // Front axle at 100 mm: only the first axle is on the deck
        let train = TrainPattern::default();
        let span = Span::default();
        let reactions = train.reactions(100.0, &span).unwrap();

        assert!(approx_eq(reactions.left_n + reactions.right_n, 91.0, 1e-9));
        assert!(approx_eq(reactions.right_n, 91.0 * 75.0 / 1200.0, 1e-9));
        // Load near the left support: left reaction dominates
        assert!(reactions.left_n > reactions.right_n);
    }

    #[test]
    fn test_sfd_closes_to_zero() {
        let train = TrainPattern::default();
        let span = Span::default();
        let shear = train.sfd(1028.0, &span).unwrap();
        assert_eq!(shear.len(), 1250);
        // All loads applied: net shear past the right support is zero
        assert!(approx_eq(*shear.last().unwrap(), 0.0, 1e-9));
        // No load before the left support
        assert_eq!(shear[0], 0.0);
        assert_eq!(shear[24], 0.0);
    }

    #[test]
    fn test_bmd_sagging_and_boundary() {
        let train = TrainPattern::default();
        let span = Span::default();
        let moment = train.bmd(1028.0, &span).unwrap();

        assert_eq!(moment[25], 0.0);
        // Simply supported with downward loads: sagging (positive) moment
        let peak = moment.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert!(peak > 0.0);
        // Moment vanishes again at the right support
        assert!(approx_eq(moment[1225], 0.0, 1e-6));
    }

    #[test]
    fn test_mismatched_arrays_rejected() {
        let train = TrainPattern {
            axle_offsets_mm: vec![0.0, -176.0],
            wheel_loads_n: vec![91.0],
        };
        let error = train.reactions(500.0, &Span::default()).unwrap_err();
        assert_eq!(error.error_code(), "INVALID_INPUT");
    }
}
