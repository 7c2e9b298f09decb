//! # Load Envelopes
//!
//! Sweeps the train across the deck one millimetre at a time and keeps,
//! per station, the extreme shear and moment seen over every placement.
//! The failure checks work from these envelopes rather than any single
//! placement.

use serde::{Deserialize, Serialize};

use crate::config::BridgeConfig;
use crate::errors::{BridgeError, BridgeResult};

/// Per-station extremes over a full sweep of the train.
///
/// `shear_min`/`moment_min` hold the most negative values, the `max`
/// arrays the most positive. All arrays have one entry per millimetre
/// station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub shear_min_n: Vec<f64>,
    pub shear_max_n: Vec<f64>,
    pub moment_min_nmm: Vec<f64>,
    pub moment_max_nmm: Vec<f64>,
}

impl Envelope {
    /// Sweep the configured train from entering on the left (front axle
    /// at station 0) until the last axle has left the deck.
    pub fn sweep(config: &BridgeConfig) -> BridgeResult<Envelope> {
        let stations = config.span.stations();
        if stations == 0 {
            return Err(BridgeError::calculation_failed(
                "envelope_sweep",
                "Span has no stations",
            ));
        }

        let mut envelope = Envelope {
            shear_min_n: vec![0.0; stations],
            shear_max_n: vec![0.0; stations],
            moment_min_nmm: vec![0.0; stations],
            moment_max_nmm: vec![0.0; stations],
        };

        let last_front = config.span.length_mm + config.train.length_mm();
        let mut front = 0.0;
        while front <= last_front {
            let shear = config.train.sfd(front, &config.span)?;
            let moment = config.train.bmd(front, &config.span)?;
            for i in 0..stations {
                envelope.shear_min_n[i] = envelope.shear_min_n[i].min(shear[i]);
                envelope.shear_max_n[i] = envelope.shear_max_n[i].max(shear[i]);
                envelope.moment_min_nmm[i] = envelope.moment_min_nmm[i].min(moment[i]);
                envelope.moment_max_nmm[i] = envelope.moment_max_nmm[i].max(moment[i]);
            }
            front += 1.0;
        }

        Ok(envelope)
    }

    pub fn stations(&self) -> usize {
        self.shear_max_n.len()
    }

    /// Absolute shear extreme at one station (N)
    pub fn shear_abs_n(&self, station: usize) -> f64 {
        self.shear_max_n[station].max(self.shear_min_n[station].abs())
    }

    /// Absolute moment extreme at one station (N·mm)
    pub fn moment_abs_nmm(&self, station: usize) -> f64 {
        self.moment_max_nmm[station].max(self.moment_min_nmm[station].abs())
    }

    /// Largest absolute shear anywhere along the deck (N)
    pub fn peak_shear_n(&self) -> f64 {
        (0..self.stations())
            .map(|i| self.shear_abs_n(i))
            .fold(0.0, f64::max)
    }

    /// Largest absolute moment anywhere along the deck (N·mm)
    pub fn peak_moment_nmm(&self) -> f64 {
        (0..self.stations())
            .map(|i| self.moment_abs_nmm(i))
            .fold(0.0, f64::max)
    }

    /// Largest absolute shear over a station range (N). Bounds are
    /// clamped to the deck.
    pub fn peak_shear_between(&self, start_mm: f64, end_mm: f64) -> f64 {
        let start = (start_mm.max(0.0)) as usize;
        let end = (end_mm as usize).min(self.stations().saturating_sub(1));
        (start..=end)
            .map(|i| self.shear_abs_n(i))
            .fold(0.0, f64::max)
    }

    /// Largest absolute moment over a station range (N·mm).
    pub fn peak_moment_between(&self, start_mm: f64, end_mm: f64) -> f64 {
        let start = (start_mm.max(0.0)) as usize;
        let end = (end_mm as usize).min(self.stations().saturating_sub(1));
        (start..=end)
            .map(|i| self.moment_abs_nmm(i))
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_bounds_single_placement() {
        let config = BridgeConfig::default();
        let envelope = Envelope::sweep(&config).unwrap();
        assert_eq!(envelope.stations(), 1250);

        // Any single placement is bounded by the envelope
        let shear = config.train.sfd(1028.0, &config.span).unwrap();
        let moment = config.train.bmd(1028.0, &config.span).unwrap();
        for i in 0..1250 {
            assert!(shear[i] <= envelope.shear_max_n[i] + 1e-9);
            assert!(shear[i] >= envelope.shear_min_n[i] - 1e-9);
            assert!(moment[i] <= envelope.moment_max_nmm[i] + 1e-9);
            assert!(moment[i] >= envelope.moment_min_nmm[i] - 1e-9);
        }
    }

    #[test]
    fn test_envelope_magnitudes_sane() {
        let config = BridgeConfig::default();
        let envelope = Envelope::sweep(&config).unwrap();

        // Peak shear cannot exceed the full train weight, peak moment is
        // bounded by peak shear times the clear span
        let total = config.train.total_load_n();
        assert!(envelope.peak_shear_n() > 0.0);
        assert!(envelope.peak_shear_n() <= total);
        assert!(envelope.peak_moment_nmm() > 0.0);
        assert!(envelope.peak_moment_nmm() <= total * config.span.clear_span_mm());
    }

    #[test]
    fn test_moment_peak_near_midspan() {
        let config = BridgeConfig::default();
        let envelope = Envelope::sweep(&config).unwrap();
        let peak_station = (0..envelope.stations())
            .max_by(|&a, &b| {
                envelope
                    .moment_abs_nmm(a)
                    .partial_cmp(&envelope.moment_abs_nmm(b))
                    .unwrap()
            })
            .unwrap();
        // Moving-load moment peak lands in the middle half of the span
        assert!(peak_station > 325 && peak_station < 925);
    }

    #[test]
    fn test_ranged_peaks_subset_of_global() {
        let config = BridgeConfig::default();
        let envelope = Envelope::sweep(&config).unwrap();
        let local = envelope.peak_shear_between(425.0, 525.0);
        assert!(local <= envelope.peak_shear_n() + 1e-12);
        let local_m = envelope.peak_moment_between(425.0, 525.0);
        assert!(local_m <= envelope.peak_moment_nmm() + 1e-12);
    }
}
