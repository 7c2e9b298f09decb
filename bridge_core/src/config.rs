//! # Bridge Configuration
//!
//! One explicit configuration record for everything the analysis needs:
//! span geometry, the design train, diaphragm layout, zone boundaries, and
//! material allowables. Earlier script versions of this tool kept these as
//! scattered module-level constants; every computation here takes the
//! config as an argument instead.
//!
//! All values default to the competition setup: a 1250 mm matboard bridge
//! simply supported 25 mm in from each end, crossed by a six-axle train.
//!
//! ## Example
//!
//! ```rust
//! use bridge_core::config::BridgeConfig;
//!
//! let config = BridgeConfig::default();
//! assert_eq!(config.span.clear_span_mm(), 1200.0);
//! assert_eq!(config.diaphragms.len(), 13);
//! ```

use serde::{Deserialize, Serialize};

use crate::loads::TrainPattern;

/// Span geometry: overall length and support positions, all in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Overall bridge length (mm)
    pub length_mm: f64,
    /// Left support position from the left end (mm)
    pub support_left_mm: f64,
    /// Right support position from the left end (mm)
    pub support_right_mm: f64,
}

impl Span {
    /// Distance between supports (mm)
    pub fn clear_span_mm(&self) -> f64 {
        self.support_right_mm - self.support_left_mm
    }

    /// Number of one-millimetre stations along the deck
    pub fn stations(&self) -> usize {
        self.length_mm as usize
    }
}

impl Default for Span {
    fn default() -> Self {
        Span {
            length_mm: 1250.0,
            support_left_mm: 25.0,
            support_right_mm: 1225.0,
        }
    }
}

/// Matboard material allowables (MPa) and elastic constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matboard {
    /// Allowable tensile stress (MPa)
    pub sigma_t: f64,
    /// Allowable compressive stress (MPa)
    pub sigma_c: f64,
    /// Allowable shear stress (MPa)
    pub tau: f64,
    /// Young's modulus (MPa)
    pub e: f64,
    /// Poisson's ratio
    pub mu: f64,
}

impl Default for Matboard {
    fn default() -> Self {
        Matboard {
            sigma_t: 30.0,
            sigma_c: 6.0,
            tau: 4.0,
            e: 4000.0,
            mu: 0.2,
        }
    }
}

/// Contact-cement glue allowables (MPa).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlueProps {
    /// Allowable shear stress across a glued interface (MPa)
    pub tau: f64,
}

impl Default for GlueProps {
    fn default() -> Self {
        GlueProps { tau: 2.0 }
    }
}

/// Which cross-section applies at a given position along the deck.
///
/// The bridge tapers: heavier build-up over the supports, lighter at
/// midspan, with a transition region between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Support,
    Transition,
    Central,
}

impl Zone {
    /// All zones, in order from the support outward
    pub const ALL: [Zone; 3] = [Zone::Support, Zone::Transition, Zone::Central];

    /// Display name for reports and the GUI
    pub fn display_name(&self) -> &'static str {
        match self {
            Zone::Support => "Support",
            Zone::Transition => "Transition",
            Zone::Central => "Central",
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Full analysis configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Span geometry
    pub span: Span,
    /// Design train (axle offsets and per-wheel loads)
    pub train: TrainPattern,
    /// Diaphragm positions along the deck (mm), sorted ascending
    pub diaphragms: Vec<f64>,
    /// Zone boundaries `[a, b, c, d]`: Support outside `[a, d]`,
    /// Central inside `[b, c]`, Transition between
    pub zone_bounds: [f64; 4],
    /// Matboard properties
    pub matboard: Matboard,
    /// Glue properties
    pub glue: GlueProps,
}

impl BridgeConfig {
    /// Zone of the cross-section at a deck position (mm).
    pub fn zone_at(&self, pos_mm: f64) -> Zone {
        let [a, b, c, d] = self.zone_bounds;
        if (b..=c).contains(&pos_mm) {
            Zone::Central
        } else if (a..b).contains(&pos_mm) || (pos_mm > c && pos_mm <= d) {
            Zone::Transition
        } else {
            Zone::Support
        }
    }

    /// Unsupported panel lengths between consecutive diaphragms,
    /// as `(start_mm, end_mm)` pairs.
    pub fn diaphragm_bays(&self) -> Vec<(f64, f64)> {
        self.diaphragms
            .windows(2)
            .map(|pair| (pair[0], pair[1]))
            .collect()
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        BridgeConfig {
            span: Span::default(),
            train: TrainPattern::default(),
            // One diaphragm every 100 mm, starting over the left support
            diaphragms: (0..=12).map(|i| 25.0 + 100.0 * i as f64).collect(),
            zone_bounds: [125.0, 510.0, 810.0, 1125.0],
            matboard: Matboard::default(),
            glue: GlueProps::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_span() {
        let span = Span::default();
        assert_eq!(span.clear_span_mm(), 1200.0);
        assert_eq!(span.stations(), 1250);
    }

    #[test]
    fn test_zone_lookup() {
        let config = BridgeConfig::default();
        assert_eq!(config.zone_at(60.0), Zone::Support);
        assert_eq!(config.zone_at(125.0), Zone::Transition);
        assert_eq!(config.zone_at(300.0), Zone::Transition);
        assert_eq!(config.zone_at(510.0), Zone::Central);
        assert_eq!(config.zone_at(810.0), Zone::Central);
        assert_eq!(config.zone_at(1000.0), Zone::Transition);
        assert_eq!(config.zone_at(1200.0), Zone::Support);
    }

    #[test]
    fn test_diaphragm_layout() {
        let config = BridgeConfig::default();
        assert_eq!(config.diaphragms.first().copied(), Some(25.0));
        assert_eq!(config.diaphragms.last().copied(), Some(1225.0));

        let bays = config.diaphragm_bays();
        assert_eq!(bays.len(), 12);
        assert!(bays.iter().all(|(a, b)| (b - a - 100.0).abs() < 1e-9));
    }

    #[test]
    fn test_config_serialization() {
        let config = BridgeConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let roundtrip: BridgeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, roundtrip);
    }
}
