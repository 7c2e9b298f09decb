//! # Failure Checks
//!
//! Factor-of-safety evaluation for every failure mode of the matboard
//! girder:
//!
//! - [`flexure`]: tension/compression at the extreme fibres, sagging and
//!   hogging
//! - [`shear`]: material shear at the centroid and glue-seam shear
//! - [`buckling`]: the four plate-buckling cases, driven by the rectangle
//!   cleave classifier
//!
//! Each check returns [`FosEntry`] values; [`run_all`] combines them into
//! one [`FosTable`] against the swept load envelopes, and [`fos_at`]
//! evaluates the same table at a single millimetre station for
//! FOS-vs-position profiles.

pub mod buckling;
pub mod flexure;
pub mod shear;

use serde::{Deserialize, Serialize};

use crate::config::BridgeConfig;
use crate::errors::BridgeResult;
use crate::geometry::CrossSection;
use crate::loads::Envelope;

pub use shear::GlueJoint;

/// Cap applied when the demand is effectively zero. A check that sees no
/// load reports this sentinel instead of dividing by nothing.
pub const FOS_CAP: f64 = 1e3;

/// `allowable / demand`, capped at [`FOS_CAP`].
pub fn fos_ratio(allowable: f64, demand: f64) -> f64 {
    if demand.abs() < 1e-9 {
        FOS_CAP
    } else {
        (allowable / demand).min(FOS_CAP)
    }
}

/// Every failure mode the checks evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureMode {
    TensionTop,
    CompressionTop,
    TensionBottom,
    CompressionBottom,
    MaterialShear,
    GlueShear,
    BucklingCaseOne,
    BucklingCaseTwo,
    BucklingCaseThree,
    BucklingCaseFour,
}

impl FailureMode {
    /// All modes, in report order
    pub const ALL: [FailureMode; 10] = [
        FailureMode::TensionTop,
        FailureMode::CompressionTop,
        FailureMode::TensionBottom,
        FailureMode::CompressionBottom,
        FailureMode::MaterialShear,
        FailureMode::GlueShear,
        FailureMode::BucklingCaseOne,
        FailureMode::BucklingCaseTwo,
        FailureMode::BucklingCaseThree,
        FailureMode::BucklingCaseFour,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            FailureMode::TensionTop => "Tension at Top",
            FailureMode::CompressionTop => "Compression at Top",
            FailureMode::TensionBottom => "Tension at Bottom",
            FailureMode::CompressionBottom => "Compression at Bottom",
            FailureMode::MaterialShear => "Material Shear",
            FailureMode::GlueShear => "Glue Shear",
            FailureMode::BucklingCaseOne => "Plate Buckling Case 1",
            FailureMode::BucklingCaseTwo => "Plate Buckling Case 2",
            FailureMode::BucklingCaseThree => "Plate Buckling Case 3",
            FailureMode::BucklingCaseFour => "Shear Buckling Case 4",
        }
    }
}

impl std::fmt::Display for FailureMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One failure mode with its computed factor of safety.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FosEntry {
    pub mode: FailureMode,
    pub fos: f64,
}

impl FosEntry {
    pub fn new(mode: FailureMode, fos: f64) -> Self {
        FosEntry { mode, fos }
    }

    /// FOS >= 1.0 means the mode does not govern failure
    pub fn passes(&self) -> bool {
        self.fos >= 1.0
    }
}

/// Complete factor-of-safety table for one cross-section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FosTable {
    pub entries: Vec<FosEntry>,
}

impl FosTable {
    /// Entry with the lowest FOS, the mode that governs the design.
    pub fn governing(&self) -> Option<&FosEntry> {
        self.entries
            .iter()
            .min_by(|a, b| a.fos.partial_cmp(&b.fos).unwrap_or(std::cmp::Ordering::Equal))
    }

    pub fn min_fos(&self) -> f64 {
        self.governing().map(|entry| entry.fos).unwrap_or(FOS_CAP)
    }

    /// True when every mode carries FOS >= 1.0
    pub fn passes(&self) -> bool {
        self.entries.iter().all(FosEntry::passes)
    }

    pub fn get(&self, mode: FailureMode) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.mode == mode)
            .map(|entry| entry.fos)
    }
}

/// Evaluate every failure mode against the envelope peaks.
///
/// This is the whole-bridge verdict for one cross-section: flexure and
/// buckling see the worst moment anywhere, shear sees the worst shear
/// anywhere, Case 4 sees the worst shear within each diaphragm bay.
pub fn run_all(
    section: &CrossSection,
    glue_joints: &[GlueJoint],
    envelope: &Envelope,
    config: &BridgeConfig,
) -> BridgeResult<FosTable> {
    let sagging = envelope
        .moment_max_nmm
        .iter()
        .cloned()
        .fold(0.0, f64::max);
    let hogging = envelope
        .moment_min_nmm
        .iter()
        .cloned()
        .fold(0.0, f64::min)
        .abs();

    let mut entries = flexure::check_flexure(section, sagging, hogging, &config.matboard)?;
    entries.extend(shear::check_shear(
        section,
        glue_joints,
        envelope.peak_shear_n(),
        &config.matboard,
        &config.glue,
    )?);
    entries.extend(buckling::check_buckling(section, envelope, config, None)?);

    Ok(FosTable { entries })
}

/// Evaluate every failure mode at one millimetre station, using the
/// envelope values there instead of the global peaks.
pub fn fos_at(
    section: &CrossSection,
    glue_joints: &[GlueJoint],
    envelope: &Envelope,
    config: &BridgeConfig,
    station: usize,
) -> BridgeResult<FosTable> {
    let sagging = envelope.moment_max_nmm[station].max(0.0);
    let hogging = envelope.moment_min_nmm[station].min(0.0).abs();

    let mut entries = flexure::check_flexure(section, sagging, hogging, &config.matboard)?;
    entries.extend(shear::check_shear(
        section,
        glue_joints,
        envelope.shear_abs_n(station),
        &config.matboard,
        &config.glue,
    )?);
    entries.extend(buckling::check_buckling(
        section,
        envelope,
        config,
        Some(station),
    )?);

    Ok(FosTable { entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    fn box_girder() -> CrossSection {
        // 100 mm wide top flange, twin 1.27 mm webs, 80 mm deep
        CrossSection::new(vec![
            Rect::new(0.0, 75.0, 100.0, 1.27),
            Rect::new(-40.0, 37.5, 1.27, 73.73),
            Rect::new(40.0, 37.5, 1.27, 73.73),
            Rect::new(0.0, 0.635, 80.0, 1.27),
        ])
    }

    #[test]
    fn test_fos_ratio_caps_zero_demand() {
        assert_eq!(fos_ratio(10.0, 0.0), FOS_CAP);
        assert_eq!(fos_ratio(10.0, 5.0), 2.0);
        assert_eq!(fos_ratio(1e9, 1.0), FOS_CAP);
    }

    #[test]
    fn test_run_all_covers_every_mode() {
        let config = BridgeConfig::default();
        let envelope = Envelope::sweep(&config).unwrap();
        let table = run_all(&box_girder(), &[], &envelope, &config).unwrap();

        for mode in FailureMode::ALL {
            assert!(table.get(mode).is_some(), "missing mode {mode}");
        }
        // No glue joints declared: glue shear reports the cap
        assert_eq!(table.get(FailureMode::GlueShear), Some(FOS_CAP));
    }

    #[test]
    fn test_governing_is_minimum() {
        let table = FosTable {
            entries: vec![
                FosEntry::new(FailureMode::TensionTop, 4.2),
                FosEntry::new(FailureMode::MaterialShear, 1.3),
                FosEntry::new(FailureMode::BucklingCaseTwo, 0.8),
            ],
        };
        assert_eq!(table.governing().unwrap().mode, FailureMode::BucklingCaseTwo);
        assert!(!table.passes());
        assert_eq!(table.min_fos(), 0.8);
    }

    #[test]
    fn test_station_table_bounded_by_peak_demands() {
        // Demand at one station never exceeds the global peak, so the
        // per-station FOS is at least the whole-bridge FOS.
        let config = BridgeConfig::default();
        let envelope = Envelope::sweep(&config).unwrap();
        let section = box_girder();

        let global = run_all(&section, &[], &envelope, &config).unwrap();
        let local = fos_at(&section, &[], &envelope, &config, 625).unwrap();
        for mode in FailureMode::ALL {
            assert!(local.get(mode).unwrap() >= global.get(mode).unwrap() - 1e-9);
        }
    }
}
