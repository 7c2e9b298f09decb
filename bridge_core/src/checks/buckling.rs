//! # Plate Buckling Checks
//!
//! Thin-plate buckling of the matboard members, four cases:
//!
//! 1. flange panel restrained by webs on both sides (k = 4)
//! 2. flange panel restrained on one side only (k = 0.425)
//! 3. web material above the centroid under the flexural stress gradient
//!    (k = 6)
//! 4. web shear buckling between diaphragms (k = 5)
//!
//! Classification runs on the rectangle cleaver: webs stretched into
//! full-height cutting planes partition each flange into panels, and a
//! thin probe shifted to each side of a panel detects which sides carry a
//! restraining web. Critical stresses come from the closed-form plate
//! coefficient formula `k·pi^2·E / (12·(1 - mu^2)) · ratio^2` and are
//! converted to an allowable moment (cases 1-3) or an allowable shear
//! (case 4) through the section properties.

use serde::{Deserialize, Serialize};

use crate::checks::{fos_ratio, FailureMode, FosEntry, FOS_CAP};
use crate::config::BridgeConfig;
use crate::errors::{BridgeError, BridgeResult};
use crate::geometry::rect::GEOM_EPS;
use crate::geometry::{CrossSection, Rect};
use crate::loads::Envelope;

/// Stretch applied to webs when they act as cutting planes (mm).
const CUTTER_STRETCH: f64 = 500.0;
/// Side-probe geometry: lateral shift and widening (mm). The shift keeps
/// the probe clear of the opposite side's web.
const PROBE_SHIFT: f64 = 0.6;
const PROBE_WIDEN: f64 = 1.0;
/// Half-plane reach for the above-centroid cut (mm)
const HALF_PLANE_REACH: f64 = 1000.0;

/// The four plate-buckling cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BucklingCase {
    /// Flange restrained on both sides
    One,
    /// Flange restrained on one side
    Two,
    /// Web above the centroid, stress gradient
    Three,
    /// Web shear buckling between diaphragms
    Four,
}

impl BucklingCase {
    /// Plate-buckling coefficient
    pub fn k(&self) -> f64 {
        match self {
            BucklingCase::One => 4.0,
            BucklingCase::Two => 0.425,
            BucklingCase::Three => 6.0,
            BucklingCase::Four => 5.0,
        }
    }

    pub fn failure_mode(&self) -> FailureMode {
        match self {
            BucklingCase::One => FailureMode::BucklingCaseOne,
            BucklingCase::Two => FailureMode::BucklingCaseTwo,
            BucklingCase::Three => FailureMode::BucklingCaseThree,
            BucklingCase::Four => FailureMode::BucklingCaseFour,
        }
    }
}

/// One classified panel: a rectangle fragment tagged with its case.
///
/// Carried as an ordered list rather than keyed by the rectangle itself,
/// so float coordinates never act as identity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelClass {
    pub panel: Rect,
    pub case: BucklingCase,
}

/// Partition the section's members into classified buckling panels.
///
/// Flanges are cleaved against the stretched webs; each surviving
/// fragment probes both sides for a restraining web (case 1 when both
/// respond, case 2 otherwise). Web material above the centroid joins as
/// case 3, and every web joins whole as a case 4 shear panel.
pub fn classify(section: &CrossSection) -> BridgeResult<Vec<PanelClass>> {
    let ybar = section.centroid_y()?;
    let webs = section.vertical_members();
    let flanges = section.horizontal_members();

    let cutters: Vec<Rect> = webs.iter().map(|w| w.heightened(CUTTER_STRETCH)).collect();
    let mut panels = Vec::new();

    for flange in &flanges {
        for fragment in flange.cleave(&cutters) {
            if fragment.is_degenerate() {
                continue;
            }
            // The shift retracts the probe's far edge, so each probe only
            // answers for its own side.
            let probe_left = fragment.shifted(-PROBE_SHIFT, 0.0).widened(PROBE_WIDEN);
            let probe_right = fragment.shifted(PROBE_SHIFT, 0.0).widened(PROBE_WIDEN);
            let restrained_left = cutters.iter().any(|c| probe_left.intersects(c));
            let restrained_right = cutters.iter().any(|c| probe_right.intersects(c));

            let case = if restrained_left && restrained_right {
                BucklingCase::One
            } else {
                BucklingCase::Two
            };
            panels.push(PanelClass {
                panel: fragment,
                case,
            });
        }
    }

    // Material above the centroid: cut each web with a half-plane probe
    // covering everything at or below ybar.
    let below = Rect::new(
        0.0,
        ybar - HALF_PLANE_REACH,
        4.0 * HALF_PLANE_REACH,
        2.0 * HALF_PLANE_REACH,
    );
    for web in &webs {
        let centered = Rect { x: web.x, ..below };
        for piece in web.subtract(&centered) {
            if !piece.is_degenerate() {
                panels.push(PanelClass {
                    panel: piece,
                    case: BucklingCase::Three,
                });
            }
        }
    }

    for web in &webs {
        panels.push(PanelClass {
            panel: *web,
            case: BucklingCase::Four,
        });
    }

    Ok(panels)
}

/// Critical plate-buckling stress (MPa) for coefficient `k` and squared
/// slenderness ratio `ratio_sq` = (t/b)^2.
pub(crate) fn critical_stress(k: f64, e: f64, mu: f64, ratio_sq: f64) -> f64 {
    k * std::f64::consts::PI.powi(2) * e / (12.0 * (1.0 - mu.powi(2))) * ratio_sq
}

/// Buckling FOS entries, one per case.
///
/// With `station == None` the demands are the envelope peaks (case 4
/// takes the worst shear within each diaphragm bay); with a station the
/// demands are the envelope values there, and case 4 uses the bay
/// containing that station.
pub fn check_buckling(
    section: &CrossSection,
    envelope: &Envelope,
    config: &BridgeConfig,
    station: Option<usize>,
) -> BridgeResult<Vec<FosEntry>> {
    let inertia = section.moment_of_inertia()?;
    if inertia <= 0.0 {
        return Err(BridgeError::degenerate_section(
            "Moment of inertia is zero",
        ));
    }
    let ybar = section.centroid_y()?;
    let q_centroid = section.first_moment_at_centroid()?;
    let width_centroid = section.width_at_centroid()?;
    let e = config.matboard.e;
    let mu = config.matboard.mu;

    let moment_demand = match station {
        Some(s) => envelope.moment_abs_nmm(s),
        None => envelope.peak_moment_nmm(),
    };

    let mut min_fos = [FOS_CAP; 4];
    let panels = classify(section)?;

    for PanelClass { panel, case } in &panels {
        let fibre = (panel.bottom() - ybar)
            .abs()
            .max((panel.top() - ybar).abs());

        match case {
            BucklingCase::One | BucklingCase::Two => {
                // Thickness is the flange plate's height, width the
                // unsupported run between restraints
                let ratio_sq = (panel.h / panel.w).powi(2);
                let sigma_crit = critical_stress(case.k(), e, mu, ratio_sq);
                let moment_allow = if fibre > GEOM_EPS {
                    sigma_crit * inertia / fibre
                } else {
                    f64::INFINITY
                };
                let index = if *case == BucklingCase::One { 0 } else { 1 };
                min_fos[index] = min_fos[index].min(fos_ratio(moment_allow, moment_demand));
            }
            BucklingCase::Three => {
                let ratio_sq = (panel.w / panel.h).powi(2);
                let sigma_crit = critical_stress(case.k(), e, mu, ratio_sq);
                let moment_allow = if fibre > GEOM_EPS {
                    sigma_crit * inertia / fibre
                } else {
                    f64::INFINITY
                };
                min_fos[2] = min_fos[2].min(fos_ratio(moment_allow, moment_demand));
            }
            BucklingCase::Four => {
                let thickness = panel.w;
                let depth = panel.h;
                if depth <= GEOM_EPS {
                    continue;
                }
                for (start, end, shear_demand) in bays_for(envelope, config, station) {
                    let a = end - start;
                    if a <= GEOM_EPS {
                        continue;
                    }
                    let ratio_sq = (thickness / a).powi(2) + (thickness / depth).powi(2);
                    let tau_crit = critical_stress(case.k(), e, mu, ratio_sq);
                    let shear_allow = if q_centroid > GEOM_EPS {
                        tau_crit * inertia * width_centroid / q_centroid
                    } else {
                        f64::INFINITY
                    };
                    min_fos[3] = min_fos[3].min(fos_ratio(shear_allow, shear_demand));
                }
            }
        }
    }

    Ok(vec![
        FosEntry::new(FailureMode::BucklingCaseOne, min_fos[0]),
        FosEntry::new(FailureMode::BucklingCaseTwo, min_fos[1]),
        FosEntry::new(FailureMode::BucklingCaseThree, min_fos[2]),
        FosEntry::new(FailureMode::BucklingCaseFour, min_fos[3]),
    ])
}

/// Diaphragm bays with their shear demands: every bay with its own peak
/// for the whole-bridge check, or just the bay containing `station` with
/// the station's shear. Outside the diaphragm run, the nearest bay's
/// length applies.
fn bays_for(
    envelope: &Envelope,
    config: &BridgeConfig,
    station: Option<usize>,
) -> Vec<(f64, f64, f64)> {
    let bays = config.diaphragm_bays();
    if bays.is_empty() {
        let span = config.span.length_mm;
        let demand = match station {
            Some(s) => envelope.shear_abs_n(s),
            None => envelope.peak_shear_n(),
        };
        return vec![(0.0, span, demand)];
    }

    match station {
        Some(s) => {
            let pos = s as f64;
            let bay = bays
                .iter()
                .find(|&&(start, end)| pos >= start && pos <= end)
                .copied()
                .unwrap_or(if pos < bays[0].0 {
                    bays[0]
                } else {
                    bays[bays.len() - 1]
                });
            vec![(bay.0, bay.1, envelope.shear_abs_n(s))]
        }
        None => bays
            .into_iter()
            .map(|(start, end)| (start, end, envelope.peak_shear_between(start, end)))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() < tolerance
    }

    /// Top flange overhanging twin webs, plus a bottom plate between them
    fn box_girder() -> CrossSection {
        CrossSection::new(vec![
            Rect::new(0.0, 75.0, 100.0, 1.27),
            Rect::new(-40.0, 37.5, 1.27, 73.73),
            Rect::new(40.0, 37.5, 1.27, 73.73),
            Rect::new(0.0, 0.635, 80.0, 1.27),
        ])
    }

    #[test]
    fn test_critical_stress_formula() {
        // k=4, E=4000, mu=0.2, t/b = 1.27/75
        let sigma = critical_stress(4.0, 4000.0, 0.2, (1.27_f64 / 75.0).powi(2));
        let expected = 4.0 * std::f64::consts::PI.powi(2) * 4000.0 / (12.0 * 0.96)
            * (1.27_f64 / 75.0).powi(2);
        assert!(approx_eq(sigma, expected, 1e-9));
    }

    #[test]
    fn test_classification_of_box_girder() {
        let panels = classify(&box_girder()).unwrap();

        let count = |case: BucklingCase| panels.iter().filter(|p| p.case == case).count();
        // Flange between the webs and the bottom plate: both restrained
        assert_eq!(count(BucklingCase::One), 2);
        // The two flange overhangs
        assert_eq!(count(BucklingCase::Two), 2);
        // Both webs rise above the centroid
        assert_eq!(count(BucklingCase::Three), 2);
        // Both webs are shear panels
        assert_eq!(count(BucklingCase::Four), 2);
    }

    #[test]
    fn test_case_three_panels_sit_above_centroid() {
        let section = box_girder();
        let ybar = section.centroid_y().unwrap();
        let panels = classify(&section).unwrap();
        for p in panels.iter().filter(|p| p.case == BucklingCase::Three) {
            assert!(p.panel.bottom() >= ybar - 1e-6);
        }
    }

    #[test]
    fn test_overhang_panels_are_case_two() {
        let panels = classify(&box_girder()).unwrap();
        for p in panels.iter().filter(|p| p.case == BucklingCase::Two) {
            // Overhangs sit outside the webs at x = +/-40
            assert!(p.panel.x.abs() > 40.0);
        }
    }

    #[test]
    fn test_check_buckling_produces_all_cases() {
        let config = BridgeConfig::default();
        let envelope = Envelope::sweep(&config).unwrap();
        let entries = check_buckling(&box_girder(), &envelope, &config, None).unwrap();
        assert_eq!(entries.len(), 4);
        for entry in &entries {
            assert!(entry.fos > 0.0 && entry.fos <= FOS_CAP);
        }
    }

    #[test]
    fn test_wider_flange_panel_buckles_sooner() {
        // Same thickness, double the unsupported width: case 1 FOS drops
        let narrow = box_girder();
        let wide = CrossSection::new(vec![
            Rect::new(0.0, 75.0, 200.0, 1.27),
            Rect::new(-80.0, 37.5, 1.27, 73.73),
            Rect::new(80.0, 37.5, 1.27, 73.73),
            Rect::new(0.0, 0.635, 160.0, 1.27),
        ]);
        let config = BridgeConfig::default();
        let envelope = Envelope::sweep(&config).unwrap();

        let fos_narrow = check_buckling(&narrow, &envelope, &config, None).unwrap();
        let fos_wide = check_buckling(&wide, &envelope, &config, None).unwrap();
        let case1 = |entries: &[FosEntry]| {
            entries
                .iter()
                .find(|e| e.mode == FailureMode::BucklingCaseOne)
                .unwrap()
                .fos
        };
        assert!(case1(&fos_wide) < case1(&fos_narrow));
    }
}
