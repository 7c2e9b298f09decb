//! # Flexural Stress Check
//!
//! Navier bending stress at the extreme fibres, `sigma = M·y / I`,
//! evaluated for both envelope senses:
//!
//! - sagging (positive moment): compression at the top fibre, tension at
//!   the bottom
//! - hogging (negative moment): tension at the top fibre, compression at
//!   the bottom
//!
//! Four factor-of-safety entries come out, one per fibre/sense pair, each
//! the allowable stress over the computed demand stress.

use crate::checks::{fos_ratio, FailureMode, FosEntry};
use crate::config::Matboard;
use crate::errors::{BridgeError, BridgeResult};
use crate::geometry::CrossSection;

/// Flexural FOS entries for given sagging and hogging moment demands
/// (both N·mm, magnitudes).
pub fn check_flexure(
    section: &CrossSection,
    sagging_nmm: f64,
    hogging_nmm: f64,
    matboard: &Matboard,
) -> BridgeResult<Vec<FosEntry>> {
    let inertia = section.moment_of_inertia()?;
    if inertia <= 0.0 {
        return Err(BridgeError::degenerate_section(
            "Moment of inertia is zero",
        ));
    }
    let y_top = section.centroid_to_top()?;
    let y_bot = section.centroid_to_bottom()?;

    // Stress demands per fibre and sense
    let sag_top = sagging_nmm * y_top / inertia;
    let sag_bot = sagging_nmm * y_bot / inertia;
    let hog_top = hogging_nmm * y_top / inertia;
    let hog_bot = hogging_nmm * y_bot / inertia;

    Ok(vec![
        FosEntry::new(FailureMode::TensionTop, fos_ratio(matboard.sigma_t, hog_top)),
        FosEntry::new(
            FailureMode::CompressionTop,
            fos_ratio(matboard.sigma_c, sag_top),
        ),
        FosEntry::new(
            FailureMode::TensionBottom,
            fos_ratio(matboard.sigma_t, sag_bot),
        ),
        FosEntry::new(
            FailureMode::CompressionBottom,
            fos_ratio(matboard.sigma_c, hog_bot),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::FOS_CAP;
    use crate::geometry::Rect;

    fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() < tolerance
    }

    #[test]
    fn test_rectangle_hand_calculation() {
        // 10x20 rectangle: I = 10*20^3/12, y = 10 both ways
        let section = CrossSection::new(vec![Rect::new(0.0, 0.0, 10.0, 20.0)]);
        let matboard = Matboard::default();
        let inertia = 10.0 * 20.0_f64.powi(3) / 12.0;

        let moment = 1000.0;
        let entries = check_flexure(&section, moment, 0.0, &matboard).unwrap();

        let sigma = moment * 10.0 / inertia;
        let comp_top = entries
            .iter()
            .find(|e| e.mode == FailureMode::CompressionTop)
            .unwrap();
        assert!(approx_eq(comp_top.fos, matboard.sigma_c / sigma, 1e-9));

        let tens_bot = entries
            .iter()
            .find(|e| e.mode == FailureMode::TensionBottom)
            .unwrap();
        assert!(approx_eq(tens_bot.fos, matboard.sigma_t / sigma, 1e-9));

        // No hogging demand: the hogging pair reports the cap
        let tens_top = entries
            .iter()
            .find(|e| e.mode == FailureMode::TensionTop)
            .unwrap();
        assert_eq!(tens_top.fos, FOS_CAP);
    }

    #[test]
    fn test_asymmetric_section_splits_fibres() {
        // Heavy top flange pulls the centroid up, so the bottom fibre is
        // further from the axis and sees the larger sagging stress.
        let section = CrossSection::new(vec![
            Rect::new(0.0, 50.0, 100.0, 10.0),
            Rect::new(0.0, 22.5, 10.0, 45.0),
        ]);
        let entries = check_flexure(&section, 1.0e5, 0.0, &Matboard::default()).unwrap();
        let comp_top = entries
            .iter()
            .find(|e| e.mode == FailureMode::CompressionTop)
            .unwrap()
            .fos;
        let tens_bot = entries
            .iter()
            .find(|e| e.mode == FailureMode::TensionBottom)
            .unwrap()
            .fos;
        // sigma_t/sigma_c = 5, but y_bot/y_top > 1 narrows the gap
        assert!(tens_bot / comp_top < 5.0);
    }

    #[test]
    fn test_empty_section_errors() {
        let empty = CrossSection::new(vec![]);
        assert!(check_flexure(&empty, 1000.0, 0.0, &Matboard::default()).is_err());
    }
}
