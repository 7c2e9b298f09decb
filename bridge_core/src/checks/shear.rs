//! # Shear Stress Checks
//!
//! Beam shear flow, `tau = V·Q / (I·b)`:
//!
//! - material shear at the centroidal axis, where Q peaks and the web is
//!   thinnest
//! - glue shear at each declared seam, using Q of the material beyond the
//!   seam and the glued contact width
//!
//! Glue seams are declared per design; a section with no seams reports
//! the capped FOS for the glue mode rather than omitting it.

use serde::{Deserialize, Serialize};

use crate::checks::{fos_ratio, FailureMode, FosEntry, FOS_CAP};
use crate::config::{GlueProps, Matboard};
use crate::errors::{BridgeError, BridgeResult};
use crate::geometry::CrossSection;

/// One glued interface in the cross-section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlueJoint {
    /// Ordinate of the glued seam (mm)
    pub height_mm: f64,
    /// Total glued contact width across the seam (mm)
    pub width_mm: f64,
}

/// Material and glue shear FOS entries for a shear demand `shear_n` (N).
pub fn check_shear(
    section: &CrossSection,
    glue_joints: &[GlueJoint],
    shear_n: f64,
    matboard: &Matboard,
    glue: &GlueProps,
) -> BridgeResult<Vec<FosEntry>> {
    let inertia = section.moment_of_inertia()?;
    if inertia <= 0.0 {
        return Err(BridgeError::degenerate_section(
            "Moment of inertia is zero",
        ));
    }

    // Material shear at the centroid
    let q_centroid = section.first_moment_at_centroid()?;
    let width = section.width_at_centroid()?;
    if width <= 0.0 {
        return Err(BridgeError::degenerate_section(
            "No material crosses the centroidal axis",
        ));
    }
    let tau = shear_n * q_centroid / (inertia * width);
    let material_fos = fos_ratio(matboard.tau, tau);

    // Glue shear: worst seam governs
    let mut glue_fos = FOS_CAP;
    for joint in glue_joints {
        if joint.width_mm <= 0.0 {
            return Err(BridgeError::invalid_input(
                "glue_joint.width_mm",
                joint.width_mm.to_string(),
                "Glued contact width must be positive",
            ));
        }
        let q_seam = section.first_moment(joint.height_mm)?;
        let tau_seam = shear_n * q_seam / (inertia * joint.width_mm);
        glue_fos = glue_fos.min(fos_ratio(glue.tau, tau_seam));
    }

    Ok(vec![
        FosEntry::new(FailureMode::MaterialShear, material_fos),
        FosEntry::new(FailureMode::GlueShear, glue_fos),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() < tolerance
    }

    #[test]
    fn test_rectangle_shear_hand_calculation() {
        // Solid 10x20: tau_max = 1.5 V / A
        let section = CrossSection::new(vec![Rect::new(0.0, 0.0, 10.0, 20.0)]);
        let matboard = Matboard::default();
        let shear = 400.0;

        let entries =
            check_shear(&section, &[], shear, &matboard, &GlueProps::default()).unwrap();
        let material = entries
            .iter()
            .find(|e| e.mode == FailureMode::MaterialShear)
            .unwrap();

        let tau = 1.5 * shear / 200.0;
        assert!(approx_eq(material.fos, matboard.tau / tau, 1e-9));
    }

    #[test]
    fn test_no_glue_joints_reports_cap() {
        let section = CrossSection::new(vec![Rect::new(0.0, 0.0, 10.0, 20.0)]);
        let entries =
            check_shear(&section, &[], 100.0, &Matboard::default(), &GlueProps::default())
                .unwrap();
        let glue = entries
            .iter()
            .find(|e| e.mode == FailureMode::GlueShear)
            .unwrap();
        assert_eq!(glue.fos, FOS_CAP);
    }

    #[test]
    fn test_glue_seam_at_flange_web_interface() {
        // Flange glued on top of twin webs; seam at the interface
        let section = CrossSection::new(vec![
            Rect::new(0.0, 40.5, 100.0, 1.0),
            Rect::new(-20.0, 20.0, 1.0, 40.0),
            Rect::new(20.0, 20.0, 1.0, 40.0),
        ]);
        let joint = GlueJoint {
            height_mm: 40.0,
            width_mm: 10.0,
        };

        let shear = 250.0;
        let entries = check_shear(
            &section,
            &[joint],
            shear,
            &Matboard::default(),
            &GlueProps::default(),
        )
        .unwrap();
        let glue_entry = entries
            .iter()
            .find(|e| e.mode == FailureMode::GlueShear)
            .unwrap();

        let inertia = section.moment_of_inertia().unwrap();
        let q = section.first_moment(40.0).unwrap();
        let expected = GlueProps::default().tau / (shear * q / (inertia * 10.0));
        assert!(approx_eq(glue_entry.fos, expected, 1e-9));
        assert!(glue_entry.fos < FOS_CAP);
    }

    #[test]
    fn test_zero_width_joint_rejected() {
        let section = CrossSection::new(vec![Rect::new(0.0, 0.0, 10.0, 20.0)]);
        let joint = GlueJoint {
            height_mm: 5.0,
            width_mm: 0.0,
        };
        let error = check_shear(
            &section,
            &[joint],
            100.0,
            &Matboard::default(),
            &GlueProps::default(),
        )
        .unwrap_err();
        assert_eq!(error.error_code(), "INVALID_INPUT");
    }
}
