//! # Report Output
//!
//! CSV and plain-text output for the analysis results:
//!
//! - envelope CSV: per-station shear and moment extremes, for dual-axis
//!   envelope charts
//! - FOS profile CSV: factor of safety per failure mode along the deck,
//!   using the zone's cross-section at each station, for log-scale
//!   FOS-vs-position charts
//! - plain-text summary of a [`FosTable`]
//!
//! Both CSVs open with a header row whose first column is
//! `Position (mm)`; the plotting side treats every remaining column as a
//! named series.

use std::io::Write;

use crate::checks::{self, FailureMode, FosTable, GlueJoint};
use crate::config::{BridgeConfig, Zone};
use crate::errors::{BridgeError, BridgeResult};
use crate::geometry::CrossSection;
use crate::loads::Envelope;

/// The cross-section and glue seams in effect for each zone.
pub struct ZoneSections<'a> {
    pub support: (&'a CrossSection, &'a [GlueJoint]),
    pub transition: (&'a CrossSection, &'a [GlueJoint]),
    pub central: (&'a CrossSection, &'a [GlueJoint]),
}

impl<'a> ZoneSections<'a> {
    /// Same section everywhere, for prismatic designs.
    pub fn uniform(section: &'a CrossSection, glue_joints: &'a [GlueJoint]) -> Self {
        ZoneSections {
            support: (section, glue_joints),
            transition: (section, glue_joints),
            central: (section, glue_joints),
        }
    }

    pub fn for_zone(&self, zone: Zone) -> (&'a CrossSection, &'a [GlueJoint]) {
        match zone {
            Zone::Support => self.support,
            Zone::Transition => self.transition,
            Zone::Central => self.central,
        }
    }
}

fn write_error(err: std::io::Error) -> BridgeError {
    BridgeError::file_error("write", "<writer>", err.to_string())
}

/// Write the envelope extremes as CSV, one row per `step_mm` stations.
pub fn write_envelope_csv<W: Write>(
    writer: &mut W,
    envelope: &Envelope,
    step_mm: usize,
) -> BridgeResult<()> {
    let step = step_mm.max(1);
    writeln!(
        writer,
        "Position (mm),Shear Min (N),Shear Max (N),Moment Min (N·mm),Moment Max (N·mm)"
    )
    .map_err(write_error)?;

    for station in (0..envelope.stations()).step_by(step) {
        writeln!(
            writer,
            "{},{:.3},{:.3},{:.3},{:.3}",
            station,
            envelope.shear_min_n[station],
            envelope.shear_max_n[station],
            envelope.moment_min_nmm[station],
            envelope.moment_max_nmm[station],
        )
        .map_err(write_error)?;
    }
    Ok(())
}

/// Write the FOS-vs-position profile as CSV, one column per failure mode,
/// evaluating each station against its zone's cross-section.
pub fn write_fos_profile_csv<W: Write>(
    writer: &mut W,
    zones: &ZoneSections,
    envelope: &Envelope,
    config: &BridgeConfig,
    step_mm: usize,
) -> BridgeResult<()> {
    let step = step_mm.max(1);

    let mut header = String::from("Position (mm)");
    for mode in FailureMode::ALL {
        header.push(',');
        header.push_str(mode.display_name());
    }
    writeln!(writer, "{header}").map_err(write_error)?;

    for station in (0..envelope.stations()).step_by(step) {
        let zone = config.zone_at(station as f64);
        let (section, glue_joints) = zones.for_zone(zone);
        let table = checks::fos_at(section, glue_joints, envelope, config, station)?;

        let mut row = station.to_string();
        for mode in FailureMode::ALL {
            let fos = table.get(mode).unwrap_or(checks::FOS_CAP);
            row.push_str(&format!(",{fos:.4}"));
        }
        writeln!(writer, "{row}").map_err(write_error)?;
    }
    Ok(())
}

/// Plain-text rendering of a FOS table: one line per mode plus the
/// governing verdict.
pub fn summary_text(table: &FosTable) -> String {
    let mut out = String::new();
    for entry in &table.entries {
        let verdict = if entry.passes() { "OK" } else { "FAIL" };
        out.push_str(&format!(
            "{:<26} FOS = {:>9.3}  [{}]\n",
            entry.mode.display_name(),
            entry.fos,
            verdict
        ));
    }
    if let Some(governing) = table.governing() {
        out.push_str(&format!(
            "Governing mode: {} (FOS = {:.3})\n",
            governing.mode.display_name(),
            governing.fos
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::{FosEntry, FosTable};
    use crate::geometry::Rect;

    fn box_girder() -> CrossSection {
        CrossSection::new(vec![
            Rect::new(0.0, 75.0, 100.0, 1.27),
            Rect::new(-40.0, 37.5, 1.27, 73.73),
            Rect::new(40.0, 37.5, 1.27, 73.73),
            Rect::new(0.0, 0.635, 80.0, 1.27),
        ])
    }

    #[test]
    fn test_envelope_csv_shape() {
        let config = BridgeConfig::default();
        let envelope = Envelope::sweep(&config).unwrap();
        let mut buffer = Vec::new();
        write_envelope_csv(&mut buffer, &envelope, 250).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("Position (mm),Shear Min"));
        // Header plus stations 0, 250, 500, 750, 1000, 1250 is out of range
        assert_eq!(lines.len(), 1 + 5);
        assert!(lines[1].starts_with("0,"));
    }

    #[test]
    fn test_fos_profile_header_names_all_modes() {
        let config = BridgeConfig::default();
        let envelope = Envelope::sweep(&config).unwrap();
        let section = box_girder();
        let zones = ZoneSections::uniform(&section, &[]);

        let mut buffer = Vec::new();
        write_fos_profile_csv(&mut buffer, &zones, &envelope, &config, 250).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let header = text.lines().next().unwrap();
        let columns: Vec<&str> = header.split(',').collect();
        assert_eq!(columns.len(), 1 + FailureMode::ALL.len());
        assert_eq!(columns[0], "Position (mm)");
        assert_eq!(columns[1], "Tension at Top");

        // Every data row has a value per column
        for line in text.lines().skip(1) {
            assert_eq!(line.split(',').count(), columns.len());
        }
    }

    #[test]
    fn test_summary_text_verdicts() {
        let table = FosTable {
            entries: vec![
                FosEntry::new(FailureMode::TensionTop, 4.2),
                FosEntry::new(FailureMode::MaterialShear, 0.7),
            ],
        };
        let text = summary_text(&table);
        assert!(text.contains("Tension at Top"));
        assert!(text.contains("[OK]"));
        assert!(text.contains("[FAIL]"));
        assert!(text.contains("Governing mode: Material Shear"));
    }
}
