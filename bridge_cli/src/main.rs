//! # Matspan CLI Application
//!
//! Terminal front-end for the bridge analysis engine: loads the geometry
//! files (one per deck zone, or a single file used everywhere), sweeps
//! the design train, and prints the factor-of-safety table for every
//! failure mode. Optionally writes the envelope and FOS-vs-position
//! CSVs consumed by the plotting side.
//!
//! ## Status
//!
//! Prompt-driven for now; a full Ratatui TUI is planned.

use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;

use bridge_core::checks::{self, FosTable, GlueJoint};
use bridge_core::config::{BridgeConfig, Zone};
use bridge_core::errors::BridgeResult;
use bridge_core::file_io::{load_section_file, load_shapes_json};
use bridge_core::geometry::CrossSection;
use bridge_core::loads::Envelope;
use bridge_core::report::{self, ZoneSections};

fn prompt_str(prompt: &str, default: &str) -> String {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default.to_string();
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default.to_string();
    }

    let trimmed = input.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    prompt_str(prompt, "").parse().unwrap_or(default)
}

fn load_section(path: &Path) -> BridgeResult<CrossSection> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => load_shapes_json(path),
        _ => load_section_file(path),
    }
}

/// Prompt for a per-zone geometry file; blank keeps the primary section.
fn prompt_zone_section(zone: Zone, fallback: &CrossSection) -> (CrossSection, bool) {
    let path = prompt_str(
        &format!("  {} zone geometry (blank = same): ", zone.display_name()),
        "",
    );
    if path.is_empty() {
        return (fallback.clone(), false);
    }
    match load_section(Path::new(&path)) {
        Ok(section) => {
            println!("  Loaded {} member rectangles.", section.members.len());
            (section, true)
        }
        Err(e) => {
            report_error(&e);
            println!("  Falling back to the primary geometry.");
            (fallback.clone(), false)
        }
    }
}

fn main() {
    println!("Matspan CLI - Matboard Bridge Analysis");
    println!("======================================");
    println!();

    let geometry_path = prompt_str(
        "Geometry file (.txt polygons or .json shapes) [design.txt]: ",
        "design.txt",
    );

    let primary = match load_section(Path::new(&geometry_path)) {
        Ok(section) => section,
        Err(e) => {
            report_error(&e);
            return;
        }
    };
    println!("Loaded {} member rectangles.", primary.members.len());

    println!("Per-zone overrides (blank = use the same section everywhere):");
    let (support, support_own) = prompt_zone_section(Zone::Support, &primary);
    let (transition, transition_own) = prompt_zone_section(Zone::Transition, &primary);
    let (central, central_own) = prompt_zone_section(Zone::Central, &primary);
    let uniform = !(support_own || transition_own || central_own);

    let glue_height = prompt_f64("Glue seam height (mm, 0 for none) [0]: ", 0.0);
    let mut glue_joints = Vec::new();
    if glue_height != 0.0 {
        let glue_width = prompt_f64("Glued contact width (mm) [10.0]: ", 10.0);
        glue_joints.push(GlueJoint {
            height_mm: glue_height,
            width_mm: glue_width,
        });
    }

    let config = BridgeConfig::default();
    println!();
    println!(
        "Sweeping {} axles across {:.0} mm deck...",
        config.train.axle_offsets_mm.len(),
        config.span.length_mm
    );

    let envelope = match Envelope::sweep(&config) {
        Ok(envelope) => envelope,
        Err(e) => {
            report_error(&e);
            return;
        }
    };

    let zones = ZoneSections {
        support: (&support, &glue_joints),
        transition: (&transition, &glue_joints),
        central: (&central, &glue_joints),
    };

    println!();
    println!("═══════════════════════════════════════════════");
    println!("  BRIDGE ANALYSIS RESULTS");
    println!("═══════════════════════════════════════════════");

    let mut governing_fos = f64::INFINITY;
    let mut all_pass = true;
    let mut any_table = false;

    let zone_runs: Vec<(Option<Zone>, &CrossSection)> = if uniform {
        vec![(None, &primary)]
    } else {
        vec![
            (Some(Zone::Support), &support),
            (Some(Zone::Transition), &transition),
            (Some(Zone::Central), &central),
        ]
    };

    for (zone, section) in zone_runs {
        println!();
        match zone {
            Some(zone) => println!("Zone: {}", zone.display_name()),
            None => println!("Section (all zones):"),
        }
        print_section_properties(section);

        match checks::run_all(section, &glue_joints, &envelope, &config) {
            Ok(table) => {
                print_fos_table(&table);
                any_table = true;
                all_pass &= table.passes();
                governing_fos = governing_fos.min(table.min_fos());
            }
            Err(e) => report_error(&e),
        }
    }

    println!();
    println!("Demand:");
    println!("  V_max = {:.1} N", envelope.peak_shear_n());
    println!("  M_max = {:.0} N·mm", envelope.peak_moment_nmm());

    println!();
    println!("═══════════════════════════════════════════════");
    if any_table {
        println!(
            "  RESULT: {} (minimum FOS = {:.3})",
            if all_pass { "PASS" } else { "FAIL" },
            governing_fos
        );
    }
    println!("═══════════════════════════════════════════════");

    write_csv_outputs(&zones, &envelope, &config);

    if uniform {
        if let Ok(table) = checks::run_all(&primary, &glue_joints, &envelope, &config) {
            println!();
            println!("JSON Output (for scripting use):");
            if let Ok(json) = serde_json::to_string_pretty(&table) {
                println!("{}", json);
            }
        }
    }
}

fn print_section_properties(section: &CrossSection) {
    println!("  A    = {:.2} mm²", section.area());
    if let Ok(ybar) = section.centroid_y() {
        println!("  ybar = {:.3} mm", ybar);
    }
    if let Ok(inertia) = section.moment_of_inertia() {
        println!("  I    = {:.1} mm⁴", inertia);
    }
    if let Ok(q) = section.first_moment_at_centroid() {
        println!("  Q    = {:.1} mm³", q);
    }
    if let Ok(b) = section.width_at_centroid() {
        println!("  b    = {:.2} mm", b);
    }
}

fn print_fos_table(table: &FosTable) {
    println!("  Factor of Safety:");
    for entry in &table.entries {
        println!(
            "    {:<26} {:>9.3} {}",
            entry.mode.display_name(),
            entry.fos,
            status_icon(entry.passes())
        );
    }
    if let Some(governing) = table.governing() {
        println!(
            "    governs: {} (FOS = {:.3})",
            governing.mode.display_name(),
            governing.fos
        );
    }
}

fn write_csv_outputs(zones: &ZoneSections, envelope: &Envelope, config: &BridgeConfig) {
    println!();
    let envelope_path = prompt_str("Write envelope CSV to (blank to skip): ", "");
    if !envelope_path.is_empty() {
        match File::create(&envelope_path) {
            Ok(file) => {
                let mut writer = BufWriter::new(file);
                match report::write_envelope_csv(&mut writer, envelope, 1) {
                    Ok(()) => println!("Wrote {}", envelope_path),
                    Err(e) => report_error(&e),
                }
            }
            Err(e) => eprintln!("Error: cannot create {}: {}", envelope_path, e),
        }
    }

    let profile_path = prompt_str("Write FOS profile CSV to (blank to skip): ", "");
    if !profile_path.is_empty() {
        match File::create(&profile_path) {
            Ok(file) => {
                let mut writer = BufWriter::new(file);
                match report::write_fos_profile_csv(&mut writer, zones, envelope, config, 10) {
                    Ok(()) => println!("Wrote {}", profile_path),
                    Err(e) => report_error(&e),
                }
            }
            Err(e) => eprintln!("Error: cannot create {}: {}", profile_path, e),
        }
    }
}

fn report_error(e: &bridge_core::errors::BridgeError) {
    eprintln!("Error: {}", e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}

fn status_icon(pass: bool) -> &'static str {
    if pass {
        "[OK]"
    } else {
        "[FAIL]"
    }
}
