//! # File I/O Module
//!
//! Every on-disk format the toolkit reads or writes:
//!
//! - **Geometry files**: one polygon literal (vertex-tuple list) per line
//! - **Shape exports**: `SHAPES:` / `GLUE_TABS:` text blocks from the
//!   section editor, and JSON arrays of `{type, name, pos, rotation, w, h}`
//!   records
//! - **Project files**: `.mspan` JSON with atomic saves (write to .tmp,
//!   fsync, rename), advisory file locking for shared drives, and schema
//!   version validation
//!
//! Lock files use the `.mspan.lock` extension and carry metadata about
//! who holds the lock.
//!
//! ## Example
//!
//! ```rust,no_run
//! use bridge_core::file_io::{save_project, load_project, FileLock};
//! use bridge_core::project::BridgeProject;
//! use std::path::Path;
//!
//! let project = BridgeProject::new("Jane Doe", "Team 12");
//! let path = Path::new("bridge.mspan");
//!
//! let lock = FileLock::acquire(path, "jane@school.edu").unwrap();
//! save_project(&project, path).unwrap();
//! drop(lock);
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::checks::GlueJoint;
use crate::errors::{BridgeError, BridgeResult};
use crate::geometry::{CrossSection, Rect};
use crate::project::{BridgeProject, SCHEMA_VERSION};

// ---------------------------------------------------------------------------
// Polygon-literal geometry files
// ---------------------------------------------------------------------------

/// Parse every `(x, y)` pair in a literal like
/// `[(0, 0), (10, 0), (10, 4), (0, 4)]`.
///
/// Nested parentheses (tuple-of-tuples, as in glue-tab lines) are walked
/// into; anything that opens a pair but fails to close one is an error.
fn parse_vertex_pairs(text: &str) -> Result<Vec<(f64, f64)>, String> {
    let mut depth: i32 = 0;
    for c in text.chars() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => {
                depth -= 1;
                if depth < 0 {
                    return Err("unbalanced brackets".to_string());
                }
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err("unbalanced brackets".to_string());
    }

    let chars: Vec<char> = text.chars().collect();
    let mut pairs = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '(' {
            i += 1;
            continue;
        }
        let mut j = i + 1;
        skip_ws(&chars, &mut j);
        // A '(' followed by another bracket is a grouping level, not a pair
        if j < chars.len() && (chars[j] == '(' || chars[j] == '[') {
            i += 1;
            continue;
        }

        let x = parse_number(&chars, &mut j).ok_or("expected number after '('")?;
        skip_ws(&chars, &mut j);
        if j >= chars.len() || chars[j] != ',' {
            return Err("expected ',' inside vertex tuple".to_string());
        }
        j += 1;
        skip_ws(&chars, &mut j);
        let y = parse_number(&chars, &mut j).ok_or("expected second number in vertex tuple")?;
        skip_ws(&chars, &mut j);
        if j >= chars.len() || chars[j] != ')' {
            return Err("expected ')' closing vertex tuple".to_string());
        }
        pairs.push((x, y));
        i = j + 1;
    }

    Ok(pairs)
}

fn skip_ws(chars: &[char], i: &mut usize) {
    while *i < chars.len() && chars[*i].is_whitespace() {
        *i += 1;
    }
}

fn parse_number(chars: &[char], i: &mut usize) -> Option<f64> {
    let start = *i;
    while *i < chars.len()
        && (chars[*i].is_ascii_digit() || matches!(chars[*i], '-' | '+' | '.' | 'e' | 'E'))
    {
        *i += 1;
    }
    if *i == start {
        return None;
    }
    chars[start..*i].iter().collect::<String>().parse().ok()
}

/// Load a geometry file: one polygon literal per line, blank lines and
/// `#` comments skipped. Each polygon becomes one member rectangle via
/// its bounding box.
pub fn load_section_file(path: &Path) -> BridgeResult<CrossSection> {
    let contents = fs::read_to_string(path)
        .map_err(|e| BridgeError::file_error("read", path.display().to_string(), e.to_string()))?;
    parse_section_text(&contents, &path.display().to_string())
}

/// Parse geometry-file contents. `source` names the origin for error
/// messages.
pub fn parse_section_text(contents: &str, source: &str) -> BridgeResult<CrossSection> {
    let mut polygons = Vec::new();

    for (index, line) in contents.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let vertices = parse_vertex_pairs(trimmed)
            .map_err(|reason| BridgeError::geometry_parse(source, index + 1, reason))?;
        if vertices.is_empty() {
            return Err(BridgeError::geometry_parse(
                source,
                index + 1,
                "line contains no vertex tuples",
            ));
        }
        polygons.push(vertices);
    }

    if polygons.is_empty() {
        return Err(BridgeError::geometry_parse(
            source,
            0,
            "file contains no polygons",
        ));
    }

    Ok(CrossSection::from_polygons(&polygons))
}

/// Write a cross-section as a polygon-literal geometry file.
pub fn save_section_file(section: &CrossSection, path: &Path) -> BridgeResult<()> {
    let mut out = String::new();
    for member in &section.members {
        let vertices: Vec<String> = member
            .vertices()
            .iter()
            .map(|(x, y)| format!("({x}, {y})"))
            .collect();
        out.push_str(&format!("[{}]\n", vertices.join(", ")));
    }
    fs::write(path, out)
        .map_err(|e| BridgeError::file_error("write", path.display().to_string(), e.to_string()))
}

// ---------------------------------------------------------------------------
// Editor shape exports (SHAPES: / GLUE_TABS: blocks)
// ---------------------------------------------------------------------------

/// One named shape from an editor export.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedShape {
    pub name: String,
    pub vertices: Vec<(f64, f64)>,
}

/// One glue tab: a drawn segment across a seam.
#[derive(Debug, Clone, PartialEq)]
pub struct GlueTab {
    pub name: String,
    pub a: (f64, f64),
    pub b: (f64, f64),
}

/// Parsed editor export: `SHAPES:` and `GLUE_TABS:` blocks of
/// `name: <literal>` lines. Unknown block headers are skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeFile {
    pub shapes: Vec<NamedShape>,
    pub glue_tabs: Vec<GlueTab>,
}

#[derive(PartialEq)]
enum Block {
    Shapes,
    GlueTabs,
    Other,
}

impl ShapeFile {
    pub fn parse(contents: &str, source: &str) -> BridgeResult<ShapeFile> {
        let mut file = ShapeFile::default();
        let mut block = Block::Other;

        for (index, line) in contents.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if let Some(header) = trimmed.strip_suffix(':') {
                if !header.contains(['(', '[']) {
                    block = match header {
                        "SHAPES" => Block::Shapes,
                        "GLUE_TABS" => Block::GlueTabs,
                        _ => Block::Other,
                    };
                    continue;
                }
            }

            let (name, literal) = trimmed.split_once(':').ok_or_else(|| {
                BridgeError::geometry_parse(source, index + 1, "expected 'name: <literal>'")
            })?;
            let pairs = parse_vertex_pairs(literal)
                .map_err(|reason| BridgeError::geometry_parse(source, index + 1, reason))?;

            match block {
                Block::Shapes => {
                    if pairs.is_empty() {
                        return Err(BridgeError::geometry_parse(
                            source,
                            index + 1,
                            "shape has no vertices",
                        ));
                    }
                    file.shapes.push(NamedShape {
                        name: name.trim().to_string(),
                        vertices: pairs,
                    });
                }
                Block::GlueTabs => {
                    if pairs.len() != 2 {
                        return Err(BridgeError::geometry_parse(
                            source,
                            index + 1,
                            "glue tab must be two endpoints",
                        ));
                    }
                    file.glue_tabs.push(GlueTab {
                        name: name.trim().to_string(),
                        a: pairs[0],
                        b: pairs[1],
                    });
                }
                Block::Other => {}
            }
        }

        Ok(file)
    }

    /// Render back to the block text format.
    pub fn render(&self) -> String {
        let mut out = String::from("SHAPES:\n");
        for shape in &self.shapes {
            let vertices: Vec<String> = shape
                .vertices
                .iter()
                .map(|(x, y)| format!("({x}, {y})"))
                .collect();
            out.push_str(&format!("{}: [{}]\n", shape.name, vertices.join(", ")));
        }
        out.push_str("\nGLUE_TABS:\n");
        for tab in &self.glue_tabs {
            out.push_str(&format!(
                "{}: (({}, {}), ({}, {}))\n",
                tab.name, tab.a.0, tab.a.1, tab.b.0, tab.b.1
            ));
        }
        out
    }

    /// Member rectangles from the shapes, bounding-boxed.
    pub fn section(&self) -> CrossSection {
        let polygons: Vec<Vec<(f64, f64)>> =
            self.shapes.iter().map(|s| s.vertices.clone()).collect();
        CrossSection::from_polygons(&polygons)
    }

    /// Glue joints from the tabs: seam height at the segment midpoint,
    /// contact width from the horizontal extent. Zero-width tabs are
    /// dropped.
    pub fn glue_joints(&self) -> Vec<GlueJoint> {
        self.glue_tabs
            .iter()
            .filter_map(|tab| {
                let width = (tab.a.0 - tab.b.0).abs();
                if width <= 0.0 {
                    return None;
                }
                Some(GlueJoint {
                    height_mm: (tab.a.1 + tab.b.1) / 2.0,
                    width_mm: width,
                })
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// JSON shape records
// ---------------------------------------------------------------------------

/// One rectangle record in the JSON export format. `pos` is the
/// bottom-left corner, unlike the engine's center-based rectangles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeRecord {
    #[serde(rename = "type")]
    pub shape_type: String,
    pub name: String,
    pub pos: [f64; 2],
    pub rotation: f64,
    pub w: f64,
    pub h: f64,
}

impl ShapeRecord {
    pub fn from_rect(rect: &Rect, name: impl Into<String>) -> Self {
        ShapeRecord {
            shape_type: "rectangle".to_string(),
            name: name.into(),
            pos: [rect.left(), rect.bottom()],
            rotation: 0.0,
            w: rect.w,
            h: rect.h,
        }
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(
            self.pos[0] + self.w / 2.0,
            self.pos[1] + self.h / 2.0,
            self.w,
            self.h,
        )
    }
}

/// Load a JSON shape-record array as a cross-section. Records whose type
/// is not `rectangle` are skipped.
pub fn load_shapes_json(path: &Path) -> BridgeResult<CrossSection> {
    let contents = fs::read_to_string(path)
        .map_err(|e| BridgeError::file_error("read", path.display().to_string(), e.to_string()))?;
    let records: Vec<ShapeRecord> =
        serde_json::from_str(&contents).map_err(|e| BridgeError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;
    let members = records
        .iter()
        .filter(|r| r.shape_type == "rectangle")
        .map(ShapeRecord::to_rect)
        .filter(|rect| !rect.is_degenerate())
        .collect();
    Ok(CrossSection::new(members))
}

/// Write a cross-section as a JSON shape-record array.
pub fn save_shapes_json(section: &CrossSection, path: &Path) -> BridgeResult<()> {
    let records: Vec<ShapeRecord> = section
        .members
        .iter()
        .enumerate()
        .map(|(i, rect)| ShapeRecord::from_rect(rect, format!("Rectangle {}", i + 1)))
        .collect();
    let json =
        serde_json::to_string_pretty(&records).map_err(|e| BridgeError::SerializationError {
            reason: e.to_string(),
        })?;
    fs::write(path, json)
        .map_err(|e| BridgeError::file_error("write", path.display().to_string(), e.to_string()))
}

// ---------------------------------------------------------------------------
// Project files (.mspan) with locking and atomic saves
// ---------------------------------------------------------------------------

/// Lock file metadata stored in .mspan.lock files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    /// User identifier (email or username)
    pub user_id: String,
    /// Machine name where the lock was acquired
    pub machine: String,
    /// Process ID that holds the lock
    pub pid: u32,
    /// When the lock was acquired
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    pub fn new(user_id: impl Into<String>) -> Self {
        LockInfo {
            user_id: user_id.into(),
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }
}

/// Machine name, resolved once per process.
static HOSTNAME: Lazy<Option<String>> = Lazy::new(|| {
    #[cfg(windows)]
    {
        std::env::var("COMPUTERNAME").ok()
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOSTNAME")
            .ok()
            .or_else(|| std::env::var("HOST").ok())
    }
});

fn hostname() -> Option<String> {
    HOSTNAME.clone()
}

/// File lock guard that releases the lock when dropped.
///
/// Uses both an OS-level lock (via fs2) for process safety and a .lock
/// sidecar with metadata for user visibility on shared drives.
pub struct FileLock {
    project_path: PathBuf,
    lock_path: PathBuf,
    /// The underlying file handle (keeps the OS lock)
    _lock_file: File,
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire an exclusive lock on a project file.
    ///
    /// Returns [`BridgeError::FileLocked`] when another live process
    /// holds the lock; stale locks (dead process or older than a day)
    /// are taken over.
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> BridgeResult<Self> {
        let lock_path = lock_path_for(path);
        let info = LockInfo::new(user_id);

        if lock_path.exists() {
            if let Ok(existing) = read_lock_info(&lock_path) {
                if !is_lock_stale(&existing) {
                    return Err(BridgeError::file_locked(
                        path.display().to_string(),
                        format!("{} ({})", existing.user_id, existing.machine),
                        existing.locked_at.to_rfc3339(),
                    ));
                }
            }
        }

        let mut lock_file = OpenOptions::new()
            .write(true)
            .read(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| {
                BridgeError::file_error(
                    "create lock",
                    lock_path.display().to_string(),
                    e.to_string(),
                )
            })?;

        lock_file.try_lock_exclusive().map_err(|_| {
            BridgeError::file_locked(
                path.display().to_string(),
                "another process".to_string(),
                "unknown".to_string(),
            )
        })?;

        let lock_json =
            serde_json::to_string_pretty(&info).map_err(|e| BridgeError::SerializationError {
                reason: e.to_string(),
            })?;
        lock_file.write_all(lock_json.as_bytes()).map_err(|e| {
            BridgeError::file_error("write lock", lock_path.display().to_string(), e.to_string())
        })?;
        lock_file.sync_all().map_err(|e| {
            BridgeError::file_error("sync lock", lock_path.display().to_string(), e.to_string())
        })?;

        Ok(FileLock {
            project_path: path.to_path_buf(),
            lock_path,
            _lock_file: lock_file,
            info,
        })
    }

    /// Check whether a file is locked without acquiring the lock.
    pub fn check(path: &Path) -> Option<LockInfo> {
        let lock_path = lock_path_for(path);
        if lock_path.exists() {
            if let Ok(info) = read_lock_info(&lock_path) {
                if !is_lock_stale(&info) {
                    return Some(info);
                }
            }
        }
        None
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
        // OS lock releases with the file handle
    }
}

fn lock_path_for(project_path: &Path) -> PathBuf {
    let mut lock_path = project_path.to_path_buf();
    let extension = lock_path
        .extension()
        .map(|e| format!("{}.lock", e.to_string_lossy()))
        .unwrap_or_else(|| "lock".to_string());
    lock_path.set_extension(extension);
    lock_path
}

fn read_lock_info(lock_path: &Path) -> BridgeResult<LockInfo> {
    let mut file = File::open(lock_path).map_err(|e| {
        BridgeError::file_error("read lock", lock_path.display().to_string(), e.to_string())
    })?;
    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        BridgeError::file_error("read lock", lock_path.display().to_string(), e.to_string())
    })?;
    serde_json::from_str(&contents).map_err(|e| BridgeError::SerializationError {
        reason: e.to_string(),
    })
}

/// A lock is stale when its process is gone (same machine) or it is more
/// than a day old.
fn is_lock_stale(info: &LockInfo) -> bool {
    if let Some(our_machine) = hostname() {
        if info.machine == our_machine {
            #[cfg(windows)]
            {
                use std::process::Command;
                let output = Command::new("tasklist")
                    .args(["/FI", &format!("PID eq {}", info.pid), "/NH"])
                    .output();
                if let Ok(output) = output {
                    let stdout = String::from_utf8_lossy(&output.stdout);
                    if stdout.contains("No tasks") || !stdout.contains(&info.pid.to_string()) {
                        return true;
                    }
                }
            }
            #[cfg(unix)]
            {
                if fs::metadata(format!("/proc/{}", info.pid)).is_err() {
                    return true;
                }
            }
        }
    }

    let age = Utc::now() - info.locked_at;
    age.num_hours() > 24
}

/// Save a project with atomic write semantics: serialize, write to a
/// `.mspan.tmp` sibling, fsync, rename over the target. An interrupted
/// save never leaves a half-written project file.
pub fn save_project(project: &BridgeProject, path: &Path) -> BridgeResult<()> {
    let json =
        serde_json::to_string_pretty(project).map_err(|e| BridgeError::SerializationError {
            reason: e.to_string(),
        })?;

    let tmp_path = path.with_extension("mspan.tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        BridgeError::file_error(
            "create temp file",
            tmp_path.display().to_string(),
            e.to_string(),
        )
    })?;
    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        BridgeError::file_error(
            "write temp file",
            tmp_path.display().to_string(),
            e.to_string(),
        )
    })?;
    tmp_file.sync_all().map_err(|e| {
        BridgeError::file_error(
            "sync temp file",
            tmp_path.display().to_string(),
            e.to_string(),
        )
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        BridgeError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// Load a project, validating the schema version.
pub fn load_project(path: &Path) -> BridgeResult<BridgeProject> {
    let mut file = File::open(path)
        .map_err(|e| BridgeError::file_error("open", path.display().to_string(), e.to_string()))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| BridgeError::file_error("read", path.display().to_string(), e.to_string()))?;

    let project: BridgeProject =
        serde_json::from_str(&contents).map_err(|e| BridgeError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    validate_version(&project.meta.version)?;
    Ok(project)
}

/// Load a project and report whether another user currently holds its
/// lock (so the caller can open read-only).
pub fn load_project_with_lock_check(
    path: &Path,
) -> BridgeResult<(BridgeProject, Option<LockInfo>)> {
    let project = load_project(path)?;
    let lock_info = FileLock::check(path);
    Ok((project, lock_info))
}

/// Major version must match; for 0.x files, a newer minor than ours is
/// also rejected.
fn validate_version(file_version: &str) -> BridgeResult<()> {
    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(BridgeError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        });
    }

    if file_parts[0] != current_parts[0] {
        return Err(BridgeError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        });
    }

    if current_parts[0] == 0
        && file_parts.len() > 1
        && current_parts.len() > 1
        && file_parts[1] > current_parts[1]
    {
        return Err(BridgeError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    fn temp_path(name: &str, ext: &str) -> PathBuf {
        temp_dir().join(format!("matspan_test_{name}.{ext}"))
    }

    #[test]
    fn test_parse_polygon_line() {
        let pairs = parse_vertex_pairs("[(0, 0), (10, 0), (10, 4), (0, 4)]").unwrap();
        assert_eq!(pairs.len(), 4);
        assert_eq!(pairs[2], (10.0, 4.0));
    }

    #[test]
    fn test_parse_nested_tuple_of_tuples() {
        let pairs = parse_vertex_pairs("((1.5, -2), (3, 4.25))").unwrap();
        assert_eq!(pairs, vec![(1.5, -2.0), (3.0, 4.25)]);
    }

    #[test]
    fn test_parse_unbalanced_brackets() {
        assert!(parse_vertex_pairs("[(0, 0), (10, 0)").is_err());
        assert!(parse_vertex_pairs("(0, 0))").is_err());
    }

    #[test]
    fn test_section_text_with_line_numbers() {
        let text = "[(0, 0), (80, 0), (80, 1.27), (0, 1.27)]\n[(0, 0), (1.27, oops)]\n";
        let error = parse_section_text(text, "design6_middle.txt").unwrap_err();
        match error {
            BridgeError::GeometryParse { path, line, .. } => {
                assert_eq!(path, "design6_middle.txt");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_section_file_roundtrip() {
        let path = temp_path("section_roundtrip", "txt");
        let section = CrossSection::new(vec![
            Rect::new(50.0, 0.635, 80.0, 1.27),
            Rect::new(10.635, 33.52, 1.27, 64.49),
        ]);
        save_section_file(&section, &path).unwrap();

        let loaded = load_section_file(&path).unwrap();
        assert_eq!(loaded.members.len(), 2);
        assert!(loaded.members[0].approx_eq(&section.members[0]));
        assert!(loaded.members[1].approx_eq(&section.members[1]));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_shape_file_blocks() {
        let text = "SHAPES:\n\
                    flange: [(0, 0), (100, 0), (100, 1.27), (0, 1.27)]\n\
                    web: [(0, 1.27), (1.27, 1.27), (1.27, 75), (0, 75)]\n\
                    \n\
                    COMPOSITES:\n\
                    body: [[(0, 0), (1, 1)]]\n\
                    \n\
                    GLUE_TABS:\n\
                    glue1: ((10, 1.27), (20, 1.27))\n";
        let file = ShapeFile::parse(text, "export.txt").unwrap();
        assert_eq!(file.shapes.len(), 2);
        assert_eq!(file.shapes[0].name, "flange");
        assert_eq!(file.glue_tabs.len(), 1);

        let joints = file.glue_joints();
        assert_eq!(joints.len(), 1);
        assert_eq!(joints[0].height_mm, 1.27);
        assert_eq!(joints[0].width_mm, 10.0);

        let section = file.section();
        assert_eq!(section.members.len(), 2);
    }

    #[test]
    fn test_shape_file_render_roundtrip() {
        let file = ShapeFile {
            shapes: vec![NamedShape {
                name: "deck".to_string(),
                vertices: vec![(0.0, 0.0), (100.0, 0.0), (100.0, 1.27), (0.0, 1.27)],
            }],
            glue_tabs: vec![GlueTab {
                name: "glue1".to_string(),
                a: (10.0, 1.27),
                b: (20.0, 1.27),
            }],
        };
        let reparsed = ShapeFile::parse(&file.render(), "render").unwrap();
        assert_eq!(file, reparsed);
    }

    #[test]
    fn test_shape_record_corner_convention() {
        let rect = Rect::new(50.0, 0.635, 80.0, 1.27);
        let record = ShapeRecord::from_rect(&rect, "Rectangle 1");
        assert_eq!(record.pos, [10.0, 0.0]);
        assert!(record.to_rect().approx_eq(&rect));
    }

    #[test]
    fn test_shapes_json_roundtrip() {
        let path = temp_path("shapes_json", "json");
        let section = CrossSection::new(vec![
            Rect::new(50.0, 0.64, 80.0, 1.27),
            Rect::new(10.63, 33.52, 1.27, 64.49),
        ]);
        save_shapes_json(&section, &path).unwrap();

        let loaded = load_shapes_json(&path).unwrap();
        assert_eq!(loaded.members.len(), 2);
        assert!(loaded.members[0].approx_eq(&section.members[0]));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_lock_path_generation() {
        let project_path = Path::new("/path/to/bridge.mspan");
        assert_eq!(
            lock_path_for(project_path),
            Path::new("/path/to/bridge.mspan.lock")
        );
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_path("project_roundtrip", "mspan");
        let project = BridgeProject::new("Jane Doe", "Team 12");
        save_project(&project, &path).unwrap();

        let loaded = load_project(&path).unwrap();
        assert_eq!(loaded.meta.designer, "Jane Doe");
        assert_eq!(loaded.meta.team, "Team 12");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_leaves_no_tmp_file() {
        let path = temp_path("atomic", "mspan");
        let tmp_path = path.with_extension("mspan.tmp");

        save_project(&BridgeProject::new("A", "B"), &path).unwrap();
        assert!(!tmp_path.exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_file_lock_acquire_and_release() {
        let path = temp_path("lock", "mspan");
        File::create(&path).unwrap();

        let lock = FileLock::acquire(&path, "jane@school.edu").unwrap();
        assert_eq!(lock.info.user_id, "jane@school.edu");
        let lock_path = lock_path_for(&path);
        assert!(lock_path.exists());

        drop(lock);
        assert!(!lock_path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }

    #[test]
    fn test_load_with_lock_check() {
        let path = temp_path("lock_check", "mspan");
        save_project(&BridgeProject::new("A", "B"), &path).unwrap();

        let (loaded, lock_info) = load_project_with_lock_check(&path).unwrap();
        assert_eq!(loaded.meta.designer, "A");
        assert!(lock_info.is_none());

        let _ = fs::remove_file(&path);
    }
}
