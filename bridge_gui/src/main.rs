//! # Matspan GUI Application
//!
//! Iced-based editor for matboard bridge cross-sections: build a section
//! from member rectangles, declare glue seams, assign the design to a
//! deck zone, and run the moving-train analysis to get the
//! factor-of-safety table alongside the envelope diagrams.
//!
//! Projects save to `.mspan` files with atomic writes and advisory file
//! locking, so two people editing the same shared-drive project see a
//! read-only warning instead of clobbering each other.

use std::path::PathBuf;

use iced::widget::{column, container, row, scrollable};
use iced::{Element, Length, Theme};
use uuid::Uuid;

use bridge_core::checks::{self, FosTable, GlueJoint};
use bridge_core::config::Zone;
use bridge_core::errors::BridgeResult;
use bridge_core::file_io::{
    self, load_section_file, load_shapes_json, save_section_file, save_shapes_json, FileLock,
};
use bridge_core::geometry::{CrossSection, Rect};
use bridge_core::loads::Envelope;
use bridge_core::project::{BridgeProject, SectionDesign};

pub mod ui;

fn main() -> iced::Result {
    iced::application(App::new, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .run()
}

/// Which field of a member row was edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberField {
    X,
    Y,
    W,
    H,
}

/// Which field of a glue seam row was edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlueField {
    Height,
    Width,
}

#[derive(Debug, Clone)]
pub enum Message {
    // Project file actions
    NewProject,
    OpenProject,
    SaveProject,
    SaveProjectAs,
    ImportGeometry,
    ExportGeometry,

    // Design list
    DesignSelected(Uuid),
    NewDesign,
    DeleteDesign,
    LabelChanged(String),
    ZoneSelected(Zone),

    // Member and glue tables
    MemberChanged(usize, MemberField, String),
    AddMember,
    RemoveMember(usize),
    GlueChanged(usize, GlueField, String),
    AddGlueJoint,
    RemoveGlueJoint(usize),

    // Analysis
    RunAnalysis,
    ToggleDarkMode(bool),
}

/// One editable member rectangle, kept as raw text until parsed.
#[derive(Debug, Clone, Default)]
pub struct MemberRow {
    pub x: String,
    pub y: String,
    pub w: String,
    pub h: String,
}

impl MemberRow {
    fn from_rect(rect: &Rect) -> Self {
        MemberRow {
            x: trim_float(rect.x),
            y: trim_float(rect.y),
            w: trim_float(rect.w),
            h: trim_float(rect.h),
        }
    }

    fn parse(&self, index: usize) -> Result<Rect, String> {
        let field = |name: &str, value: &str| -> Result<f64, String> {
            value
                .trim()
                .parse()
                .map_err(|_| format!("Member {}: invalid {} '{}'", index + 1, name, value.trim()))
        };
        Ok(Rect::new(
            field("x", &self.x)?,
            field("y", &self.y)?,
            field("w", &self.w)?,
            field("h", &self.h)?,
        ))
    }
}

/// One editable glue seam, kept as raw text until parsed.
#[derive(Debug, Clone, Default)]
pub struct GlueRow {
    pub height: String,
    pub width: String,
}

impl GlueRow {
    fn from_joint(joint: &GlueJoint) -> Self {
        GlueRow {
            height: trim_float(joint.height_mm),
            width: trim_float(joint.width_mm),
        }
    }

    fn parse(&self, index: usize) -> Result<GlueJoint, String> {
        let field = |name: &str, value: &str| -> Result<f64, String> {
            value
                .trim()
                .parse()
                .map_err(|_| format!("Seam {}: invalid {} '{}'", index + 1, name, value.trim()))
        };
        Ok(GlueJoint {
            height_mm: field("height", &self.height)?,
            width_mm: field("width", &self.width)?,
        })
    }
}

fn trim_float(value: f64) -> String {
    let formatted = format!("{:.4}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

pub struct App {
    pub project: BridgeProject,
    pub selected_design: Option<Uuid>,

    // Editor state for the selected design
    pub label_input: String,
    pub selected_zone: Zone,
    pub member_rows: Vec<MemberRow>,
    pub glue_rows: Vec<GlueRow>,

    // Analysis results
    pub envelope: Option<Envelope>,
    pub results: Option<FosTable>,
    /// `(position_mm, fos per mode)` samples for the log-scale profile
    pub fos_profile: Vec<(f64, Vec<f64>)>,

    // File state
    pub current_file: Option<PathBuf>,
    pub lock: Option<FileLock>,
    pub read_only_by: Option<String>,
    pub is_modified: bool,

    pub status: String,
    pub dark_mode: bool,
}

impl App {
    pub fn new() -> Self {
        App {
            project: BridgeProject::new(whoami::username(), ""),
            selected_design: None,
            label_input: "design1".to_string(),
            selected_zone: Zone::Central,
            member_rows: vec![MemberRow::default()],
            glue_rows: Vec::new(),
            envelope: None,
            results: None,
            fos_profile: Vec::new(),
            current_file: None,
            lock: None,
            read_only_by: None,
            is_modified: false,
            status: "New project".to_string(),
            dark_mode: false,
        }
    }

    pub fn title(&self) -> String {
        let name = self
            .current_file
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "untitled".to_string());
        let marker = if self.is_modified { "*" } else { "" };
        format!("Matspan - {}{}", name, marker)
    }

    pub fn theme(&self) -> Theme {
        if self.dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::NewProject => {
                *self = App::new();
            }
            Message::OpenProject => self.open_project(),
            Message::SaveProject => {
                if self.current_file.is_some() {
                    self.save_to_current();
                } else {
                    self.save_project_as();
                }
            }
            Message::SaveProjectAs => self.save_project_as(),
            Message::ImportGeometry => self.import_geometry(),
            Message::ExportGeometry => self.export_geometry(),

            Message::DesignSelected(id) => {
                self.selected_design = Some(id);
                self.load_rows_from_design(&id);
                self.results = None;
                self.fos_profile.clear();
            }
            Message::NewDesign => {
                self.selected_design = None;
                self.label_input = format!("design{}", self.project.designs.len() + 1);
                self.member_rows = vec![MemberRow::default()];
                self.glue_rows = Vec::new();
                self.results = None;
                self.fos_profile.clear();
                self.status = "New design".to_string();
            }
            Message::DeleteDesign => {
                if let Some(id) = self.selected_design.take() {
                    if let Some(removed) = self.project.remove_design(&id) {
                        self.is_modified = true;
                        self.status = format!("Deleted '{}'", removed.label);
                    }
                }
                self.member_rows = vec![MemberRow::default()];
                self.glue_rows = Vec::new();
                self.results = None;
                self.fos_profile.clear();
            }
            Message::LabelChanged(label) => {
                self.label_input = label;
                self.is_modified = true;
            }
            Message::ZoneSelected(zone) => {
                self.selected_zone = zone;
                self.is_modified = true;
            }

            Message::MemberChanged(index, field, value) => {
                if let Some(row) = self.member_rows.get_mut(index) {
                    match field {
                        MemberField::X => row.x = value,
                        MemberField::Y => row.y = value,
                        MemberField::W => row.w = value,
                        MemberField::H => row.h = value,
                    }
                    self.is_modified = true;
                }
            }
            Message::AddMember => {
                self.member_rows.push(MemberRow::default());
                self.is_modified = true;
            }
            Message::RemoveMember(index) => {
                if index < self.member_rows.len() {
                    self.member_rows.remove(index);
                    self.is_modified = true;
                }
            }
            Message::GlueChanged(index, field, value) => {
                if let Some(row) = self.glue_rows.get_mut(index) {
                    match field {
                        GlueField::Height => row.height = value,
                        GlueField::Width => row.width = value,
                    }
                    self.is_modified = true;
                }
            }
            Message::AddGlueJoint => {
                self.glue_rows.push(GlueRow::default());
                self.is_modified = true;
            }
            Message::RemoveGlueJoint(index) => {
                if index < self.glue_rows.len() {
                    self.glue_rows.remove(index);
                    self.is_modified = true;
                }
            }

            Message::RunAnalysis => self.run_analysis(),
            Message::ToggleDarkMode(enabled) => {
                self.dark_mode = enabled;
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let section = self.parsed_section();
        let panels = section
            .as_ref()
            .and_then(|s| checks::buckling::classify(s).ok())
            .unwrap_or_default();

        let preview = container(
            iced::widget::canvas(ui::shared::SectionView::new(
                self.parsed_members(),
                panels,
                self.parsed_glue_joints(),
                section.and_then(|s| s.centroid_y().ok()),
                self.dark_mode,
            ))
            .width(Length::Fill)
            .height(Length::Fill),
        )
        .padding(4)
        .style(container::bordered_box)
        .height(Length::FillPortion(3));

        let envelopes = container(
            iced::widget::canvas(ui::shared::EnvelopeDiagram::new(
                self.envelope.as_ref(),
                self.dark_mode,
            ))
            .width(Length::Fill)
            .height(Length::Fill),
        )
        .padding(4)
        .style(container::bordered_box)
        .height(Length::FillPortion(2));

        let fos_chart = container(
            iced::widget::canvas(ui::shared::FosProfileDiagram::new(
                self.fos_profile.clone(),
                self.dark_mode,
            ))
            .width(Length::Fill)
            .height(Length::Fill),
        )
        .padding(4)
        .style(container::bordered_box)
        .height(Length::FillPortion(2));

        let body = row![
            container(scrollable(ui::editor_panel::view(self)))
                .width(Length::FillPortion(2))
                .padding(8),
            column![preview, envelopes, fos_chart]
                .spacing(8)
                .width(Length::FillPortion(3))
                .padding(8),
            container(scrollable(ui::results_panel::view(self)))
                .width(Length::FillPortion(2))
                .padding(8),
        ]
        .height(Length::Fill);

        column![
            ui::toolbar::view_toolbar(self),
            body,
            ui::status_bar::view_status_bar(self)
        ]
        .into()
    }

    // ---- Editor state <-> project ----

    /// Best-effort parse of the member table, skipping bad rows. Used for
    /// the live preview so a half-typed number never blanks the canvas.
    pub fn parsed_members(&self) -> Vec<Rect> {
        self.member_rows
            .iter()
            .enumerate()
            .filter_map(|(i, row)| row.parse(i).ok())
            .filter(|rect| !rect.is_degenerate())
            .collect()
    }

    pub fn parsed_glue_joints(&self) -> Vec<GlueJoint> {
        self.glue_rows
            .iter()
            .enumerate()
            .filter_map(|(i, row)| row.parse(i).ok())
            .collect()
    }

    pub fn parsed_section(&self) -> Option<CrossSection> {
        let members = self.parsed_members();
        if members.is_empty() {
            None
        } else {
            Some(CrossSection::new(members))
        }
    }

    fn load_rows_from_design(&mut self, id: &Uuid) {
        if let Some(design) = self.project.get_design(id) {
            self.label_input = design.label.clone();
            self.selected_zone = design.zone;
            self.member_rows = design
                .section
                .members
                .iter()
                .map(MemberRow::from_rect)
                .collect();
            self.glue_rows = design.glue_joints.iter().map(GlueRow::from_joint).collect();
            if self.member_rows.is_empty() {
                self.member_rows.push(MemberRow::default());
            }
            self.status = format!("Editing '{}'", self.label_input);
        }
    }

    /// Strict parse of the editor tables and write-back into the project.
    fn commit_design(&mut self) -> bool {
        let mut members = Vec::with_capacity(self.member_rows.len());
        for (i, row) in self.member_rows.iter().enumerate() {
            match row.parse(i) {
                Ok(rect) => members.push(rect),
                Err(msg) => {
                    self.status = msg;
                    return false;
                }
            }
        }
        let mut glue_joints = Vec::with_capacity(self.glue_rows.len());
        for (i, row) in self.glue_rows.iter().enumerate() {
            match row.parse(i) {
                Ok(joint) => glue_joints.push(joint),
                Err(msg) => {
                    self.status = msg;
                    return false;
                }
            }
        }

        let label = if self.label_input.trim().is_empty() {
            format!("design{}", self.project.designs.len() + 1)
        } else {
            self.label_input.trim().to_string()
        };
        let section = CrossSection::new(members);

        match self.selected_design {
            Some(id) => {
                if let Some(design) = self.project.get_design_mut(&id) {
                    design.label = label;
                    design.zone = self.selected_zone;
                    design.section = section;
                    design.glue_joints = glue_joints;
                }
            }
            None => {
                let mut design = SectionDesign::new(label, self.selected_zone, section);
                design.glue_joints = glue_joints;
                self.selected_design = Some(self.project.add_design(design));
            }
        }
        true
    }

    // ---- Analysis ----

    fn run_analysis(&mut self) {
        let section = match self.strict_section() {
            Ok(section) => section,
            Err(msg) => {
                self.status = msg;
                return;
            }
        };
        let glue_joints = match self.strict_glue_joints() {
            Ok(joints) => joints,
            Err(msg) => {
                self.status = msg;
                return;
            }
        };

        // The train sweep only depends on the configuration, so it is
        // computed once and reused across analysis runs.
        if self.envelope.is_none() {
            match Envelope::sweep(&self.project.config) {
                Ok(envelope) => self.envelope = Some(envelope),
                Err(e) => {
                    self.status = format!("Error: {}", e);
                    return;
                }
            }
        }
        let Some(envelope) = self.envelope.as_ref() else {
            return;
        };

        match checks::run_all(&section, &glue_joints, envelope, &self.project.config) {
            Ok(table) => {
                let verdict = match table.governing() {
                    Some(governing) => format!(
                        "{} - governs: {} (FOS {:.3})",
                        if table.passes() { "PASS" } else { "FAIL" },
                        governing.mode.display_name(),
                        governing.fos
                    ),
                    None => "no checks ran".to_string(),
                };
                self.status = format!("Analysis complete: {}", verdict);
                self.results = Some(table);
            }
            Err(e) => {
                self.status = format!("Error: {}", e);
                self.results = None;
                self.fos_profile.clear();
                return;
            }
        }

        // Sampled FOS-vs-position profile for the log-scale chart
        let mut profile = Vec::new();
        let mut station = 0;
        while station < envelope.stations() {
            if let Ok(table) = checks::fos_at(
                &section,
                &glue_joints,
                envelope,
                &self.project.config,
                station,
            ) {
                profile.push((
                    station as f64,
                    table.entries.iter().map(|entry| entry.fos).collect(),
                ));
            }
            station += 10;
        }
        self.fos_profile = profile;
    }

    fn strict_section(&self) -> Result<CrossSection, String> {
        let mut members = Vec::with_capacity(self.member_rows.len());
        for (i, row) in self.member_rows.iter().enumerate() {
            members.push(row.parse(i)?);
        }
        if members.is_empty() {
            return Err("Add at least one member rectangle".to_string());
        }
        Ok(CrossSection::new(members))
    }

    fn strict_glue_joints(&self) -> Result<Vec<GlueJoint>, String> {
        let mut joints = Vec::with_capacity(self.glue_rows.len());
        for (i, row) in self.glue_rows.iter().enumerate() {
            joints.push(row.parse(i)?);
        }
        Ok(joints)
    }

    // ---- File handling ----

    fn open_project(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Matspan Project", &["mspan"])
            .pick_file()
        else {
            return;
        };

        match file_io::load_project_with_lock_check(&path) {
            Ok((project, lock_info)) => {
                // Drop any previous lock before taking the new one
                self.lock = None;
                self.read_only_by = None;

                match lock_info {
                    Some(info) => {
                        self.read_only_by = Some(format!("{} ({})", info.user_id, info.machine));
                        self.status = format!(
                            "Opened read-only: locked by {} since {}",
                            info.user_id,
                            info.locked_at.format("%Y-%m-%d %H:%M")
                        );
                    }
                    None => match FileLock::acquire(&path, whoami::username()) {
                        Ok(lock) => {
                            self.lock = Some(lock);
                            self.status = format!("Opened {}", path.display());
                        }
                        Err(e) => {
                            self.read_only_by = Some("another process".to_string());
                            self.status = format!("Opened read-only: {}", e);
                        }
                    },
                }

                self.project = project;
                self.current_file = Some(path);
                self.is_modified = false;
                self.envelope = None;
                self.results = None;
                self.fos_profile.clear();

                let first = self.project.designs_sorted().first().map(|(id, _)| *id);
                match first {
                    Some(id) => {
                        self.selected_design = Some(id);
                        self.load_rows_from_design(&id);
                    }
                    None => {
                        self.selected_design = None;
                        self.member_rows = vec![MemberRow::default()];
                        self.glue_rows = Vec::new();
                    }
                }
            }
            Err(e) => {
                self.status = format!("Error: {}", e);
            }
        }
    }

    fn save_to_current(&mut self) {
        if self.read_only_by.is_some() {
            self.status = "Project is read-only; use Save As".to_string();
            return;
        }
        if !self.commit_design() {
            return;
        }
        let Some(path) = self.current_file.clone() else {
            return;
        };
        self.project.touch();
        match file_io::save_project(&self.project, &path) {
            Ok(()) => {
                self.is_modified = false;
                self.status = format!("Saved {}", path.display());
            }
            Err(e) => {
                self.status = format!("Error: {}", e);
            }
        }
    }

    fn save_project_as(&mut self) {
        if !self.commit_design() {
            return;
        }
        let Some(mut path) = rfd::FileDialog::new()
            .add_filter("Matspan Project", &["mspan"])
            .set_file_name("bridge.mspan")
            .save_file()
        else {
            return;
        };
        if path.extension().is_none() {
            path.set_extension("mspan");
        }

        self.project.touch();
        match file_io::save_project(&self.project, &path) {
            Ok(()) => {
                // Saving to a new path starts a fresh editing session there
                self.lock = None;
                self.read_only_by = None;
                match FileLock::acquire(&path, whoami::username()) {
                    Ok(lock) => self.lock = Some(lock),
                    Err(_) => {
                        self.read_only_by = Some("another process".to_string());
                    }
                }
                self.is_modified = false;
                self.status = format!("Saved {}", path.display());
                self.current_file = Some(path);
            }
            Err(e) => {
                self.status = format!("Error: {}", e);
            }
        }
    }

    fn import_geometry(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Geometry", &["txt", "json"])
            .pick_file()
        else {
            return;
        };

        let loaded: BridgeResult<CrossSection> = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => load_shapes_json(&path),
            _ => load_section_file(&path),
        };

        match loaded {
            Ok(section) => {
                self.member_rows = section.members.iter().map(MemberRow::from_rect).collect();
                if self.member_rows.is_empty() {
                    self.member_rows.push(MemberRow::default());
                }
                self.is_modified = true;
                self.results = None;
                self.fos_profile.clear();
                self.status = format!(
                    "Imported {} members from {}",
                    section.members.len(),
                    path.display()
                );
            }
            Err(e) => {
                self.status = format!("Error: {}", e);
            }
        }
    }

    fn export_geometry(&mut self) {
        let section = match self.strict_section() {
            Ok(section) => section,
            Err(msg) => {
                self.status = msg;
                return;
            }
        };
        let Some(mut path) = rfd::FileDialog::new()
            .add_filter("Polygon text", &["txt"])
            .add_filter("Shapes JSON", &["json"])
            .set_file_name("section.txt")
            .save_file()
        else {
            return;
        };
        if path.extension().is_none() {
            path.set_extension("txt");
        }

        let result = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => save_shapes_json(&section, &path),
            _ => save_section_file(&section, &path),
        };
        match result {
            Ok(()) => self.status = format!("Exported {}", path.display()),
            Err(e) => self.status = format!("Error: {}", e),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        App::new()
    }
}
