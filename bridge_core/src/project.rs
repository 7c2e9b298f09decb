//! # Project Container
//!
//! The `BridgeProject` struct is the root container for a design session:
//! the analysis configuration plus every cross-section design iteration.
//! Projects serialize to `.mspan` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! BridgeProject
//! ├── meta: ProjectMetadata (version, designer, team, timestamps)
//! ├── config: BridgeConfig (span, train, diaphragms, materials)
//! └── designs: HashMap<Uuid, SectionDesign> (design iterations)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use bridge_core::project::{BridgeProject, SectionDesign};
//! use bridge_core::config::Zone;
//! use bridge_core::geometry::{CrossSection, Rect};
//!
//! let mut project = BridgeProject::new("Jane Doe", "Team 12");
//! let design = SectionDesign::new(
//!     "design6_middle",
//!     Zone::Central,
//!     CrossSection::new(vec![Rect::new(0.0, 0.0, 100.0, 1.27)]),
//! );
//! let id = project.add_design(design);
//! assert!(project.designs.contains_key(&id));
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::checks::GlueJoint;
use crate::config::{BridgeConfig, Zone};
use crate::geometry::CrossSection;

/// Current schema version for .mspan files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// One design iteration: a named cross-section assigned to a zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionDesign {
    /// Display label, e.g. "design6_middle"
    pub label: String,
    /// Which zone of the deck this section applies to
    pub zone: Zone,
    /// The member rectangles
    pub section: CrossSection,
    /// Declared glue seams
    pub glue_joints: Vec<GlueJoint>,
}

impl SectionDesign {
    pub fn new(label: impl Into<String>, zone: Zone, section: CrossSection) -> Self {
        SectionDesign {
            label: label.into(),
            zone,
            section,
            glue_joints: Vec::new(),
        }
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version of the file
    pub version: String,
    /// Name of the designer
    pub designer: String,
    /// Team or group identifier
    pub team: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// Root project container.
///
/// Designs are stored in a flat UUID-keyed map, so renaming or reordering
/// iterations never invalidates a reference to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeProject {
    pub meta: ProjectMetadata,
    pub config: BridgeConfig,
    pub designs: HashMap<Uuid, SectionDesign>,
}

impl BridgeProject {
    /// Create a new empty project with the default configuration.
    pub fn new(designer: impl Into<String>, team: impl Into<String>) -> Self {
        let now = Utc::now();
        BridgeProject {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                designer: designer.into(),
                team: team.into(),
                created: now,
                modified: now,
            },
            config: BridgeConfig::default(),
            designs: HashMap::new(),
        }
    }

    /// Add a design iteration, returning its assigned UUID.
    pub fn add_design(&mut self, design: SectionDesign) -> Uuid {
        let id = Uuid::new_v4();
        self.designs.insert(id, design);
        self.touch();
        id
    }

    /// Remove a design by UUID, returning it if it existed.
    pub fn remove_design(&mut self, id: &Uuid) -> Option<SectionDesign> {
        let design = self.designs.remove(id);
        if design.is_some() {
            self.touch();
        }
        design
    }

    pub fn get_design(&self, id: &Uuid) -> Option<&SectionDesign> {
        self.designs.get(id)
    }

    /// Mutable access to a design. Marks the project as modified.
    pub fn get_design_mut(&mut self, id: &Uuid) -> Option<&mut SectionDesign> {
        if self.designs.contains_key(id) {
            self.meta.modified = Utc::now();
            self.designs.get_mut(id)
        } else {
            None
        }
    }

    /// The design assigned to a zone, if any. With several candidates the
    /// most recently labelled one is not tracked; the first match wins.
    pub fn design_for_zone(&self, zone: Zone) -> Option<&SectionDesign> {
        self.designs.values().find(|design| design.zone == zone)
    }

    /// Designs sorted by label, for stable list displays.
    pub fn designs_sorted(&self) -> Vec<(Uuid, &SectionDesign)> {
        let mut list: Vec<(Uuid, &SectionDesign)> = self
            .designs
            .iter()
            .map(|(id, design)| (*id, design))
            .collect();
        list.sort_by(|a, b| a.1.label.cmp(&b.1.label));
        list
    }

    /// Update the modified timestamp
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    fn sample_design(label: &str, zone: Zone) -> SectionDesign {
        SectionDesign::new(
            label,
            zone,
            CrossSection::new(vec![Rect::new(0.0, 0.0, 100.0, 1.27)]),
        )
    }

    #[test]
    fn test_new_project_defaults() {
        let project = BridgeProject::new("Jane Doe", "Team 12");
        assert_eq!(project.meta.version, SCHEMA_VERSION);
        assert_eq!(project.meta.designer, "Jane Doe");
        assert!(project.designs.is_empty());
        assert_eq!(project.config.span.length_mm, 1250.0);
    }

    #[test]
    fn test_add_and_remove_design() {
        let mut project = BridgeProject::new("Jane Doe", "Team 12");
        let id = project.add_design(sample_design("design1", Zone::Central));
        assert!(project.get_design(&id).is_some());

        let removed = project.remove_design(&id).unwrap();
        assert_eq!(removed.label, "design1");
        assert!(project.designs.is_empty());
    }

    #[test]
    fn test_design_for_zone() {
        let mut project = BridgeProject::new("Jane Doe", "Team 12");
        project.add_design(sample_design("support", Zone::Support));
        project.add_design(sample_design("middle", Zone::Central));

        assert_eq!(
            project.design_for_zone(Zone::Central).unwrap().label,
            "middle"
        );
        assert!(project.design_for_zone(Zone::Transition).is_none());
    }

    #[test]
    fn test_touch_updates_modified() {
        let mut project = BridgeProject::new("Jane Doe", "Team 12");
        let before = project.meta.modified;
        std::thread::sleep(std::time::Duration::from_millis(5));
        project.add_design(sample_design("design1", Zone::Support));
        assert!(project.meta.modified > before);
    }

    #[test]
    fn test_project_serialization_roundtrip() {
        let mut project = BridgeProject::new("Jane Doe", "Team 12");
        project.add_design(sample_design("design1", Zone::Central));

        let json = serde_json::to_string_pretty(&project).unwrap();
        let loaded: BridgeProject = serde_json::from_str(&json).unwrap();
        assert_eq!(project, loaded);
    }

    #[test]
    fn test_designs_sorted_by_label() {
        let mut project = BridgeProject::new("Jane Doe", "Team 12");
        project.add_design(sample_design("b_design", Zone::Support));
        project.add_design(sample_design("a_design", Zone::Central));

        let sorted = project.designs_sorted();
        assert_eq!(sorted[0].1.label, "a_design");
        assert_eq!(sorted[1].1.label, "b_design");
    }
}
