//! # UI Modules
//!
//! Panel layout:
//!
//! - [`toolbar`]: project file actions, geometry import/export, analysis
//! - [`editor_panel`]: design list plus the member/glue seam tables
//! - [`results_panel`]: section properties and the factor-of-safety table
//! - [`status_bar`]: file path, lock holder, and status messages
//! - [`shared`]: canvas components (section preview, envelope diagrams)

pub mod editor_panel;
pub mod results_panel;
pub mod shared;
pub mod status_bar;
pub mod toolbar;
