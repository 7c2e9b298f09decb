//! # bridge_core
//!
//! Analysis engine for a matboard model bridge: rectangle cross-section
//! geometry, moving-train load envelopes, and factor-of-safety checks
//! against flexure, shear, and plate buckling. Front-ends (CLI, GUI)
//! build on this crate; it performs no terminal or window I/O itself.
//!
//! ## Modules
//!
//! - [`config`]: span, train, diaphragm, zone, and material configuration
//! - [`geometry`]: rectangle arithmetic (intersect / cut / cleave) and
//!   composite section properties
//! - [`loads`]: train pattern, reactions, SFD/BMD, envelope sweep
//! - [`checks`]: flexure, shear, glue, and plate-buckling FOS
//! - [`report`]: CSV profiles and plain-text summaries
//! - [`project`]: the `.mspan` project container
//! - [`file_io`]: geometry/shape file formats, atomic saves, file locking
//! - [`errors`]: structured error types
//!
//! ## Example
//!
//! ```rust
//! use bridge_core::config::BridgeConfig;
//! use bridge_core::geometry::{CrossSection, Rect};
//! use bridge_core::loads::Envelope;
//! use bridge_core::checks;
//!
//! let config = BridgeConfig::default();
//! let envelope = Envelope::sweep(&config).unwrap();
//!
//! let section = CrossSection::new(vec![
//!     Rect::new(0.0, 75.0, 100.0, 1.27),
//!     Rect::new(-40.0, 37.5, 1.27, 73.73),
//!     Rect::new(40.0, 37.5, 1.27, 73.73),
//!     Rect::new(0.0, 0.635, 80.0, 1.27),
//! ]);
//!
//! let table = checks::run_all(&section, &[], &envelope, &config).unwrap();
//! let governing = table.governing().unwrap();
//! println!("governing mode: {} (FOS {:.2})", governing.mode, governing.fos);
//! ```

pub mod checks;
pub mod config;
pub mod errors;
pub mod file_io;
pub mod geometry;
pub mod loads;
pub mod project;
pub mod report;

pub use checks::{FailureMode, FosEntry, FosTable, GlueJoint};
pub use config::{BridgeConfig, Zone};
pub use errors::{BridgeError, BridgeResult};
pub use geometry::{CrossSection, Rect};
pub use loads::{Envelope, TrainPattern};
pub use project::{BridgeProject, SectionDesign, SCHEMA_VERSION};
