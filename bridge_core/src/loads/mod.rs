//! # Train Loading
//!
//! Moving-load analysis for the design train:
//!
//! - [`train`]: the axle pattern, support reactions, and per-placement
//!   shear-force / bending-moment diagrams
//! - [`envelope`]: sweep of the train across the deck, retaining the
//!   per-station extremes
//!
//! Positions are millimetre stations from the left end of the deck;
//! forces are newtons, moments newton-millimetres.

pub mod envelope;
pub mod train;

pub use envelope::Envelope;
pub use train::{Reactions, TrainPattern};
