//! `nav-hazard` — what the engine routes around.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                          |
//! |--------------|-------------------------------------------------------------------|
//! | [`model`]    | `Obstacle`, `CongestionZone`, `Severity`, `HazardSet`, `HazardView` |
//! | [`conflict`] | `first_conflict`, `detour_anchor`, `Side`, `local_bearing`        |
//! | [`warning`]  | `congestion_warning` — proximity check for the display layer     |
//! | [`error`]    | `HazardError`, `HazardResult<T>`                                  |
//!
//! # Design notes
//!
//! A `HazardSet` is a read-only snapshot taken when a synthesis request
//! starts.  Avoidance variants borrow filtered [`HazardView`]s of it rather
//! than copying, so all variants of one request see identical hazards.
//!
//! Congestion severity only affects warnings; conflict detection treats every
//! zone alike.

pub mod conflict;
pub mod error;
pub mod model;
pub mod warning;


pub use conflict::{Conflict, ConflictKind, Side, detour_anchor, first_conflict, local_bearing};
pub use error::{HazardError, HazardResult};
pub use model::{CongestionZone, HazardSet, HazardView, Obstacle, Severity};
pub use warning::congestion_warning;
