//! `nav-core` — foundational types for the `navflow` navigation engine.
//!
//! This crate is a dependency of every other `nav-*` crate.  It has no
//! `nav-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`geo`]         | `Point`, haversine, bearing, destination, projection    |
//! | [`ids`]         | `NodeId`, `EdgeId`, `RouteId`, `Generation`             |
//! | [`transport`]   | `TravelMode`, `Profile`                                 |
//! | [`config`]      | `NavConfig`, `TrackerConfig`, `SynthConfig`             |
//! | [`rng`]         | `FixNoise` — seeded GPS jitter for replays and tests    |
//! | [`error`]       | `NavError`, `NavResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod transport;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{NavConfig, SynthConfig, TrackerConfig};
pub use error::{NavError, NavResult};
pub use geo::{Point, Projection, interpolate_linear, path_length, project_onto_polyline};
pub use ids::{EdgeId, Generation, NodeId, RouteId};
pub use rng::FixNoise;
pub use transport::{Profile, TravelMode};
