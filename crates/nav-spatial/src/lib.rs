//! `nav-spatial` — the seam between the engine and road-routing services.
//!
//! The synthesizer and tracker never talk to the network directly; they call
//! the traits in [`provider`], which applications implement over their HTTP
//! client of choice.  Two offline implementations ship here for tests, demos
//! and degraded operation.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                       |
//! |--------------|----------------------------------------------------------------|
//! | [`path`]     | `RoutePath`, `Step` — a provider's answer                      |
//! | [`provider`] | `RoutingProvider`, `TransitProvider`, `EntranceFinder` traits  |
//! | [`maneuver`] | Turn classification and step derivation from a polyline        |
//! | [`network`]  | `RoadNetwork` (CSR + R-tree), `RoadNetworkBuilder`             |
//! | [`router`]   | `NetworkRouter` (Dijkstra), `StraightLineRouter`               |
//! | [`error`]    | `RoutingError`, `RoutingResult<T>`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod maneuver;
pub mod network;
pub mod path;
pub mod provider;
pub mod router;

#[cfg(test)]
mod tests;

pub use error::{RoutingError, RoutingResult};
pub use network::{RoadNetwork, RoadNetworkBuilder};
pub use path::{RoutePath, Step};
pub use provider::{
    EntranceFinder, FixedEntrances, Itinerary, LegKind, NoEntrances, NoTransit, RoutingProvider,
    TransitLeg, TransitProvider,
};
pub use router::{NetworkRouter, StraightLineRouter};
