//! `nav-route` — turns a start, a goal and a hazard snapshot into a ranked
//! list of route candidates.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`candidate`] | `RouteCandidate`, `CandidateKind`                           |
//! | [`synth`]     | `RouteSynthesizer` — `synthesize`, `single_path`            |
//! | [`highway`]   | Entrance scoring and toll estimate for the driving variant  |
//! | [`transit`]   | Itinerary → candidate mapping                               |
//! | [`reroute`]   | `Rerouter` — the narrow interface the tracker runtime needs |
//! | [`error`]     | `RouteError`, `RouteResult<T>`                              |
//!
//! # Failure model
//!
//! Only invalid input (sentinel or out-of-range coordinates, malformed
//! hazards) is an error, and it is detected before any provider call.
//! Provider failures degrade the candidate being built: a failed direct query
//! becomes a straight-line fallback flagged `is_fallback`, a failed detour
//! reuses the direct path, a failed highway query drops the variant.
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `parallel` | Avoidance variants are queried concurrently with Rayon.    |
//! | `serde`    | Derives `Serialize`/`Deserialize` on `RouteCandidate`.     |

pub mod candidate;
pub mod error;
pub mod highway;
pub mod reroute;
pub mod synth;
pub mod transit;


pub use candidate::{CandidateKind, RouteCandidate};
pub use error::{RouteError, RouteResult};
pub use reroute::Rerouter;
pub use synth::RouteSynthesizer;
