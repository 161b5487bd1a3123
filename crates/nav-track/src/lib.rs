//! `nav-track` — follows a user along an active route.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                          |
//! |--------------|-------------------------------------------------------------------|
//! | [`fix`]      | `Fix` — one position report                                       |
//! | [`state`]    | `TrackState`, threshold / look-ahead / speed-smoothing helpers    |
//! | [`animator`] | `Animator` — time-based display interpolation                     |
//! | [`guidance`] | `Guidance`, `Instruction`, `InstructionClass` — turn instructions |
//! | [`display`]  | `DisplayState`, `DebugMetrics` — what a renderer consumes         |
//! | [`session`]  | `NavigationSession` — the state machine                           |
//! | [`error`]    | `TrackError`, `TrackResult<T>`                                    |
//!
//! # Design notes
//!
//! `NavigationSession` performs no I/O and holds no clock.  Every transition
//! takes the current time as an argument and returns what the caller should
//! do next: a fix may yield a [`RerouteRequest`], which the caller resolves
//! however it likes and hands back through
//! [`NavigationSession::on_reroute_result`].  The async driver lives in
//! `nav-runtime`; tests drive the session directly with synthetic times.
//!
//! ```text
//!            ┌────────── no breach ──────────┐
//!            ▼                               │
//!        OnRoute ── breach ──► OffRoutePending(n) ── n == debounce ──► OffRouteConfirmed
//!            ▲                                                               │
//!            └──────────── reroute result installed / back on route ─────────┘
//! ```

pub mod animator;
pub mod display;
pub mod error;
pub mod fix;
pub mod guidance;
pub mod session;
pub mod state;


pub use animator::Animator;
pub use display::{DebugMetrics, DisplayState};
pub use error::{TrackError, TrackResult};
pub use fix::Fix;
pub use guidance::{Guidance, Instruction, InstructionClass};
pub use session::{FixOutcome, NavigationSession, RerouteOutcome, RerouteRequest};
pub use state::{TrackState, dynamic_threshold, look_ahead_origin, smooth_speed};
