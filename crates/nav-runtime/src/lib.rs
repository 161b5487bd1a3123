//! `nav-runtime` — runs a navigation session on tokio.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`driver`]   | `SessionDriver` — the `select!` loop that owns the session      |
//! | [`observer`] | `DisplayObserver`, `NoopObserver`, `ChannelObserver`            |
//! | [`replay`]   | CSV trace loading and timed replay into a fix channel           |
//! | [`logging`]  | `init_logging` — `tracing-subscriber` with `EnvFilter`          |
//! | [`error`]    | `RuntimeError`, `RuntimeResult<T>`                              |
//!
//! # Quick start
//!
//! ```rust,ignore
//! let (fix_tx, fix_rx) = tokio::sync::mpsc::channel(64);
//! let session = NavigationSession::new(route, config.tracker)?;
//! let driver = SessionDriver::new(session, Arc::new(synthesizer));
//!
//! tokio::spawn(replay_fixes(load_fixes_csv(path)?, fix_tx, 4.0));
//! let summary = driver.run(fix_rx, &mut NoopObserver, CancellationToken::new()).await?;
//! ```

pub mod driver;
pub mod error;
pub mod logging;
pub mod observer;
pub mod replay;


pub use driver::{DEFAULT_TICK_INTERVAL, DriverSummary, SessionDriver};
pub use error::{RuntimeError, RuntimeResult};
pub use logging::init_logging;
pub use observer::{ChannelObserver, DisplayEvent, DisplayObserver, NoopObserver};
pub use replay::{load_fixes_csv, load_fixes_reader, replay_fixes};
