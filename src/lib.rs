//! Firecell application layer
//!
//! Configuration, platform detection and the session that runs and replays
//! simulations. The simulation itself lives in the `firecell_*` crates.

pub mod config;
pub mod platform;
pub mod session;

pub use config::{AppConfig, ConfigError};
pub use platform::{NativesClassifier, PlatformError};
pub use session::{ReplayFrame, RunSummary, Session, SessionError};
