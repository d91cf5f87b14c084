//! R-Droid Resource Core - shared types
//!
//! Error handling, configuration, change events and the progress capability
//! used by the resource index crates.

pub mod config;
pub mod events;
pub mod error;
pub mod progress;

pub use config::ResourceConfig;
pub use events::{EventBus, EventSubscription, ResourceEvent};
pub use error::{ResError, Result};
pub use progress::{LogProgress, ProgressUiProvider};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "R-Droid Resources";
