//! Subcommand handlers
//!
//! Each handler returns the text to print so it can be tested without
//! capturing stdout.

pub mod estimate;
pub mod prefs;
pub mod weather;

pub use estimate::EstimateArgs;
pub use prefs::PrefsArgs;
pub use weather::WeatherArgs;
