//! Domain models for the Top Tools panel

mod estimator;
mod panel;
mod weather;

pub use estimator::*;
pub use panel::*;
pub use weather::*;
