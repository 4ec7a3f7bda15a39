//! Shared core of the farming assistant's Top Tools panel
//!
//! This crate holds everything that does not touch the DOM or the network
//! directly, so the browser binding (via WASM) and the command-line host run
//! the same estimator and weather-resolution logic.

pub mod endpoints;
pub mod error;
pub mod models;
pub mod render;
pub mod resolver;
pub mod sequence;
pub mod storage;
pub mod types;
pub mod validation;

pub use endpoints::*;
pub use error::*;
pub use models::*;
pub use resolver::*;
pub use sequence::*;
pub use storage::*;
pub use types::*;
pub use validation::*;
