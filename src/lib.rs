//! A chat bot searching GitHub repositories and APKMirror releases.
//!
//! The fetchers enrich and extract upstream results, the dispatcher routes
//! user commands to them and the presenter renders their answers.

mod infrastructure;
mod interface;
mod model;

pub use infrastructure::*;
pub use interface::*;
pub use model::*;
