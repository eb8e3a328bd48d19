//! kask - Krew launcher for the Kui graphical kubectl plugin
//!
//! Resolves a build-pinned Kui version to a ready local installation
//! (downloading and extracting the platform archive on first use), then
//! hands off execution to the extracted binary.

pub mod cache;
pub mod cli;
pub mod config;
pub mod dist;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod launch;
pub mod runner;
pub mod version;

pub use error::{KaskError, KaskResult};
