//! crosslike - automation client library
//!
//! A small bot for a dating-platform API:
//! - OAuth assertion exchange for a bearer token
//! - Crossings listing (users crossed paths with, plus a crossing count)
//! - A per-candidate decision rule (like / dislike / no action)
//! - A local JSON file of already-liked users
//!
//! # Example
//!
//! ```ignore
//! use crosslike::bot;
//! use crosslike::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let summary = bot::run_once(&config, None, None).await?;
//!     println!("{}", summary);
//!     Ok(())
//! }
//! ```

// Core modules (order matters for cross-module dependencies)
pub mod api;
pub mod store; // Must come before engine since engine depends on the store
pub mod engine;
pub mod bot;
pub mod stats;
pub mod config;
pub mod cli;

// Re-export commonly used types for convenience
pub use api::{
    client::SessionClient,
    error::ApiError,
    profile::Profile,
};

pub use store::LikeStore;

pub use engine::Decision;

pub use config::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
