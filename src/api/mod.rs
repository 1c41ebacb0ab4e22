//! Remote platform API: session client, wire types, error taxonomy

pub mod client;
pub mod error;
pub mod profile;

pub use client::{Crossing, SessionClient};
pub use error::ApiError;
pub use profile::Profile;
