//! bloodbond-core - Core library for Bloodbond
//!
//! This crate contains the shared models, the backend, identity and image
//! host clients, and the form and session state used by the desktop app.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod location;
pub mod media;
pub mod models;
pub mod profile;
pub mod routing;
pub mod session;
pub mod signup;
pub mod util;

#[cfg(test)]
mod test_support;

pub use error::{Error, Result};
pub use models::{BloodGroup, RegionId, UserRecord};
