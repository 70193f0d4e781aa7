//! Data models for Bloodbond

mod region;
mod user;

pub use region::{District, Division, RegionId, Upazila};
pub use user::{BloodGroup, NewUser, Role, UserPatch, UserRecord};
