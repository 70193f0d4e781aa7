//! Routed pages

mod donate;
mod home;
mod login;
mod not_found;
mod profile;
mod signup;

pub use donate::DonateNow;
pub use home::{Home, HomeAlias};
pub use login::Login;
pub use not_found::NotFound;
pub use profile::Profile;
pub use signup::Signup;
