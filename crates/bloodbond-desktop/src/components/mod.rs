//! UI Components
//!
//! Layout pieces and widgets shared by the views.

mod footer;
mod layout;
mod loader;
mod location_select;
mod navbar;
mod private_route;
mod toast;

pub use footer::Footer;
pub use layout::MainLayout;
pub use loader::Loader;
pub use location_select::LocationSelect;
pub use navbar::Navbar;
pub use private_route::PrivateRoute;
pub use toast::ToastHost;
