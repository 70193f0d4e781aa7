//! Application services
//!
//! Remote clients built once from the client configuration and shared
//! through [`crate::state::AppState`].

mod image_picker;
mod session_store;

use std::sync::Arc;

use bloodbond_core::api::BackendClient;
use bloodbond_core::auth::FirebaseAuthClient;
use bloodbond_core::config::ClientConfig;
use bloodbond_core::media::ImgbbClient;

pub use image_picker::pick_image;
pub use session_store::KeyringSessionStore;

pub type AuthService = FirebaseAuthClient<KeyringSessionStore>;

/// Clients that could be configured; a missing one disables its feature.
#[derive(Clone, Default)]
pub struct Services {
    pub backend: Option<Arc<BackendClient>>,
    pub auth: Option<Arc<AuthService>>,
    pub images: Option<Arc<ImgbbClient>>,
}

impl Services {
    pub fn from_config(config: &ClientConfig) -> Self {
        let backend = config
            .api_base_url()
            .and_then(BackendClient::new)
            .map_err(|error| tracing::warn!("Backend API unavailable: {}", error))
            .ok();

        let auth = config
            .identity_endpoints()
            .map_err(|error| error.to_string())
            .and_then(|endpoints| {
                FirebaseAuthClient::new(&endpoints, KeyringSessionStore::default())
                    .map_err(|error| error.to_string())
            })
            .map_err(|error| tracing::warn!("Identity provider unavailable: {}", error))
            .ok();

        let images = config
            .image_host_endpoint()
            .and_then(|endpoint| ImgbbClient::new(&endpoint))
            .map_err(|error| tracing::warn!("Image host unavailable: {}", error))
            .ok();

        Self {
            backend: backend.map(Arc::new),
            auth: auth.map(Arc::new),
            images: images.map(Arc::new),
        }
    }
}
