//! Application state management
//!
//! State shared through a Dioxus context provider set up in [`crate::app::App`].

use std::sync::Arc;

use dioxus::prelude::*;

use bloodbond_core::api::BackendClient;
use bloodbond_core::media::ImgbbClient;
use bloodbond_core::session::Session;

use crate::services::{AuthService, Services};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// Transient message shown above the page
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

/// Global application state
#[derive(Clone, Copy)]
pub struct AppState {
    /// Identity of the current user; starts out loading
    pub session: Signal<Session>,
    /// Remote clients resolved from the client configuration
    pub services: Signal<Services>,
    pub toast: Signal<Option<Toast>>,
}

impl AppState {
    pub fn backend(&self) -> Option<Arc<BackendClient>> {
        self.services.read().backend.clone()
    }

    pub fn auth(&self) -> Option<Arc<AuthService>> {
        self.services.read().auth.clone()
    }

    pub fn images(&self) -> Option<Arc<ImgbbClient>> {
        self.services.read().images.clone()
    }

    pub fn notify_success(&mut self, message: impl Into<String>) {
        self.toast.set(Some(Toast {
            kind: ToastKind::Success,
            message: message.into(),
        }));
    }

    pub fn notify_error(&mut self, message: impl Into<String>) {
        self.toast.set(Some(Toast {
            kind: ToastKind::Error,
            message: message.into(),
        }));
    }
}
