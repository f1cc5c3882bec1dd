//! Platform detection and task spawning helpers.

use std::future::Future;

use dioxus::prelude::{spawn, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Web,
    Desktop,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::Web
        } else {
            Self::Desktop
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Platform::Web => "web",
            Platform::Desktop => "desktop",
        }
    }
}

/// Run a future on the current component's scope without awaiting it.
///
/// The task belongs to the calling component and is dropped when that
/// component unmounts, so it never writes to signals that are already gone.
pub fn spawn_future<F>(future: F) -> Task
where
    F: Future<Output = ()> + 'static,
{
    spawn(future)
}
