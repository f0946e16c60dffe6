use std::sync::Arc;

use fridgechef_core::ai::KitchenService;

/// Application state shared across all handlers.
///
/// The AI transport handle is constructed once at startup and injected into
/// the service; handlers never build their own clients.
pub struct AppState {
    pub service: KitchenService,
}

pub type SharedState = Arc<AppState>;
