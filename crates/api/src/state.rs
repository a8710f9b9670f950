use relay_core::lifecycle::JobLifecycleService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Job lifecycle orchestration (engine + store).
    pub service: JobLifecycleService,
}
