use crate::config::Config;
use crate::store::EmployeeStore;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: EmployeeStore,
    pub config: Arc<Config>,
}
