use std::sync::Arc;

use crate::lifecycle::LifecycleCoordinator;

#[derive(Clone)]
pub struct HandlerState {
    pub coordinator: Arc<LifecycleCoordinator>,
}

impl HandlerState {
    pub fn new(coordinator: Arc<LifecycleCoordinator>) -> Self {
        Self { coordinator }
    }
}
