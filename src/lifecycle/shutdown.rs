use tracing::{info, instrument};

use crate::store::EndpointStatus;

use super::coordinator::LifecycleCoordinator;
use super::error::LifecycleResult;

impl LifecycleCoordinator {
    /// Reacts to the fired idle timer: tears the endpoint down and returns
    /// the record to `Stopped`.
    ///
    /// The sole writer back to `Stopped`, and safe to run more than once for
    /// the same endpoint: a second invocation finds the endpoint already
    /// gone, treats that as success, and resets state again.
    #[instrument(skip(self), fields(model_id = %self.config.model_id))]
    pub async fn handle_shutdown(&self, endpoint_name: &str) -> LifecycleResult<()> {
        let model_id = &self.config.model_id;
        info!(endpoint = endpoint_name, "shutdown triggered");

        self.store
            .set_status(model_id, EndpointStatus::Stopping)
            .await?;

        match self.provisioner.delete_endpoint(endpoint_name).await {
            Ok(()) => info!(endpoint = endpoint_name, "endpoint deletion initiated"),
            Err(e) if e.is_not_found() => {
                info!(
                    endpoint = endpoint_name,
                    "endpoint not found, it may have already been deleted"
                );
            }
            Err(e) => return Err(e.into()),
        }

        self.store.reset(model_id).await?;
        info!("service record reset to STOPPED");
        Ok(())
    }
}
