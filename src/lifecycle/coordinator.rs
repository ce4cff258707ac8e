use std::sync::Arc;

use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::notify::Notifier;
use crate::provision::{InferenceClient, Provisioner};
use crate::schedule::TimerScheduler;
use crate::store::{EndpointStatus, StateError, StateStore, Subscriber};

use super::config::LifecycleConfig;
use super::error::{LifecycleError, LifecycleResult};
use super::types::StartOutcome;

/// Owns the start-request protocol and status transitions.
///
/// Stateless across invocations: every operation re-reads the service record,
/// so any number of coordinator clones (or processes, given a shared store)
/// behave as one.
#[derive(Clone)]
pub struct LifecycleCoordinator {
    pub(super) store: Arc<dyn StateStore>,
    pub(super) provisioner: Arc<dyn Provisioner>,
    pub(super) scheduler: Arc<dyn TimerScheduler>,
    pub(super) notifier: Arc<dyn Notifier>,
    pub(super) inference: Arc<dyn InferenceClient>,
    pub(super) config: LifecycleConfig,
}

impl LifecycleCoordinator {
    pub fn new(
        config: LifecycleConfig,
        store: Arc<dyn StateStore>,
        provisioner: Arc<dyn Provisioner>,
        scheduler: Arc<dyn TimerScheduler>,
        notifier: Arc<dyn Notifier>,
        inference: Arc<dyn InferenceClient>,
    ) -> Self {
        Self {
            store,
            provisioner,
            scheduler,
            notifier,
            inference,
            config,
        }
    }

    /// Returns the active config.
    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    /// Handles a start request from `name` reachable at `phone`.
    ///
    /// State machine: `InService` returns immediately; `Creating` subscribes;
    /// `Stopping` is unavailable; `Stopped` races a conditional
    /// `Stopped -> Creating` transition. The CAS winner deploys the endpoint
    /// and seeds the subscriber list; a loser takes the single-shot fallback
    /// into the subscribe branch. The conflict never surfaces to the caller.
    #[instrument(skip(self), fields(model_id = %self.config.model_id))]
    pub async fn request_start(&self, name: &str, phone: &str) -> LifecycleResult<StartOutcome> {
        let model_id = &self.config.model_id;
        let record = self.store.get(model_id).await?;
        info!(status = %record.status, "start requested");

        match record.status {
            EndpointStatus::InService => Ok(StartOutcome::AlreadyRunning),
            EndpointStatus::Creating => {
                self.subscribe(name, phone).await?;
                Ok(StartOutcome::Subscribed)
            }
            EndpointStatus::Stopping => Ok(StartOutcome::Unavailable {
                status: record.status,
            }),
            EndpointStatus::Stopped => {
                match self
                    .store
                    .transition_status(model_id, EndpointStatus::Stopped, EndpointStatus::Creating)
                    .await
                {
                    Ok(()) => self.deploy(name, phone).await,
                    Err(StateError::ConditionFailed { actual, .. }) => {
                        // Another request won the race; fall back to subscribing.
                        info!(status = %actual, "lost start race, subscribing instead");
                        self.subscribe(name, phone).await?;
                        Ok(StartOutcome::Subscribed)
                    }
                    Err(e) => Err(e.into()),
                }
            }
        }
    }

    /// CAS-winner path: deploy a fresh endpoint and seed the record.
    async fn deploy(&self, name: &str, phone: &str) -> LifecycleResult<StartOutcome> {
        let model_id = &self.config.model_id;
        let endpoint_name = format!("{}-{}", self.config.endpoint_prefix, Uuid::new_v4());
        info!(endpoint = %endpoint_name, "won start race, deploying endpoint");

        if let Err(e) = self.provisioner.create_endpoint(&endpoint_name).await {
            // Roll the status back so the next request is not wedged behind a
            // CREATING record with no deployment behind it.
            error!(endpoint = %endpoint_name, error = %e, "endpoint deployment failed");
            if let Err(reset_err) = self
                .store
                .set_status(model_id, EndpointStatus::Stopped)
                .await
            {
                error!(error = %reset_err, "failed to roll status back after deploy failure");
            }
            return Err(e.into());
        }

        // Overwrites any stale subscriber list from the previous cycle.
        self.store
            .set_endpoint(model_id, &endpoint_name, vec![Subscriber::new(name, phone)])
            .await?;

        Ok(StartOutcome::DeploymentStarted { endpoint_name })
    }

    async fn subscribe(&self, name: &str, phone: &str) -> LifecycleResult<()> {
        self.store
            .push_subscriber(&self.config.model_id, Subscriber::new(name, phone))
            .await?;
        Ok(())
    }

    /// Forwards an inference call to the live endpoint.
    ///
    /// Performs the keep-alive check as a side effect before forwarding, the
    /// same as a status poll. Fails with [`LifecycleError::NotAvailable`]
    /// unless the endpoint is in service.
    #[instrument(skip(self, text), fields(model_id = %self.config.model_id))]
    pub async fn invoke(&self, text: &str) -> LifecycleResult<serde_json::Value> {
        let record = self.store.get(&self.config.model_id).await?;
        if record.status != EndpointStatus::InService {
            return Err(LifecycleError::NotAvailable);
        }
        let Some(endpoint_name) = record.endpoint_name else {
            warn!("record is IN_SERVICE but has no endpoint name");
            return Err(LifecycleError::NotAvailable);
        };

        if let Some(schedule_name) = &record.schedule_name {
            self.maybe_extend(schedule_name, &endpoint_name).await;
        }

        Ok(self.inference.invoke(&endpoint_name, text).await?)
    }
}
