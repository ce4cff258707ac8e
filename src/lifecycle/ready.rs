use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use crate::schedule::{Schedule, SchedulePayload};
use crate::store::EndpointStatus;

use super::coordinator::LifecycleCoordinator;
use super::error::LifecycleResult;

impl LifecycleCoordinator {
    /// Reacts to the provisioner's readiness event for `endpoint_name`.
    ///
    /// Marks the record in service, drains the subscriber list (the single
    /// at-most-once notification point per creation cycle), fans out
    /// notifications, and arms the idle shutdown timer.
    #[instrument(skip(self), fields(model_id = %self.config.model_id))]
    pub async fn handle_ready(&self, endpoint_name: &str) -> LifecycleResult<()> {
        let model_id = &self.config.model_id;

        let record = self.store.get(model_id).await?;
        if record.endpoint_name.as_deref() != Some(endpoint_name) {
            // Single-model system: the record is the only deployment there
            // is, so proceed against it even on a name mismatch.
            warn!(
                event_endpoint = endpoint_name,
                record_endpoint = record.endpoint_name.as_deref().unwrap_or("<none>"),
                "readiness event endpoint does not match record"
            );
        }

        self.store
            .set_status(model_id, EndpointStatus::InService)
            .await?;
        info!(endpoint = endpoint_name, "endpoint is now in service");

        let subscribers = self.store.take_subscribers(model_id).await?;
        if subscribers.is_empty() {
            debug!("no subscribers to notify");
        } else {
            info!(count = subscribers.len(), "notifying subscribers");
        }

        // Per-destination sends are independent; one failure never blocks
        // the rest or fails the handler.
        for subscriber in &subscribers {
            let message = self.ready_message(&subscriber.name);
            if let Err(e) = self.notifier.send(&subscriber.phone, &message).await {
                warn!(phone = %subscriber.phone, error = %e, "failed to notify subscriber");
            }
        }

        let schedule_name = Schedule::shutdown_name(endpoint_name);
        let fire_at = Utc::now() + chrono::Duration::seconds(self.config.idle_window.as_secs() as i64);
        self.scheduler
            .create(Schedule {
                name: schedule_name.clone(),
                fire_at,
                payload: SchedulePayload {
                    endpoint_name: endpoint_name.to_string(),
                },
            })
            .await?;
        self.store
            .set_schedule(model_id, Some(&schedule_name))
            .await?;
        info!(schedule = %schedule_name, fire_at = %fire_at, "armed idle shutdown timer");

        Ok(())
    }

    fn ready_message(&self, name: &str) -> String {
        format!(
            "Hi {name}. The sentiment analysis model is now available for use for the next {} minutes here: {}",
            self.config.idle_window_minutes(),
            self.config.app_url
        )
    }
}
