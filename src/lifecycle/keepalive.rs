use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use crate::store::EndpointStatus;

use super::coordinator::LifecycleCoordinator;
use super::error::LifecycleResult;
use super::types::{ExtendOutcome, KeepAliveCheck};

impl LifecycleCoordinator {
    /// Evaluates a usage signal (status poll or inference call).
    ///
    /// Reports whether the endpoint is running and, while it is, checks the
    /// idle timer's remaining budget. The check itself is cheap and
    /// synchronous; the extension it may trigger is fire-and-forget and
    /// never delays the caller's response.
    #[instrument(skip(self), fields(model_id = %self.config.model_id))]
    pub async fn check_usage(&self) -> LifecycleResult<KeepAliveCheck> {
        let record = self.store.get(&self.config.model_id).await?;
        let running = record.status == EndpointStatus::InService;

        let mut extension_triggered = false;
        if running {
            if let (Some(schedule_name), Some(endpoint_name)) =
                (&record.schedule_name, &record.endpoint_name)
            {
                extension_triggered = self.maybe_extend(schedule_name, endpoint_name).await;
            }
        }

        Ok(KeepAliveCheck {
            running,
            extension_triggered,
        })
    }

    /// Hot-path budget check. Dispatches an asynchronous extension when less
    /// than the threshold remains; returns whether one was dispatched.
    pub(super) async fn maybe_extend(&self, schedule_name: &str, endpoint_name: &str) -> bool {
        match self.scheduler.get(schedule_name).await {
            Ok(schedule) => {
                let remaining = schedule.fire_at - Utc::now();
                debug!(
                    schedule = schedule_name,
                    minutes_remaining = remaining.num_minutes(),
                    "time until shutdown"
                );

                let threshold =
                    chrono::Duration::seconds(self.config.extend_threshold.as_secs() as i64);
                if remaining >= threshold {
                    return false;
                }

                info!(
                    schedule = schedule_name,
                    "shutdown timer close to expiring, dispatching extension"
                );
                let this = self.clone();
                let schedule_name = schedule_name.to_string();
                let endpoint_name = endpoint_name.to_string();
                tokio::spawn(async move {
                    if let Err(e) = this.extend_timer(&schedule_name, &endpoint_name).await {
                        warn!(schedule = %schedule_name, error = %e, "timer extension failed");
                    }
                });
                true
            }
            Err(e) if e.is_not_found() => {
                // Already fired or deleted; shutdown is in flight. Benign.
                debug!(schedule = schedule_name, "schedule no longer exists");
                false
            }
            Err(e) => {
                // Keep-alive must never fail the usage signal itself.
                warn!(schedule = schedule_name, error = %e, "could not read schedule");
                false
            }
        }
    }

    /// Re-arms the idle timer a full window out from now.
    ///
    /// Idempotent: extending an already-extended timer just moves the fire
    /// time again, and a schedule that already fired is a no-op, since
    /// shutdown has effectively happened.
    #[instrument(skip(self))]
    pub async fn extend_timer(
        &self,
        schedule_name: &str,
        endpoint_name: &str,
    ) -> LifecycleResult<ExtendOutcome> {
        let fire_at = Utc::now() + chrono::Duration::seconds(self.config.idle_window.as_secs() as i64);
        match self.scheduler.update_fire_at(schedule_name, fire_at).await {
            Ok(()) => {
                info!(
                    schedule = schedule_name,
                    endpoint = endpoint_name,
                    fire_at = %fire_at,
                    "extended shutdown timer"
                );
                Ok(ExtendOutcome::Extended { fire_at })
            }
            Err(e) if e.is_not_found() => {
                info!(
                    schedule = schedule_name,
                    "schedule not found, it may have already executed"
                );
                Ok(ExtendOutcome::ScheduleGone)
            }
            Err(e) => Err(e.into()),
        }
    }
}
