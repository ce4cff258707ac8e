use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::debug;

use super::error::{ScheduleError, ScheduleResult};
use super::{Schedule, SchedulePayload, TimerScheduler};

/// In-process [`TimerScheduler`].
///
/// Each schedule gets a tokio task that sleeps until the fire time. If the
/// fire time moved later in the meantime (a keep-alive extension), the task
/// re-sleeps; otherwise it removes the schedule and sends the payload on the
/// fired channel exactly once.
pub struct LocalScheduler {
    schedules: Arc<Mutex<HashMap<String, Schedule>>>,
    fired_tx: mpsc::UnboundedSender<SchedulePayload>,
}

impl LocalScheduler {
    /// Creates the scheduler and the receiving end of its fired-timer channel.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<SchedulePayload>) {
        let (fired_tx, fired_rx) = mpsc::unbounded_channel();
        (
            Self {
                schedules: Arc::new(Mutex::new(HashMap::new())),
                fired_tx,
            },
            fired_rx,
        )
    }

    fn spawn_timer(&self, name: String) {
        let schedules = Arc::clone(&self.schedules);
        let fired_tx = self.fired_tx.clone();

        tokio::spawn(async move {
            loop {
                let deadline = match schedules.lock().get(&name) {
                    Some(schedule) => schedule.fire_at,
                    // Removed out from under us; nothing left to do.
                    None => return,
                };

                let wait = (deadline - Utc::now()).to_std().unwrap_or(Duration::ZERO);
                tokio::time::sleep(wait).await;

                let payload = {
                    let mut schedules = schedules.lock();
                    let due = match schedules.get(&name) {
                        None => return,
                        Some(schedule) => schedule.fire_at <= Utc::now(),
                    };
                    if !due {
                        // Deadline was extended while we slept; sleep again.
                        continue;
                    }
                    schedules.remove(&name).map(|s| s.payload)
                };

                if let Some(payload) = payload {
                    debug!(schedule = %name, endpoint = %payload.endpoint_name, "schedule fired");
                    // Receiver gone means the server is shutting down.
                    let _ = fired_tx.send(payload);
                }
                return;
            }
        });
    }
}

#[async_trait]
impl TimerScheduler for LocalScheduler {
    async fn create(&self, schedule: Schedule) -> ScheduleResult<()> {
        let name = schedule.name.clone();
        {
            let mut schedules = self.schedules.lock();
            if schedules.contains_key(&name) {
                return Err(ScheduleError::AlreadyExists { name });
            }
            schedules.insert(name.clone(), schedule);
        }
        self.spawn_timer(name);
        Ok(())
    }

    async fn get(&self, name: &str) -> ScheduleResult<Schedule> {
        self.schedules
            .lock()
            .get(name)
            .cloned()
            .ok_or_else(|| ScheduleError::NotFound {
                name: name.to_string(),
            })
    }

    async fn update_fire_at(&self, name: &str, fire_at: DateTime<Utc>) -> ScheduleResult<()> {
        let mut schedules = self.schedules.lock();
        match schedules.get_mut(name) {
            Some(schedule) => {
                schedule.fire_at = fire_at;
                Ok(())
            }
            None => Err(ScheduleError::NotFound {
                name: name.to_string(),
            }),
        }
    }
}
