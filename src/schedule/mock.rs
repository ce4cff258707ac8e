use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use super::error::{ScheduleError, ScheduleResult};
use super::{Schedule, SchedulePayload, TimerScheduler};

/// Inspectable [`TimerScheduler`] that never actually fires on its own.
///
/// Tests arm schedules, read back fire times, and simulate firing via
/// [`MockScheduler::fire`].
#[derive(Default)]
pub struct MockScheduler {
    schedules: Mutex<HashMap<String, Schedule>>,
}

impl MockScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.schedules.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.lock().is_empty()
    }

    /// Removes the schedule and returns its payload, as the real scheduler
    /// does when the timer fires.
    pub fn fire(&self, name: &str) -> Option<SchedulePayload> {
        self.schedules.lock().remove(name).map(|s| s.payload)
    }
}

#[async_trait]
impl TimerScheduler for MockScheduler {
    async fn create(&self, schedule: Schedule) -> ScheduleResult<()> {
        let mut schedules = self.schedules.lock();
        if schedules.contains_key(&schedule.name) {
            return Err(ScheduleError::AlreadyExists {
                name: schedule.name,
            });
        }
        schedules.insert(schedule.name.clone(), schedule);
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
