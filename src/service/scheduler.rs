use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::models::usermodel::CheckInFrequency;

/// Grace period between deciding a prompt is due and surfacing it.
pub const PROMPT_DELAY: Duration = Duration::from_secs(3);

/// A check-in is due when none was ever recorded, or when more time than
/// the preferred interval has passed since the last one.
pub fn is_checkin_due(
    last_checkin_ms: Option<i64>,
    frequency: CheckInFrequency,
    now_ms: i64,
) -> bool {
    match last_checkin_ms {
        None => true,
        Some(last) => now_ms - last > frequency.interval_ms(),
    }
}

/// Owns at most one armed prompt at a time. Arming again supersedes the
/// previous prompt; logout cancels it, so a stale session never prompts.
#[derive(Debug)]
pub struct CheckInScheduler {
    pending: Mutex<Option<JoinHandle<()>>>,
    fired: Arc<AtomicBool>,
}

impl CheckInScheduler {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(None),
            fired: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Re-evaluates the cadence for a freshly started student session and
    /// arms the one-shot prompt when a check-in is overdue.
    pub async fn on_session_start(
        &self,
        last_checkin_ms: Option<i64>,
        frequency: CheckInFrequency,
    ) {
        self.cancel().await;

        let now_ms = Utc::now().timestamp_millis();
        if !is_checkin_due(last_checkin_ms, frequency, now_ms) {
            return;
        }

        let fired = Arc::clone(&self.fired);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(PROMPT_DELAY).await;
            fired.store(true, Ordering::SeqCst);
            tracing::debug!("check-in prompt fired");
        });

        let mut pending = self.pending.lock().await;
        *pending = Some(handle);
    }

    /// Aborts a not-yet-fired prompt and clears a fired one.
    pub async fn cancel(&self) {
        let mut pending = self.pending.lock().await;
        if let Some(handle) = pending.take() {
            handle.abort();
        }
        self.fired.store(false, Ordering::SeqCst);
    }

    pub fn prompt_pending(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }
}

impl Default for CheckInScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR_MS: i64 = 60 * 60 * 1000;

    #[test]
    fn first_ever_checkin_is_always_due() {
        assert!(is_checkin_due(None, CheckInFrequency::Daily, 0));
    }

    #[test]
    fn daily_cadence_is_due_after_25_hours() {
        let now = 100 * HOUR_MS;
        assert!(is_checkin_due(
            Some(now - 25 * HOUR_MS),
            CheckInFrequency::Daily,
            now
        ));
    }

    #[test]
    fn daily_cadence_is_not_due_after_1_hour() {
        let now = 100 * HOUR_MS;
        assert!(!is_checkin_due(
            Some(now - HOUR_MS),
            CheckInFrequency::Daily,
            now
        ));
    }

    #[test]
    fn exactly_at_the_interval_is_not_due_yet() {
        let now = 1000 * HOUR_MS;
        assert!(!is_checkin_due(
            Some(now - 24 * HOUR_MS),
            CheckInFrequency::Daily,
            now
        ));
    }

    #[test]
    fn weekly_and_biweekly_intervals() {
        let now = 1000 * HOUR_MS;
        assert!(!is_checkin_due(
            Some(now - 167 * HOUR_MS),
            CheckInFrequency::Weekly,
            now
        ));
        assert!(is_checkin_due(
            Some(now - 169 * HOUR_MS),
            CheckInFrequency::Weekly,
            now
        ));
        assert!(!is_checkin_due(
            Some(now - 335 * HOUR_MS),
            CheckInFrequency::BiWeekly,
            now
        ));
        assert!(is_checkin_due(
            Some(now - 337 * HOUR_MS),
            CheckInFrequency::BiWeekly,
            now
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn prompt_fires_after_the_delay_when_due() {
        let scheduler = CheckInScheduler::new();
        scheduler
            .on_session_start(None, CheckInFrequency::Weekly)
            .await;
        assert!(!scheduler.prompt_pending());

        tokio::time::sleep(PROMPT_DELAY + Duration::from_millis(50)).await;
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
        assert!(scheduler.prompt_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn recent_checkin_arms_nothing() {
        let scheduler = CheckInScheduler::new();
        let one_hour_ago = Utc::now().timestamp_millis() - HOUR_MS;
        scheduler
            .on_session_start(Some(one_hour_ago), CheckInFrequency::Daily)
            .await;

        tokio::time::sleep(PROMPT_DELAY + Duration::from_millis(50)).await;
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
        assert!(!scheduler.prompt_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_an_armed_prompt() {
        let scheduler = CheckInScheduler::new();
        scheduler
            .on_session_start(None, CheckInFrequency::Daily)
            .await;
        scheduler.cancel().await;

        tokio::time::sleep(PROMPT_DELAY + Duration::from_millis(50)).await;
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
        assert!(!scheduler.prompt_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn superseding_session_clears_a_fired_prompt() {
        let scheduler = CheckInScheduler::new();
        scheduler
            .on_session_start(None, CheckInFrequency::Daily)
            .await;
        tokio::time::sleep(PROMPT_DELAY + Duration::from_millis(50)).await;
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
        assert!(scheduler.prompt_pending());

        let just_now = Utc::now().timestamp_millis();
        scheduler
            .on_session_start(Some(just_now), CheckInFrequency::Daily)
            .await;
        assert!(!scheduler.prompt_pending());
    }
}
