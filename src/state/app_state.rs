//! Main application state management

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info};

use super::{Counter, SaveRecord, TimerState};
use crate::{
    error::Result,
    services::{save_file, DEFAULT_SAVE_FILE},
    tasks::tick_loop_task,
};

/// Shared timer state plus change notifications for the presentation layer
#[derive(Debug)]
pub struct AppState {
    /// Both counters and their running flags
    pub timer_state: Mutex<TimerState>,
    /// Where "save" and "load" read and write the record
    pub save_path: PathBuf,
    /// Server metadata
    pub start_time: Instant,
    /// Last action tracking
    pub last_action: Mutex<Option<(String, DateTime<Utc>)>>,
    /// Channel for value change notifications
    pub timer_update_tx: watch::Sender<TimerState>,
}

impl AppState {
    /// Create a new AppState with both counters stopped at zero
    pub fn new() -> Self {
        Self::with_save_path(DEFAULT_SAVE_FILE)
    }

    /// Create a new AppState persisting to `save_path`
    pub fn with_save_path(save_path: impl Into<PathBuf>) -> Self {
        let (timer_update_tx, _) = watch::channel(TimerState::new());

        Self {
            timer_state: Mutex::new(TimerState::new()),
            save_path: save_path.into(),
            start_time: Instant::now(),
            last_action: Mutex::new(None),
            timer_update_tx,
        }
    }

    // The state is plain data, so a panic elsewhere cannot leave it torn.
    fn lock(&self) -> MutexGuard<'_, TimerState> {
        self.timer_state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply an update under the lock and notify subscribers
    pub fn update_state<F>(&self, updater: F) -> TimerState
    where
        F: FnOnce(&mut TimerState),
    {
        let mut state = self.lock();
        updater(&mut state);
        let new_state = *state;
        drop(state);

        self.timer_update_tx.send_replace(new_state);
        new_state
    }

    /// Record the name and time of the last user-invoked operation
    pub fn record_action(&self, action: &str) {
        let mut last = self.last_action.lock().unwrap_or_else(PoisonError::into_inner);
        *last = Some((action.to_string(), Utc::now()));
    }

    /// Subscribe to value changes
    pub fn subscribe(&self) -> watch::Receiver<TimerState> {
        self.timer_update_tx.subscribe()
    }

    /// Get current timer state
    pub fn snapshot(&self) -> TimerState {
        *self.lock()
    }

    pub fn set_minutes(&self, new_minutes: i64) -> TimerState {
        self.update_state(|state| state.set_minutes(new_minutes))
    }

    pub fn set_seconds(&self, new_seconds: i64) -> TimerState {
        self.update_state(|state| state.set_seconds(new_seconds))
    }

    /// Set `counter` through its cross-writing setter
    pub fn set(&self, counter: Counter, value: i64) -> TimerState {
        self.update_state(|state| state.set(counter, value))
    }

    /// Add one to `counter`
    pub fn increment(&self, counter: Counter) -> TimerState {
        let current = self.snapshot().value(counter);
        self.set(counter, current.wrapping_add(1))
    }

    /// Subtract one from `counter`
    pub fn decrement(&self, counter: Counter) -> TimerState {
        let current = self.snapshot().value(counter);
        self.set(counter, current.wrapping_sub(1))
    }

    /// Set `counter` back to zero
    pub fn reset(&self, counter: Counter) -> TimerState {
        self.set(counter, 0)
    }

    /// Flip the running flag of `counter` and return the new flag.
    ///
    /// Turning a counter on spawns a tick loop. Turning it off only clears
    /// the flag: the live loop sees it after its current wait, so one more
    /// tick may still land. Toggling off and on again within one interval
    /// leaves the old loop running next to the new one.
    ///
    /// Must be called from within a tokio runtime.
    pub fn toggle(self: &Arc<Self>, counter: Counter) -> bool {
        let state = self.update_state(|state| {
            let running = !state.is_running(counter);
            state.set_running(counter, running);
        });
        let running = state.is_running(counter);

        info!("{} counter {}", counter, if running { "started" } else { "stopped" });
        if running {
            tokio::spawn(tick_loop_task(Arc::clone(self), counter));
        }
        running
    }

    pub fn toggle_seconds_run(self: &Arc<Self>) -> bool {
        self.toggle(Counter::Seconds)
    }

    pub fn toggle_minutes_run(self: &Arc<Self>) -> bool {
        self.toggle(Counter::Minutes)
    }

    /// Snapshot the four fields as a persistable record
    pub fn export_state(&self) -> SaveRecord {
        SaveRecord::from(self.snapshot())
    }

    /// Restore a record.
    ///
    /// Values are written directly, without the cross-writing setters. Each
    /// running flag is set to the inverse of the record and then toggled, so
    /// a counter the record marks as running gets a fresh tick loop. If that
    /// counter is already running here, its old loop keeps going as well.
    pub fn import_state(self: &Arc<Self>, record: SaveRecord) {
        self.update_state(|state| {
            state.minutes = record.minutes;
            state.seconds = record.seconds;
            state.seconds_running = !record.seconds_playing;
        });
        self.toggle_seconds_run();

        self.update_state(|state| state.minutes_running = !record.minutes_playing);
        self.toggle_minutes_run();
    }

    /// Write the current record to `path`
    pub async fn save_to_file(&self, path: &Path) -> Result<SaveRecord> {
        let record = self.export_state();
        save_file::save(path, &record).await?;
        info!("Saved timer state to {}", path.display());
        Ok(record)
    }

    /// Read a record from `path` and import it. The state is untouched on failure.
    pub async fn load_from_file(self: &Arc<Self>, path: &Path) -> Result<SaveRecord> {
        let record = save_file::load(path).await?;
        debug!("Importing {:?}", record);
        self.import_state(record);
        info!("Loaded timer state from {}", path.display());
        Ok(record)
    }

    /// Clear both running flags so live tick loops wind down
    pub fn stop_all(&self) {
        self.update_state(|state| {
            state.minutes_running = false;
            state.seconds_running = false;
        });
        info!("All counters stopped");
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        format_uptime(self.start_time.elapsed().as_secs())
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last = self.last_action.lock().unwrap_or_else(PoisonError::into_inner);
        match last.as_ref() {
            Some((action, time)) => (Some(action.clone()), Some(*time)),
            None => (None, None),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

fn format_uptime(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::sleep;

    #[test]
    fn test_buttons_use_cross_writing_setters() {
        let state = AppState::new();
        state.set_seconds(125);

        let after = state.increment(Counter::Minutes);
        assert_eq!((after.minutes, after.seconds), (3, 185));

        let after = state.decrement(Counter::Seconds);
        assert_eq!((after.minutes, after.seconds), (3, 184));

        let after = state.reset(Counter::Minutes);
        assert_eq!((after.minutes, after.seconds), (0, 4));

        let after = state.reset(Counter::Seconds);
        assert_eq!((after.minutes, after.seconds), (0, 0));
    }

    #[test]
    fn test_subscribers_see_every_change() {
        let state = AppState::new();
        let mut rx = state.subscribe();
        assert!(!rx.has_changed().unwrap());

        state.set_minutes(2);
        assert!(rx.has_changed().unwrap());
        let seen = *rx.borrow_and_update();
        assert_eq!((seen.minutes, seen.seconds), (2, 120));
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_seconds_ticks_and_stops() {
        let state = Arc::new(AppState::new());
        assert!(state.toggle_seconds_run());

        sleep(Duration::from_millis(160)).await;
        let running_value = state.snapshot().seconds;
        assert!(running_value >= 2, "seconds only reached {}", running_value);

        assert!(!state.toggle_seconds_run());
        let stopped_at = state.snapshot().seconds;
        sleep(Duration::from_millis(60)).await;
        let settled = state.snapshot().seconds;
        assert!(settled <= stopped_at + 1);

        sleep(Duration::from_millis(500)).await;
        assert_eq!(state.snapshot().seconds, settled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_minutes_ticks_slower_than_seconds() {
        let state = Arc::new(AppState::new());
        state.toggle_minutes_run();

        sleep(Duration::from_millis(320)).await;
        let snapshot = state.snapshot();
        assert_eq!(snapshot.minutes, 2);
        assert_eq!(snapshot.seconds, 120);
        state.stop_all();
    }

    #[tokio::test(start_paused = true)]
    async fn test_export_import_round_trip() {
        let state = Arc::new(AppState::new());
        state.set_seconds(305);
        let record = state.export_state();

        let fresh = Arc::new(AppState::new());
        fresh.import_state(record);
        let snapshot = fresh.snapshot();
        assert_eq!((snapshot.minutes, snapshot.seconds), (5, 305));
        assert!(!snapshot.seconds_running);
        assert!(!snapshot.minutes_running);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cold_import_of_running_record_starts_loop() {
        let state = Arc::new(AppState::new());
        state.import_state(SaveRecord {
            minutes: 1,
            seconds: 60,
            seconds_playing: true,
            minutes_playing: false,
        });

        let snapshot = state.snapshot();
        assert!(snapshot.seconds_running);
        assert!(!snapshot.minutes_running);

        sleep(Duration::from_millis(120)).await;
        assert!(state.snapshot().seconds >= 61);
        state.stop_all();
    }

    #[tokio::test(start_paused = true)]
    async fn test_both_loops_overwrite_each_others_field() {
        let state = Arc::new(AppState::new());
        state.toggle_seconds_run();
        state.toggle_minutes_run();

        // Seconds alone would reach 6 by now; the minutes ticks at 150ms and
        // 300ms rewrote seconds to remainder + minutes * 60 underneath it.
        sleep(Duration::from_millis(310)).await;
        let snapshot = state.snapshot();
        assert_eq!((snapshot.minutes, snapshot.seconds), (2, 126));
        state.stop_all();
    }

    #[tokio::test(start_paused = true)]
    async fn test_seconds_tick_overwrites_minutes() {
        let state = Arc::new(AppState::new());
        state.update_state(|s| s.minutes = 5);
        state.toggle_seconds_run();

        sleep(Duration::from_millis(60)).await;
        let snapshot = state.snapshot();
        assert_eq!((snapshot.minutes, snapshot.seconds), (0, 1));
        state.stop_all();
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_off_and_on_within_interval_doubles_rate() {
        let state = Arc::new(AppState::new());
        state.toggle_seconds_run();

        sleep(Duration::from_millis(10)).await;
        assert!(!state.toggle_seconds_run());
        assert!(state.toggle_seconds_run());

        // Old loop ticks at 50 and 100, new loop at 60.
        sleep(Duration::from_millis(95)).await;
        assert_eq!(state.snapshot().seconds, 3);
        state.stop_all();
    }

    #[tokio::test(start_paused = true)]
    async fn test_warm_import_of_stopped_record_stops_loop() {
        let state = Arc::new(AppState::new());
        state.toggle_seconds_run();
        sleep(Duration::from_millis(75)).await;

        state.import_state(SaveRecord {
            minutes: 0,
            seconds: 10,
            seconds_playing: false,
            minutes_playing: false,
        });
        assert!(!state.snapshot().seconds_running);

        // The live loop lands its last tick at 100ms, then exits.
        sleep(Duration::from_millis(300)).await;
        assert_eq!(state.snapshot().seconds, 11);
    }

    #[tokio::test(start_paused = true)]
    async fn test_warm_import_of_running_record_doubles_rate() {
        let state = Arc::new(AppState::new());
        state.toggle_seconds_run();
        sleep(Duration::from_millis(75)).await;

        state.import_state(SaveRecord {
            minutes: 0,
            seconds: 10,
            seconds_playing: true,
            minutes_playing: false,
        });
        assert!(state.snapshot().seconds_running);

        // Old loop ticks at 100, 150, 200; the imported one at 125, 175.
        sleep(Duration::from_millis(135)).await;
        assert_eq!(state.snapshot().seconds, 15);
        state.stop_all();
    }

    #[test]
    fn test_last_action_tracking() {
        let state = AppState::new();
        assert_eq!(state.get_last_action(), (None, None));

        state.record_action("minutes-increment");
        let (action, time) = state.get_last_action();
        assert_eq!(action.as_deref(), Some("minutes-increment"));
        assert!(time.is_some());
    }

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(5), "5s");
        assert_eq!(format_uptime(125), "2m 5s");
        assert_eq!(format_uptime(3725), "1h 2m 5s");
    }
}
