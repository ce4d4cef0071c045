//! Counter tick loop background task

use std::sync::Arc;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::state::{AppState, Counter};

/// Advance `counter` by one every tick interval while its running flag is set.
///
/// The flag is checked before each wait, never during it, so a stop request
/// is observed with up to one interval of latency and one final tick. The
/// current value is read and written back in two separate lock sections;
/// when both loops run, each may overwrite the field the other cross-wrote.
pub async fn tick_loop_task(state: Arc<AppState>, counter: Counter) {
    let interval = counter.tick_interval();
    info!("Starting {} tick loop ({}ms)", counter, interval.as_millis());

    while state.snapshot().is_running(counter) {
        sleep(interval).await;

        let next = state.snapshot().value(counter).wrapping_add(1);
        state.set(counter, next);
        debug!("{} ticked to {}", counter, next);
    }

    info!("{} tick loop stopped", counter);
}
