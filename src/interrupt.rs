//! SIGINT handling for the long-running `watch-lobby` loop.

use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tokio::time::{sleep, Instant};

/// Global interrupt flag, registered once with SIGINT.
static INTERRUPT_FLAG: OnceLock<Arc<AtomicBool>> = OnceLock::new();

/// How often a sleeping poll loop checks the flag.
const POLL_SLICE: Duration = Duration::from_millis(100);

/// Register the SIGINT handler and return the flag it sets. Safe to call
/// multiple times (only the first call registers; later calls hand back the
/// same flag).
pub fn register_signal_handler() -> Result<Arc<AtomicBool>> {
    if let Some(flag) = INTERRUPT_FLAG.get() {
        return Ok(Arc::clone(flag));
    }
    let flag = INTERRUPT_FLAG.get_or_init(|| Arc::new(AtomicBool::new(false)));

    // Second Ctrl+C while the first is still being handled: hard exit.
    // Registered before the flag handler so it sees the previous value.
    let flag_clone = Arc::clone(flag);
    unsafe {
        signal_hook::low_level::register(signal_hook::consts::SIGINT, move || {
            if flag_clone.load(Ordering::SeqCst) {
                std::process::exit(130);
            }
        })?;
    }

    signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(flag))?;

    Ok(Arc::clone(flag))
}

/// Sleep in short slices, returning early once `flag` is set.
///
/// Returns `true` when the sleep was cut short. A duration too large to land
/// on a deadline sleeps until the flag is set.
pub async fn sleep_unless(flag: &AtomicBool, duration: Duration) -> bool {
    let deadline = Instant::now().checked_add(duration);
    loop {
        if flag.load(Ordering::SeqCst) {
            return true;
        }
        let slice = match deadline {
            Some(deadline) => {
                let now = Instant::now();
                if now >= deadline {
                    return false;
                }
                POLL_SLICE.min(deadline - now)
            }
            None => POLL_SLICE,
        };
        sleep(slice).await;
    }
}
