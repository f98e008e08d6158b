//! `watch-lobby`: poll the public queue and match list until interrupted.

use serde::Serialize;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::debug;

use crate::api::{ArenaClient, ApiError};
use crate::interrupt;

/// Number of finished matches kept in a snapshot.
const RECENT_LIMIT: usize = 5;

/// One poll of the lobby.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LobbySnapshot {
    /// Unix seconds at which the snapshot was taken.
    pub ts: i64,
    pub queue_total: u64,
    pub queue: Vec<Value>,
    pub running_matches: Vec<Value>,
    pub recent_matches: Vec<Value>,
}

impl LobbySnapshot {
    /// Build a snapshot from the `GET /api/queue` and `GET /api/matches`
    /// responses. Missing or mistyped fields count as empty.
    pub fn from_responses(ts: i64, queue: &Value, matches: &Value) -> Self {
        let entries = array_field(queue, "queue");
        let queue_total = queue
            .get("total")
            .and_then(Value::as_u64)
            .unwrap_or(entries.len() as u64);

        let all = array_field(matches, "matches");
        let with_status = |status: &str| {
            all.iter()
                .filter(|m| m.get("status").and_then(Value::as_str) == Some(status))
                .cloned()
                .collect::<Vec<_>>()
        };

        let mut recent = with_status("FINISHED");
        recent.truncate(RECENT_LIMIT);

        Self {
            ts,
            queue_total,
            queue: entries,
            running_matches: with_status("RUNNING"),
            recent_matches: recent,
        }
    }
}

fn array_field(value: &Value, key: &str) -> Vec<Value> {
    value
        .get(key)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

/// Fetch the queue and match list once.
pub async fn snapshot(client: &ArenaClient) -> Result<LobbySnapshot, ApiError> {
    let queue = client.queue().await?;
    let matches = client.matches().await?;
    Ok(LobbySnapshot::from_responses(
        chrono::Utc::now().timestamp(),
        &queue,
        &matches,
    ))
}

/// Poll every `interval`, handing each snapshot to `on_snapshot`.
///
/// Returns after one snapshot when `once` is set, otherwise once `stop` is
/// raised (Ctrl+C). Request errors end the loop.
pub async fn watch<F>(
    client: &ArenaClient,
    interval: Duration,
    once: bool,
    stop: &AtomicBool,
    mut on_snapshot: F,
) -> Result<(), ApiError>
where
    F: FnMut(&LobbySnapshot),
{
    loop {
        if stop.load(Ordering::SeqCst) {
            break;
        }
        let snap = snapshot(client).await?;
        on_snapshot(&snap);
        if once {
            break;
        }
        if interrupt::sleep_unless(stop, interval).await {
            debug!("lobby watch interrupted");
            break;
        }
    }
    Ok(())
}
