//! `onboard`: register, qualify, and join the queue in one go.

use serde_json::{json, Value};
use tracing::info;

use crate::api::types::{str_field, RegisterRequest};
use crate::api::{ArenaClient, ApiError};
use crate::commands::qualify::{play_rounds, QualifyRun};
use crate::config::PlayOptions;

const NOT_PASSED_MESSAGE: &str = "Qualification not passed; not joining queue.";

/// How far onboarding got.
#[derive(Debug, Clone)]
pub enum OnboardOutcome {
    /// Registration answered without an `apiKey`.
    NotRegistered { register: Value },
    /// Qualification start answered without a `qualMatchId`.
    NotStarted { register: Value, start: Value },
    /// Rounds ran out or the bot failed; the queue was not joined.
    NotPassed { register: Value, qualify: QualifyRun },
    /// Qualified and queued.
    Joined {
        register: Value,
        qualify: QualifyRun,
        queue: Value,
    },
}

impl OnboardOutcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            OnboardOutcome::Joined { .. } => 0,
            OnboardOutcome::NotRegistered { .. } => 1,
            OnboardOutcome::NotStarted { .. } => 2,
            OnboardOutcome::NotPassed { .. } => 3,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            OnboardOutcome::NotRegistered { register } => {
                json!({"step": "register", "response": register})
            }
            OnboardOutcome::NotStarted { register, start } => {
                json!({"step": "qualify-start", "register": register, "response": start})
            }
            OnboardOutcome::NotPassed { register, qualify } => json!({
                "register": register,
                "qualify": qualify_report(qualify),
                "queue": null,
                "message": NOT_PASSED_MESSAGE,
            }),
            OnboardOutcome::Joined {
                register,
                qualify,
                queue,
            } => json!({"register": register, "qualify": qualify_report(qualify), "queue": queue}),
        }
    }
}

/// Onboarding echoes the server's last qualStatus verbatim (uppercased), so an
/// unfinished run may report e.g. PENDING rather than IN_PROGRESS.
fn qualify_report(run: &QualifyRun) -> Value {
    json!({
        "qualMatchId": run.qual_match_id,
        "result": run.last_status,
        "rounds": run.rounds,
    })
}

/// Run the onboarding sequence. The API key from registration is used for
/// every later call.
pub async fn run(
    client: &ArenaClient,
    agent: &RegisterRequest,
    opts: &PlayOptions,
) -> Result<OnboardOutcome, ApiError> {
    let register = client.register(agent).await?;
    let Some(key) = str_field(&register, "apiKey").map(str::to_string) else {
        return Ok(OnboardOutcome::NotRegistered { register });
    };
    info!(name = %agent.name, "agent registered");

    let start = client.qualify_start(&key, opts.difficulty).await?;
    let Some(qual_id) = str_field(&start, "qualMatchId").map(str::to_string) else {
        return Ok(OnboardOutcome::NotStarted { register, start });
    };

    let qualify = play_rounds(client, &key, &qual_id, opts.strategy, opts.max_rounds).await?;
    if !qualify.passed() {
        return Ok(OnboardOutcome::NotPassed { register, qualify });
    }

    let queue = client.join_queue(&key).await?;
    Ok(OnboardOutcome::Joined {
        register,
        qualify,
        queue,
    })
}
