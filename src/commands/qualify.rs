//! Qualification workflow: start a qualification match and play its rounds.

use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::api::types::{raw_qual_status, str_field, QualStatus};
use crate::api::{ArenaClient, ApiError};
use crate::config::PlayOptions;
use crate::strategy::{choose_move, Strategy};

/// Rounds played in one qualification match.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualifyRun {
    pub qual_match_id: String,
    pub result: QualStatus,
    /// Last `qualStatus` exactly as the server sent it, uppercased.
    #[serde(skip)]
    pub last_status: String,
    pub rounds: Vec<Value>,
}

impl QualifyRun {
    pub fn passed(&self) -> bool {
        self.result == QualStatus::Passed
    }
}

/// Result of `qual-auto`.
#[derive(Debug, Clone)]
pub enum QualAutoOutcome {
    /// The start response carried no `qualMatchId`.
    NotStarted { start: Value },
    /// Rounds were played; `result` may still be IN_PROGRESS.
    Played(QualifyRun),
}

impl QualAutoOutcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            QualAutoOutcome::NotStarted { .. } => 1,
            QualAutoOutcome::Played(run) => match run.result {
                QualStatus::Passed => 0,
                QualStatus::Failed => 2,
                QualStatus::InProgress => 3,
            },
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            QualAutoOutcome::NotStarted { start } => {
                json!({"step": "qualify-start", "response": start})
            }
            QualAutoOutcome::Played(run) => json!(run),
        }
    }
}

/// Play rounds `1..=max_rounds`, stopping at the first PASSED/FAILED.
pub async fn play_rounds(
    client: &ArenaClient,
    key: &str,
    qual_id: &str,
    strategy: Strategy,
    max_rounds: u32,
) -> Result<QualifyRun, ApiError> {
    let mut rounds = Vec::new();
    let mut result = QualStatus::InProgress;
    let mut last_status = String::from("IN_PROGRESS");

    for round_no in 1..=max_rounds {
        let mv = choose_move(strategy, round_no);
        debug!(round_no, %mv, "submitting qualification round");
        let response = client.qualify_round(key, qual_id, round_no, mv).await?;
        last_status = raw_qual_status(&response);
        result = QualStatus::from_round(&response);
        rounds.push(response);
        if result.is_final() {
            break;
        }
    }

    info!(qual_id, ?result, rounds = rounds.len(), "qualification finished");
    Ok(QualifyRun {
        qual_match_id: qual_id.to_string(),
        result,
        last_status,
        rounds,
    })
}

/// `qual-auto`: start qualification and auto-play it.
pub async fn auto(
    client: &ArenaClient,
    key: &str,
    opts: &PlayOptions,
) -> Result<QualAutoOutcome, ApiError> {
    let start = client.qualify_start(key, opts.difficulty).await?;
    let Some(qual_id) = str_field(&start, "qualMatchId").map(str::to_string) else {
        return Ok(QualAutoOutcome::NotStarted { start });
    };

    let run = play_rounds(client, key, &qual_id, opts.strategy, opts.max_rounds).await?;
    Ok(QualAutoOutcome::Played(run))
}
